//! # Engine Module
//!
//! Policy-driven logic for the sequence pipeline: the validation rule set, the synthetic
//! coordinate generator and the configuration that steers both.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Validation policies, coordinate policies and builders
//! - **Validation** ([`validation`]) - Normalization and rule evaluation with readable reports
//! - **Generation** ([`generator`]) - Helical, linear and random CA-trace placement
//! - **Progress Monitoring** ([`progress`]) - Phase reporting for front ends
//! - **Error Handling** ([`error`]) - Engine-level error type
//!
//! ## Key Capabilities
//!
//! - **Configurable strictness**: length bounds and unknown-residue handling are policy,
//!   not hard-coded behavior
//! - **Reproducible output**: seeded generation yields identical coordinates
//! - **Reported, not thrown**: validation returns a report for every input

pub mod config;
pub mod error;
pub mod generator;
pub mod progress;
pub mod validation;
