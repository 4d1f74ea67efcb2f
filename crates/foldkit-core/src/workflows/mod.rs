//! # Workflows Module
//!
//! High-level entry points that run a complete foldkit pipeline for one user action.
//!
//! ## Overview
//!
//! Each workflow validates its input, drives the engine, reports progress and returns
//! both the derived data and the artifact a front end would offer for download.
//!
//! - **Fold Workflow** ([`fold`]) - Raw sequence text to a validated sequence, a synthetic
//!   CA trace and its structure-file text.
//! - **Measure Workflow** ([`measure`]) - Calibrated pixel (or physical) lengths to a
//!   total/segment measurement and its percentage.

pub mod fold;
pub mod measure;
