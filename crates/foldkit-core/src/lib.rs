//! # foldkit Core Library
//!
//! Small, pure building blocks behind the foldkit tools: amino-acid code conversion,
//! sequence validation, synthetic backbone (CA trace) generation with structure-file
//! export, and calibrated pixel-to-physical measurements.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split used across our tools:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AminoAcid`, `Sequence`,
//!   `StructureModel`, `CalibrationRatio`), pure functions (residue conversion,
//!   percentages, the linear solver) and I/O (`PdbFile`, CSV export).
//!
//! - **[`engine`]: The Logic Core.** Configuration and policies, the validation rule set,
//!   the coordinate generator and progress reporting.
//!
//! - **[`workflows`]: The Public API.** End-to-end entry points that validate input, run
//!   the engine and hand back both the derived data and a serialized artifact.

pub mod core;
pub mod engine;
pub mod workflows;
