//! # Core Models Module
//!
//! Data structures for the two foldkit pipelines.
//!
//! ## Key Components
//!
//! - [`residue`] - The 20 standard amino acids and their one/three-letter codes
//! - [`sequence`] - A normalized one-letter amino-acid sequence
//! - [`structure`] - A synthetic structure: one pseudo-atom per residue
//! - [`measurement`] - Calibration ratios, length units and measurement results
//!
//! ## Usage
//!
//! ```ignore
//! use foldkit::core::models::{sequence::Sequence, structure::StructureModel};
//! use nalgebra::Point3;
//!
//! let sequence = Sequence::new("ACDEFGH")?;
//! let mut model = StructureModel::with_capacity(sequence.len());
//! for (i, residue) in sequence.three_letter_codes().enumerate() {
//!     model.push_residue(residue, 'A', Point3::new(i as f64 * 1.5, 0.0, 0.0));
//! }
//! ```

pub mod measurement;
pub mod residue;
pub mod sequence;
pub mod structure;
