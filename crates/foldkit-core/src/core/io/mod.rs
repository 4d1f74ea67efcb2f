//! Provides input/output for the files foldkit produces and consumes.
//!
//! Structure files use the fixed-column PDB record layout through the
//! [`traits::StructureFile`] interface; measurement results are exported as CSV.

pub mod csv_export;
pub mod pdb;
pub mod traits;
