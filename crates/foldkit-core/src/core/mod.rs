//! # Core Module
//!
//! Stateless data models, pure functions and file I/O shared by every foldkit workflow.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Amino acids, validated sequences, pseudo-atom structure
//!   models and calibrated measurements
//! - **File I/O** ([`io`]) - Structure-file (PDB) reading and writing, measurement CSV export
//! - **Identifiers** ([`utils::identifiers`]) - The fixed 20-entry residue code tables
//! - **Algebra** ([`algebra`]) - First-degree equation solving
//!
//! Nothing in this module holds hidden state.

pub mod algebra;
pub mod io;
pub mod models;
pub mod utils;
