use super::residue::{AminoAcid, ResidueError};
use crate::core::utils::identifiers::{self, UNKNOWN_ONE_LETTER};
use std::fmt;

/// An upper-case one-letter amino-acid sequence.
///
/// Every residue is either one of the 20 standard codes or the `X` sentinel. Length bounds
/// are a validation policy concern (see [`crate::engine::validation`]), not an invariant of
/// this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence(String);

impl Sequence {
    /// Builds a sequence from one-letter codes, upper-casing them.
    ///
    /// # Errors
    ///
    /// Returns [`ResidueError::InvalidOneLetter`] for the first character that is neither a
    /// standard code nor the `X` sentinel.
    pub fn new(codes: impl AsRef<str>) -> Result<Self, ResidueError> {
        let upper = codes.as_ref().to_ascii_uppercase();
        if let Some(bad) = upper
            .chars()
            .find(|&c| c != UNKNOWN_ONE_LETTER && !identifiers::is_standard_one_letter(c))
        {
            return Err(ResidueError::InvalidOneLetter(bad));
        }
        Ok(Self(upper))
    }

    pub(crate) fn from_normalized(codes: String) -> Self {
        Self(codes)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn residues(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }

    /// Residue names in sequence order, `UNK` for the sentinel.
    pub fn three_letter_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.chars().map(identifiers::one_to_three)
    }

    /// Typed residues; `None` marks an `X` position.
    pub fn amino_acids(&self) -> impl Iterator<Item = Option<AminoAcid>> + '_ {
        self.0.chars().map(AminoAcid::from_one_letter)
    }

    pub fn unknown_count(&self) -> usize {
        self.0.chars().filter(|&c| c == UNKNOWN_ONE_LETTER).count()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sequence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
