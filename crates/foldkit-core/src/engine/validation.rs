use super::config::{UnknownResiduePolicy, ValidationPolicy};
use super::error::EngineError;
use crate::core::models::sequence::Sequence;
use crate::core::utils::identifiers::{self, UNKNOWN_ONE_LETTER};
use tracing::{debug, warn};

/// Outcome of validating raw sequence text. Invalid input is described, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub message: String,
    /// The accepted sequence; `None` when `valid` is false.
    pub sequence: Option<Sequence>,
    /// Offending characters, each listed once in order of first occurrence.
    pub invalid_chars: Vec<char>,
    /// Number of positions replaced with `X` under [`UnknownResiduePolicy::Replace`].
    pub replaced: usize,
}

impl ValidationReport {
    fn rejected(message: String, invalid_chars: Vec<char>) -> Self {
        Self {
            valid: false,
            message,
            sequence: None,
            invalid_chars,
            replaced: 0,
        }
    }

    pub fn into_result(self) -> Result<Sequence, EngineError> {
        match self.sequence {
            Some(sequence) if self.valid => Ok(sequence),
            _ => Err(EngineError::Validation(self.message)),
        }
    }
}

/// Turns whitespace-separated three-letter tokens into one-letter text. Under
/// [`UnknownResiduePolicy::Replace`] unknown tokens become `X`; under `Reject` the first
/// unknown token is an error.
pub fn convert_three_letter_input(
    raw: &str,
    policy: UnknownResiduePolicy,
) -> Result<String, EngineError> {
    match policy {
        UnknownResiduePolicy::Replace => {
            let converted = identifiers::convert_three_to_one(raw);
            let unknown = converted
                .chars()
                .filter(|&c| c == UNKNOWN_ONE_LETTER)
                .count();
            if unknown > 0 {
                warn!(unknown, "Unknown residue codes replaced with '{}'", UNKNOWN_ONE_LETTER);
            }
            Ok(converted)
        }
        UnknownResiduePolicy::Reject => Ok(identifiers::convert_three_to_one_strict(raw)?),
    }
}

/// Drops every non-alphabetic character and upper-cases ASCII letters.
///
/// Non-ASCII letters are kept exactly as typed so that validation reports them
/// instead of folding them into residue codes (`ß` would otherwise become `SS`).
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn format_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Normalizes `raw` and checks it against `policy`.
///
/// Rules are applied in order: empty input, characters outside the 20-residue alphabet,
/// minimum length, maximum length. The first failing rule determines the message.
pub fn validate(raw: &str, policy: &ValidationPolicy) -> ValidationReport {
    let mut normalized = normalize(raw);
    debug!(
        raw_len = raw.len(),
        normalized_len = normalized.chars().count(),
        "Normalized sequence input"
    );

    if normalized.is_empty() {
        return ValidationReport::rejected("Sequence is empty.".to_string(), Vec::new());
    }

    let mut invalid_chars = Vec::new();
    for c in normalized.chars() {
        if !identifiers::is_standard_one_letter(c) && !invalid_chars.contains(&c) {
            invalid_chars.push(c);
        }
    }

    let mut replaced = 0;
    if !invalid_chars.is_empty() {
        match policy.unknown_residues {
            UnknownResiduePolicy::Reject => {
                let message = format!("Invalid characters found: {}", format_chars(&invalid_chars));
                return ValidationReport::rejected(message, invalid_chars);
            }
            UnknownResiduePolicy::Replace => {
                normalized = normalized
                    .chars()
                    .map(|c| {
                        if identifiers::is_standard_one_letter(c) {
                            c
                        } else {
                            replaced += 1;
                            UNKNOWN_ONE_LETTER
                        }
                    })
                    .collect();
                warn!(
                    replaced,
                    "Replaced characters {} with '{}'",
                    format_chars(&invalid_chars),
                    UNKNOWN_ONE_LETTER
                );
            }
        }
    }

    let len = normalized.len();
    if let Some(min) = policy.min_length {
        if len < min {
            return ValidationReport::rejected(
                format!("Sequence is too short: {} residues (minimum {}).", len, min),
                invalid_chars,
            );
        }
    }
    if let Some(max) = policy.max_length {
        if len > max {
            return ValidationReport::rejected(
                format!("Sequence is too long: {} residues (maximum {}).", len, max),
                invalid_chars,
            );
        }
    }

    let message = if replaced > 0 {
        format!(
            "Valid sequence of {} residues ({} replaced with '{}').",
            len, replaced, UNKNOWN_ONE_LETTER
        )
    } else {
        format!("Valid sequence of {} residues.", len)
    };

    ValidationReport {
        valid: true,
        message,
        sequence: Some(Sequence::from_normalized(normalized)),
        invalid_chars,
        replaced,
    }
}
