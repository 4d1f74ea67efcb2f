use crate::core::models::residue::ResidueError;
use phf::{Map, phf_map};

/// Sentinel one-letter code for residues that are not one of the 20 standard amino acids.
pub const UNKNOWN_ONE_LETTER: char = 'X';
/// Residue name written for the [`UNKNOWN_ONE_LETTER`] sentinel.
pub const UNKNOWN_THREE_LETTER: &str = "UNK";

/// The 20-symbol one-letter alphabet, in alphabetical order.
pub const ALPHABET: &str = "ACDEFGHIKLMNPQRSTVWY";

static THREE_TO_ONE: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
};

static ONE_TO_THREE: Map<char, &'static str> = phf_map! {
    'A' => "ALA", 'R' => "ARG", 'N' => "ASN", 'D' => "ASP", 'C' => "CYS",
    'Q' => "GLN", 'E' => "GLU", 'G' => "GLY", 'H' => "HIS", 'I' => "ILE",
    'L' => "LEU", 'K' => "LYS", 'M' => "MET", 'F' => "PHE", 'P' => "PRO",
    'S' => "SER", 'T' => "THR", 'W' => "TRP", 'Y' => "TYR", 'V' => "VAL",
};

pub fn is_standard_one_letter(code: char) -> bool {
    ONE_TO_THREE.contains_key(&code)
}

/// Looks up a three-letter token (case-insensitive). Unmapped tokens yield `'X'`.
pub fn three_to_one(token: &str) -> char {
    let upper = token.trim().to_ascii_uppercase();
    THREE_TO_ONE
        .get(upper.as_str())
        .copied()
        .unwrap_or(UNKNOWN_ONE_LETTER)
}

/// Residue name for a one-letter code; anything outside the alphabet becomes `UNK`.
pub fn one_to_three(code: char) -> &'static str {
    ONE_TO_THREE
        .get(&code.to_ascii_uppercase())
        .copied()
        .unwrap_or(UNKNOWN_THREE_LETTER)
}

/// Converts whitespace-separated three-letter tokens into a one-letter string.
///
/// The output always has one character per input token. Unknown tokens are replaced with
/// [`UNKNOWN_ONE_LETTER`] rather than reported.
pub fn convert_three_to_one(input: &str) -> String {
    input.split_whitespace().map(three_to_one).collect()
}

/// Like [`convert_three_to_one`], but fails on the first token outside the table.
///
/// # Errors
///
/// Returns [`ResidueError::UnknownCode`] with the offending token and its 1-based position.
pub fn convert_three_to_one_strict(input: &str) -> Result<String, ResidueError> {
    input
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| match three_to_one(token) {
            UNKNOWN_ONE_LETTER => Err(ResidueError::UnknownCode {
                token: token.to_string(),
                position: i + 1,
            }),
            code => Ok(code),
        })
        .collect()
}
