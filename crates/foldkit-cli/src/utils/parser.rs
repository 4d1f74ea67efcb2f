use foldkit::engine::config::CoordinatePolicy;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Invalid coordinate policy '{0}'. Expected 'helical[@radius]', 'linear[@step]' or 'random[@half-extent]' (e.g., 'linear@1.5')."
    )]
    InvalidCoordinatePolicy(String),

    #[error("Invalid number '{value}' in '{input}'.")]
    InvalidNumber { value: String, input: String },

    #[error("Component '{component}' cannot be empty in '{name}'.")]
    EmptyComponent {
        component: &'static str,
        name: String,
    },

    #[error("Invalid rectangle '{0}'. Expected 'WIDTHxHEIGHT' (e.g., '320x24').")]
    InvalidRectangle(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),
}

fn parse_number(value: &str, input: &str) -> Result<f64, ParseError> {
    value.trim().parse().map_err(|_| ParseError::InvalidNumber {
        value: value.to_string(),
        input: input.to_string(),
    })
}

/// Parses `helical`, `linear` or `random`, each optionally followed by `@<value>`
/// (helix radius, step, or cube half-extent, in angstroms).
pub fn parse_coordinate_policy(name: &str) -> Result<CoordinatePolicy, ParseError> {
    let trimmed = name.trim();
    let (kind, value) = match trimmed.split_once('@') {
        Some((kind, value)) => {
            if value.trim().is_empty() {
                return Err(ParseError::EmptyComponent {
                    component: "value",
                    name: name.to_string(),
                });
            }
            (kind, Some(parse_number(value, name)?))
        }
        None => (trimmed, None),
    };

    match kind.trim().to_lowercase().as_str() {
        "helical" | "helix" => {
            let mut policy = CoordinatePolicy::helical();
            if let (Some(r), CoordinatePolicy::Helical { radius, .. }) = (value, &mut policy) {
                *radius = r;
            }
            Ok(policy)
        }
        "linear" => Ok(CoordinatePolicy::linear(
            value.unwrap_or(CoordinatePolicy::DEFAULT_LINEAR_STEP),
        )),
        "random" => Ok(CoordinatePolicy::random(
            value.unwrap_or(CoordinatePolicy::DEFAULT_RANDOM_HALF_EXTENT),
        )),
        "" => Err(ParseError::EmptyComponent {
            component: "kind",
            name: name.to_string(),
        }),
        _ => Err(ParseError::InvalidCoordinatePolicy(name.to_string())),
    }
}

/// Parses `WIDTHxHEIGHT` into its two dimensions.
pub fn parse_rectangle(input: &str) -> Result<(f64, f64), ParseError> {
    let lowered = input.trim().to_lowercase();
    let (w, h) = lowered
        .split_once('x')
        .ok_or_else(|| ParseError::InvalidRectangle(input.to_string()))?;
    if w.trim().is_empty() || h.trim().is_empty() {
        return Err(ParseError::InvalidRectangle(input.to_string()));
    }
    Ok((parse_number(w, input)?, parse_number(h, input)?))
}

/// Splits `KEY=VALUE` at the first `=`.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(ParseError::InvalidKeyValue(pair.to_string())),
    }
}
