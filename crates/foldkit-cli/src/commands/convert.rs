use crate::cli::ConvertArgs;
use crate::error::Result;
use foldkit::core::utils::identifiers;
use foldkit::engine::error::EngineError;
use tracing::{info, warn};

pub fn run(args: ConvertArgs) -> Result<()> {
    let input = args.codes.join(" ");
    let converted = convert(&input, args.strict)?;
    info!(
        "Converted {} three-letter codes.",
        converted.chars().count()
    );
    println!("{}", converted);
    Ok(())
}

fn convert(input: &str, strict: bool) -> Result<String> {
    if strict {
        return Ok(identifiers::convert_three_to_one_strict(input).map_err(EngineError::from)?);
    }
    let converted = identifiers::convert_three_to_one(input);
    let unknown = converted
        .chars()
        .filter(|&c| c == identifiers::UNKNOWN_ONE_LETTER)
        .count();
    if unknown > 0 {
        warn!(
            "{} unknown code(s) replaced with '{}'.",
            unknown,
            identifiers::UNKNOWN_ONE_LETTER
        );
    }
    Ok(converted)
}
