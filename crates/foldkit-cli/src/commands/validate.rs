use crate::cli::ValidateArgs;
use crate::config::{self, CliOverrides};
use crate::error::Result;
use crate::utils::input;
use foldkit::engine::config::InputFormat;
use foldkit::engine::error::EngineError;
use foldkit::engine::validation;
use std::path::Path;
use tracing::info;

pub fn run(args: ValidateArgs, config_path: Option<&Path>, set_values: &[String]) -> Result<()> {
    let overrides = CliOverrides {
        preset: args.policy,
        three_letter: args.three_letter,
        ..Default::default()
    };
    let app_config = config::load(config_path, set_values, &overrides)?;
    let policy = &app_config.fold.validation;

    let raw = input::read_sequence(&args.input)?;
    let text = match app_config.fold.input_format {
        InputFormat::ThreeLetter => {
            validation::convert_three_letter_input(&raw, policy.unknown_residues)?
        }
        InputFormat::OneLetter => raw,
    };

    let report = validation::validate(&text, policy);
    info!(valid = report.valid, "{}", report.message);

    match &report.sequence {
        Some(sequence) if report.valid => {
            println!("✓ {}", report.message);
            println!("{}", sequence);
            Ok(())
        }
        _ => Err(EngineError::Validation(report.message).into()),
    }
}
