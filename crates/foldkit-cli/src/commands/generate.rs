use crate::cli::GenerateArgs;
use crate::config::{self, CliOverrides};
use crate::error::Result;
use crate::utils::{input, output, progress::CliProgressHandler};
use foldkit::engine::progress::ProgressReporter;
use foldkit::workflows;
use std::path::Path;
use tracing::{debug, info};

pub async fn run(
    args: GenerateArgs,
    config_path: Option<&Path>,
    set_values: &[String],
) -> Result<()> {
    let overrides = CliOverrides {
        preset: args.policy,
        three_letter: args.three_letter,
        coords: args.coords.clone(),
        seed: args.seed,
        chain_id: args.chain_id,
        ..Default::default()
    };
    let app_config = config::load(config_path, set_values, &overrides)?;
    debug!("Resolved fold configuration: {:?}", &app_config.fold);

    let raw = input::read_sequence(&args.input)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the fold workflow...");
    let result = tokio::task::block_in_place(|| {
        workflows::fold::run(&raw, &app_config.fold, &reporter)
    });
    progress_handler.clear();
    let result = result?;

    output::write_text(args.output.as_deref(), &result.pdb)?;

    if let Some(path) = &args.sequence_out {
        output::write_text(Some(path), &format!("{}\n", result.sequence))?;
    }

    if let Some(path) = &args.output {
        eprintln!(
            "✓ {} pseudo-atoms ({}) written to: {}",
            result.model.len(),
            app_config.fold.generation.policy,
            path.display()
        );
    }
    if result.report.replaced > 0 {
        eprintln!("  {}", result.report.message);
    }
    Ok(())
}

