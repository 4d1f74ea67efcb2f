use crate::cli::PredictArgs;
use crate::config::{self, CliOverrides};
use crate::error::Result;
use crate::remote::RemoteClient;
use crate::utils::{input, output};
use foldkit::engine::validation;
use std::path::Path;
use tracing::info;

pub async fn run(
    args: PredictArgs,
    config_path: Option<&Path>,
    set_values: &[String],
) -> Result<()> {
    let overrides = CliOverrides {
        preset: args.policy,
        seed: args.seed,
        ..Default::default()
    };
    let app_config = config::load(config_path, set_values, &overrides)?;

    let raw = input::read_sequence(&args.input)?;
    let sequence = validation::validate(&raw, &app_config.fold.validation).into_result()?;
    info!("Validated sequence of {} residues.", sequence.len());

    let client = RemoteClient::from_env(app_config.remote_timeout)?;
    let pdb = client
        .predict(&sequence, app_config.fold.generation.seed)
        .await?;

    output::write_text(args.output.as_deref(), &pdb)?;
    if let Some(path) = &args.output {
        eprintln!("✓ Predicted structure written to: {}", path.display());
    }
    Ok(())
}
