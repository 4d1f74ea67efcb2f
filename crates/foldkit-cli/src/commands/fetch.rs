use crate::cli::FetchArgs;
use crate::config::{self, CliOverrides};
use crate::error::{CliError, Result};
use crate::remote::RemoteClient;
use crate::utils::output;
use std::path::{Path, PathBuf};
use tracing::info;

pub async fn run(args: FetchArgs, config_path: Option<&Path>, set_values: &[String]) -> Result<()> {
    let id = args.id.trim().to_uppercase();
    if id.len() != 4 || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CliError::Argument(format!(
            "'{}' is not a four-character structure identifier",
            args.id
        )));
    }

    let app_config = config::load(config_path, set_values, &CliOverrides::default())?;
    let client = RemoteClient::from_env(app_config.remote_timeout)?;

    println!("Downloading {}...", id);
    let body = client.fetch_entry(&id).await?;

    let output_path = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.pdb", id)));
    output::write_text(Some(&output_path), &body)?;
    info!("Saved entry {} to {:?}", id, output_path);
    println!("✓ Entry {} written to: {}", id, output_path.display());
    Ok(())
}
