use crate::cli::InspectArgs;
use crate::error::{CliError, Result};
use foldkit::core::io::pdb::PdbFile;
use foldkit::core::io::traits::StructureFile;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    info!("Loading structure from {:?}", &args.path);
    let (model, metadata) =
        PdbFile::read_from_path(&args.path).map_err(|e| CliError::FileParsing {
            path: args.path.clone(),
            source: e.into(),
        })?;

    println!("File:      {}", args.path.display());
    if let Some(header) = &metadata.header {
        println!("Header:    {}", header);
    }
    for remark in &metadata.remarks {
        println!("           {}", remark);
    }
    println!("Atoms:     {}", model.len());

    let chains: Vec<String> = model.chain_ids().iter().map(char::to_string).collect();
    println!("Chains:    {}", chains.join(", "));

    let sequence = model.one_letter_sequence();
    println!("Residues:  {}", sequence.chars().count());
    println!("Sequence:  {}", sequence);

    if let Some((min, max)) = model.bounding_box() {
        println!(
            "Bounds:    ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }
    Ok(())
}
