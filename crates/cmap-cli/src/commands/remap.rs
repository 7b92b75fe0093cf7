use crate::cli::RemapArgs;
use crate::config::{CliOverrides, PartialConfig};
use crate::error::{CliError, Result};
use cmapper::{
    core::io::{packed::PackedMapFile, sparse::SparseMapFile, traits::ContactFile},
    core::models::{alignment::AlignmentPair, packed::PackedContactMap},
    engine::error::EngineError,
    workflows::align,
};
use tracing::info;

pub fn run(args: RemapArgs) -> Result<()> {
    let resolved = PartialConfig::load(args.config.as_deref())?.merge_with_cli(&CliOverrides {
        threshold_angstrom: args.threshold,
        generated_contacts: args.generated_contacts,
        set_values: &args.set_values,
        ..Default::default()
    })?;

    let alignment = AlignmentPair::new(&args.query_alignment, &args.target_alignment)
        .map_err(EngineError::from)?;
    info!(
        columns = alignment.len(),
        query_length = alignment.query_length(),
        target_length = alignment.target_length(),
        "Parsed alignment."
    );

    let contact_map = match (&args.target.structure, &args.target.sparse) {
        (Some(structure_path), _) => {
            info!("Computing target contacts from {:?}", structure_path);
            align::load_aligned_contact_map(structure_path, &alignment, &resolved.contacts)?
        }
        (None, Some(sparse_path)) => {
            info!("Loading target contacts from {:?}", sparse_path);
            let target_contacts =
                SparseMapFile::read_from_path(sparse_path).map_err(|e| CliError::FileParsing {
                    path: sparse_path.clone(),
                    source: e.into(),
                })?;
            align::remap_contact_map(
                &args.query_alignment,
                &args.target_alignment,
                &target_contacts,
                resolved.contacts.generated_contacts,
            )?
        }
        (None, None) => {
            return Err(CliError::Argument(
                "either --structure or --sparse is required".to_string(),
            ));
        }
    };

    PackedMapFile::write_to_path(&PackedContactMap::from(&contact_map), &args.output).map_err(
        |e| CliError::FileParsing {
            path: args.output.clone(),
            source: e.into(),
        },
    )?;

    println!(
        "✓ Query contact map ({} residues, {} contacts) written to: {}",
        contact_map.size(),
        contact_map.contact_count(),
        args.output.display()
    );
    Ok(())
}
