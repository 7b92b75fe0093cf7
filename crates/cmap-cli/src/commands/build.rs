use crate::cli::{BuildArgs, MapFormat};
use crate::config::{CliOverrides, PartialConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use cmapper::{
    core::io::{packed::PackedMapFile, sparse::SparseMapFile, traits::ContactFile},
    core::models::packed::PackedContactMap,
    engine::progress::ProgressReporter,
    workflows::build::{self, ContactMaps},
};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(args: BuildArgs) -> Result<()> {
    let resolved = PartialConfig::load(args.config.as_deref())?.merge_with_cli(&CliOverrides {
        threshold_angstrom: args.threshold,
        format: args.format,
        set_values: &args.set_values,
        ..Default::default()
    })?;
    info!(
        threshold = resolved.contacts.threshold_angstrom,
        format = ?resolved.format,
        "Resolved build configuration."
    );

    std::fs::create_dir_all(&args.output_dir)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Building contact maps for {} structure(s)...", args.input.len());
    let results = build::build_batch(
        &args.input,
        resolved.contacts.threshold_angstrom,
        &reporter,
    );

    let mut failed = 0usize;
    for result in results {
        let maps = match result.contact_maps {
            Ok(maps) => maps,
            Err(e) => {
                failed += 1;
                eprintln!("  ✗ {}: {}", result.path.display(), e);
                continue;
            }
        };
        let output_path = output_path_for(&result.path, &args.output_dir, resolved.format);
        write_contact_map(&maps, resolved.format, &output_path)?;
        info!(
            input = %result.path.display(),
            output = %output_path.display(),
            residues = maps.sparse.size(),
            contacts = maps.sparse.len(),
            "Wrote contact map."
        );
        println!(
            "  ✓ {} ({} residues, {} contacts) -> {}",
            result.path.display(),
            maps.sparse.size(),
            maps.sparse.len(),
            output_path.display()
        );
    }

    if failed > 0 {
        warn!(failed, "Some structures could not be processed.");
        return Err(CliError::Other(anyhow::anyhow!(
            "{} of {} structure(s) failed",
            failed,
            args.input.len()
        )));
    }
    Ok(())
}

fn write_contact_map(maps: &ContactMaps, format: MapFormat, path: &Path) -> Result<()> {
    let written = match format {
        MapFormat::Packed => {
            PackedMapFile::write_to_path(&PackedContactMap::from(&maps.dense), path)
        }
        MapFormat::Sparse => SparseMapFile::write_to_path(&maps.sparse, path),
    };
    written.map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn output_path_for(input: &Path, output_dir: &Path, format: MapFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "structure".to_string());
    output_dir.join(format!("{}.{}", stem, format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmapper::core::io::structure::StructureFile;
    use cmapper::core::models::structure::Structure;
    use nalgebra::Point3;

    fn write_chain(path: &Path, xs: &[f32]) {
        let atoms = xs.iter().map(|&x| Point3::new(x, 0.0, 0.0)).collect();
        let structure = Structure::new(atoms, (0..=xs.len() as u32).collect()).unwrap();
        StructureFile::write_to_path(&structure, path).unwrap();
    }

    fn args(input: Vec<PathBuf>, output_dir: PathBuf, format: MapFormat) -> BuildArgs {
        BuildArgs {
            input,
            output_dir,
            config: None,
            threshold: None,
            format: Some(format),
            set_values: vec![],
        }
    }

    #[test]
    fn output_path_uses_input_stem_and_format_extension() {
        let out = Path::new("/tmp/maps");
        assert_eq!(
            output_path_for(Path::new("data/1abc.bin"), out, MapFormat::Packed),
            out.join("1abc.cmap")
        );
        assert_eq!(
            output_path_for(Path::new("1abc"), out, MapFormat::Sparse),
            out.join("1abc.csv")
        );
    }

    #[test]
    fn writes_packed_maps_for_every_input() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        write_chain(&a, &[0.0, 1.0, 10.0]);
        write_chain(&b, &[0.0, 20.0]);
        let out = dir.path().join("maps");

        run(args(vec![a, b], out.clone(), MapFormat::Packed)).unwrap();

        let map_a = PackedMapFile::read_from_path(out.join("a.cmap")).unwrap();
        assert_eq!(map_a.size(), 3);
        assert!(map_a.get(0, 1));
        assert!(!map_a.get(1, 2));
        let map_b = PackedMapFile::read_from_path(out.join("b.cmap")).unwrap();
        assert_eq!(map_b.iter_pairs().count(), 0);
    }

    #[test]
    fn writes_sparse_maps() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bin");
        write_chain(&a, &[0.0, 1.0, 10.0]);
        let out = dir.path().join("maps");

        run(args(vec![a], out.clone(), MapFormat::Sparse)).unwrap();

        let sparse = SparseMapFile::read_from_path(out.join("a.csv")).unwrap();
        assert_eq!(sparse.size(), 3);
        assert_eq!(sparse.pairs(), &[(0, 1)]);
    }

    #[test]
    fn failed_input_fails_the_command_but_writes_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bin");
        write_chain(&a, &[0.0, 1.0]);
        let out = dir.path().join("maps");

        let result = run(args(
            vec![a, dir.path().join("missing.bin")],
            out.clone(),
            MapFormat::Packed,
        ));
        assert!(matches!(result, Err(CliError::Other(_))));
        assert!(out.join("a.cmap").exists());
    }
}
