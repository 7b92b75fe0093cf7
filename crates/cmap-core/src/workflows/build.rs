use crate::core::io::structure::StructureFile;
use crate::core::io::traits::ContactFile;
use crate::core::models::contact_map::{DenseContactMap, SparseContactMap};
use crate::core::models::structure::Structure;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::contact_detection;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Both forms of one structure's contact relation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMaps {
    pub sparse: SparseContactMap,
    pub dense: DenseContactMap,
}

/// Builds the residue contact map of `structure` at `threshold_angstrom`.
///
/// The connectivity is computed once, as sparse pairs; the dense form is derived from it.
pub fn build_contact_map(
    structure: &Structure,
    threshold_angstrom: f32,
) -> Result<ContactMaps, EngineError> {
    let sparse = contact_detection::run(structure, threshold_angstrom)?;
    let dense = DenseContactMap::from(&sparse);
    Ok(ContactMaps { sparse, dense })
}

/// Reads a structure file and returns its sparse contact map.
#[instrument(skip_all, name = "sparse_map_from_file", fields(path = %path.display()))]
pub fn load_sparse_contact_map(
    path: &Path,
    threshold_angstrom: f32,
) -> Result<SparseContactMap, EngineError> {
    let structure =
        StructureFile::read_from_path(path).map_err(|e| EngineError::file(path, e))?;
    info!(
        residues = structure.residue_count(),
        "Loaded structure for contact detection."
    );
    contact_detection::run(&structure, threshold_angstrom)
}

/// Reads a structure file and returns both forms of its contact map.
pub fn load_contact_map(path: &Path, threshold_angstrom: f32) -> Result<ContactMaps, EngineError> {
    let sparse = load_sparse_contact_map(path, threshold_angstrom)?;
    let dense = DenseContactMap::from(&sparse);
    Ok(ContactMaps { sparse, dense })
}

/// Outcome of building the contact map of one structure file.
#[derive(Debug)]
pub struct BuildResult {
    pub path: PathBuf,
    pub contact_maps: Result<ContactMaps, EngineError>,
}

/// Builds contact maps for many structure files, in parallel when the `parallel`
/// feature is on. Failures stay in their own [`BuildResult`]; order follows `paths`.
#[instrument(skip_all, name = "build_batch_workflow")]
pub fn build_batch(
    paths: &[PathBuf],
    threshold_angstrom: f32,
    reporter: &ProgressReporter,
) -> Vec<BuildResult> {
    info!(structures = paths.len(), "Building contact maps.");
    reporter.report(Progress::BatchStart {
        label: "Contact maps",
        total: paths.len() as u64,
    });

    let run_one = |path: &PathBuf| {
        let contact_maps = load_contact_map(path, threshold_angstrom);
        if let Err(e) = &contact_maps {
            warn!(path = %path.display(), error = %e, "Contact map build failed.");
        }
        reporter.report(Progress::ItemDone);
        BuildResult {
            path: path.clone(),
            contact_maps,
        }
    };

    #[cfg(feature = "parallel")]
    let results: Vec<BuildResult> = paths.par_iter().map(run_one).collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<BuildResult> = paths.iter().map(run_one).collect();

    reporter.report(Progress::BatchFinish);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::FormatError;
    use nalgebra::Point3;
    use tempfile::tempdir;

    fn helix_like() -> Structure {
        // Two atoms per residue, 3.8 Å apart along x, with a fold bringing the last
        // residue back next to the first.
        let mut atoms = Vec::new();
        for i in 0..5 {
            let x = i as f32 * 3.8;
            atoms.push(Point3::new(x, 0.0, 0.0));
            atoms.push(Point3::new(x, 1.5, 0.0));
        }
        atoms.push(Point3::new(0.0, 4.0, 0.0));
        atoms.push(Point3::new(0.0, 5.0, 0.0));
        Structure::new(atoms, vec![0, 2, 4, 6, 8, 10, 12]).unwrap()
    }

    #[test]
    fn dense_form_equals_dense_from_sparse() {
        let maps = build_contact_map(&helix_like(), 6.0).unwrap();
        assert_eq!(maps.dense, DenseContactMap::from(&maps.sparse));
        assert_eq!(maps.dense.to_sparse(), maps.sparse);
        assert_eq!(maps.dense.size(), 6);
    }

    #[test]
    fn folded_residue_contacts_distant_sequence_neighbour() {
        let maps = build_contact_map(&helix_like(), 6.0).unwrap();
        assert!(maps.dense.is_contact(0, 5));
        assert!(maps.dense.is_contact(0, 1));
        assert!(!maps.dense.is_contact(0, 2));
    }

    #[test]
    fn file_based_build_matches_in_memory_build() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chain.bin");
        let structure = helix_like();
        StructureFile::write_to_path(&structure, &path).unwrap();

        let from_file = load_contact_map(&path, 6.0).unwrap();
        assert_eq!(from_file, build_contact_map(&structure, 6.0).unwrap());
    }

    #[test]
    fn batch_build_reports_each_file_and_keeps_order() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.bin");
        StructureFile::write_to_path(&helix_like(), &good).unwrap();
        let paths = vec![good.clone(), dir.path().join("absent.bin"), good];

        let events = std::sync::Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));
        let results = build_batch(&paths, 6.0, &reporter);
        drop(reporter);

        assert_eq!(results.len(), 3);
        assert!(results[0].contact_maps.is_ok());
        assert!(results[1].contact_maps.is_err());
        assert_eq!(results[2].path, paths[2]);
        assert_eq!(
            results[2].contact_maps.as_ref().unwrap().dense.size(),
            6
        );

        let events = events.into_inner().unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(events[4], Progress::BatchFinish);
    }

    #[test]
    fn missing_structure_file_reports_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.bin");
        match load_sparse_contact_map(&path, 6.0) {
            Err(EngineError::File {
                path: reported,
                source: FormatError::Io(_),
            }) => assert!(reported.ends_with("missing.bin")),
            other => panic!("expected a file I/O error, got {other:?}"),
        }
    }
}
