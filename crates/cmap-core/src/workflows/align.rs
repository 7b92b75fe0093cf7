use super::build::load_sparse_contact_map;
use crate::core::models::alignment::AlignmentPair;
use crate::core::models::contact_map::{DenseContactMap, SparseContactMap};
use crate::engine::config::ContactConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::alignment_remap;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Transfers a target's contacts onto the query of a gapped alignment.
///
/// # Errors
///
/// Returns [`EngineError::InvalidAlignment`] if the two strings differ in length. This is
/// checked before any column is read.
pub fn remap_contact_map(
    query_alignment: &str,
    target_alignment: &str,
    target_contacts: &SparseContactMap,
    generated_contacts: u32,
) -> Result<DenseContactMap, EngineError> {
    let alignment = AlignmentPair::new(query_alignment, target_alignment)?;
    Ok(alignment_remap::run(
        &alignment,
        target_contacts,
        generated_contacts,
    ))
}

/// Computes the target's contacts from its structure file, then remaps them onto the query.
pub fn load_aligned_contact_map(
    structure_path: &Path,
    alignment: &AlignmentPair,
    config: &ContactConfig,
) -> Result<DenseContactMap, EngineError> {
    let target_contacts = load_sparse_contact_map(structure_path, config.threshold_angstrom)?;
    if alignment.target_length() != target_contacts.size() {
        warn!(
            path = %structure_path.display(),
            aligned = alignment.target_length(),
            residues = target_contacts.size(),
            "Alignment covers a different number of target residues than the structure holds."
        );
    }
    Ok(alignment_remap::run(
        alignment,
        &target_contacts,
        config.generated_contacts,
    ))
}

/// One query/target pair of a batch.
#[derive(Debug, Clone)]
pub struct AlignmentJob {
    pub id: String,
    pub structure_path: PathBuf,
    pub alignment: AlignmentPair,
}

/// Outcome of one [`AlignmentJob`].
#[derive(Debug)]
pub struct JobResult {
    pub id: String,
    pub contact_map: Result<DenseContactMap, EngineError>,
}

/// Runs independent alignment jobs, in parallel when the `parallel` feature is on.
///
/// A failing job does not stop the batch; its error is returned in its own
/// [`JobResult`]. Results keep the order of `jobs`.
#[instrument(skip_all, name = "remap_batch_workflow")]
pub fn remap_batch(
    jobs: &[AlignmentJob],
    config: &ContactConfig,
    reporter: &ProgressReporter,
) -> Vec<JobResult> {
    info!(jobs = jobs.len(), "Remapping contact maps for alignment batch.");
    reporter.report(Progress::BatchStart {
        label: "Aligned maps",
        total: jobs.len() as u64,
    });

    let run_job = |job: &AlignmentJob| {
        let contact_map = load_aligned_contact_map(&job.structure_path, &job.alignment, config);
        if let Err(e) = &contact_map {
            warn!(job = %job.id, error = %e, "Alignment job failed.");
        }
        reporter.report(Progress::ItemDone);
        JobResult {
            id: job.id.clone(),
            contact_map,
        }
    };

    #[cfg(feature = "parallel")]
    let results: Vec<JobResult> = jobs.par_iter().map(run_job).collect();

    #[cfg(not(feature = "parallel"))]
    let results: Vec<JobResult> = jobs.iter().map(run_job).collect();

    reporter.report(Progress::BatchFinish);
    let failed = results.iter().filter(|r| r.contact_map.is_err()).count();
    info!(
        succeeded = results.len() - failed,
        failed, "Alignment batch complete."
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::structure::StructureFile;
    use crate::core::io::traits::ContactFile;
    use crate::core::models::structure::Structure;
    use crate::workflows::build::build_contact_map;
    use nalgebra::Point3;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    fn chain(xs: &[f32]) -> Structure {
        let atoms = xs.iter().map(|&x| Point3::new(x, 0.0, 0.0)).collect();
        Structure::new(atoms, (0..=xs.len() as u32).collect()).unwrap()
    }

    #[test]
    fn mismatched_alignment_lengths_are_rejected() {
        let target = SparseContactMap::empty(3);
        let result = remap_contact_map("AC-T", "A-G", &target, 2);
        assert!(matches!(result, Err(EngineError::InvalidAlignment(_))));
    }

    #[test]
    fn identity_alignment_matches_the_built_map() {
        let structure = chain(&[0.0, 1.0, 10.0, 12.0]);
        let maps = build_contact_map(&structure, 6.0).unwrap();
        let remapped = remap_contact_map("MKLV", "MKLV", &maps.sparse, 2).unwrap();
        assert_eq!(remapped, maps.dense);
    }

    #[test]
    fn file_based_remap_uses_config_threshold_and_generation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("target.bin");
        StructureFile::write_to_path(&chain(&[0.0, 1.0, 10.0]), &path).unwrap();

        let alignment = AlignmentPair::new("AC-T", "A-GT").unwrap();
        let config = ContactConfig::builder()
            .threshold_angstrom(6.0)
            .generated_contacts(1)
            .build()
            .unwrap();
        let map = load_aligned_contact_map(&path, &alignment, &config).unwrap();

        // Target contact (0, 1) loses residue 1 to the query gap; the insertion at
        // query position 1 links to both neighbours.
        assert_eq!(map.size(), 3);
        assert!(map.is_contact(0, 1));
        assert!(map.is_contact(1, 2));
        assert!(!map.is_contact(0, 2));
    }

    #[test]
    fn batch_keeps_order_and_isolates_failures() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.bin");
        StructureFile::write_to_path(&chain(&[0.0, 1.0]), &good).unwrap();

        let jobs = vec![
            AlignmentJob {
                id: "q1".into(),
                structure_path: good.clone(),
                alignment: AlignmentPair::new("AB", "AB").unwrap(),
            },
            AlignmentJob {
                id: "q2".into(),
                structure_path: dir.path().join("missing.bin"),
                alignment: AlignmentPair::new("AB", "AB").unwrap(),
            },
            AlignmentJob {
                id: "q3".into(),
                structure_path: good,
                alignment: AlignmentPair::new("A-B", "AXB").unwrap(),
            },
        ];

        let done = AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if event == Progress::ItemDone {
                done.fetch_add(1, Ordering::Relaxed);
            }
        }));
        let results = remap_batch(&jobs, &ContactConfig::default(), &reporter);

        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2", "q3"]);
        assert!(results[0].contact_map.as_ref().unwrap().is_contact(0, 1));
        assert!(matches!(
            results[1].contact_map,
            Err(EngineError::File { .. })
        ));
        assert_eq!(results[2].contact_map.as_ref().unwrap().size(), 2);
        assert_eq!(done.load(Ordering::Relaxed), 3);
    }
}
