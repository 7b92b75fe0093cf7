use crate::core::models::contact_map::SparseContactMap;
use crate::core::models::structure::{Atom, Structure};
use crate::core::utils::geometry::squared_distance;
use crate::engine::config::validate_threshold;
use crate::engine::error::EngineError;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// True if any atom of `a` lies within the squared threshold of any atom of `b`.
/// Stops at the first hit.
#[inline]
fn groups_in_contact(a: &[Atom], b: &[Atom], threshold_sq: f32) -> bool {
    a.iter()
        .any(|p| b.iter().any(|q| squared_distance(p, q) <= threshold_sq))
}

/// Partners `b > a` of residue `a`, in increasing order.
fn scan_row(residues: &[&[Atom]], a: usize, threshold_sq: f32) -> Vec<usize> {
    let group_a = residues[a];
    if group_a.is_empty() {
        return Vec::new();
    }
    (a + 1..residues.len())
        .filter(|&b| groups_in_contact(group_a, residues[b], threshold_sq))
        .collect()
}

/// Finds every residue pair with at least one atom pair within `threshold_angstrom`.
///
/// Every residue pair is examined; no sequence-locality shortcut is taken. Rows of the
/// pair matrix are independent and run in parallel when the `parallel` feature is on,
/// each producing only its own partner list.
#[instrument(skip_all, name = "contact_detection_task")]
pub fn run(structure: &Structure, threshold_angstrom: f32) -> Result<SparseContactMap, EngineError> {
    validate_threshold(threshold_angstrom)?;
    let threshold_sq = threshold_angstrom * threshold_angstrom;
    let residues: Vec<&[Atom]> = structure.residues().collect();
    let n = residues.len();

    info!(
        residues = n,
        atoms = structure.atom_count(),
        threshold = threshold_angstrom,
        "Detecting residue contacts."
    );

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<usize>> = (0..n)
        .into_par_iter()
        .map(|a| scan_row(&residues, a, threshold_sq))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<usize>> = (0..n)
        .map(|a| scan_row(&residues, a, threshold_sq))
        .collect();

    let pairs: Vec<(usize, usize)> = rows
        .into_iter()
        .enumerate()
        .flat_map(|(a, partners)| partners.into_iter().map(move |b| (a, b)))
        .collect();

    debug!(contacts = pairs.len(), "Contact scan complete.");
    Ok(SparseContactMap::from_sorted_pairs(n, pairs))
}
