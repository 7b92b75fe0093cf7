use nalgebra::Point3;
use std::ops::Range;
use thiserror::Error;

/// A single atom position in Ångström.
pub type Atom = Point3<f32>;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StructureError {
    #[error("Group boundaries must contain at least the trailing sentinel")]
    MissingSentinel,
    #[error("Group boundaries decrease at residue {residue} ({previous} > {current})")]
    DecreasingBoundary {
        residue: usize,
        previous: u32,
        current: u32,
    },
    #[error("Trailing boundary {sentinel} does not match atom count {atom_count}")]
    SentinelMismatch { sentinel: u32, atom_count: usize },
    #[error("Structure is too large for 32-bit group boundaries ({0} atoms)")]
    TooManyAtoms(usize),
}

/// One protein chain: atom positions grouped into residues.
///
/// `group_boundaries` has `residue_count + 1` entries. Residue `i` owns the atoms in
/// `group_boundaries[i]..group_boundaries[i + 1]`, and the last entry equals the atom count.
/// Two equal consecutive boundaries describe an empty residue, which is legal and never
/// takes part in a contact.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    atoms: Vec<Atom>,
    group_boundaries: Vec<u32>,
}

impl Structure {
    pub fn new(atoms: Vec<Atom>, group_boundaries: Vec<u32>) -> Result<Self, StructureError> {
        validate_boundaries(&group_boundaries, atoms.len())?;
        Ok(Self {
            atoms,
            group_boundaries,
        })
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn group_boundaries(&self) -> &[u32] {
        &self.group_boundaries
    }

    pub fn residue_count(&self) -> usize {
        self.group_boundaries.len() - 1
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residue_count() == 0
    }

    /// Atom index range of residue `index`, or `None` past the last residue.
    pub fn residue_range(&self, index: usize) -> Option<Range<usize>> {
        let start = *self.group_boundaries.get(index)? as usize;
        let end = *self.group_boundaries.get(index + 1)? as usize;
        Some(start..end)
    }

    pub fn residue_atoms(&self, index: usize) -> Option<&[Atom]> {
        self.residue_range(index).map(|range| &self.atoms[range])
    }

    pub fn residues(&self) -> impl ExactSizeIterator<Item = &[Atom]> + '_ {
        self.group_boundaries
            .windows(2)
            .map(|w| &self.atoms[w[0] as usize..w[1] as usize])
    }

    pub fn into_parts(self) -> (Vec<Atom>, Vec<u32>) {
        (self.atoms, self.group_boundaries)
    }
}

pub(crate) fn validate_boundaries(
    boundaries: &[u32],
    atom_count: usize,
) -> Result<(), StructureError> {
    let Some(&sentinel) = boundaries.last() else {
        return Err(StructureError::MissingSentinel);
    };
    if let Some((i, w)) = boundaries
        .windows(2)
        .enumerate()
        .find(|(_, w)| w[0] > w[1])
    {
        return Err(StructureError::DecreasingBoundary {
            residue: i,
            previous: w[0],
            current: w[1],
        });
    }
    if sentinel as usize != atom_count {
        return Err(StructureError::SentinelMismatch {
            sentinel,
            atom_count,
        });
    }
    Ok(())
}

/// Incrementally assembles a [`Structure`] residue by residue, the way an upstream
/// coordinate parser emits atoms.
#[derive(Debug)]
pub struct StructureBuilder {
    atoms: Vec<Atom>,
    group_boundaries: Vec<u32>,
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self {
            atoms: Vec::new(),
            group_boundaries: Vec::new(),
        }
    }

    fn next_boundary(&self) -> Result<u32, StructureError> {
        u32::try_from(self.atoms.len()).map_err(|_| StructureError::TooManyAtoms(self.atoms.len()))
    }

    /// Opens a new residue. Atoms added afterwards belong to it.
    pub fn start_residue(&mut self) -> Result<&mut Self, StructureError> {
        let boundary = self.next_boundary()?;
        self.group_boundaries.push(boundary);
        Ok(self)
    }

    /// Adds an atom to the current residue, opening the first residue if none is open.
    pub fn add_atom(&mut self, position: Atom) -> Result<&mut Self, StructureError> {
        if self.group_boundaries.is_empty() {
            self.start_residue()?;
        }
        self.atoms.push(position);
        Ok(self)
    }

    pub fn build(mut self) -> Result<Structure, StructureError> {
        let sentinel = self.next_boundary()?;
        self.group_boundaries.push(sentinel);
        Ok(Structure {
            atoms: self.atoms,
            group_boundaries: self.group_boundaries,
        })
    }
}
