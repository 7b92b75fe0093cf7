use crate::cli::{FileKind, InspectArgs};
use crate::error::{CliError, Result};
use cmapper::core::io::{
    packed::PackedMapFile, sparse::SparseMapFile, structure::StructureFile, traits::ContactFile,
};
use std::fmt;
use std::path::Path;
use tracing::info;

/// Headline numbers of one file.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Structure { residues: usize, atoms: usize },
    ContactMap { residues: usize, contacts: usize },
}

impl Summary {
    /// Fraction of residue pairs in contact, `None` below two residues.
    pub fn density(&self) -> Option<f64> {
        match *self {
            Summary::ContactMap { residues, contacts } if residues >= 2 => {
                let pairs = residues * (residues - 1) / 2;
                Some(contacts as f64 / pairs as f64)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Structure { residues, atoms } => {
                write!(f, "residues: {residues}\natoms:    {atoms}")
            }
            Summary::ContactMap { residues, contacts } => {
                write!(f, "residues: {residues}\ncontacts: {contacts}")?;
                if let Some(density) = self.density() {
                    write!(f, "\ndensity:  {density:.4}")?;
                }
                Ok(())
            }
        }
    }
}

pub fn summarize(path: &Path, kind: FileKind) -> Result<Summary> {
    let parse_error = |e: cmapper::core::io::FormatError| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    };
    let summary = match kind {
        FileKind::Structure => {
            let structure = StructureFile::read_from_path(path).map_err(parse_error)?;
            Summary::Structure {
                residues: structure.residue_count(),
                atoms: structure.atom_count(),
            }
        }
        FileKind::Packed => {
            let map = PackedMapFile::read_from_path(path).map_err(parse_error)?;
            Summary::ContactMap {
                residues: map.size(),
                contacts: map.iter_pairs().count(),
            }
        }
        FileKind::Sparse => {
            let map = SparseMapFile::read_from_path(path).map_err(parse_error)?;
            Summary::ContactMap {
                residues: map.size(),
                contacts: map.len(),
            }
        }
    };
    Ok(summary)
}

pub fn run(args: InspectArgs) -> Result<()> {
    info!("Inspecting {:?} as {:?}", &args.path, args.kind);
    let summary = summarize(&args.path, args.kind)?;
    println!("{}\n{}", args.path.display(), summary);
    Ok(())
}
