//! Binary structure format.
//!
//! Layout, little-endian throughout:
//! - 4-byte u32: `count`, the number of group boundaries (`residue_count + 1`)
//! - `count` × 4-byte u32: group boundaries; the last one is the atom count
//! - `atom_count` × 3 × 4-byte f32: positions, `x0 y0 z0 x1 y1 z1 ...`

use super::error::FormatError;
use super::traits::ContactFile;
use crate::core::models::structure::{Atom, Structure};
use nalgebra::Point3;
use std::io::{self, BufRead, Write};

const WORD: usize = 4;
const ATOM_BYTES: usize = 3 * WORD;

pub struct StructureFile;

fn truncated(what: &str) -> FormatError {
    FormatError::Io(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("file ends inside the {what}"),
    ))
}

fn read_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

fn read_f32(bytes: &[u8]) -> f32 {
    f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

impl ContactFile for StructureFile {
    type Data = Structure;
    type Error = FormatError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, FormatError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let header = bytes.get(..WORD).ok_or_else(|| truncated("header"))?;
        let count = read_u32(header) as usize;
        if count == 0 {
            return Err(FormatError::Corrupt(
                "boundary count is zero; at least the trailing sentinel is required".into(),
            ));
        }

        let boundaries_end = count
            .checked_mul(WORD)
            .and_then(|len| len.checked_add(WORD))
            .ok_or_else(|| truncated("boundary table"))?;
        let boundary_bytes = bytes
            .get(WORD..boundaries_end)
            .ok_or_else(|| truncated("boundary table"))?;
        let boundaries: Vec<u32> = boundary_bytes.chunks_exact(WORD).map(read_u32).collect();

        let atom_count = boundaries[count - 1] as usize;
        let payload = &bytes[boundaries_end..];
        if Some(payload.len()) != atom_count.checked_mul(ATOM_BYTES) {
            return Err(FormatError::Corrupt(format!(
                "trailing boundary declares {} atoms ({} bytes of coordinates) but {} bytes follow",
                atom_count,
                atom_count.saturating_mul(ATOM_BYTES),
                payload.len()
            )));
        }

        let atoms: Vec<Atom> = payload
            .chunks_exact(ATOM_BYTES)
            .map(|c| Point3::new(read_f32(&c[0..4]), read_f32(&c[4..8]), read_f32(&c[8..12])))
            .collect();

        Ok(Structure::new(atoms, boundaries)?)
    }

    fn write_to(structure: &Structure, writer: &mut impl Write) -> Result<(), FormatError> {
        let boundaries = structure.group_boundaries();
        let count = u32::try_from(boundaries.len()).map_err(|_| FormatError::Oversized {
            what: "group boundary table",
            len: boundaries.len(),
        })?;

        writer.write_all(&count.to_le_bytes())?;
        for boundary in boundaries {
            writer.write_all(&boundary.to_le_bytes())?;
        }
        for atom in structure.atoms() {
            for coord in [atom.x, atom.y, atom.z] {
                writer.write_all(&coord.to_le_bytes())?;
            }
        }
        Ok(())
    }
}
