//! Packed contact map format.
//!
//! A 4-byte little-endian u32 residue count `n`, followed by the `ceil(n(n-1)/2 / 8)`
//! bytes of [`PackedContactMap`]. Unused bits of the final byte are zero.

use super::error::FormatError;
use super::traits::ContactFile;
use crate::core::models::packed::{PackedContactMap, triangle_bytes};
use std::io::{self, BufRead, Write};

pub struct PackedMapFile;

impl ContactFile for PackedMapFile {
    type Data = PackedContactMap;
    type Error = FormatError;

    fn read_from(reader: &mut impl BufRead) -> Result<PackedContactMap, FormatError> {
        let mut header = [0u8; 4];
        reader.read_exact(&mut header)?;
        let size = u32::from_le_bytes(header) as usize;

        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let expected = triangle_bytes(size);
        if bytes.len() < expected {
            return Err(FormatError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "packed map of {size} residues needs {expected} bytes, found {}",
                    bytes.len()
                ),
            )));
        }
        PackedContactMap::from_bytes(size, bytes).ok_or_else(|| {
            FormatError::Corrupt(format!(
                "trailing bytes after the {expected}-byte payload of a {size}-residue map"
            ))
        })
    }

    fn write_to(map: &PackedContactMap, writer: &mut impl Write) -> Result<(), FormatError> {
        let size = u32::try_from(map.size()).map_err(|_| FormatError::Oversized {
            what: "residue count",
            len: map.size(),
        })?;
        writer.write_all(&size.to_le_bytes())?;
        writer.write_all(map.as_bytes())?;
        Ok(())
    }
}
