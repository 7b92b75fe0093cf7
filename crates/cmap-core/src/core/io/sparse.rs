//! Sparse contact map format.
//!
//! A `# residues: <n>` line carrying the map size, then CSV with a
//! `residue_a,residue_b` header and one contacting pair per row.

use super::error::FormatError;
use super::traits::ContactFile;
use crate::core::models::contact_map::SparseContactMap;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

const SIZE_PREFIX: &str = "# residues:";

#[derive(Debug, Serialize, Deserialize)]
struct ContactRecord {
    residue_a: usize,
    residue_b: usize,
}

pub struct SparseMapFile;

impl ContactFile for SparseMapFile {
    type Data = SparseContactMap;
    type Error = FormatError;

    fn read_from(reader: &mut impl BufRead) -> Result<SparseContactMap, FormatError> {
        let mut first_line = String::new();
        reader.read_line(&mut first_line)?;
        let size: usize = first_line
            .trim()
            .strip_prefix(SIZE_PREFIX)
            .and_then(|rest| rest.trim().parse().ok())
            .ok_or_else(|| {
                FormatError::Corrupt(format!(
                    "expected a '{SIZE_PREFIX} <n>' line, found '{}'",
                    first_line.trim()
                ))
            })?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(&mut *reader);
        let mut pairs = Vec::new();
        for record in csv_reader.deserialize::<ContactRecord>() {
            let record = record?;
            pairs.push((record.residue_a, record.residue_b));
        }

        Ok(SparseContactMap::from_pairs(size, pairs)?)
    }

    fn write_to(map: &SparseContactMap, writer: &mut impl Write) -> Result<(), FormatError> {
        writeln!(writer, "{SIZE_PREFIX} {}", map.size())?;
        let mut csv_writer = csv::Writer::from_writer(&mut *writer);
        if map.is_empty() {
            csv_writer.write_record(["residue_a", "residue_b"])?;
        }
        for &(residue_a, residue_b) in map.pairs() {
            csv_writer.serialize(ContactRecord {
                residue_a,
                residue_b,
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
