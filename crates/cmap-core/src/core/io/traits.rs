use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing one on-disk representation.
///
/// Implementors handle the format itself against in-memory streams; the path-based
/// helpers take care of opening, buffering, and flushing files.
pub trait ContactFile {
    /// The in-memory value stored in the file.
    type Data;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a value from a buffered reader, consuming the whole stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream is truncated, malformed, or unreadable.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Data, Self::Error>;

    /// Writes a value to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded or the writer fails.
    fn write_to(data: &Self::Data, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads a value from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Data, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes a value to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(data: &Self::Data, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(data, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
