//! Provides input/output for the on-disk forms of structures and contact maps.
//!
//! Every format implements the [`traits::ContactFile`] trait, which reads from a buffered
//! reader and writes to any writer, and adds path-based helpers on top. Files are read
//! or written in full inside one call and closed on every exit path.
//!
//! - [`structure`] - atom coordinates and residue boundaries, little-endian binary
//! - [`packed`] - a dense contact map as a bit-packed upper triangle
//! - [`sparse`] - a sparse contact map as CSV pairs

pub mod error;
pub mod packed;
pub mod sparse;
pub mod structure;
pub mod traits;

pub use error::FormatError;
