//! # Core Module
//!
//! Fundamental data structures and stateless algorithms.
//!
//! - **Molecular Representation** ([`models`]) - Atom coordinates grouped into residues,
//!   the three interchangeable contact map representations, and alignment pairs
//! - **File I/O** ([`io`]) - The structure binary format and the contact map formats
//! - **Geometry** ([`utils`]) - Squared-distance kernel and pairwise distance maps
//!
//! Nothing in this module holds state between calls; every function takes its inputs
//! by reference and returns owned results.

pub mod io;
pub mod models;
pub mod utils;
