//! The heavy computations of the library.
//!
//! - [`contact_detection`] - residue contacts from atom coordinates
//! - [`alignment_remap`] - target contacts re-indexed into query coordinates

pub mod alignment_remap;
pub mod contact_detection;
