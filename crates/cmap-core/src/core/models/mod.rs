//! Data models shared across the library.
//!
//! A [`structure::Structure`] is the input of contact detection. A contact relation
//! over its residues can be held in three forms that convert freely into each other:
//!
//! - [`contact_map::SparseContactMap`] - the list of contacting pairs `(i, j)`, `i < j`;
//! - [`contact_map::DenseContactMap`] - a full symmetric boolean matrix with a true diagonal;
//! - [`packed::PackedContactMap`] - the strict upper triangle bit-packed eight cells per byte.
//!
//! [`alignment::AlignmentPair`] carries the two gapped strings consumed by the remapper.

pub mod alignment;
pub mod contact_map;
pub mod packed;
pub mod structure;
