//! # cmapper Core Library
//!
//! Residue-level contact maps for protein chains, and their transfer from a
//! structurally characterized template onto an aligned sequence of unknown
//! structure.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, the dense,
//!   sparse and packed contact map forms, `AlignmentPair`), the distance kernel,
//!   and the binary/CSV file formats.
//!
//! - **[`engine`]: The Logic Core.** Configuration, error types, progress
//!   reporting, and the two heavy computations: the all-atom contact scan and
//!   the alignment-driven index remapping.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into the
//!   entry points a prediction pipeline calls: building a contact map for a
//!   structure, and remapping a template's contacts onto a query.

pub mod core;
pub mod engine;
pub mod workflows;
