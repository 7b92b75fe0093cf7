//! # Workflows Module
//!
//! The entry points a prediction pipeline calls. Each workflow loads what it needs,
//! runs the engine tasks, and hands back owned contact maps.
//!
//! - **Contact maps** ([`build`]) - `build_contact_map` for an in-memory structure or a
//!   structure file, returning both the sparse and the dense form
//! - **Alignment transfer** ([`align`]) - `remap_contact_map` for a target's contacts
//!   and a query/target alignment, plus file-based and batch variants

pub mod align;
pub mod build;
