//! # Engine Module
//!
//! The computational layer between the stateless models in [`crate::core`] and the
//! entry points in [`crate::workflows`].
//!
//! - **Configuration** ([`config`]) - Contact threshold and gap-filling parameters
//! - **Errors** ([`error`]) - The error type returned by every engine task
//! - **Progress** ([`progress`]) - Optional callback-based progress reporting
//! - **Tasks** ([`tasks`]) - The contact scan and the alignment remapping
//!
//! Each task call allocates its own buffers and returns an owned result; no state is
//! shared between calls, so callers may run tasks for different inputs concurrently.

pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;
