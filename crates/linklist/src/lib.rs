//! Public facade crate for `linklist`.
//!
//! This crate intentionally contains no IO or backend-specific logic.
//! It re-exports the backend-agnostic types/traits from `linklist-core`.

pub use linklist_core::*;
