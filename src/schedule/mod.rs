//! Weekly schedule engine.
//!
//! Two collaborating pieces: the [`parser`] converts a catalog entry's opaque
//! time-encoding string into structured weekly [`crate::api::Session`]s, and
//! the [`conflict`] detector searches for the first overlapping session pair
//! between a candidate course and an existing selection.
//!
//! Both are pure functions over in-memory data: no I/O, no shared mutable
//! state, safe to call repeatedly and concurrently.

pub mod conflict;
pub mod parser;

pub use conflict::{check_conflict, ConflictDetail, ConflictOutcome};
pub use parser::parse_time_encoding;
