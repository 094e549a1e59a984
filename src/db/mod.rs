//! Databases for holding the data considered during a solve.

pub mod atom;
pub mod clause;
pub mod consequence_q;
pub mod keys;
pub mod trail;

pub use keys::ClauseKey;

/// The index of a decision level.
pub type LevelIndex = u32;
