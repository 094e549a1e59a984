//! Abstract elements of a solve, and their representations.

pub mod atom;
pub mod clause;
pub mod consequence;
pub mod literal;
pub mod valuation;
