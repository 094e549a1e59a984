//! A library for determining the satisfiability of boolean formulas written in conjunctive normal form.
//!
//! magpie_sat is a conflict-driven clause-learning solver with one twist: the branching
//! heuristic used during a solve is not fixed.
//! Instead, at epoch boundaries (measured in conflicts) a contextual bandit observes a
//! summary of the solver state, picks one of a small family of heuristics for the next
//! epoch, and is rewarded according to how the epoch went.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [context](crate::context).
//!
//! A context is built from a [configuration](crate::config), clauses are added either
//! [programatically](crate::context::GenericContext::add_clause) or through the
//! [DIMACS](crate::context::GenericContext::read_dimacs) representation of a formula,
//! and [solve](crate::context::GenericContext::solve) determines satisfiability.
//!
//! Internally, and at a high level, a solve is viewed in terms of a handful of databases:
//! - A formula is stored in a [clause database](crate::db::clause).
//! - A valuation, watch lists, and activities are stored in an [atom database](crate::db::atom).
//! - Assignments, in order of occurrence, are stored on a [trail](crate::db::trail).
//!
//! The algorithm for determining satisfiability is factored into a collection of
//! [procedures], while heuristic selection is split between the [heuristics] family,
//! the [bandit] controller, and the [epoch] state machine which ties the two together.
//!
//! # Example
//!
//! ```rust
//! # use magpie_sat::config::Config;
//! # use magpie_sat::context::Context;
//! # use magpie_sat::reports::Report;
//! let mut ctx = Context::from_config(Config::default());
//!
//! ctx.add_clause_ints(&[1, 2]).unwrap();
//! ctx.add_clause_ints(&[-1]).unwrap();
//!
//! assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
//! assert_eq!(ctx.value_of(2), Some(true));
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout the library, with a variety of targets
//! defined to help narrow output to relevant parts of a solve.
//! The targets are listed in [misc::log].
//!
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/)
//! logs related to epoch transitions can be filtered with `RUST_LOG=epoch …`.

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod structures;
pub mod types;

pub mod generic;

pub mod db;

pub mod bandit;
pub mod epoch;
pub mod heuristics;

pub mod misc;
pub mod reports;
pub mod resolution_buffer;
