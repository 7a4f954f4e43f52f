//! Rule-table reachability engine for causal graph queries.
//!
//! Graphical criteria from the causal inference literature reduce to
//! reachability questions of the form "which vertices can be reached from a
//! seed set along walks whose edge-type patterns a declarative rule table
//! accepts". This crate provides that single primitive: compile a
//! [`Ruletable`], index a [`Graph`] against it, assign roles with [`Sets`]
//! and run [`reach`].
//!
//! The domain layer composing these queries into adjustment, separator and
//! instrument procedures lives in the `causalid` crate.

mod dense;
mod expr;
pub mod instance;
pub mod reach;
pub mod ruletable;

pub use instance::{Graph, GraphError, Sets, SetsError};
pub use reach::reach;
pub use ruletable::{Ruletable, RuletableError};

/// Vertex identifier: an index into the caller's vertex universe `0..p`.
pub type Vertex = usize;
