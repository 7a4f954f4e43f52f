//! Causalid
//!
//! Graph-theoretic decision procedures for causal inference over DAGs,
//! CPDAGs and ADMGs. Every procedure is a short composition of reachability
//! queries: a rule table describes which edge-traversal patterns keep a walk
//! "open", the engine computes the reachable vertices, and the procedures
//! chain such queries with plain set algebra.
//!
//! # Architecture
//!
//! - `causalid-reach` (workspace crate): the rule-table automaton. Opaque
//!   here; everything goes through the [`ReachOracle`] capability.
//! - [`tables`]: the bundled rule-table artifacts, loaded once and shared.
//! - [`graph`]: the edge-list model and the do-operator-style edge surgery.
//! - [`adjustment`], [`frontdoor`], [`separators`], [`instruments`],
//!   [`distance`]: the decision procedures.
//!
//! All procedures are pure functions of their inputs: no globals, no
//! interior mutability, deterministic results. "No valid set exists" is an
//! `Option::None`, never an error; errors are reserved for contract
//! violations and invalid inputs.
//!
//! # Example
//!
//! ```rust
//! use causalid::{frontdoor, EdgeMap, Tables, VertexSet};
//!
//! let tables = Tables::builtin().unwrap();
//! // x -> m -> y, confounded by a latent common cause of x and y
//! let g = EdgeMap::from_iter([("-->", vec![(0, 1), (1, 2), (3, 0), (3, 2)])]);
//! let fd = frontdoor(&tables, &g, &[0], &[2], &[], &[1]).unwrap();
//! assert_eq!(fd, Some(VertexSet::from_iter([1])));
//! ```

pub mod adjustment;
pub mod distance;
pub mod error;
pub mod frontdoor;
pub mod graph;
pub mod instruments;
pub mod oracle;
pub mod separators;
pub mod tables;

// Re-export main entry points for convenience
pub use adjustment::{is_cpdag_adjustment, optimal_adjustment};
pub use distance::parent_aid;
pub use error::{CausalError, CausalResult};
pub use frontdoor::frontdoor;
pub use graph::{EdgeMap, Vertex, VertexSet};
pub use instruments::{
    optimal_instrument, optimal_instrument_lenient, sound_and_complete_instrument, Instrument,
};
pub use oracle::{GraphView, ParsedGraph, ReachOracle, RoleAssignment};
pub use separators::{min_separator, nearest_separator};
pub use tables::{TableKind, Tables};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
