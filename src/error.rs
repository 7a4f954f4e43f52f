//! Error taxonomy for the decision procedures.
//!
//! Negative-but-valid outcomes ("no adjustment set", "no instrument", ...)
//! are *not* errors: procedures return `Option` for those. The variants here
//! cover contract violations at the oracle boundary and defensively rejected
//! inputs.

use causalid_reach::{GraphError, RuletableError, SetsError};
use thiserror::Error;

/// Errors that can occur while running a decision procedure.
#[derive(Error, Debug)]
pub enum CausalError {
    /// A rule-table artifact failed to load or parse.
    #[error("failed to load rule table '{name}': {source}")]
    TableLoad {
        name: String,
        #[source]
        source: RuletableError,
    },

    /// The graph references edge types the rule table does not declare.
    #[error("graph does not match the rule table schema: {0}")]
    Schema(#[from] GraphError),

    /// A role assignment used an unknown role name or duplicated a vertex.
    #[error("invalid role assignment: {0}")]
    Roles(#[from] SetsError),

    /// A pre-parsed graph was queried with a table whose edge vocabulary
    /// differs from the one it was built against.
    #[error("parsed graph was built against '{built}' but queried with the incompatible table '{queried}'")]
    TableMismatch { built: String, queried: String },

    /// Caller-supplied vertices or sets violate the procedure's preconditions.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience alias used throughout the crate.
pub type CausalResult<T> = Result<T, CausalError>;

/// Rejects overlapping role sets where a criterion requires disjointness.
pub(crate) fn ensure_disjoint(
    left_name: &str,
    left: &[usize],
    right_name: &str,
    right: &[usize],
) -> CausalResult<()> {
    if let Some(v) = left.iter().find(|v| right.contains(v)) {
        return Err(CausalError::InvalidArgument(format!(
            "{left_name} and {right_name} must be disjoint, both contain vertex {v}"
        )));
    }
    Ok(())
}

/// Rejects vertices outside the universe `0..p`.
pub(crate) fn ensure_in_range(name: &str, vertices: &[usize], p: usize) -> CausalResult<()> {
    if let Some(v) = vertices.iter().find(|&&v| v >= p) {
        return Err(CausalError::InvalidArgument(format!(
            "vertex {v} in {name} is outside the universe 0..{p}"
        )));
    }
    Ok(())
}
