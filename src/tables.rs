//! Rule-table registry.
//!
//! Each decision procedure names the tables it queries through [`TableKind`].
//! A [`Tables`] value loads every artifact once and hands out shared
//! read-only handles; construct it once and pass it to the procedures
//! (there are no global singletons). The bundled artifacts live in
//! `ruletables/` and are embedded into the binary; [`Tables::from_dir`]
//! loads the same file names from disk instead, for patched or experimental
//! tables.

use std::path::Path;
use std::sync::Arc;

use causalid_reach::Ruletable;
use rustc_hash::FxHashMap;

use crate::error::{CausalError, CausalResult};

/// The rule-table artifacts the procedures depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// CPDAG: targets for which no valid adjustment set exists.
    NotAmenable,
    /// CPDAG: possible ancestors, blocked at a removal set.
    PossibleAncestors,
    /// CPDAG: possible descendants, blocked at a removal set.
    PossibleDescendants,
    /// CPDAG: one-step directed parents.
    Parents,
    /// CPDAG: open definite-status walks in the proper backdoor graph.
    BackdoorConnectedCpdag,
    /// CPDAG: forbidden-set violations of a candidate adjustment set.
    ForbiddenPathConnected,
    /// CPDAG: open proper definite-status non-causal walks.
    NonCausalConnected,
    /// ADMG: reflexive ancestors.
    Ancestors,
    /// ADMG: reflexive descendants.
    Descendants,
    /// ADMG: closure under open walks within an ancestral set.
    Closure,
    /// ADMG: walk-based d-connection.
    DConnected,
    /// ADMG: unconditioned backdoor reachability.
    BackdoorConnectedAdmg,
    /// ADMG: front-door candidates with an uncloseable back-path to Y.
    FrontdoorForbidden,
    /// ADMG: directed reachability not intercepted by the candidate set.
    InterceptedPaths,
    /// ADMG: collider-path closure behind the optimal instrument.
    OptimalInstrument,
}

impl TableKind {
    pub const ALL: [TableKind; 15] = [
        TableKind::NotAmenable,
        TableKind::PossibleAncestors,
        TableKind::PossibleDescendants,
        TableKind::Parents,
        TableKind::BackdoorConnectedCpdag,
        TableKind::ForbiddenPathConnected,
        TableKind::NonCausalConnected,
        TableKind::Ancestors,
        TableKind::Descendants,
        TableKind::Closure,
        TableKind::DConnected,
        TableKind::BackdoorConnectedAdmg,
        TableKind::FrontdoorForbidden,
        TableKind::InterceptedPaths,
        TableKind::OptimalInstrument,
    ];

    /// File name of the artifact under `ruletables/`.
    pub fn file_name(self) -> &'static str {
        match self {
            TableKind::NotAmenable => "not_amenable_cpdag.txt",
            TableKind::PossibleAncestors => "possible_ancestors_cpdag.txt",
            TableKind::PossibleDescendants => "possible_descendants_cpdag.txt",
            TableKind::Parents => "parents_cpdag.txt",
            TableKind::BackdoorConnectedCpdag => "backdoor_connected_cpdag.txt",
            TableKind::ForbiddenPathConnected => "forbidden_path_connected_cpdag.txt",
            TableKind::NonCausalConnected => "non_causal_connected_cpdag.txt",
            TableKind::Ancestors => "ancestors_admg.txt",
            TableKind::Descendants => "descendants_admg.txt",
            TableKind::Closure => "closure_admg.txt",
            TableKind::DConnected => "dconnected_admg.txt",
            TableKind::BackdoorConnectedAdmg => "backdoor_connected_admg.txt",
            TableKind::FrontdoorForbidden => "frontdoor_forbidden_admg.txt",
            TableKind::InterceptedPaths => "intercepted_paths_admg.txt",
            TableKind::OptimalInstrument => "optimal_iv_admg.txt",
        }
    }

    fn builtin_text(self) -> &'static str {
        match self {
            TableKind::NotAmenable => include_str!("../ruletables/not_amenable_cpdag.txt"),
            TableKind::PossibleAncestors => {
                include_str!("../ruletables/possible_ancestors_cpdag.txt")
            }
            TableKind::PossibleDescendants => {
                include_str!("../ruletables/possible_descendants_cpdag.txt")
            }
            TableKind::Parents => include_str!("../ruletables/parents_cpdag.txt"),
            TableKind::BackdoorConnectedCpdag => {
                include_str!("../ruletables/backdoor_connected_cpdag.txt")
            }
            TableKind::ForbiddenPathConnected => {
                include_str!("../ruletables/forbidden_path_connected_cpdag.txt")
            }
            TableKind::NonCausalConnected => {
                include_str!("../ruletables/non_causal_connected_cpdag.txt")
            }
            TableKind::Ancestors => include_str!("../ruletables/ancestors_admg.txt"),
            TableKind::Descendants => include_str!("../ruletables/descendants_admg.txt"),
            TableKind::Closure => include_str!("../ruletables/closure_admg.txt"),
            TableKind::DConnected => include_str!("../ruletables/dconnected_admg.txt"),
            TableKind::BackdoorConnectedAdmg => {
                include_str!("../ruletables/backdoor_connected_admg.txt")
            }
            TableKind::FrontdoorForbidden => {
                include_str!("../ruletables/frontdoor_forbidden_admg.txt")
            }
            TableKind::InterceptedPaths => {
                include_str!("../ruletables/intercepted_paths_admg.txt")
            }
            TableKind::OptimalInstrument => include_str!("../ruletables/optimal_iv_admg.txt"),
        }
    }
}

/// Immutable registry of compiled rule tables.
///
/// Cheap to share: handles are `Arc`s and nothing is mutated after
/// construction, so concurrent readers are safe.
#[derive(Debug)]
pub struct Tables {
    tables: FxHashMap<TableKind, Arc<Ruletable>>,
}

impl Tables {
    /// Compiles the bundled rule-table artifacts.
    pub fn builtin() -> CausalResult<Tables> {
        let mut tables = FxHashMap::default();
        for kind in TableKind::ALL {
            let table = kind
                .builtin_text()
                .parse::<Ruletable>()
                .map_err(|source| CausalError::TableLoad {
                    name: kind.file_name().to_owned(),
                    source,
                })?;
            tracing::debug!(table = kind.file_name(), "compiled rule table");
            tables.insert(kind, Arc::new(table));
        }
        Ok(Tables { tables })
    }

    /// Loads every artifact from `dir`, expecting the bundled file names.
    pub fn from_dir(dir: impl AsRef<Path>) -> CausalResult<Tables> {
        let dir = dir.as_ref();
        let mut tables = FxHashMap::default();
        for kind in TableKind::ALL {
            let path = dir.join(kind.file_name());
            let table =
                Ruletable::from_file(&path).map_err(|source| CausalError::TableLoad {
                    name: path.display().to_string(),
                    source,
                })?;
            tables.insert(kind, Arc::new(table));
        }
        Ok(Tables { tables })
    }

    pub fn get(&self, kind: TableKind) -> &Arc<Ruletable> {
        // the constructors insert every variant
        &self.tables[&kind]
    }
}
