//! Error type for the crate's fallible entry points (SPEC_FULL.md §4.9).
//!
//! Grounded in the rest of the example pack's `thiserror` usage
//! (`jix-varisat`'s CLI and solver crates both derive their error enums this
//! way) rather than the teacher, which has no dedicated error type of its
//! own.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    /// A clause with zero literals was added. An empty clause is
    /// unsatisfiable by definition, but admitting it would need to special
    /// case the watch-list machinery (every clause needs at least one
    /// literal to watch), so it is rejected instead.
    #[error("clause has no literals")]
    EmptyClause,

    /// A literal's variable index was `0` or exceeded `num_vars`. Out of
    /// range indexing into `VarTable`/`WatchLists` would otherwise panic
    /// instead of reporting a clean error.
    #[error("variable {var} out of range 1..={num_vars}")]
    VarOutOfRange { var: i64, num_vars: usize },

    /// A DIMACS CNF file did not parse (see `dimacs` module; out of the
    /// solver core's scope, kept for the CLI binary).
    #[error("invalid DIMACS input: {0}")]
    Dimacs(String),
}
