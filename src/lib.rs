//! `ferrosat`: a from-scratch CDCL Boolean satisfiability solver core.
//!
//! Two-watched-literal Boolean constraint propagation, first-UIP conflict
//! analysis with clause learning, non-chronological backtracking and a
//! VSIDS decision heuristic, wired together by [`solver::Solver`]. DIMACS
//! parsing and the CLI front end are edge tooling, not the core's business
//! (SPEC_FULL.md §1) — they live in [`dimacs`] and `src/bin/cli.rs`.
//!
//! ```
//! use ferrosat::solver::{SolveResult, Solver};
//!
//! let mut solver = Solver::new(3);
//! solver.add_clause(&[1, 2]);
//! solver.add_clause(&[-1, 3]);
//! solver.add_clause(&[-2, -3]);
//! assert_eq!(solver.solve(), SolveResult::Sat);
//! ```

pub mod analyze;
pub mod clause;
pub mod config;
pub mod dimacs;
pub mod error;
pub mod lit;
pub mod propagate;
pub mod solver;
pub mod trail;
pub mod vars;
pub mod vsids;
pub mod watch;

pub use config::Config;
pub use error::SolverError;
pub use lit::{Value, VarId};
pub use solver::{SolveResult, Solver};
