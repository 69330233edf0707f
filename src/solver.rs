//! Top-level search driver (§4.8): propagate → analyze → backtrack → decide.
//! This is the crate's public API; every other module is a private
//! implementation detail wired together here, the way the teacher's
//! `solver::State` owns `Trail`/`LiteralWatcher`/`HeuristicVSIDS` directly
//! rather than through statics.

use crate::analyze;
use crate::clause::{Clause, ClauseDatabase, ClauseId};
use crate::config::Config;
use crate::error::SolverError;
use crate::lit::{Lit, Value, VarId};
use crate::propagate;
use crate::trail::Trail;
use crate::vars::{Reason, VarTable};
use crate::vsids::Vsids;
use crate::watch::WatchLists;
use prettytable::{row, Table};

#[cfg(feature = "logging")]
use log::{debug, trace};

/// The two terminal outcomes of a solve (§6). Replaces the raw `0`/`1`
/// return code of the distilled spec's boundary with an idiomatic enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveResult {
    Sat,
    Unsat,
}

/// Running counters kept across a solve, styled directly on the teacher's
/// `StateStatistics` and rendered the same way at the CLI boundary.
#[derive(Debug, Clone)]
pub struct SolverStats {
    pub num_vars: usize,
    pub num_clauses: usize,
    pub num_decisions: usize,
    pub num_propagations: usize,
    pub num_conflicts: usize,
    pub num_backtracks: usize,
    pub start_time: std::time::Instant,
    pub time: std::time::Duration,
}

impl Default for SolverStats {
    fn default() -> Self {
        SolverStats {
            num_vars: 0,
            num_clauses: 0,
            num_decisions: 0,
            num_propagations: 0,
            num_conflicts: 0,
            num_backtracks: 0,
            start_time: std::time::Instant::now(),
            time: std::time::Duration::default(),
        }
    }
}

impl SolverStats {
    fn new(num_vars: usize) -> Self {
        SolverStats {
            num_vars,
            ..Default::default()
        }
    }

    fn stop_timing(&mut self) {
        self.time = self.start_time.elapsed();
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*prettytable::format::consts::FORMAT_NO_COLSEP);
        table.set_titles(row![b -> "Solver Statistics", "Value"]);
        table.add_row(row!["Size", format!("{} clauses, {} vars", self.num_clauses, self.num_vars)]);
        table.add_row(row!["Decisions", self.num_decisions]);
        table.add_row(row!["Propagations", self.num_propagations]);
        table.add_row(row!["Conflicts", self.num_conflicts]);
        table.add_row(row!["Backtracks", self.num_backtracks]);
        table.add_row(row!["Time (approx.)", format!("{:.3}s", self.time.as_secs_f32())]);
        table
    }
}

/// The CDCL solver core. Owns every piece of per-solve state by value — no
/// interior mutability, no statics (§5).
pub struct Solver {
    clauses: ClauseDatabase,
    watches: WatchLists,
    vars: VarTable,
    trail: Trail,
    vsids: Vsids,
    config: Config,
    stats: SolverStats,
    /// Set once `add_clause`/`solve` discover a size-0 clause or a root-level
    /// contradiction; short-circuits `solve` to UNSAT without running BCP.
    unsat: bool,
}

impl Solver {
    pub fn new(num_vars: usize) -> Self {
        Solver::with_config(num_vars, Config::default())
    }

    pub fn with_config(num_vars: usize, config: Config) -> Self {
        let vars = VarTable::new(num_vars);
        let vsids = Vsids::new(&vars, &config);
        Solver {
            clauses: ClauseDatabase::new(),
            watches: WatchLists::new(num_vars),
            vars,
            trail: Trail::new(),
            vsids,
            config,
            stats: SolverStats::new(num_vars),
            unsat: false,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.vars.num_vars()
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Adds a clause from trusted DIMACS-style signed literals, installing
    /// watches and handling size-0/size-1 clauses per the §4.8 initialization
    /// rules. Does not validate input (see `try_add_clause`).
    pub fn add_clause(&mut self, signed_lits: &[i64]) -> ClauseId {
        let literals: Vec<Lit> = signed_lits.iter().map(|&s| Lit::encode(s)).collect();
        self.install_clause(literals)
    }

    /// Validating counterpart of `add_clause` (§4.9): rejects an empty
    /// clause, or a literal whose variable is `0` or `> num_vars`, with a
    /// typed error instead of silently marking the solver unsatisfiable or
    /// panicking on out-of-range indexing. Only consulted when
    /// `Config::validate_input` is set; even then, this input would be
    /// accepted (or would panic) via `add_clause` and is only rejected here
    /// because the caller explicitly asked to be told.
    pub fn try_add_clause(&mut self, signed_lits: &[i32]) -> Result<ClauseId, SolverError> {
        if self.config.validate_input {
            if signed_lits.is_empty() {
                return Err(SolverError::EmptyClause);
            }
            let num_vars = self.vars.num_vars();
            for &s in signed_lits {
                let var = s.unsigned_abs() as usize;
                if var == 0 || var > num_vars {
                    return Err(SolverError::VarOutOfRange {
                        var: s as i64,
                        num_vars,
                    });
                }
            }
        }
        let literals: Vec<Lit> = signed_lits.iter().map(|&s| Lit::encode(s as i64)).collect();
        Ok(self.install_clause(literals))
    }

    fn install_clause(&mut self, literals: Vec<Lit>) -> ClauseId {
        self.stats.num_clauses += 1;
        match literals.len() {
            0 => {
                self.unsat = true;
                self.clauses.add_original(Clause::original(literals))
            }
            1 => {
                let id = self.clauses.add_original(Clause::original(literals.clone()));
                let lit = literals[0];
                match self.vars.lit_value(lit) {
                    Value::False => self.unsat = true,
                    Value::Unassigned => self.trail.enqueue(&mut self.vars, lit, Reason::RootFact),
                    Value::True => {}
                }
                id
            }
            _ => {
                let id = self.clauses.add_original(Clause::original(literals));
                let clause = &self.clauses[id];
                self.watches.add_watch(clause.literals[0], id);
                self.watches.add_watch(clause.literals[1], id);
                id
            }
        }
    }

    /// Runs the search to completion (§4.8).
    pub fn solve(&mut self) -> SolveResult {
        if self.unsat {
            self.stats.stop_timing();
            return SolveResult::Unsat;
        }

        loop {
            self.stats.num_propagations += 1;
            let conflict = propagate::propagate(
                &mut self.clauses,
                &mut self.watches,
                &mut self.vars,
                &mut self.trail,
            );

            if let Some(conflict_clause) = conflict {
                self.stats.num_conflicts += 1;
                #[cfg(feature = "logging")]
                trace!("conflict at level {} on clause {}", self.trail.decision_level(), conflict_clause);

                if self.trail.decision_level() == 0 {
                    self.stats.stop_timing();
                    return SolveResult::Unsat;
                }

                let analysis = analyze::analyze(
                    &self.clauses,
                    &mut self.vars,
                    &self.trail,
                    &mut self.vsids,
                    conflict_clause,
                );
                self.vsids.decay();

                self.stats.num_backtracks += 1;
                #[cfg(feature = "logging")]
                debug!("backtrack to level {}", analysis.backtrack_level);
                let vsids = &mut self.vsids;
                self.trail.backtrack(&mut self.vars, analysis.backtrack_level, |vars, v| {
                    vsids.unassign(vars, v)
                });

                let asserting = analysis.literals[0];
                if analysis.literals.len() == 1 {
                    self.trail.enqueue(&mut self.vars, asserting, Reason::RootFact);
                } else {
                    let learnt_lits = analysis.literals;
                    let learnt_id = self.clauses.add_learnt(Clause::learnt(learnt_lits));
                    let clause = &self.clauses[learnt_id];
                    self.watches.add_watch(clause.literals[0], learnt_id);
                    self.watches.add_watch(clause.literals[1], learnt_id);
                    self.trail.enqueue(&mut self.vars, asserting, Reason::Forced(learnt_id));
                }
            } else {
                match self.vsids.decide(&self.vars) {
                    None => {
                        self.stats.stop_timing();
                        return SolveResult::Sat;
                    }
                    Some(decision) => {
                        self.stats.num_decisions += 1;
                        #[cfg(feature = "logging")]
                        trace!("decide {:?} at level {}", decision, self.trail.decision_level() + 1);
                        self.trail.new_decision_level();
                        self.trail.enqueue(&mut self.vars, decision, Reason::Decision);
                    }
                }
            }
        }
    }

    /// Current value of variable `v`. `Unassigned` for out-of-range `v`
    /// (§6).
    pub fn value(&self, v: VarId) -> Value {
        if v == 0 || v > self.vars.num_vars() {
            Value::Unassigned
        } else {
            self.vars.value(v)
        }
    }
}

/// Documents the BCP-offload seam (§6): a future hardware-backed engine
/// would implement this trait instead of `propagate::propagate`. Never
/// implemented by anything but the built-in engine; shipped unimplemented
/// on purpose.
pub trait BcpEngine {
    /// Propagates from the current trail position, returning the
    /// conflicting clause if one is found.
    fn propagate(
        &mut self,
        clauses: &mut ClauseDatabase,
        watches: &mut WatchLists,
        vars: &mut VarTable,
        trail: &mut Trail,
    ) -> Option<ClauseId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sat_satisfies(solver: &Solver, clauses: &[&[i64]]) {
        for lits in clauses {
            let satisfied = lits.iter().any(|&s| {
                let v = s.unsigned_abs() as VarId;
                let value = solver.value(v);
                (s > 0 && value == Value::True) || (s < 0 && value == Value::False)
            });
            assert!(satisfied, "clause {:?} not satisfied", lits);
        }
    }

    #[test]
    fn scenario_simple_sat() {
        let mut solver = Solver::new(3);
        solver.add_clause(&[1, 2]);
        solver.add_clause(&[-1, 3]);
        solver.add_clause(&[-2, -3]);
        assert_eq!(solver.solve(), SolveResult::Sat);
        assert_sat_satisfies(&solver, &[&[1, 2], &[-1, 3], &[-2, -3]]);
    }

    #[test]
    fn scenario_direct_contradiction_unsat() {
        let mut solver = Solver::new(1);
        solver.add_clause(&[1]);
        solver.add_clause(&[-1]);
        assert_eq!(solver.solve(), SolveResult::Unsat);
    }

    #[test]
    fn scenario_unit_fact_is_satisfied() {
        let mut solver = Solver::new(1);
        solver.add_clause(&[1]);
        assert_eq!(solver.solve(), SolveResult::Sat);
        assert_eq!(solver.value(1), Value::True);
    }

    #[test]
    fn scenario_pigeonhole_2_1_unsat() {
        let mut solver = Solver::new(2);
        solver.add_clause(&[1]);
        solver.add_clause(&[2]);
        solver.add_clause(&[-1, -2]);
        assert_eq!(solver.solve(), SolveResult::Unsat);
    }

    #[test]
    fn scenario_xor_chain_sat() {
        let mut solver = Solver::new(4);
        for c in [
            [1, 2],
            [-1, -2],
            [2, 3],
            [-2, -3],
            [3, 4],
            [-3, -4],
        ] {
            solver.add_clause(&c);
        }
        assert_eq!(solver.solve(), SolveResult::Sat);
        assert_sat_satisfies(
            &solver,
            &[
                &[1, 2],
                &[-1, -2],
                &[2, 3],
                &[-2, -3],
                &[3, 4],
                &[-3, -4],
            ],
        );
    }

    #[test]
    fn scenario_empty_clause_is_unsat() {
        let mut solver = Solver::new(2);
        solver.add_clause(&[1, 2]);
        solver.add_clause(&[]);
        assert_eq!(solver.solve(), SolveResult::Unsat);
    }

    #[test]
    fn try_add_clause_rejects_empty_when_validating() {
        let mut solver = Solver::with_config(
            1,
            Config {
                validate_input: true,
                ..Config::default()
            },
        );
        assert!(matches!(solver.try_add_clause(&[]), Err(SolverError::EmptyClause)));
    }

    #[test]
    fn try_add_clause_rejects_out_of_range_variable_when_validating() {
        let mut solver = Solver::with_config(
            2,
            Config {
                validate_input: true,
                ..Config::default()
            },
        );
        assert!(matches!(
            solver.try_add_clause(&[0]),
            Err(SolverError::VarOutOfRange { var: 0, num_vars: 2 })
        ));
        assert!(matches!(
            solver.try_add_clause(&[5]),
            Err(SolverError::VarOutOfRange { var: 5, num_vars: 2 })
        ));
        assert!(matches!(
            solver.try_add_clause(&[-5]),
            Err(SolverError::VarOutOfRange { var: -5, num_vars: 2 })
        ));
    }

    #[test]
    fn try_add_clause_accepts_in_range_when_validating() {
        let mut solver = Solver::with_config(
            2,
            Config {
                validate_input: true,
                ..Config::default()
            },
        );
        assert!(solver.try_add_clause(&[1, -2]).is_ok());
    }

    #[test]
    fn requires_learned_clause_to_drive_non_chronological_backtrack() {
        // A formula that cannot be solved by unit propagation alone, forcing
        // at least one conflict, analysis, and backtrack before SAT/UNSAT.
        let mut solver = Solver::new(3);
        solver.add_clause(&[1, 2, 3]);
        solver.add_clause(&[1, 2, -3]);
        solver.add_clause(&[1, -2, 3]);
        solver.add_clause(&[1, -2, -3]);
        solver.add_clause(&[-1, 2, 3]);
        solver.add_clause(&[-1, 2, -3]);
        solver.add_clause(&[-1, -2, 3]);
        solver.add_clause(&[-1, -2, -3]);
        assert_eq!(solver.solve(), SolveResult::Unsat);
    }
}
