//! Per-variable assignment state: value, decision level, reason clause and
//! VSIDS activity. Kept as parallel arrays indexed by `VarId`, the way the
//! teacher's `State` keeps a `vars: Vec<Option<bool>>` alongside the trail —
//! here consolidated into the single component the spec calls out
//! ("Assignment state", §3).

use crate::clause::ClauseId;
use crate::lit::{Lit, Value, VarId};

/// Why a variable holds its current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// Assigned by the VSIDS heuristic (a branching decision).
    Decision,
    /// A fact known before any decision was made (unit clause at level 0).
    RootFact,
    /// Forced by unit propagation on the given clause.
    Forced(ClauseId),
}

#[derive(Debug, Clone, Copy)]
struct VarState {
    value: Value,
    level: usize,
    reason: Reason,
    activity: f64,
}

impl Default for VarState {
    fn default() -> Self {
        VarState {
            value: Value::Unassigned,
            level: 0,
            reason: Reason::Decision,
            activity: 0.0,
        }
    }
}

/// Parallel per-variable arrays, 1-indexed (`vars[0]` is an unused
/// placeholder so `VarId`s can index directly).
pub struct VarTable {
    states: Vec<VarState>,
}

impl VarTable {
    pub fn new(num_vars: usize) -> Self {
        VarTable {
            states: vec![VarState::default(); num_vars + 1],
        }
    }

    pub fn num_vars(&self) -> usize {
        self.states.len() - 1
    }

    pub fn value(&self, v: VarId) -> Value {
        self.states[v].value
    }

    pub fn level(&self, v: VarId) -> usize {
        self.states[v].level
    }

    pub fn reason(&self, v: VarId) -> Reason {
        self.states[v].reason
    }

    pub fn activity(&self, v: VarId) -> f64 {
        self.states[v].activity
    }

    pub fn set_activity(&mut self, v: VarId, activity: f64) {
        self.states[v].activity = activity;
    }

    pub fn bump_activity(&mut self, v: VarId, amount: f64) {
        self.states[v].activity += amount;
    }

    /// Value of a literal under the current assignment (§4.1 `value_of`).
    pub fn lit_value(&self, lit: Lit) -> Value {
        lit.value_of(self.value(lit.var()))
    }

    pub fn is_assigned(&self, v: VarId) -> bool {
        self.states[v].value != Value::Unassigned
    }

    /// Assigns the variable of `lit` so that `lit` evaluates to TRUE.
    /// Precondition: the variable is currently unassigned.
    pub fn assign(&mut self, lit: Lit, level: usize, reason: Reason) {
        debug_assert_eq!(self.states[lit.var()].value, Value::Unassigned);
        self.states[lit.var()].value = if lit.is_positive() {
            Value::True
        } else {
            Value::False
        };
        self.states[lit.var()].level = level;
        self.states[lit.var()].reason = reason;
    }

    /// Resets a variable to unassigned, also resetting `reason` to the same
    /// "no reason" sentinel `VarState::default` uses, matching §4.6's text
    /// (reset `value` to UNASSIGNED and `reason` to "none"). `level` is left
    /// stale; it is meaningless while `UNASSIGNED`.
    pub fn unassign(&mut self, v: VarId) {
        self.states[v].value = Value::Unassigned;
        self.states[v].reason = Reason::Decision;
    }
}
