//! VSIDS: Variable State Independent Decaying Sum (§4.5, §4.7).
//!
//! Activity values themselves live on `VarTable` (the spec's "Variable
//! state" component, §3); this module only owns the ranking structure over
//! them — a max-heap keyed by `(activity, variable index)` so ties break
//! toward the lowest index, built the same way the teacher's
//! `HeuristicVSIDS` wraps a `priority_queue::PriorityQueue` keyed by
//! `ordered_float::NotNan`.

use crate::config::Config;
use crate::lit::{Lit, VarId};
use crate::vars::VarTable;
use ordered_float::NotNan;
use priority_queue::PriorityQueue;
use std::cmp::Ordering;

const RESCALE_FACTOR: f64 = 1e-100;

#[derive(Clone, Copy, PartialEq)]
struct Priority {
    activity: NotNan<f64>,
    var: VarId,
}

impl Priority {
    fn new(activity: f64, var: VarId) -> Self {
        Priority {
            activity: NotNan::new(activity).expect("VSIDS activity is never NaN"),
            var,
        }
    }
}

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ties broken toward the *lower* variable index, which must compare
        // as *greater* here since `PriorityQueue::pop` returns the maximum.
        self.activity
            .cmp(&other.activity)
            .then_with(|| other.var.cmp(&self.var))
    }
}

pub struct Vsids {
    queue: PriorityQueue<VarId, Priority>,
    var_inc: f64,
    var_decay: f64,
    rescale_threshold: f64,
}

impl Vsids {
    pub fn new(vars: &VarTable, config: &Config) -> Self {
        let mut queue = PriorityQueue::with_capacity(vars.num_vars());
        for v in 1..=vars.num_vars() {
            queue.push(v, Priority::new(vars.activity(v), v));
        }
        Vsids {
            queue,
            var_inc: 1.0,
            var_decay: config.var_decay,
            rescale_threshold: config.activity_rescale_threshold,
        }
    }

    /// Bumps `v`'s activity by the current step size, rescaling everything
    /// first if that would overflow (§4.5).
    pub fn bump(&mut self, vars: &mut VarTable, v: VarId) {
        if vars.activity(v) + self.var_inc > self.rescale_threshold {
            self.rescale(vars);
        }
        vars.bump_activity(v, self.var_inc);
        self.queue
            .change_priority(&v, Priority::new(vars.activity(v), v));
    }

    fn rescale(&mut self, vars: &mut VarTable) {
        for v in 1..=vars.num_vars() {
            vars.set_activity(v, vars.activity(v) * RESCALE_FACTOR);
        }
        self.var_inc *= RESCALE_FACTOR;
        let entries: Vec<VarId> = self.queue.iter().map(|(&v, _)| v).collect();
        for v in entries {
            self.queue.change_priority(&v, Priority::new(vars.activity(v), v));
        }
    }

    /// Inflates the bump step size once per analyzed conflict so older
    /// activity ages out exponentially (§4.5).
    pub fn decay(&mut self) {
        self.var_inc /= self.var_decay;
    }

    /// Re-admits a freshly unassigned variable into decision contention
    /// (called from `Trail::backtrack`, mirroring `Heuristic::unassign`).
    pub fn unassign(&mut self, vars: &VarTable, v: VarId) {
        self.queue.push(v, Priority::new(vars.activity(v), v));
    }

    /// Picks the unassigned variable with maximum activity, ties broken by
    /// lowest index; `None` if every variable is already assigned (§4.7).
    /// Assigned variables popped along the way are simply dropped — they
    /// re-enter via `unassign` when backtracking frees them.
    pub fn decide(&mut self, vars: &VarTable) -> Option<Lit> {
        while let Some((v, _)) = self.queue.pop() {
            if !vars.is_assigned(v) {
                return Some(Lit::from_var(v, false));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decide_picks_highest_activity_then_lowest_index() {
        let mut vars = VarTable::new(3);
        vars.set_activity(1, 1.0);
        vars.set_activity(2, 5.0);
        vars.set_activity(3, 5.0);
        let mut vsids = Vsids::new(&vars, &Config::default());
        let decision = vsids.decide(&vars).unwrap();
        assert_eq!(decision.var(), 2);
        assert!(decision.is_negative(), "VSIDS always decides FALSE (§4.7)");
    }

    #[test]
    fn bump_reorders_without_assignment() {
        let mut vars = VarTable::new(2);
        let mut vsids = Vsids::new(&vars, &Config::default());
        vsids.bump(&mut vars, 2);
        vsids.bump(&mut vars, 2);
        let decision = vsids.decide(&vars).unwrap();
        assert_eq!(decision.var(), 2);
    }

    #[test]
    fn exhausted_queue_returns_none() {
        let vars = VarTable::new(0);
        let mut vsids = Vsids::new(&vars, &Config::default());
        assert!(vsids.decide(&vars).is_none());
    }

    #[test]
    fn rescale_preserves_relative_order() {
        let mut vars = VarTable::new(2);
        vars.set_activity(1, 10.0);
        vars.set_activity(2, 1.0);
        let mut vsids = Vsids::new(&vars, &Config::default());
        // Force a rescale by pushing variable 2 just over the threshold.
        let threshold = Config::default().activity_rescale_threshold;
        vars.set_activity(2, threshold);
        vsids.bump(&mut vars, 2);
        assert!(vars.activity(2) < threshold);
        assert!(vars.activity(2) > vars.activity(1));
    }
}
