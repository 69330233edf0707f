//! The trail: the time-ordered log of assignments, with decision-level
//! delimiters and a propagation cursor (§3, §4.3).

use crate::lit::Lit;
use crate::vars::{Reason, VarTable};

#[derive(Default)]
pub struct Trail {
    /// Literal codes in the order they became TRUE.
    assigned: Vec<Lit>,
    /// `delimiters[d]` is the trail length at the moment decision level `d`
    /// was opened. Level 0 has no delimiter.
    delimiters: Vec<usize>,
    /// Next trail index BCP has not yet examined.
    prop_head: usize,
}

impl Trail {
    pub fn new() -> Self {
        Trail::default()
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    pub fn decision_level(&self) -> usize {
        self.delimiters.len()
    }

    pub fn prop_head(&self) -> usize {
        self.prop_head
    }

    /// The literal at trail position `i`.
    pub fn at(&self, i: usize) -> Lit {
        self.assigned[i]
    }

    /// Records the current trail length as the start of a new decision
    /// level and increments the level (§4.3).
    pub fn new_decision_level(&mut self) {
        self.delimiters.push(self.assigned.len());
    }

    /// Assigns `lit`'s variable consistent with `lit`'s polarity, records
    /// `level`/`reason`, and appends `lit` to the trail (§4.3 `enqueue`).
    /// Precondition: the variable is unassigned.
    pub fn enqueue(&mut self, vars: &mut VarTable, lit: Lit, reason: Reason) {
        vars.assign(lit, self.decision_level(), reason);
        self.assigned.push(lit);
    }

    /// Takes the next unpropagated trail literal, if any, advancing the
    /// propagation cursor.
    pub fn next_to_propagate(&mut self) -> Option<Lit> {
        if self.prop_head < self.assigned.len() {
            let lit = self.assigned[self.prop_head];
            self.prop_head += 1;
            Some(lit)
        } else {
            None
        }
    }

    /// Unwinds the trail to `delimiters[to_level]` (or 0 if `to_level ==
    /// 0`), resetting popped variables to UNASSIGNED and re-offering them to
    /// the heuristic via `on_unassign`. Sets `current_decision_level =
    /// to_level` and `prop_head = trail.length` (§4.6).
    pub fn backtrack(
        &mut self,
        vars: &mut VarTable,
        to_level: usize,
        mut on_unassign: impl FnMut(&mut VarTable, usize),
    ) {
        debug_assert!(to_level < self.decision_level());
        let target_len = if to_level == 0 {
            0
        } else {
            self.delimiters[to_level]
        };
        while self.assigned.len() > target_len {
            let lit = self.assigned.pop().unwrap();
            vars.unassign(lit.var());
            on_unassign(vars, lit.var());
        }
        self.delimiters.truncate(to_level);
        self.prop_head = self.assigned.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit::Value;

    #[test]
    fn delimiters_track_decision_levels() {
        let mut trail = Trail::new();
        let mut vars = VarTable::new(4);

        trail.new_decision_level();
        trail.enqueue(&mut vars, Lit::from_var(1, true), Reason::Decision);
        trail.enqueue(&mut vars, Lit::from_var(2, true), Reason::Forced(0));

        trail.new_decision_level();
        trail.enqueue(&mut vars, Lit::from_var(3, true), Reason::Decision);

        assert_eq!(trail.decision_level(), 2);
        assert_eq!(trail.len(), 3);

        trail.backtrack(&mut vars, 1, |_, _| {});
        assert_eq!(trail.decision_level(), 1);
        assert_eq!(trail.len(), 2);
        assert_eq!(vars.value(3), Value::Unassigned);
        assert_eq!(vars.value(1), Value::True);
    }

    #[test]
    fn prop_head_advances_with_next_to_propagate() {
        let mut trail = Trail::new();
        let mut vars = VarTable::new(2);
        trail.new_decision_level();
        trail.enqueue(&mut vars, Lit::from_var(1, true), Reason::Decision);
        trail.enqueue(&mut vars, Lit::from_var(2, false), Reason::Forced(0));

        assert_eq!(trail.next_to_propagate(), Some(Lit::from_var(1, true)));
        assert_eq!(trail.next_to_propagate(), Some(Lit::from_var(2, false)));
        assert_eq!(trail.next_to_propagate(), None);
        assert_eq!(trail.prop_head(), 2);
    }
}
