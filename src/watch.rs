//! Watch index: for each literal, the clauses currently watching it
//! (§3, §4.4). Structured as one `pos`/`neg` pair of lists per variable, the
//! way the teacher's `LiteralWatcher` keeps `VarWatch { pos, neg }`, indexed
//! directly by the packed literal code here instead of by a separate sign
//! check.

use crate::clause::ClauseId;
use crate::lit::Lit;

#[derive(Default, Clone)]
struct VarWatches {
    pos: Vec<ClauseId>,
    neg: Vec<ClauseId>,
}

pub struct WatchLists {
    per_var: Vec<VarWatches>,
}

impl WatchLists {
    pub fn new(num_vars: usize) -> Self {
        WatchLists {
            per_var: vec![VarWatches::default(); num_vars + 1],
        }
    }

    fn slot(&self, lit: Lit) -> &Vec<ClauseId> {
        let w = &self.per_var[lit.var()];
        if lit.is_positive() {
            &w.pos
        } else {
            &w.neg
        }
    }

    fn slot_mut(&mut self, lit: Lit) -> &mut Vec<ClauseId> {
        let w = &mut self.per_var[lit.var()];
        if lit.is_positive() {
            &mut w.pos
        } else {
            &mut w.neg
        }
    }

    /// Clauses currently watching `lit`.
    pub fn watchers(&self, lit: Lit) -> &[ClauseId] {
        self.slot(lit)
    }

    pub fn add_watch(&mut self, lit: Lit, clause_id: ClauseId) {
        self.slot_mut(lit).push(clause_id);
    }

    /// Removes the watch list for `lit` entirely, handing ownership to the
    /// caller so BCP can rebuild it in place with a compaction pointer
    /// (§4.4) and put the result back with `replace_watchers`.
    pub fn take_watchers(&mut self, lit: Lit) -> Vec<ClauseId> {
        std::mem::take(self.slot_mut(lit))
    }

    pub fn replace_watchers(&mut self, lit: Lit, watchers: Vec<ClauseId>) {
        *self.slot_mut(lit) = watchers;
    }
}
