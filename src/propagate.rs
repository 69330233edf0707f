//! Boolean Constraint Propagation via two-watched-literals (§4.4).
//!
//! This is the tightest loop in the solver, so unlike most of the rest of
//! the crate it favors index-juggling over allocation: the watch list being
//! scanned is taken out with `mem::take`, rebuilt in place with a
//! read/write compaction pointer, and put back before `propagate` moves on
//! to the next trail literal.

use crate::clause::{ClauseId, ClauseDatabase};
use crate::lit::{Lit, Value};
use crate::trail::Trail;
use crate::vars::{Reason, VarTable};
use crate::watch::WatchLists;

enum Step {
    /// Clause still needs to watch the literal it was watching; keep it in
    /// the current list.
    KeepHere,
    /// Clause now watches a different literal; it has already been
    /// re-registered there.
    MovedWatch,
    /// All non-watched literals and the other watch are FALSE.
    Conflict,
}

/// Runs BCP until the trail is fully propagated or a conflict is found.
/// Returns the conflicting clause's index, or `None` if propagation
/// completed (in which case `trail.prop_head() == trail.len()`).
pub fn propagate(
    clauses: &mut ClauseDatabase,
    watches: &mut WatchLists,
    vars: &mut VarTable,
    trail: &mut Trail,
) -> Option<ClauseId> {
    while let Some(lit) = trail.next_to_propagate() {
        if let Some(conflict) = propagate_literal(clauses, watches, vars, trail, lit) {
            return Some(conflict);
        }
    }
    None
}

/// Handles one trail literal becoming TRUE: rescans the watch list of its
/// negation, since only clauses watching the now-FALSE literal can have
/// become unit or conflicting.
fn propagate_literal(
    clauses: &mut ClauseDatabase,
    watches: &mut WatchLists,
    vars: &mut VarTable,
    trail: &mut Trail,
    lit: Lit,
) -> Option<ClauseId> {
    let falsified = lit.negate();
    let watchers = watches.take_watchers(falsified);
    let len = watchers.len();
    let mut kept = Vec::with_capacity(len);
    let mut conflict = None;

    let mut i = 0;
    while i < len {
        let clause_id = watchers[i];
        i += 1;
        match propagate_clause(clauses, watches, vars, trail, clause_id, falsified) {
            Step::KeepHere => kept.push(clause_id),
            Step::MovedWatch => {}
            Step::Conflict => {
                kept.push(clause_id);
                kept.extend_from_slice(&watchers[i..]);
                conflict = Some(clause_id);
                break;
            }
        }
    }

    watches.replace_watchers(falsified, kept);
    conflict
}

/// The per-clause step of §4.4: normalize watch positions, try the
/// satisfied shortcut, look for a replacement watch, and otherwise either
/// propagate a unit or report a conflict.
fn propagate_clause(
    clauses: &mut ClauseDatabase,
    watches: &mut WatchLists,
    vars: &mut VarTable,
    trail: &mut Trail,
    clause_id: ClauseId,
    falsified: Lit,
) -> Step {
    let clause = &mut clauses[clause_id];
    debug_assert!(clause.len() >= 2);

    // 1. Normalize: the just-falsified literal goes to position 1.
    if clause.literals[0] == falsified {
        clause.literals.swap(0, 1);
    }
    debug_assert_eq!(clause.literals[1], falsified);

    // 2. Satisfied shortcut.
    let other = clause.literals[0];
    if vars.lit_value(other) == Value::True {
        return Step::KeepHere;
    }

    // 3. Find a replacement watch among lits[2..].
    for k in 2..clause.literals.len() {
        let candidate = clause.literals[k];
        if vars.lit_value(candidate) != Value::False {
            clause.literals.swap(1, k);
            watches.add_watch(candidate, clause_id);
            return Step::MovedWatch;
        }
    }

    // 4. No replacement: `other` is forced, or it's already FALSE and we
    // have a conflict.
    match vars.lit_value(other) {
        Value::False => Step::Conflict,
        Value::Unassigned => {
            trail.enqueue(vars, other, Reason::Forced(clause_id));
            Step::KeepHere
        }
        Value::True => unreachable!("handled by the satisfied shortcut above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Clause;

    fn unit_clause_db(clauses: Vec<Vec<i64>>, num_vars: usize) -> (ClauseDatabase, WatchLists) {
        let mut db = ClauseDatabase::new();
        let mut watches = WatchLists::new(num_vars);
        for lits in clauses {
            let lits: Vec<Lit> = lits.into_iter().map(Lit::encode).collect();
            let id = db.add_original(Clause::original(lits));
            if db[id].len() >= 2 {
                watches.add_watch(db[id].literals[0], id);
                watches.add_watch(db[id].literals[1], id);
            }
        }
        (db, watches)
    }

    #[test]
    fn unit_propagation_chains_through_watch_list() {
        // (x1 -> x2 -> x3), x1 forced true.
        let (mut db, mut watches) = unit_clause_db(vec![vec![-1, 2], vec![-2, 3]], 3);
        let mut vars = VarTable::new(3);
        let mut trail = Trail::new();

        trail.new_decision_level();
        trail.enqueue(&mut vars, Lit::encode(1), Reason::Decision);

        let conflict = propagate(&mut db, &mut watches, &mut vars, &mut trail);
        assert!(conflict.is_none());
        assert_eq!(vars.value(2), Value::True);
        assert_eq!(vars.value(3), Value::True);
    }

    #[test]
    fn conflict_is_reported_and_watch_list_preserved() {
        // x1 true, clause (-x1 v x2), clause (-x1 v -x2) -> conflict once x2 forced true and then contradicted.
        let (mut db, mut watches) =
            unit_clause_db(vec![vec![-1, 2], vec![-1, -2]], 2);
        let mut vars = VarTable::new(2);
        let mut trail = Trail::new();

        trail.new_decision_level();
        trail.enqueue(&mut vars, Lit::encode(1), Reason::Decision);

        let conflict = propagate(&mut db, &mut watches, &mut vars, &mut trail);
        assert!(conflict.is_some());
    }

    #[test]
    fn replacement_watch_avoids_false_positive_unit() {
        // (x1 v x2 v x3): falsifying x1 then x2 should just re-watch x3, no unit.
        let (mut db, mut watches) = unit_clause_db(vec![vec![1, 2, 3]], 3);
        let mut vars = VarTable::new(3);
        let mut trail = Trail::new();

        trail.new_decision_level();
        trail.enqueue(&mut vars, Lit::encode(-1), Reason::Decision);
        assert!(propagate(&mut db, &mut watches, &mut vars, &mut trail).is_none());
        assert_eq!(vars.value(3), Value::Unassigned);

        trail.new_decision_level();
        trail.enqueue(&mut vars, Lit::encode(-2), Reason::Decision);
        assert!(propagate(&mut db, &mut watches, &mut vars, &mut trail).is_none());
        assert_eq!(vars.value(3), Value::True);
    }
}
