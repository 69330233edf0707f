//! First-UIP conflict analysis (§4.5): resolve backward along the trail
//! until exactly one literal at the conflict's decision level remains,
//! emitting a learned clause and a non-chronological backtrack level.
//!
//! The backward walk and the `seen`/`k` bookkeeping follow the teacher's
//! `ClauseLearner::analyse_conflict` closely; `seen` is backed by an
//! `fnv`-hashed set for the same reason the teacher reaches for `FnvHasher`
//! here — this set is rebuilt on every conflict and a fast non-cryptographic
//! hash pays for itself at solver scale.

use crate::clause::{ClauseDatabase, ClauseId};
use crate::lit::{Lit, VarId};
use crate::trail::Trail;
use crate::vars::{Reason, VarTable};
use crate::vsids::Vsids;
use fnv::FnvHashSet;

pub struct Analysis {
    /// The learned clause. Index 0 is the first-UIP literal (the asserting
    /// literal); index 1, if present, is the literal with the
    /// second-highest decision level (§4.5 "Second-watch placement").
    pub literals: Vec<Lit>,
    /// Level to backtrack to before enqueuing `literals[0]`. `0` if the
    /// clause is unit.
    pub backtrack_level: usize,
}

/// Runs first-UIP analysis on a conflict detected at the current decision
/// level. Bumps VSIDS activity for every variable resolved over, exactly
/// once per conflict (§4.5 "VSIDS decay" is applied by the caller after this
/// returns, once per conflict, not per variable).
pub fn analyze(
    clauses: &ClauseDatabase,
    vars: &mut VarTable,
    trail: &Trail,
    vsids: &mut Vsids,
    conflict_clause: ClauseId,
) -> Analysis {
    let current_level = trail.decision_level();
    let mut seen: FnvHashSet<VarId> = FnvHashSet::default();
    let mut unresolved_at_current_level = 0usize;
    let mut learned: Vec<Lit> = Vec::new();

    let mut reason_clause_id = conflict_clause;
    let mut current_literal: Option<Lit> = None;
    let mut trail_pos = trail.len();

    loop {
        let reason = &clauses[reason_clause_id];
        for &lit in &reason.literals {
            if let Some(cur) = current_literal {
                if lit.var() == cur.var() {
                    // This is the literal the reason clause implied; it is
                    // resolved away, not re-marked.
                    continue;
                }
            }
            if seen.insert(lit.var()) {
                vsids.bump(vars, lit.var());
                let level = vars.level(lit.var());
                if level == current_level {
                    unresolved_at_current_level += 1;
                } else if level > 0 {
                    learned.push(lit);
                }
            }
        }

        // Walk backward to the most recent still-seen trail entry.
        loop {
            trail_pos -= 1;
            if seen.contains(&trail.at(trail_pos).var()) {
                break;
            }
        }
        let lit = trail.at(trail_pos);
        current_literal = Some(lit);
        seen.remove(&lit.var());
        unresolved_at_current_level -= 1;

        if unresolved_at_current_level == 0 {
            break;
        }

        reason_clause_id = match vars.reason(lit.var()) {
            Reason::Forced(c) => c,
            Reason::Decision | Reason::RootFact => {
                unreachable!("a variable still unresolved at conflict time must have a forcing reason")
            }
        };
    }

    let uip = current_literal.expect("conflict analysis always finds a UIP");
    learned.push(-uip);
    let last = learned.len() - 1;
    learned.swap(0, last);
    debug_assert_eq!(vars.level(learned[0].var()), current_level);
    debug_assert_eq!(
        learned
            .iter()
            .filter(|l| vars.level(l.var()) == current_level)
            .count(),
        1,
        "learned clause must contain exactly one literal at the conflict level"
    );

    // Second-watch placement: the literal with the highest level among the
    // non-UIP literals goes to position 1; that level is the backtrack
    // level.
    let backtrack_level = if learned.len() > 1 {
        let idx = (1..learned.len())
            .max_by_key(|&i| vars.level(learned[i].var()))
            .unwrap();
        learned.swap(1, idx);
        vars.level(learned[1].var())
    } else {
        0
    };
    debug_assert!(backtrack_level < current_level);

    Analysis {
        literals: learned,
        backtrack_level,
    }
}
