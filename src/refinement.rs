//! Candidate-refinement generator (§4.3): given a clause and its support
//! set, proposes specializations by appending literals drawn from the
//! support witnesses' bodies.

use crate::clause::{Clause, ClauseId, ClauseStore};
use crate::literal::Literal;
use crate::mode::ModeDeclaration;
use crate::subsumption::mutually_subsumes;
use itertools::Itertools;
use std::collections::HashSet;

/// Regenerates `store[id].refinements` per §4.3 and returns the new ids.
///
/// `depth` is the maximum subset size `k` (inclusive); `comparison_predicates`
/// flags which mode atoms count as comparisons for the redundancy check;
/// `already_seen` is filtered out via mutual subsumption (step 6).
pub fn refine(
    store: &mut ClauseStore,
    id: ClauseId,
    depth: usize,
    already_seen: &[ClauseId],
) -> Vec<ClauseId> {
    let clause = store.get(id).clone();
    let candidate_literals = candidate_literals(store, &clause);

    let mut candidates: Vec<Clause> = Vec::new();
    for k in 1..=depth.max(1) {
        if k > candidate_literals.len() {
            break;
        }
        for subset in candidate_literals.iter().cloned().combinations(k) {
            if is_redundant(&clause.body, &subset) {
                continue;
            }
            let mut body = clause.body.clone();
            body.extend(subset);
            candidates.push(Clause::new(clause.head.clone(), body));
        }
    }

    let candidates = compress_candidates(candidates);
    let candidates: Vec<Clause> = candidates
        .into_iter()
        .filter(|c| {
            !already_seen
                .iter()
                .any(|seen_id| mutually_subsumes(c, store.get(*seen_id)))
        })
        .collect();

    let mut new_ids = Vec::with_capacity(candidates.len());
    for mut candidate in candidates {
        candidate.parent = Some(id);
        candidate.weight = clause.weight;
        candidate.is_top_rule = false;
        candidate.support_set = clause
            .support_set
            .iter()
            .copied()
            .filter(|support_id| {
                crate::subsumption::subsumes(&candidate, store.get(*support_id))
            })
            .collect();
        new_ids.push(store.insert(candidate));
    }

    store.get_mut(id).refinements = new_ids.clone();
    new_ids
}

/// `distinct(⋃ support_set[c].body) \ body(c)` (§4.3 step 1), in first-seen
/// order across support witnesses.
fn candidate_literals(store: &ClauseStore, clause: &Clause) -> Vec<Literal> {
    let existing: HashSet<&Literal> = clause.body.iter().collect();
    let mut seen: HashSet<Literal> = HashSet::new();
    let mut out = Vec::new();
    for support_id in &clause.support_set {
        for lit in &store.get(*support_id).body {
            if existing.contains(lit) {
                continue;
            }
            if seen.insert(lit.clone()) {
                out.push(lit.clone());
            }
        }
    }
    out
}

/// Step 3: a k>1 subset is redundant when every literal in `body ∪ subset`
/// shares the same comparison-predicate mode. Singletons are never redundant.
fn is_redundant(body: &[Literal], subset: &[Literal]) -> bool {
    if subset.len() <= 1 {
        return false;
    }
    let combined = body.iter().chain(subset.iter());
    let mut modes: HashSet<&ModeDeclaration> = HashSet::new();
    for lit in combined {
        if !lit.mode.is_comparison {
            return false;
        }
        modes.insert(&lit.mode);
    }
    modes.len() == 1
}

/// Step 5: drop any candidate mutually θ-subsumed by an earlier candidate,
/// keeping the first (generation-order) representative.
fn compress_candidates(candidates: Vec<Clause>) -> Vec<Clause> {
    let mut kept: Vec<Clause> = Vec::new();
    'outer: for candidate in candidates {
        for existing in &kept {
            if mutually_subsumes(&candidate, existing) {
                continue 'outer;
            }
        }
        kept.push(candidate);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{Clause, ClauseStore};
    use crate::literal::Literal;
    use crate::mode::ArgMode;
    use crate::term::Term;

    fn happens_at(e: &str, t: &str) -> Literal {
        Literal::positive("happensAt", vec![Term::var(e), Term::var(t)])
    }

    fn holds_at(p: &str, t: &str) -> Literal {
        Literal::positive("holdsAt", vec![Term::var(p), Term::var(t)])
    }

    #[test]
    fn s3_refinement_at_depth_one() {
        let mut store = ClauseStore::new();
        let bottom = Clause::new(
            Some(Literal::positive("initiatedAt", vec![Term::var("e"), Term::var("T")])),
            vec![happens_at("a", "T"), holds_at("p", "T"), holds_at("q", "T").negated()],
        );
        let bottom_id = store.insert(bottom);

        let mut top = Clause::new(
            Some(Literal::positive("initiatedAt", vec![Term::var("e"), Term::var("T")])),
            vec![happens_at("a", "T")],
        );
        top.support_set = vec![bottom_id];
        top.weight = 0.7;
        let top_id = store.insert(top);

        let new_ids = refine(&mut store, top_id, 1, &[]);
        assert_eq!(new_ids.len(), 2);
        for rid in &new_ids {
            let r = store.get(*rid);
            assert_eq!(r.parent, Some(top_id));
            assert_eq!(r.weight, 0.7);
            assert!(!r.is_top_rule);
            assert_eq!(r.body.len(), 2);
        }
    }

    #[test]
    fn invariant_refinement_monotonicity() {
        let mut store = ClauseStore::new();
        let bottom = Clause::new(
            Some(Literal::positive("p", vec![Term::var("X")])),
            vec![Literal::positive("q", vec![Term::var("X")]), Literal::positive("r", vec![Term::var("X")])],
        );
        let bottom_id = store.insert(bottom);
        let mut top = Clause::new(Some(Literal::positive("p", vec![Term::var("X")])), vec![]);
        top.support_set = vec![bottom_id];
        let top_id = store.insert(top.clone());

        let new_ids = refine(&mut store, top_id, 2, &[]);
        for rid in new_ids {
            let r = store.get(rid);
            assert!(r.body.len() > top.body.len());
            assert_eq!(r.head, top.head);
        }
    }

    #[test]
    fn redundant_comparison_subsets_are_dropped() {
        let mut store = ClauseStore::new();
        let gt_mode = ModeDeclaration::comparison("gt", vec![ArgMode::Input, ArgMode::Input]);
        let c1 = Literal::new("gt", vec![Term::var("X"), Term::constant("0")], gt_mode.clone());
        let c2 = Literal::new("gt", vec![Term::var("Y"), Term::constant("0")], gt_mode);
        let bottom = Clause::new(Some(Literal::positive("p", vec![Term::var("X")])), vec![c1.clone(), c2.clone()]);
        let bottom_id = store.insert(bottom);
        let mut top = Clause::new(Some(Literal::positive("p", vec![Term::var("X")])), vec![]);
        top.support_set = vec![bottom_id];
        let top_id = store.insert(top);

        let new_ids = refine(&mut store, top_id, 2, &[]);
        // The size-2 subset {c1, c2} is redundant (both same comparison mode);
        // only the two singletons survive.
        assert_eq!(new_ids.len(), 2);
    }
}
