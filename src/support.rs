//! Support-set management and theory compression (§4.6).

use crate::clause::{Clause, ClauseId, ClauseStore, Theory};
use crate::error::{LearnerError, LearnerResult};
use crate::literal::Literal;
use crate::refinement;
use crate::subsumption::subsumes;

/// Appends `rule` to `support` (duplicates are the caller's problem — mirrors
/// a plain list append, per §4.6's `add`).
pub fn add(support: &mut Vec<ClauseId>, rule: ClauseId) {
    support.push(rule);
}

pub fn add_all(support: &mut Vec<ClauseId>, rules: impl IntoIterator<Item = ClauseId>) {
    support.extend(rules);
}

pub fn remove(support: &mut Vec<ClauseId>, rule: ClauseId) {
    support.retain(|id| *id != rule);
}

/// Removes any `p` from `support` for which some other `q` in the same set
/// satisfies `p subsumes q` — the more general witness is dropped, keeping
/// the more specific ones (§4.6).
pub fn compress(support: &[ClauseId], store: &ClauseStore) -> Vec<ClauseId> {
    let mut kept = Vec::with_capacity(support.len());
    for (i, &p) in support.iter().enumerate() {
        let p_clause = store.get(p);
        let is_subsumed_away = support.iter().enumerate().any(|(j, &q)| {
            i != j && subsumes(p_clause, store.get(q))
        });
        if !is_subsumed_away {
            kept.push(p);
        }
    }
    kept
}

/// Removes any clause `p` for which some other `q` mutually θ-subsumes it,
/// keeping one representative deterministically (lowest `created_order`).
pub fn compress_theory(clauses: &[ClauseId], store: &ClauseStore) -> Vec<ClauseId> {
    let mut ordered: Vec<ClauseId> = clauses.to_vec();
    ordered.sort_by_key(|id| store.get(*id).created_order);

    let mut kept: Vec<ClauseId> = Vec::new();
    for id in ordered {
        let c = store.get(id);
        let duplicate = kept.iter().any(|&kept_id| {
            let k = store.get(kept_id);
            subsumes(c, k) && subsumes(k, c)
        });
        if !duplicate {
            kept.push(id);
        }
    }
    // Restore the caller's original relative order among survivors.
    clauses.iter().copied().filter(|id| kept.contains(id)).collect()
}

/// Positional lookup into `clause`'s support set (§6/§7): the `j`-th body
/// literal of the `i`-th support witness, both 1-indexed. Out-of-range `i`
/// or `j` is `LearnerError::NotFound` rather than a panic.
pub fn get_support_literal<'a>(
    clause: &Clause,
    store: &'a ClauseStore,
    i: usize,
    j: usize,
) -> LearnerResult<&'a Literal> {
    let support_len = clause.support_set.len();
    if i == 0 || i > support_len {
        return Err(LearnerError::NotFound { row: i, col: j, support_len });
    }
    let witness = store.get(clause.support_set[i - 1]);
    let body_len = witness.body.len();
    if j == 0 || j > body_len {
        return Err(LearnerError::NotFound { row: i, col: j, support_len });
    }
    Ok(&witness.body[j - 1])
}

/// When `n` subsumes an existing top rule `t`, unions their support sets
/// into `t`, regenerates `t`'s refinements, and reports that `n` should be
/// discarded rather than admitted as a new top clause (§4.6).
pub fn merge_on_subsume(
    theory: &mut Theory,
    new_clause: &Clause,
    specialization_depth: usize,
) -> Option<ClauseId> {
    let targets: Vec<ClauseId> = theory.top_clauses().collect();
    for t_id in targets {
        let t = theory.store.get(t_id);
        if subsumes(new_clause, t) {
            let mut merged_support = t.support_set.clone();
            merged_support.extend(new_clause.support_set.iter().copied());
            let t_mut = theory.store.get_mut(t_id);
            t_mut.support_set = merged_support;
            refinement::refine(&mut theory.store, t_id, specialization_depth, &[]);
            return Some(t_id);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::Literal;
    use crate::term::Term;

    fn p(args: &str) -> Clause {
        Clause::new(Some(Literal::positive("p", vec![Term::var(args)])), vec![])
    }

    #[test]
    fn compress_drops_the_more_general_witness() {
        let mut store = ClauseStore::new();
        let general = Clause::new(
            Some(Literal::positive("p", vec![Term::var("X")])),
            vec![Literal::positive("q", vec![Term::var("X")])],
        );
        let specific = Clause::new(
            Some(Literal::positive("p", vec![Term::constant("a")])),
            vec![
                Literal::positive("q", vec![Term::constant("a")]),
                Literal::positive("r", vec![Term::constant("a")]),
            ],
        );
        let general_id = store.insert(general);
        let specific_id = store.insert(specific);
        let support = vec![general_id, specific_id];

        let compressed = compress(&support, &store);
        assert_eq!(compressed, vec![specific_id]);
    }

    #[test]
    fn compress_is_idempotent() {
        let mut store = ClauseStore::new();
        let a = store.insert(p("X"));
        let b = store.insert(p("Y"));
        let support = vec![a, b];
        let once = compress(&support, &store);
        let twice = compress(&once, &store);
        assert_eq!(once, twice);
    }

    #[test]
    fn get_support_literal_addresses_the_right_body_literal() {
        let mut store = ClauseStore::new();
        let witness = Clause::new(
            Some(Literal::positive("p", vec![Term::var("X")])),
            vec![
                Literal::positive("q", vec![Term::var("X")]),
                Literal::positive("r", vec![Term::var("X")]),
            ],
        );
        let witness_id = store.insert(witness);
        let mut top = p("X");
        top.support_set = vec![witness_id];

        let lit = get_support_literal(&top, &store, 1, 2).unwrap();
        assert_eq!(lit.predicate, "r");
    }

    #[test]
    fn get_support_literal_rejects_row_out_of_range() {
        let store = ClauseStore::new();
        let top = p("X");
        let err = get_support_literal(&top, &store, 1, 1).unwrap_err();
        assert_eq!(
            err,
            crate::error::LearnerError::NotFound { row: 1, col: 1, support_len: 0 }
        );
    }

    #[test]
    fn get_support_literal_rejects_col_out_of_range() {
        let mut store = ClauseStore::new();
        let witness_id = store.insert(p("X"));
        let mut top = p("X");
        top.support_set = vec![witness_id];
        let err = get_support_literal(&top, &store, 1, 5).unwrap_err();
        assert_eq!(
            err,
            crate::error::LearnerError::NotFound { row: 1, col: 5, support_len: 1 }
        );
    }

    #[test]
    fn theory_compression_keeps_lowest_created_order_on_mutual_subsumption() {
        let mut store = ClauseStore::new();
        let c1 = store.insert(Clause::new(
            Some(Literal::positive("p", vec![Term::var("X")])),
            vec![Literal::positive("q", vec![Term::var("X")])],
        ));
        let c2 = store.insert(Clause::new(
            Some(Literal::positive("p", vec![Term::var("Y")])),
            vec![Literal::positive("q", vec![Term::var("Y")])],
        ));
        let survivors = compress_theory(&[c1, c2], &store);
        assert_eq!(survivors, vec![c1]);
    }
}
