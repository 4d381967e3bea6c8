//! θ-subsumption engine (§4.2).
//!
//! `c1` θ-subsumes `c2` iff some substitution θ over `c1`'s variables makes
//! `head(c1)θ = head(c2)` and every literal of `body(c1)θ` appear in
//! `body(c2)`. The search is brute-force: skolemize `c2`, then try every
//! permutation (with-replacement, per §9) of the ground constants available
//! as an assignment for `c1`'s variables.

use crate::clause::Clause;
use crate::literal::Literal;
use crate::subst::{skolemize, Substitution};
use crate::term::Term;
use itertools::Itertools;
use std::collections::HashSet;

/// Clauses with more distinct variables than this are treated as
/// unsubsumable (conservative `false`) rather than searched — the
/// permutation space is factorial in the variable count (§4.2).
pub const MAX_SUBSUMPTION_VARIABLES: usize = 8;

/// `true` iff `c1` θ-subsumes `c2` (§4.2).
pub fn subsumes(c1: &Clause, c2: &Clause) -> bool {
    let (Some(h1), Some(h2)) = (&c1.head, &c2.head) else {
        // The empty clause sentinel is only reflexively comparable.
        return c1 == c2;
    };
    if h1.predicate != h2.predicate || h1.args.len() != h2.args.len() {
        return false;
    }

    let (c2_ground, mapping) = skolemize(c2);
    let head2_str = c2_ground.head.as_ref().expect("head present, checked above").to_string();
    let body2: HashSet<String> = c2_ground.body.iter().map(ToString::to_string).collect();

    let vars = c1.variables();
    if vars.len() > MAX_SUBSUMPTION_VARIABLES {
        return false;
    }
    if vars.is_empty() {
        let theta = Substitution::new();
        return matches_under(h1, &c1.body, &theta, &head2_str, &body2);
    }

    let mut pool: Vec<Term> = mapping.values().cloned().collect();
    pool.extend(constants_of(c2));
    if pool.is_empty() {
        // c2 is entirely variables with no skolem image, which cannot
        // happen once skolemized — defensive fallback only.
        return false;
    }
    while pool.len() < vars.len() {
        let doubled = pool.clone();
        pool.extend(doubled);
    }

    pool.into_iter().permutations(vars.len()).any(|perm| {
        let theta: Substitution = vars
            .iter()
            .map(|v| v.name.clone())
            .zip(perm)
            .collect();
        matches_under(h1, &c1.body, &theta, &head2_str, &body2)
    })
}

/// `true` iff `a` and `b` θ-subsume each other (logical equivalence, §4.6).
pub fn mutually_subsumes(a: &Clause, b: &Clause) -> bool {
    subsumes(a, b) && subsumes(b, a)
}

fn matches_under(
    head1: &Literal,
    body1: &[Literal],
    theta: &Substitution,
    head2_str: &str,
    body2: &HashSet<String>,
) -> bool {
    if head1.substitute(theta).to_string() != head2_str {
        return false;
    }
    body1.iter().all(|lit| body2.contains(&lit.substitute(theta).to_string()))
}

/// Distinct constants appearing anywhere in `clause` (head and body),
/// including inside compound terms.
fn constants_of(clause: &Clause) -> Vec<Term> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    let mut visit = |term: &Term| collect_constants(term, &mut seen, &mut out);
    if let Some(h) = &clause.head {
        for t in &h.args {
            visit(t);
        }
    }
    for lit in &clause.body {
        for t in &lit.args {
            visit(t);
        }
    }
    out
}

fn collect_constants(term: &Term, seen: &mut HashSet<String>, out: &mut Vec<Term>) {
    match term {
        Term::Constant(c) => {
            if seen.insert(c.clone()) {
                out.push(term.clone());
            }
        }
        Term::Variable(_) => {}
        Term::Compound(_, args) => {
            for a in args {
                collect_constants(a, seen, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::Literal;
    use crate::term::Term;

    fn rule(head: Literal, body: Vec<Literal>) -> Clause {
        Clause::new(Some(head), body)
    }

    #[test]
    fn s1_subsumption_positive() {
        // p(X) :- q(X,Y).  subsumes  p(a) :- q(a,b), r(a).
        let c1 = rule(
            Literal::positive("p", vec![Term::var("X")]),
            vec![Literal::positive("q", vec![Term::var("X"), Term::var("Y")])],
        );
        let c2 = rule(
            Literal::positive("p", vec![Term::constant("a")]),
            vec![
                Literal::positive("q", vec![Term::constant("a"), Term::constant("b")]),
                Literal::positive("r", vec![Term::constant("a")]),
            ],
        );
        assert!(subsumes(&c1, &c2));
    }

    #[test]
    fn s2_subsumption_negative_on_head() {
        let c1 = rule(
            Literal::positive("p", vec![Term::var("X")]),
            vec![Literal::positive("q", vec![Term::var("X")])],
        );
        let c2 = rule(
            Literal::positive("r", vec![Term::constant("a")]),
            vec![Literal::positive("q", vec![Term::constant("a")])],
        );
        assert!(!subsumes(&c1, &c2));
    }

    #[test]
    fn invariant_subsumption_reflexive() {
        let c = rule(
            Literal::positive("initiatedAt", vec![Term::var("E"), Term::var("T")]),
            vec![
                Literal::positive("happensAt", vec![Term::var("E"), Term::var("T")]),
                Literal::positive("holdsAt", vec![Term::var("P"), Term::var("T")]),
            ],
        );
        assert!(subsumes(&c, &c));
    }

    #[test]
    fn more_specific_clause_is_not_subsumed_by_unrelated_body() {
        let c1 = rule(
            Literal::positive("p", vec![Term::var("X")]),
            vec![Literal::positive("q", vec![Term::var("X")])],
        );
        let c2 = rule(
            Literal::positive("p", vec![Term::constant("a")]),
            vec![Literal::positive("r", vec![Term::constant("a")])],
        );
        assert!(!subsumes(&c1, &c2));
    }

    #[test]
    fn above_variable_cap_is_conservatively_false() {
        let vars: Vec<Term> = (0..MAX_SUBSUMPTION_VARIABLES + 1)
            .map(|i| Term::var(format!("V{i}")))
            .collect();
        let c1 = rule(Literal::positive("p", vec![Term::var("X")]), vec![Literal::positive("q", vars)]);
        assert!(!subsumes(&c1, &c1));
    }
}
