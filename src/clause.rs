//! Clause and Theory data model (§3).
//!
//! Clauses live in a single arena (`ClauseStore`) owned by the `Theory`,
//! addressed by [`ClauseId`]. Parent back-pointers, support-set membership
//! and refinement lists are all `ClauseId` values rather than owned
//! references, so there is no possibility of a reference cycle (§3
//! Ownership, §9).

use crate::literal::Literal;
use crate::term::{variables_in, Variable};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rule heads asserting event onset.
pub const INITIATED_AT: &str = "initiatedAt";
/// Rule heads asserting event end.
pub const TERMINATED_AT: &str = "terminatedAt";

/// Index into a [`ClauseStore`]'s arena. Stable identity for a clause, used
/// for equality-by-identity (parent pointers, support sets, refinement
/// lists) independent of the clause's logical content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClauseId(pub usize);

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A Horn rule plus its streaming bookkeeping (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clause {
    #[serde(default)]
    pub id: ClauseId,
    /// `None` is the sentinel empty clause (§4.1 Edge cases).
    pub head: Option<Literal>,
    pub body: Vec<Literal>,

    pub weight: f64,
    pub tp: u64,
    pub fp: u64,
    pub fn_count: u64,
    pub tn: u64,
    pub total_groundings: u64,
    pub seen: u64,

    pub parent: Option<ClauseId>,
    pub support_set: Vec<ClauseId>,
    pub refinements: Vec<ClauseId>,

    pub previous_mean_diff: f64,
    pub previous_mean_diff_count: u64,

    pub is_top_rule: bool,
    pub is_bottom_rule: bool,
    pub eligible_for_specialization: bool,
    pub is_new: bool,

    /// Insertion order into the owning [`ClauseStore`], used as the
    /// deterministic tie-break in theory compression (§4.6).
    #[serde(default)]
    pub created_order: u64,
}

impl Default for ClauseId {
    fn default() -> Self {
        ClauseId(usize::MAX)
    }
}

impl Clause {
    /// Builds a fresh top-level clause. Bookkeeping counters start at zero;
    /// `weight` starts at 1.0 (callers that load a weight from a parser or
    /// inherit one from a parent should overwrite it explicitly).
    pub fn new(head: Option<Literal>, body: Vec<Literal>) -> Self {
        Clause {
            id: ClauseId::default(),
            head,
            body,
            weight: 1.0,
            tp: 0,
            fp: 0,
            fn_count: 0,
            tn: 0,
            total_groundings: 0,
            seen: 0,
            parent: None,
            support_set: Vec::new(),
            refinements: Vec::new(),
            previous_mean_diff: 0.0,
            previous_mean_diff_count: 0,
            is_top_rule: true,
            is_bottom_rule: false,
            eligible_for_specialization: true,
            is_new: true,
            created_order: 0,
        }
    }

    /// The distinct sentinel value used where a well-formed clause is
    /// required but none is available (§4.1 Edge cases).
    pub fn empty() -> Self {
        Clause::new(None, Vec::new())
    }

    pub fn head_predicate(&self) -> Option<&str> {
        self.head.as_ref().map(|h| h.predicate.as_str())
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn is_ground(&self) -> bool {
        self.head.as_ref().map_or(true, Literal::is_ground) && self.body.iter().all(Literal::is_ground)
    }

    /// Distinct variables, head then body, left-to-right (§4.1).
    pub fn variables(&self) -> Vec<&Variable> {
        let head_terms = self.head.iter().flat_map(|h| h.args.iter());
        let body_terms = self.body.iter().flat_map(|l| l.args.iter());
        variables_in(head_terms.chain(body_terms))
    }

    /// `true` iff a collaborator update pushed `weight` below the documented
    /// non-zero floor (§3 invariant 5). Detection only — callers decide how
    /// to react (§7: this is a fatal invariant violation, not one to paper
    /// over by clamping).
    pub fn weight_floor_violated(&self, floor: f64) -> bool {
        self.weight < floor
    }

    /// Resets streaming statistics. Per invariant 4 (§3), this is the only
    /// legal reset of {tps, fps, fns, seen, refinements, running means}.
    pub fn clear_statistics(&mut self) {
        self.tp = 0;
        self.fp = 0;
        self.fn_count = 0;
        self.seen = 0;
        self.refinements.clear();
        self.previous_mean_diff = 0.0;
        self.previous_mean_diff_count = 0;
    }
}

impl PartialEq for Clause {
    /// Clause equality considers head and body only; order matters (§4.1 —
    /// multiset equality is *not* assumed here, only under θ-subsumption).
    fn eq(&self, other: &Self) -> bool {
        self.head == other.head && self.body == other.body
    }
}
impl Eq for Clause {}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(head) = &self.head else {
            return write!(f, "[].");
        };
        if self.body.is_empty() {
            write!(f, "{head}.")
        } else {
            let body: Vec<String> = self.body.iter().map(ToString::to_string).collect();
            write!(f, "{} :- {}.", head, body.join(","))
        }
    }
}

/// Arena owning every clause (top, bottom/support, or refinement) a
/// [`Theory`] knows about.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ClauseStore {
    clauses: Vec<Clause>,
}

impl ClauseStore {
    pub fn new() -> Self {
        ClauseStore::default()
    }

    pub fn insert(&mut self, mut clause: Clause) -> ClauseId {
        let id = ClauseId(self.clauses.len());
        clause.id = id;
        clause.created_order = id.0 as u64;
        self.clauses.push(clause);
        id
    }

    pub fn get(&self, id: ClauseId) -> &Clause {
        &self.clauses[id.0]
    }

    pub fn get_mut(&mut self, id: ClauseId) -> &mut Clause {
        &mut self.clauses[id.0]
    }

    pub fn try_get(&self, id: ClauseId) -> Option<&Clause> {
        self.clauses.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// The set of top clauses, partitioned by head predicate (§3).
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Theory {
    pub store: ClauseStore,
    pub initiation: Vec<ClauseId>,
    pub termination: Vec<ClauseId>,
}

impl Theory {
    pub fn new() -> Self {
        Theory::default()
    }

    pub fn top_clauses(&self) -> impl Iterator<Item = ClauseId> + '_ {
        self.initiation.iter().chain(self.termination.iter()).copied()
    }

    /// Inserts `clause` into the arena and, if its head predicate is one of
    /// the two event-calculus targets, partitions it into the matching
    /// sub-theory.
    pub fn add_top_clause(&mut self, clause: Clause) -> ClauseId {
        let predicate = clause.head_predicate().map(str::to_string);
        let id = self.store.insert(clause);
        match predicate.as_deref() {
            Some(INITIATED_AT) => self.initiation.push(id),
            Some(TERMINATED_AT) => self.termination.push(id),
            _ => {}
        }
        id
    }

    /// Removes `id` from whichever sub-theory list contains it (used by
    /// merge-on-subsume and rule expansion to swap a clause out without
    /// reclaiming its arena slot).
    pub fn remove_top_clause(&mut self, id: ClauseId) {
        self.initiation.retain(|c| *c != id);
        self.termination.retain(|c| *c != id);
    }
}
