//! Per-rule scoring and the Hoeffding-driven specialization decision (§4.4).

use crate::clause::{Clause, ClauseId, ClauseStore};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Closed set of scoring functions, selected from configuration (§9 —
/// replaces runtime string-keyed dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringMode {
    Default,
    FoilGain,
    FScore,
}

impl Default for ScoringMode {
    fn default() -> Self {
        ScoringMode::Default
    }
}

/// `tps / (tps + fps)`, 0 if the denominator is zero.
pub fn precision(clause: &Clause) -> f64 {
    let denom = clause.tp + clause.fp;
    if denom == 0 {
        0.0
    } else {
        clause.tp as f64 / denom as f64
    }
}

/// `tps / (tps + fns)`, 0 if the denominator is zero.
pub fn recall(clause: &Clause) -> f64 {
    let denom = clause.tp + clause.fn_count;
    if denom == 0 {
        0.0
    } else {
        clause.tp as f64 / denom as f64
    }
}

/// `2·P·R / (P + R)`, 0 if `P + R = 0`.
pub fn fscore(clause: &Clause) -> f64 {
    let p = precision(clause);
    let r = recall(clause);
    if p + r == 0.0 {
        0.0
    } else {
        2.0 * p * r / (p + r)
    }
}

/// Normalized information-gain-like score against `parent` (§4.4).
pub fn foil_gain(clause: &Clause, parent: &Clause) -> f64 {
    let self_coverage = precision(clause);
    if self_coverage == 0.0 {
        return 0.0;
    }
    let parent_coverage = precision(parent);
    if parent_coverage == 1.0 || parent_coverage == 0.0 {
        return 0.0;
    }
    let raw = clause.tp as f64 * (self_coverage.ln() - parent_coverage.ln());
    let raw = raw.max(0.0);
    let max = parent.tp as f64 * -parent_coverage.ln();
    if max == 0.0 {
        0.0
    } else {
        raw / max
    }
}

/// Dispatches to the scoring function named by `mode`. `parent` is required
/// for `foilgain` and ignored otherwise.
pub fn score(mode: ScoringMode, clause: &Clause, parent: &Clause) -> f64 {
    match mode {
        ScoringMode::Default => precision(clause),
        ScoringMode::FScore => fscore(clause),
        ScoringMode::FoilGain => foil_gain(clause, parent),
    }
}

/// Result of the per-example specialization decision (§4.4).
#[derive(Debug, Clone)]
pub struct SpecializationDecision {
    pub mean_diff: f64,
    pub best: ClauseId,
    pub second: ClauseId,
}

/// Evaluates whether `id` is eligible for specialization this round and, if
/// so, scores its refinement pool and updates its running mean-diff.
/// Returns `None` when step 1's eligibility gate fails.
pub fn decide_specialization(
    store: &mut ClauseStore,
    id: ClauseId,
    mode: ScoringMode,
) -> Option<SpecializationDecision> {
    let clause = store.get(id);
    let support_longest = clause
        .support_set
        .first()
        .map(|s| store.get(*s).body_len());
    let Some(support_longest) = support_longest else {
        return None;
    };
    if clause.body_len() >= support_longest || clause.refinements.is_empty() {
        return None;
    }

    let pool: Vec<ClauseId> = if mode == ScoringMode::FoilGain {
        clause.refinements.clone()
    } else {
        std::iter::once(id).chain(clause.refinements.iter().copied()).collect()
    };

    let parent_id = id;
    let mut scored: Vec<(ClauseId, f64, f64, f64, i64)> = pool
        .iter()
        .map(|cid| {
            let c = store.get(*cid);
            let parent = store.get(parent_id);
            (
                *cid,
                score(mode, c, parent),
                precision(c),
                c.weight,
                -(c.body_len() as i64),
            )
        })
        .collect();

    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal))
            .then_with(|| b.3.partial_cmp(&a.3).unwrap_or(Ordering::Equal))
            .then_with(|| b.4.cmp(&a.4))
    });

    let best = scored[0];
    let second = if scored.len() > 1 { scored[1] } else { scored[0] };
    let new_diff = best.1 - second.1;

    let clause = store.get_mut(id);
    let new_mean =
        (clause.previous_mean_diff * clause.previous_mean_diff_count as f64 + new_diff)
            / (clause.previous_mean_diff_count as f64 + 1.0);
    clause.previous_mean_diff_count += 1;
    clause.previous_mean_diff = new_mean;

    Some(SpecializationDecision {
        mean_diff: new_mean,
        best: best.0,
        second: second.0,
    })
}
