//! Online learning loop and state machine (§4.5).

use crate::clause::{Clause, ClauseId, Theory};
use crate::config::LearnerConfig;
use crate::error::{LearnerError, LearnerResult};
use crate::external::{AspSolver, Example, InferredState, RuleScorer, StructureLearner};
use crate::hoeffding::should_swap;
use crate::literal::Literal;
use crate::refinement;
use crate::scoring::decide_specialization;
use crate::support;
use tracing::{info, warn};

/// Cumulative statistics maintained across the whole example stream.
#[derive(Debug, Clone, Default)]
pub struct GlobalStats {
    pub tps: u64,
    pub fps: u64,
    pub fns: u64,
    pub total_groundings: u64,
    pub examples_seen: u64,
}

/// The online learner: owns the theory and drives the per-example protocol
/// of §4.5, generic over its three delegated collaborators.
pub struct Learner<S, L, R>
where
    S: AspSolver,
    L: StructureLearner,
    R: RuleScorer,
{
    pub theory: Theory,
    pub inertia_atoms: Vec<Literal>,
    pub stats: GlobalStats,
    pub config: LearnerConfig,
    solver: S,
    structure_learner: L,
    scorer: R,
}

impl<S, L, R> Learner<S, L, R>
where
    S: AspSolver,
    L: StructureLearner,
    R: RuleScorer,
{
    pub fn new(config: LearnerConfig, solver: S, structure_learner: L, scorer: R) -> Self {
        Learner {
            theory: Theory::new(),
            inertia_atoms: Vec::new(),
            stats: GlobalStats::default(),
            config,
            solver,
            structure_learner,
            scorer,
        }
    }

    /// Runs the full per-example protocol of §4.5 on one example, mutating
    /// the theory and global statistics in place.
    pub fn process_example(&mut self, example: &Example) -> LearnerResult<()> {
        // Step 1: candidate selection.
        let rule_ids: Vec<ClauseId> = self
            .theory
            .top_clauses()
            .filter(|id| {
                let c = self.theory.store.get(*id);
                !c.body.is_empty() && crate::scoring::precision(c) >= self.config.learning.prune_threshold
            })
            .collect();
        let rules: Vec<Clause> = rule_ids.iter().map(|id| self.theory.store.get(*id).clone()).collect();

        // Step 2: inference. Atoms reported by the previous example's
        // scoring pass are folded into this example's facts when inertia is
        // enabled (§4.5 state, §9 diffuse_inertia).
        let inference_example = if self.config.learning.with_inertia && !self.inertia_atoms.is_empty() {
            let mut facts = example.facts.clone();
            facts.extend(self.inertia_atoms.iter().cloned());
            Some(Example::new(facts, example.query_atoms.clone(), example.axiom_module.clone()))
        } else {
            None
        };
        let inference_input = inference_example.as_ref().unwrap_or(example);

        if self.config.learning.with_inertia && self.config.learning.diffuse_inertia {
            self.inertia_atoms.clear();
        }

        let inferred_state: InferredState = if rules.is_empty() {
            InferredState::new()
        } else {
            match self.solver.infer(&rules, inference_input, &self.config) {
                Ok(state) => state,
                Err(err) => {
                    warn!(error = %err, "solver call failed; skipping example for structural updates");
                    return Err(LearnerError::Solver(err));
                }
            }
        };

        // Step 3: scoring of the full theory including refinements.
        let mut all_ids: Vec<ClauseId> = self.theory.top_clauses().collect();
        for id in self.theory.top_clauses().collect::<Vec<_>>() {
            all_ids.extend(self.theory.store.get(id).refinements.iter().copied());
        }
        let mut all_clauses: Vec<Clause> = all_ids.iter().map(|id| self.theory.store.get(*id).clone()).collect();
        let update = self
            .scorer
            .score_and_update_weights(example, &inferred_state, &mut all_clauses, &self.config);
        for (id, updated) in all_ids.iter().zip(all_clauses.iter()) {
            if updated.weight_floor_violated(self.config.learning.weight_floor) {
                return Err(LearnerError::InvariantViolation(format!(
                    "clause {id} weight {} fell below floor {} after scoring",
                    updated.weight, self.config.learning.weight_floor
                )));
            }
        }
        for (id, updated) in all_ids.iter().zip(all_clauses.into_iter()) {
            *self.theory.store.get_mut(*id) = updated;
        }

        if self.config.learning.with_inertia {
            self.inertia_atoms = update.new_inertia_atoms.clone();
        }

        // Step 4: mistake-driven structural update.
        if update.fps + update.fns > 0 {
            let new_rules = self
                .structure_learner
                .generate_new_rules(&rules, example, &self.config);
            for mut new_clause in new_rules {
                new_clause.created_order = self.theory.store.len() as u64;
                match support::merge_on_subsume(
                    &mut self.theory,
                    &new_clause,
                    self.config.learning.specialization_depth,
                ) {
                    Some(_merged_into) => {}
                    None => {
                        let id = self.theory.add_top_clause(new_clause);
                        refinement::refine(
                            &mut self.theory.store,
                            id,
                            self.config.learning.specialization_depth,
                            &[],
                        );
                    }
                }
            }
        }

        // Step 7: global statistics.
        self.stats.tps += update.tps;
        self.stats.fps += update.fps;
        self.stats.fns += update.fns;
        self.stats.total_groundings += update.total_groundings;
        self.stats.examples_seen += 1;

        info!(
            examples_seen = self.stats.examples_seen,
            tps = update.tps,
            fps = update.fps,
            fns = update.fns,
            "processed example"
        );

        // Step 6: rule expansion via the Hoeffding test.
        self.expand_rules();

        Ok(())
    }

    /// For every eligible top clause, runs the Hoeffding test (§4.4) and
    /// swaps in its best refinement when the test passes, clearing
    /// statistics on replacement. Returns the ids of clauses that were
    /// replaced (their arena ids — the winning refinement keeps its own id
    /// and is promoted in place of the parent within the theory's lists).
    pub fn expand_rules(&mut self) -> Vec<ClauseId> {
        let candidates: Vec<ClauseId> = self.theory.top_clauses().collect();
        let mut replaced = Vec::new();

        for id in candidates {
            if !self.theory.store.get(id).eligible_for_specialization {
                continue;
            }
            let Some(decision) =
                decide_specialization(&mut self.theory.store, id, self.config.learning.scoring_fun)
            else {
                continue;
            };
            let n = self.theory.store.get(id).seen;
            if should_swap(decision.mean_diff, self.config.learning.hoeffding_delta, n) && decision.best != id {
                let is_initiation = self.theory.initiation.contains(&id);
                self.theory.remove_top_clause(id);
                let best = self.theory.store.get_mut(decision.best);
                best.is_top_rule = true;
                best.clear_statistics();
                if is_initiation {
                    self.theory.initiation.push(decision.best);
                } else {
                    self.theory.termination.push(decision.best);
                }
                replaced.push(id);
            }
        }
        replaced
    }

    /// Runs a rescore pass over `training_stream` with the final rule set,
    /// after clearing per-rule statistics, and returns the ids of rules
    /// whose precision clears `prune_threshold` (§4.5 Termination).
    pub fn rescore<I>(&mut self, training_stream: I) -> LearnerResult<Vec<ClauseId>>
    where
        I: IntoIterator<Item = Example>,
    {
        for id in self.theory.top_clauses().collect::<Vec<_>>() {
            self.theory.store.get_mut(id).clear_statistics();
        }
        for example in training_stream {
            self.process_example(&example)?;
        }
        Ok(self
            .theory
            .top_clauses()
            .filter(|id| {
                crate::scoring::precision(self.theory.store.get(*id))
                    >= self.config.learning.prune_threshold
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::INITIATED_AT;
    use crate::config::LearnerConfig;
    use crate::error::SolverError;
    use crate::term::Term;

    struct NoOpSolver;
    impl AspSolver for NoOpSolver {
        fn infer(
            &self,
            _rules: &[Clause],
            _example: &Example,
            _globals: &LearnerConfig,
        ) -> Result<InferredState, SolverError> {
            Ok(InferredState::new())
        }
    }

    struct NoNewRules;
    impl StructureLearner for NoNewRules {
        fn generate_new_rules(&self, _current_theory: &[Clause], _example: &Example, _options: &LearnerConfig) -> Vec<Clause> {
            Vec::new()
        }
    }

    struct FixedScorer;
    impl RuleScorer for FixedScorer {
        fn score_and_update_weights(
            &self,
            _example: &Example,
            _inferred_state: &InferredState,
            rules: &mut [Clause],
            _options: &LearnerConfig,
        ) -> crate::external::ScoreUpdate {
            for r in rules.iter_mut() {
                r.tp += 1;
                r.seen += 1;
            }
            crate::external::ScoreUpdate {
                tps: rules.len() as u64,
                fps: 0,
                fns: 0,
                total_groundings: rules.len() as u64,
                new_inertia_atoms: Vec::new(),
            }
        }
    }

    #[test]
    fn process_example_updates_global_statistics() {
        let mut learner = Learner::new(LearnerConfig::default(), NoOpSolver, NoNewRules, FixedScorer);
        let clause = Clause::new(
            Some(Literal::positive(INITIATED_AT, vec![Term::var("E"), Term::var("T")])),
            vec![Literal::positive("happensAt", vec![Term::var("E"), Term::var("T")])],
        );
        learner.theory.add_top_clause(clause);

        let example = Example::new(vec![], vec![], "ec");
        learner.process_example(&example).unwrap();

        assert_eq!(learner.stats.examples_seen, 1);
        assert_eq!(learner.stats.tps, 1);
    }

    /// A solver that records whichever facts it was actually invoked with,
    /// so tests can observe whether reported inertia atoms were folded in.
    struct RecordingSolver {
        seen_facts: std::cell::RefCell<Vec<Literal>>,
    }
    impl AspSolver for RecordingSolver {
        fn infer(
            &self,
            _rules: &[Clause],
            example: &Example,
            _globals: &LearnerConfig,
        ) -> Result<InferredState, SolverError> {
            *self.seen_facts.borrow_mut() = example.facts.clone();
            Ok(InferredState::new())
        }
    }

    struct InertiaReportingScorer;
    impl RuleScorer for InertiaReportingScorer {
        fn score_and_update_weights(
            &self,
            _example: &Example,
            _inferred_state: &InferredState,
            rules: &mut [Clause],
            _options: &LearnerConfig,
        ) -> crate::external::ScoreUpdate {
            for r in rules.iter_mut() {
                r.tp += 1;
                r.seen += 1;
            }
            crate::external::ScoreUpdate {
                tps: rules.len() as u64,
                fps: 0,
                fns: 0,
                total_groundings: rules.len() as u64,
                new_inertia_atoms: vec![Literal::positive("holdsAt", vec![Term::constant("p"), Term::constant("1")])],
            }
        }
    }

    #[test]
    fn reported_inertia_atoms_are_folded_into_the_next_example_and_then_diffused() {
        let mut config = LearnerConfig::default();
        config.learning.with_inertia = true;
        config.learning.diffuse_inertia = true;
        let solver = RecordingSolver { seen_facts: std::cell::RefCell::new(Vec::new()) };
        let mut learner = Learner::new(config, solver, NoNewRules, InertiaReportingScorer);
        let clause = Clause::new(
            Some(Literal::positive(INITIATED_AT, vec![Term::var("E"), Term::var("T")])),
            vec![Literal::positive("happensAt", vec![Term::var("E"), Term::var("T")])],
        );
        learner.theory.add_top_clause(clause);

        let first = Example::new(vec![], vec![], "ec");
        learner.process_example(&first).unwrap();
        assert_eq!(learner.inertia_atoms.len(), 1);

        let second = Example::new(vec![], vec![], "ec");
        learner.process_example(&second).unwrap();

        let seen = learner.solver.seen_facts.borrow();
        assert!(seen.iter().any(|f| f.predicate == "holdsAt"));
    }

    struct FloorBreakingScorer;
    impl RuleScorer for FloorBreakingScorer {
        fn score_and_update_weights(
            &self,
            _example: &Example,
            _inferred_state: &InferredState,
            rules: &mut [Clause],
            _options: &LearnerConfig,
        ) -> crate::external::ScoreUpdate {
            for r in rules.iter_mut() {
                r.weight = 0.0;
            }
            crate::external::ScoreUpdate::default()
        }
    }

    #[test]
    fn weight_dropping_below_the_floor_is_a_fatal_invariant_violation() {
        let mut learner = Learner::new(LearnerConfig::default(), NoOpSolver, NoNewRules, FloorBreakingScorer);
        let clause = Clause::new(
            Some(Literal::positive(INITIATED_AT, vec![Term::var("E"), Term::var("T")])),
            vec![Literal::positive("happensAt", vec![Term::var("E"), Term::var("T")])],
        );
        learner.theory.add_top_clause(clause);

        let example = Example::new(vec![], vec![], "ec");
        let result = learner.process_example(&example);
        assert!(matches!(result, Err(LearnerError::InvariantViolation(_))));
    }
}
