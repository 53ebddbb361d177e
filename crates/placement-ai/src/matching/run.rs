use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};

use super::allocation::AllocationEngine;
use super::domain::{Candidate, CandidateId, Opportunity, OpportunityId};
use super::features::FeatureExtractor;
use super::lexical::LexicalIndex;
use super::scoring::{EnsembleScorer, ScoredEdge, ScorerConfig};

/// Opportunity left out of allocation because it has no usable capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedOpportunity {
    pub opportunity_id: OpportunityId,
    pub capacity: i32,
    pub reason: String,
}

/// Result of one matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingOutcome {
    /// Seed of the scorer that produced the scores, or the run config's seed when the scorer was
    /// assembled from caller-supplied models.
    pub seed: u64,
    pub scored_pairs: usize,
    pub matches: Vec<ScoredEdge>,
    pub excluded_opportunities: Vec<ExcludedOpportunity>,
}

impl MatchingOutcome {
    fn empty(seed: u64, excluded_opportunities: Vec<ExcludedOpportunity>) -> Self {
        Self {
            seed,
            scored_pairs: 0,
            matches: Vec::new(),
            excluded_opportunities,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Structural problems that make a run meaningless. Numeric edge cases never end up here.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error("candidate at position {position} is missing an identifier")]
    MissingCandidateId { position: usize },
    #[error("opportunity at position {position} is missing an identifier")]
    MissingOpportunityId { position: usize },
    #[error("candidate id '{0}' appears more than once")]
    DuplicateCandidateId(CandidateId),
    #[error("opportunity id '{0}' appears more than once")]
    DuplicateOpportunityId(OpportunityId),
}

/// Builds the index, scores every eligible pair and allocates, all over explicit inputs.
#[derive(Debug, Clone, Default)]
pub struct MatchingRun {
    config: ScorerConfig,
}

impl MatchingRun {
    pub fn new(config: ScorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn execute(
        &self,
        candidates: &[Candidate],
        opportunities: &[Opportunity],
    ) -> Result<MatchingOutcome, MatchingError> {
        let scorer = EnsembleScorer::new(&self.config);
        self.execute_with_scorer(&scorer, candidates, opportunities)
    }

    /// Same pipeline with a caller-supplied scorer, e.g. one with pinned or swapped models.
    pub fn execute_with_scorer(
        &self,
        scorer: &EnsembleScorer,
        candidates: &[Candidate],
        opportunities: &[Opportunity],
    ) -> Result<MatchingOutcome, MatchingError> {
        let seed = scorer.seed().unwrap_or(self.config.seed);
        let span = info_span!(
            "matching_run",
            seed,
            candidates = candidates.len(),
            opportunities = opportunities.len()
        );
        let _entered = span.enter();

        validate(candidates, opportunities)?;

        let (eligible, excluded) = partition_by_capacity(opportunities);
        for entry in &excluded {
            warn!(
                opportunity = %entry.opportunity_id,
                capacity = entry.capacity,
                "opportunity excluded from allocation"
            );
        }

        if candidates.is_empty() || eligible.is_empty() {
            info!("nothing to allocate");
            return Ok(MatchingOutcome::empty(seed, excluded));
        }

        let index = corpus_index(candidates, opportunities);
        let extractor = FeatureExtractor::new(&index);

        let mut edges = Vec::with_capacity(candidates.len() * eligible.len());
        for candidate in candidates {
            for opportunity in &eligible {
                let features = extractor.extract(candidate, opportunity);
                edges.push(scorer.score(&candidate.id, &opportunity.id, features));
            }
        }
        let scored_pairs = edges.len();

        let matches = AllocationEngine::greedy().allocate(edges, opportunities);

        info!(
            scored_pairs,
            accepted = matches.len(),
            vocabulary = index.vocabulary_len(),
            "matching run complete"
        );

        Ok(MatchingOutcome {
            seed,
            scored_pairs,
            matches,
            excluded_opportunities: excluded,
        })
    }
}

/// Index over every candidate's skills followed by every opportunity's requirements.
pub fn corpus_index(candidates: &[Candidate], opportunities: &[Opportunity]) -> LexicalIndex {
    LexicalIndex::build(
        candidates
            .iter()
            .map(Candidate::skills_text)
            .chain(opportunities.iter().map(Opportunity::requirements_text)),
    )
}

fn validate(candidates: &[Candidate], opportunities: &[Opportunity]) -> Result<(), MatchingError> {
    let mut seen_candidates = BTreeSet::new();
    for (position, candidate) in candidates.iter().enumerate() {
        if candidate.id.0.trim().is_empty() {
            return Err(MatchingError::MissingCandidateId { position });
        }
        if !seen_candidates.insert(&candidate.id) {
            return Err(MatchingError::DuplicateCandidateId(candidate.id.clone()));
        }
    }

    let mut seen_opportunities = BTreeSet::new();
    for (position, opportunity) in opportunities.iter().enumerate() {
        if opportunity.id.0.trim().is_empty() {
            return Err(MatchingError::MissingOpportunityId { position });
        }
        if !seen_opportunities.insert(&opportunity.id) {
            return Err(MatchingError::DuplicateOpportunityId(
                opportunity.id.clone(),
            ));
        }
    }

    Ok(())
}

fn partition_by_capacity(
    opportunities: &[Opportunity],
) -> (Vec<&Opportunity>, Vec<ExcludedOpportunity>) {
    let mut eligible = Vec::new();
    let mut excluded = Vec::new();

    for opportunity in opportunities {
        if opportunity.is_allocatable() {
            eligible.push(opportunity);
        } else {
            excluded.push(ExcludedOpportunity {
                opportunity_id: opportunity.id.clone(),
                capacity: opportunity.capacity,
                reason: format!("capacity {} is below 1", opportunity.capacity),
            });
        }
    }

    (eligible, excluded)
}
