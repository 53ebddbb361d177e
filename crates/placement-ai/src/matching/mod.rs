//! Scoring-and-allocation engine.
//!
//! A run reads the candidate and opportunity sets once to build a [`LexicalIndex`], scores every
//! (candidate, opportunity) pair through the [`FeatureExtractor`] and [`EnsembleScorer`], then
//! hands the full edge list to the [`AllocationEngine`]. Everything here is a pure function of its
//! inputs and the scorer seed.

pub mod allocation;
pub mod domain;
pub mod features;
pub mod import;
pub mod lexical;
pub mod router;
pub mod run;
pub mod scoring;
pub mod summary;

#[cfg(test)]
mod tests;

pub use allocation::{AllocationEngine, AllocationStrategy, CapacityTable, GreedyAllocator};
pub use domain::{
    Candidate, CandidateId, Demographics, EducationLevel, LocationCategory, Opportunity,
    OpportunityId,
};
pub use features::{FeatureExtractor, FeatureKind, FeatureVector};
pub use import::{ImportError, RosterFormat, RosterImporter};
pub use lexical::LexicalIndex;
pub use router::{matching_router, MatchRequest, MatchResponse};
pub use run::{corpus_index, ExcludedOpportunity, MatchingError, MatchingOutcome, MatchingRun};
pub use scoring::{
    EnsembleScorer, EnsembleWeights, LexicalOnly, ModelKind, RandomShapeFunction, RuleBased,
    RuleContribution, ScoreBreakdown, ScoredEdge, ScorerConfig, ScoringModel,
};
pub use summary::{MatchingSummary, OpportunityFill};
