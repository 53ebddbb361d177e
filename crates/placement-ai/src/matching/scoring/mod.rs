mod config;
mod models;

pub use config::{
    EnsembleWeights, ScorerConfig, DEFAULT_HIDDEN_WIDTH, DEFAULT_SCORER_SEED, RULE_WEIGHTS,
    RULE_WEIGHT_TOTAL,
};
pub use models::{
    rule_contributions, LexicalOnly, ModelKind, RandomShapeFunction, RuleBased, RuleContribution,
    ScoringModel,
};

use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, OpportunityId};
use super::features::FeatureVector;

/// Labeled sub-scores behind a final compatibility score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub lexical: f64,
    pub rule_based: f64,
    pub shape: f64,
    #[serde(rename = "final")]
    pub final_score: f64,
}

/// One scored (candidate, opportunity) pair with everything needed to explain it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEdge {
    pub candidate_id: CandidateId,
    pub opportunity_id: OpportunityId,
    pub breakdown: ScoreBreakdown,
    pub features: FeatureVector,
    pub contributions: Vec<RuleContribution>,
}

impl ScoredEdge {
    pub fn score(&self) -> f64 {
        self.breakdown.final_score
    }
}

/// Combines the lexical, rule-based and shape signals into one weighted score.
///
/// Built once per run; the shape function's weights stay fixed for every pair scored by the same
/// instance.
pub struct EnsembleScorer {
    lexical: Box<dyn ScoringModel>,
    rule_based: Box<dyn ScoringModel>,
    shape: Box<dyn ScoringModel>,
    weights: EnsembleWeights,
    seed: Option<u64>,
}

impl EnsembleScorer {
    pub fn new(config: &ScorerConfig) -> Self {
        let mut scorer = Self::with_models(
            Box::new(LexicalOnly),
            Box::new(RuleBased),
            Box::new(RandomShapeFunction::from_seed(
                config.seed,
                config.hidden_width,
            )),
            config.weights,
        );
        scorer.seed = Some(config.seed);
        scorer
    }

    pub fn with_models(
        lexical: Box<dyn ScoringModel>,
        rule_based: Box<dyn ScoringModel>,
        shape: Box<dyn ScoringModel>,
        weights: EnsembleWeights,
    ) -> Self {
        Self {
            lexical,
            rule_based,
            shape,
            weights,
            seed: None,
        }
    }

    /// Seed the shape weights were drawn from; `None` for caller-supplied models.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn models(&self) -> [ModelKind; 3] {
        [self.lexical.kind(), self.rule_based.kind(), self.shape.kind()]
    }

    pub fn breakdown(&self, features: &FeatureVector) -> ScoreBreakdown {
        let lexical = self.lexical.score(features);
        let rule_based = self.rule_based.score(features);
        let shape = self.shape.score(features);
        let final_score = self.weights.shape * shape
            + self.weights.rule_based * rule_based
            + self.weights.lexical * lexical;

        ScoreBreakdown {
            lexical,
            rule_based,
            shape,
            final_score,
        }
    }

    pub fn score(
        &self,
        candidate_id: &CandidateId,
        opportunity_id: &OpportunityId,
        features: FeatureVector,
    ) -> ScoredEdge {
        ScoredEdge {
            candidate_id: candidate_id.clone(),
            opportunity_id: opportunity_id.clone(),
            breakdown: self.breakdown(&features),
            contributions: rule_contributions(&features),
            features,
        }
    }
}

impl std::fmt::Debug for EnsembleScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnsembleScorer")
            .field("models", &self.models())
            .field("weights", &self.weights)
            .field("seed", &self.seed)
            .finish()
    }
}
