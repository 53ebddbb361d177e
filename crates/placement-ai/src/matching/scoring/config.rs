use serde::{Deserialize, Serialize};

use super::super::features::FeatureKind;

pub const DEFAULT_SCORER_SEED: u64 = 42;
pub const DEFAULT_HIDDEN_WIDTH: usize = 12;

/// Fixed weights of the rule-based signal. Lexical similarity is deliberately absent; it has its
/// own signal in the ensemble.
pub const RULE_WEIGHTS: [(FeatureKind, f64); 7] = [
    (FeatureKind::SkillOverlap, 3.0),
    (FeatureKind::Aptitude, 2.0),
    (FeatureKind::LocationMatch, 1.5),
    (FeatureKind::SectorMatch, 1.2),
    (FeatureKind::Portfolio, 1.0),
    (FeatureKind::Rural, 2.5),
    (FeatureKind::Education, 0.8),
];

/// Sum of [`RULE_WEIGHTS`]; the rule signal is normalized by it.
pub const RULE_WEIGHT_TOTAL: f64 = 12.0;

/// Blend applied to the three signals to produce the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnsembleWeights {
    pub shape: f64,
    pub rule_based: f64,
    pub lexical: f64,
}

impl Default for EnsembleWeights {
    fn default() -> Self {
        Self {
            shape: 0.4,
            rule_based: 0.35,
            lexical: 0.25,
        }
    }
}

/// Per-run scorer settings. Two runs with equal configs score identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    pub seed: u64,
    pub hidden_width: usize,
    #[serde(default)]
    pub weights: EnsembleWeights,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SCORER_SEED,
            hidden_width: DEFAULT_HIDDEN_WIDTH,
            weights: EnsembleWeights::default(),
        }
    }
}

impl ScorerConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_weights_sum_to_normalizer() {
        let sum: f64 = RULE_WEIGHTS.iter().map(|(_, weight)| weight).sum();
        assert!((sum - RULE_WEIGHT_TOTAL).abs() < 1e-9);
    }

    #[test]
    fn ensemble_weights_sum_to_one() {
        let weights = EnsembleWeights::default();
        assert!((weights.shape + weights.rule_based + weights.lexical - 1.0).abs() < 1e-9);
    }
}
