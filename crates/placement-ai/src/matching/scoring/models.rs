use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::super::features::{FeatureKind, FeatureVector, FEATURE_COUNT};
use super::config::{RULE_WEIGHTS, RULE_WEIGHT_TOTAL};

/// Which scoring function produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LexicalOnly,
    RuleBased,
    RandomShapeFunction,
}

/// Capability seam for every signal feeding the ensemble. A trained model slots in here without
/// touching the combination logic.
pub trait ScoringModel: Send + Sync {
    fn kind(&self) -> ModelKind;
    fn score(&self, features: &FeatureVector) -> f64;
}

/// Passes the corpus-based similarity straight through.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalOnly;

impl ScoringModel for LexicalOnly {
    fn kind(&self) -> ModelKind {
        ModelKind::LexicalOnly
    }

    fn score(&self, features: &FeatureVector) -> f64 {
        features.lexical_similarity
    }
}

/// Weighted sum of the structured features, normalized by the total weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBased;

impl ScoringModel for RuleBased {
    fn kind(&self) -> ModelKind {
        ModelKind::RuleBased
    }

    fn score(&self, features: &FeatureVector) -> f64 {
        rule_contributions(features)
            .iter()
            .map(|contribution| contribution.contribution)
            .sum::<f64>()
            / RULE_WEIGHT_TOTAL
    }
}

/// One weighted term of the rule-based signal, kept for explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleContribution {
    pub factor: FeatureKind,
    pub value: f64,
    pub weight: f64,
    pub contribution: f64,
    pub notes: String,
}

pub fn rule_contributions(features: &FeatureVector) -> Vec<RuleContribution> {
    RULE_WEIGHTS
        .iter()
        .map(|&(factor, weight)| {
            let value = features.get(factor);
            RuleContribution {
                factor,
                value,
                weight,
                contribution: value * weight,
                notes: format!("{} {:.2} weighted x{:.1}", factor.label(), value, weight),
            }
        })
        .collect()
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[derive(Debug, Clone, PartialEq)]
struct HiddenUnit {
    weights: [f64; FEATURE_COUNT],
    bias: f64,
}

/// Untrained feed-forward function: one sigmoid hidden layer and a sigmoid output unit.
///
/// Weights are drawn once from a seeded generator and never updated. The output is a reproducible
/// nonlinear perturbation of the features, not a learned prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomShapeFunction {
    hidden: Vec<HiddenUnit>,
    output_weights: Vec<f64>,
    output_bias: f64,
}

impl RandomShapeFunction {
    pub fn from_seed(seed: u64, hidden_width: usize) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed), hidden_width)
    }

    /// Draws every weight and bias uniformly from [-1, 1).
    pub fn from_rng<R: Rng>(rng: &mut R, hidden_width: usize) -> Self {
        let hidden_width = hidden_width.max(1);
        let hidden = (0..hidden_width)
            .map(|_| {
                let mut weights = [0.0; FEATURE_COUNT];
                for weight in weights.iter_mut() {
                    *weight = rng.gen_range(-1.0..1.0);
                }
                HiddenUnit {
                    weights,
                    bias: rng.gen_range(-1.0..1.0),
                }
            })
            .collect();
        let output_weights = (0..hidden_width)
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect();
        let output_bias = rng.gen_range(-1.0..1.0);

        Self {
            hidden,
            output_weights,
            output_bias,
        }
    }

    pub fn hidden_width(&self) -> usize {
        self.hidden.len()
    }
}

impl ScoringModel for RandomShapeFunction {
    fn kind(&self) -> ModelKind {
        ModelKind::RandomShapeFunction
    }

    fn score(&self, features: &FeatureVector) -> f64 {
        let inputs = features.as_array();
        let activation: f64 = self
            .hidden
            .iter()
            .zip(&self.output_weights)
            .map(|(unit, output_weight)| {
                let z: f64 = unit
                    .weights
                    .iter()
                    .zip(inputs.iter())
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + unit.bias;
                sigmoid(z) * output_weight
            })
            .sum();

        sigmoid(activation + self.output_bias)
    }
}
