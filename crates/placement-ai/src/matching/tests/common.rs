use axum::response::Response;
use serde_json::Value;

use crate::matching::domain::{
    Candidate, CandidateId, Demographics, EducationLevel, LocationCategory, Opportunity,
    OpportunityId,
};
use crate::matching::features::FeatureVector;
use crate::matching::scoring::{
    EnsembleScorer, EnsembleWeights, LexicalOnly, ModelKind, RuleBased, ScoreBreakdown,
    ScoredEdge, ScorerConfig, ScoringModel,
};

pub(super) fn candidate(id: &str, skills: &[&str]) -> Candidate {
    Candidate {
        id: CandidateId::from(id),
        name: format!("Candidate {id}"),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        education: Some(EducationLevel::Bachelors),
        aptitude: 7.0,
        location: Some(LocationCategory::Urban),
        sector_interests: ["Technology".to_string()].into_iter().collect(),
        demographics: Demographics::default(),
        preferences: Vec::new(),
        portfolio: 3,
    }
}

pub(super) fn rural_candidate(id: &str, skills: &[&str]) -> Candidate {
    let mut candidate = candidate(id, skills);
    candidate.demographics = Demographics {
        rural: true,
        category: Some("ST".to_string()),
    };
    candidate.location = Some(LocationCategory::Rural);
    candidate
}

pub(super) fn opportunity(id: &str, skills: &[&str], capacity: i32) -> Opportunity {
    Opportunity {
        id: OpportunityId::from(id),
        organization: format!("Org {id}"),
        role: "Intern".to_string(),
        location: Some(LocationCategory::Urban),
        required_skills: skills.iter().map(|skill| skill.to_string()).collect(),
        capacity,
        sector: Some("Technology".to_string()),
    }
}

/// Edge with a fixed final score, for exercising allocation in isolation.
pub(super) fn edge(candidate: &str, opportunity: &str, score: f64) -> ScoredEdge {
    ScoredEdge {
        candidate_id: CandidateId::from(candidate),
        opportunity_id: OpportunityId::from(opportunity),
        breakdown: ScoreBreakdown {
            lexical: score,
            rule_based: score,
            shape: score,
            final_score: score,
        },
        features: FeatureVector::default(),
        contributions: Vec::new(),
    }
}

pub(super) fn scorer_config() -> ScorerConfig {
    ScorerConfig::default().with_seed(7)
}

/// Stand-in for the shape signal so scenario tests do not depend on drawn weights.
pub(super) struct ConstantShape(pub(super) f64);

impl ScoringModel for ConstantShape {
    fn kind(&self) -> ModelKind {
        ModelKind::RandomShapeFunction
    }

    fn score(&self, _features: &FeatureVector) -> f64 {
        self.0
    }
}

pub(super) fn pinned_scorer() -> EnsembleScorer {
    EnsembleScorer::with_models(
        Box::new(LexicalOnly),
        Box::new(RuleBased),
        Box::new(ConstantShape(0.5)),
        EnsembleWeights::default(),
    )
}

pub(super) fn roster() -> (Vec<Candidate>, Vec<Opportunity>) {
    let candidates = vec![
        candidate("c-01", &["Python", "SQL", "Tableau"]),
        candidate("c-02", &["Java", "Spring", "SQL"]),
        rural_candidate("c-03", &["Accounting", "Tally", "Excel"]),
        candidate("c-04", &["Figma", "Illustrator"]),
        rural_candidate("c-05", &["Python", "Machine Learning"]),
        candidate("c-06", &["Excel", "Communication"]),
        candidate("c-07", &["Java", "Kotlin", "Android"]),
    ];
    let opportunities = vec![
        opportunity("o-analytics", &["Python", "SQL", "Tableau"], 2),
        opportunity("o-backend", &["Java", "Spring", "SQL"], 1),
        opportunity("o-finance", &["Accounting", "Tally"], 1),
        opportunity("o-closed", &["Figma"], 0),
        opportunity("o-mobile", &["Kotlin", "Android"], 1),
    ];
    (candidates, opportunities)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
