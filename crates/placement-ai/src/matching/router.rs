use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Candidate, Opportunity};
use super::run::{ExcludedOpportunity, MatchingRun};
use super::scoring::{ScoredEdge, ScorerConfig};
use super::summary::MatchingSummary;

/// Body of `POST /api/v1/matches`.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub scored_pairs: usize,
    pub matches: Vec<ScoredEdge>,
    pub excluded_opportunities: Vec<ExcludedOpportunity>,
    pub summary: MatchingSummary,
}

/// Router exposing one matching run per request. The configured scorer settings are the defaults;
/// the request may override the seed.
pub fn matching_router(config: Arc<ScorerConfig>) -> Router {
    Router::new()
        .route("/api/v1/matches", post(match_handler))
        .with_state(config)
}

pub(crate) async fn match_handler(
    State(config): State<Arc<ScorerConfig>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response {
    let MatchRequest {
        candidates,
        opportunities,
        seed,
    } = request;

    let mut config = config.as_ref().clone();
    if let Some(seed) = seed {
        config.seed = seed;
    }

    match MatchingRun::new(config).execute(&candidates, &opportunities) {
        Ok(outcome) => {
            let summary = MatchingSummary::from_outcome(&outcome, &candidates, &opportunities);
            let body = MatchResponse {
                generated_at: Utc::now(),
                seed: outcome.seed,
                scored_pairs: outcome.scored_pairs,
                matches: outcome.matches,
                excluded_opportunities: outcome.excluded_opportunities,
                summary,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
