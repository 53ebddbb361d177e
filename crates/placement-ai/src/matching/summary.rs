use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::domain::{Candidate, CandidateId, Opportunity, OpportunityId};
use super::run::MatchingOutcome;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpportunityFill {
    pub opportunity_id: OpportunityId,
    pub organization: String,
    pub role: String,
    pub filled: usize,
    pub capacity: usize,
}

/// Aggregate figures derived from a matching outcome without re-scoring anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchingSummary {
    pub total_candidates: usize,
    pub placed: usize,
    pub placement_rate: f64,
    pub average_score: f64,
    pub rural_placements: usize,
    pub opportunity_fill: Vec<OpportunityFill>,
}

impl MatchingSummary {
    pub fn from_outcome(
        outcome: &MatchingOutcome,
        candidates: &[Candidate],
        opportunities: &[Opportunity],
    ) -> Self {
        let total_candidates = candidates.len();
        let placed = outcome.matches.len();

        let placement_rate = if total_candidates > 0 {
            placed as f64 / total_candidates as f64
        } else {
            0.0
        };
        let average_score = if placed > 0 {
            outcome.matches.iter().map(|edge| edge.score()).sum::<f64>() / placed as f64
        } else {
            0.0
        };

        let rural: HashSet<&CandidateId> = candidates
            .iter()
            .filter(|candidate| candidate.demographics.rural)
            .map(|candidate| &candidate.id)
            .collect();
        let rural_placements = outcome
            .matches
            .iter()
            .filter(|edge| rural.contains(&edge.candidate_id))
            .count();

        let mut filled: BTreeMap<&OpportunityId, usize> = BTreeMap::new();
        for edge in &outcome.matches {
            *filled.entry(&edge.opportunity_id).or_insert(0) += 1;
        }
        let opportunity_fill = opportunities
            .iter()
            .filter(|opportunity| opportunity.is_allocatable())
            .map(|opportunity| OpportunityFill {
                opportunity_id: opportunity.id.clone(),
                organization: opportunity.organization.clone(),
                role: opportunity.role.clone(),
                filled: filled.get(&opportunity.id).copied().unwrap_or(0),
                capacity: opportunity.seats(),
            })
            .collect();

        Self {
            total_candidates,
            placed,
            placement_rate,
            average_score,
            rural_placements,
            opportunity_fill,
        }
    }
}
