use std::collections::BTreeMap;

use super::common::{edge, opportunity};
use crate::matching::allocation::{AllocationEngine, AllocationStrategy, CapacityTable};
use crate::matching::domain::{CandidateId, OpportunityId};
use crate::matching::scoring::ScoredEdge;

fn pairs(accepted: &[ScoredEdge]) -> Vec<(String, String)> {
    accepted
        .iter()
        .map(|edge| (edge.candidate_id.0.clone(), edge.opportunity_id.0.clone()))
        .collect()
}

#[test]
fn takes_best_edges_first_and_respects_capacity() {
    let opportunities = vec![opportunity("o-1", &[], 1), opportunity("o-2", &[], 1)];
    let edges = vec![
        edge("c-a", "o-1", 0.9),
        edge("c-a", "o-2", 0.8),
        edge("c-b", "o-1", 0.85),
        edge("c-b", "o-2", 0.3),
    ];

    let accepted = AllocationEngine::greedy().allocate(edges, &opportunities);

    assert_eq!(
        pairs(&accepted),
        vec![
            ("c-a".to_string(), "o-1".to_string()),
            ("c-b".to_string(), "o-2".to_string()),
        ]
    );
}

#[test]
fn capacity_two_with_three_candidates_keeps_top_two() {
    let opportunities = vec![opportunity("o-1", &[], 2)];
    let edges = vec![
        edge("c-1", "o-1", 0.4),
        edge("c-2", "o-1", 0.7),
        edge("c-3", "o-1", 0.6),
    ];

    let accepted = AllocationEngine::greedy().allocate(edges, &opportunities);

    assert_eq!(
        pairs(&accepted),
        vec![
            ("c-2".to_string(), "o-1".to_string()),
            ("c-3".to_string(), "o-1".to_string()),
        ]
    );
}

#[test]
fn ties_break_on_candidate_then_opportunity_id() {
    let opportunities = vec![opportunity("o-b", &[], 1), opportunity("o-a", &[], 1)];
    let edges = vec![
        edge("c-2", "o-b", 0.5),
        edge("c-1", "o-b", 0.5),
        edge("c-1", "o-a", 0.5),
        edge("c-2", "o-a", 0.5),
    ];

    let accepted = AllocationEngine::greedy().allocate(edges, &opportunities);

    assert_eq!(
        pairs(&accepted),
        vec![
            ("c-1".to_string(), "o-a".to_string()),
            ("c-2".to_string(), "o-b".to_string()),
        ]
    );
}

#[test]
fn never_places_into_closed_or_unknown_opportunities() {
    let opportunities = vec![
        opportunity("o-closed", &[], 0),
        opportunity("o-negative", &[], -2),
        opportunity("o-open", &[], 1),
    ];
    let edges = vec![
        edge("c-1", "o-closed", 0.99),
        edge("c-1", "o-negative", 0.98),
        edge("c-1", "o-missing", 0.97),
        edge("c-1", "o-open", 0.1),
    ];

    let accepted = AllocationEngine::greedy().allocate(edges, &opportunities);

    assert_eq!(pairs(&accepted), vec![("c-1".to_string(), "o-open".to_string())]);
}

#[test]
fn assignment_is_bounded_by_candidates_and_seats() {
    let opportunities = vec![opportunity("o-1", &[], 3), opportunity("o-2", &[], 2)];
    let mut edges = Vec::new();
    for (index, candidate) in ["c-1", "c-2", "c-3", "c-4", "c-5", "c-6", "c-7"]
        .iter()
        .enumerate()
    {
        edges.push(edge(candidate, "o-1", 0.1 * index as f64));
        edges.push(edge(candidate, "o-2", 0.05 * index as f64));
    }

    let accepted = AllocationEngine::greedy().allocate(edges, &opportunities);

    assert_eq!(accepted.len(), 5);
    let mut per_candidate: BTreeMap<&CandidateId, usize> = BTreeMap::new();
    let mut per_opportunity: BTreeMap<&OpportunityId, usize> = BTreeMap::new();
    for edge in &accepted {
        *per_candidate.entry(&edge.candidate_id).or_default() += 1;
        *per_opportunity.entry(&edge.opportunity_id).or_default() += 1;
    }
    assert!(per_candidate.values().all(|count| *count == 1));
    assert_eq!(per_opportunity[&OpportunityId::from("o-1")], 3);
    assert_eq!(per_opportunity[&OpportunityId::from("o-2")], 2);
}

#[test]
fn empty_edges_yield_empty_assignment() {
    let opportunities = vec![opportunity("o-1", &[], 4)];
    assert!(AllocationEngine::greedy()
        .allocate(Vec::new(), &opportunities)
        .is_empty());
}

struct LowestScoreFirst;

impl AllocationStrategy for LowestScoreFirst {
    fn allocate(&self, mut edges: Vec<ScoredEdge>, capacities: &CapacityTable) -> Vec<ScoredEdge> {
        edges.sort_by(|left, right| left.score().total_cmp(&right.score()));
        edges
            .into_iter()
            .filter(|edge| capacities.contains_key(&edge.opportunity_id))
            .take(1)
            .collect()
    }
}

#[test]
fn engine_delegates_to_custom_strategy() {
    let opportunities = vec![opportunity("o-1", &[], 1)];
    let edges = vec![edge("c-1", "o-1", 0.9), edge("c-2", "o-1", 0.2)];

    let accepted =
        AllocationEngine::with_strategy(Box::new(LowestScoreFirst)).allocate(edges, &opportunities);

    assert_eq!(pairs(&accepted), vec![("c-2".to_string(), "o-1".to_string())]);
}
