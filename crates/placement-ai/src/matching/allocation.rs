use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::domain::{CandidateId, Opportunity, OpportunityId};
use super::scoring::ScoredEdge;

/// Seats available per opportunity. Opportunities missing from the map have no seats.
pub type CapacityTable = BTreeMap<OpportunityId, usize>;

/// Builds the capacity table, leaving out opportunities with fewer than one seat.
pub fn capacity_table(opportunities: &[Opportunity]) -> CapacityTable {
    opportunities
        .iter()
        .filter(|opportunity| opportunity.is_allocatable())
        .map(|opportunity| (opportunity.id.clone(), opportunity.seats()))
        .collect()
}

/// Strategy seam for turning scored edges into an assignment. Inputs and outputs are fixed so an
/// exact b-matching solver can replace the greedy pass.
pub trait AllocationStrategy: Send + Sync {
    fn allocate(&self, edges: Vec<ScoredEdge>, capacities: &CapacityTable) -> Vec<ScoredEdge>;
}

/// Total order used by the greedy pass: score descending, then candidate id, then opportunity id.
pub fn edge_order(left: &ScoredEdge, right: &ScoredEdge) -> Ordering {
    right
        .score()
        .total_cmp(&left.score())
        .then_with(|| left.candidate_id.cmp(&right.candidate_id))
        .then_with(|| left.opportunity_id.cmp(&right.opportunity_id))
}

/// Single-pass greedy approximation of maximum-weight bipartite b-matching.
///
/// Not optimal and not stable; it simply takes the best remaining edge whenever both sides still
/// have room.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAllocator;

impl AllocationStrategy for GreedyAllocator {
    fn allocate(&self, mut edges: Vec<ScoredEdge>, capacities: &CapacityTable) -> Vec<ScoredEdge> {
        edges.sort_by(edge_order);

        let mut placed: BTreeSet<CandidateId> = BTreeSet::new();
        let mut used: BTreeMap<OpportunityId, usize> = BTreeMap::new();
        let mut accepted = Vec::new();

        for edge in edges {
            if placed.contains(&edge.candidate_id) {
                continue;
            }
            let capacity = capacities.get(&edge.opportunity_id).copied().unwrap_or(0);
            let filled = used.entry(edge.opportunity_id.clone()).or_insert(0);
            if *filled >= capacity {
                continue;
            }

            *filled += 1;
            placed.insert(edge.candidate_id.clone());
            debug!(
                candidate = %edge.candidate_id,
                opportunity = %edge.opportunity_id,
                score = edge.score(),
                "edge accepted"
            );
            accepted.push(edge);
        }

        accepted
    }
}

/// Applies an allocation strategy to the scored edges of one run.
pub struct AllocationEngine {
    strategy: Box<dyn AllocationStrategy>,
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::greedy()
    }
}

impl AllocationEngine {
    pub fn greedy() -> Self {
        Self::with_strategy(Box::new(GreedyAllocator))
    }

    pub fn with_strategy(strategy: Box<dyn AllocationStrategy>) -> Self {
        Self { strategy }
    }

    /// Returns the accepted edges in acceptance order. Edges pointing at opportunities with no
    /// seats are never accepted.
    pub fn allocate(
        &self,
        edges: Vec<ScoredEdge>,
        opportunities: &[Opportunity],
    ) -> Vec<ScoredEdge> {
        let capacities = capacity_table(opportunities);
        self.strategy.allocate(edges, &capacities)
    }
}

impl std::fmt::Debug for AllocationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllocationEngine").finish_non_exhaustive()
    }
}
