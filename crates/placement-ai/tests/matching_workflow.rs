use std::collections::BTreeSet;

use placement_ai::matching::{
    Candidate, CandidateId, Demographics, EducationLevel, LocationCategory, MatchingRun,
    MatchingSummary, Opportunity, OpportunityId, ScorerConfig,
};

fn candidate(id: &str, skills: &[&str], rural: bool) -> Candidate {
    Candidate {
        id: CandidateId::from(id),
        name: id.to_uppercase(),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        education: Some(EducationLevel::Bachelors),
        aptitude: 6.0,
        location: Some(LocationCategory::Urban),
        sector_interests: BTreeSet::new(),
        demographics: Demographics {
            rural,
            category: None,
        },
        preferences: Vec::new(),
        portfolio: 2,
    }
}

fn opportunity(id: &str, skills: &[&str], capacity: i32) -> Opportunity {
    Opportunity {
        id: OpportunityId::from(id),
        organization: "Acme".to_string(),
        role: "Intern".to_string(),
        location: Some(LocationCategory::Urban),
        required_skills: skills.iter().map(|skill| skill.to_string()).collect(),
        capacity,
        sector: None,
    }
}

#[test]
fn seeded_runs_are_reproducible_and_serializable() {
    let candidates = vec![
        candidate("c-1", &["Python", "SQL"], false),
        candidate("c-2", &["Python"], true),
        candidate("c-3", &["Design"], true),
    ];
    let opportunities = vec![
        opportunity("o-data", &["Python", "SQL"], 1),
        opportunity("o-design", &["Design", "Figma"], 1),
    ];
    let run = MatchingRun::new(ScorerConfig::default().with_seed(2024));

    let first = run.execute(&candidates, &opportunities).expect("run succeeds");
    let second = run.execute(&candidates, &opportunities).expect("run succeeds");
    assert_eq!(first, second);
    assert_eq!(first.matches.len(), 2);

    let encoded = serde_json::to_value(&first).expect("outcome serializes");
    assert_eq!(encoded["seed"], 2024);
    let breakdown = &encoded["matches"][0]["breakdown"];
    for key in ["lexical", "rule_based", "shape", "final"] {
        assert!(breakdown[key].is_number(), "missing {key}");
    }
    assert_eq!(
        encoded["matches"][0]["contributions"]
            .as_array()
            .map(Vec::len),
        Some(7)
    );

    let summary = MatchingSummary::from_outcome(&first, &candidates, &opportunities);
    assert_eq!(summary.placed, 2);
    assert!(summary.average_score > 0.0);
    assert!(summary.rural_placements <= 2);
}

#[test]
fn empty_run_has_zeroed_summary() {
    let opportunities = vec![opportunity("o-1", &["Python"], 1)];
    let outcome = MatchingRun::default()
        .execute(&[], &opportunities)
        .expect("run succeeds");

    let summary = MatchingSummary::from_outcome(&outcome, &[], &opportunities);
    assert_eq!(summary.placed, 0);
    assert_eq!(summary.placement_rate, 0.0);
    assert_eq!(summary.average_score, 0.0);
    assert_eq!(summary.opportunity_fill[0].filled, 0);
}
