use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::domain::{Candidate, EducationLevel, Opportunity};
use super::lexical::LexicalIndex;

pub const FEATURE_COUNT: usize = 8;
pub const APTITUDE_MAX: f64 = 10.0;
pub const PORTFOLIO_CAP: u8 = 5;
pub const DEFAULT_EDUCATION_WEIGHT: f64 = 0.5;

/// Named positions of the feature vector, in vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    LexicalSimilarity,
    SkillOverlap,
    Aptitude,
    LocationMatch,
    SectorMatch,
    Portfolio,
    Rural,
    Education,
}

impl FeatureKind {
    pub const fn ordered() -> [FeatureKind; FEATURE_COUNT] {
        [
            FeatureKind::LexicalSimilarity,
            FeatureKind::SkillOverlap,
            FeatureKind::Aptitude,
            FeatureKind::LocationMatch,
            FeatureKind::SectorMatch,
            FeatureKind::Portfolio,
            FeatureKind::Rural,
            FeatureKind::Education,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            FeatureKind::LexicalSimilarity => "Lexical similarity",
            FeatureKind::SkillOverlap => "Skill overlap",
            FeatureKind::Aptitude => "Aptitude",
            FeatureKind::LocationMatch => "Location match",
            FeatureKind::SectorMatch => "Sector match",
            FeatureKind::Portfolio => "Portfolio strength",
            FeatureKind::Rural => "Rural / under-represented",
            FeatureKind::Education => "Education level",
        }
    }
}

/// Fixed-order numeric summary of one candidate/opportunity pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    pub lexical_similarity: f64,
    pub skill_overlap: f64,
    pub aptitude: f64,
    pub location_match: f64,
    pub sector_match: f64,
    pub portfolio: f64,
    pub rural: f64,
    pub education: f64,
}

impl FeatureVector {
    pub fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.lexical_similarity,
            self.skill_overlap,
            self.aptitude,
            self.location_match,
            self.sector_match,
            self.portfolio,
            self.rural,
            self.education,
        ]
    }

    pub fn get(&self, kind: FeatureKind) -> f64 {
        match kind {
            FeatureKind::LexicalSimilarity => self.lexical_similarity,
            FeatureKind::SkillOverlap => self.skill_overlap,
            FeatureKind::Aptitude => self.aptitude,
            FeatureKind::LocationMatch => self.location_match,
            FeatureKind::SectorMatch => self.sector_match,
            FeatureKind::Portfolio => self.portfolio,
            FeatureKind::Rural => self.rural,
            FeatureKind::Education => self.education,
        }
    }
}

/// Weight lookup for known education tags. Unknown tags fall back to the default.
pub fn education_weight(level: Option<&EducationLevel>) -> f64 {
    match level {
        Some(EducationLevel::Doctorate) => 1.0,
        Some(EducationLevel::Masters) => 0.9,
        Some(EducationLevel::Bachelors) => 0.75,
        Some(EducationLevel::Diploma) => 0.6,
        Some(EducationLevel::HigherSecondary) => 0.5,
        Some(EducationLevel::Secondary) => 0.4,
        Some(EducationLevel::Other(_)) | None => DEFAULT_EDUCATION_WEIGHT,
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Stateless mapping from a pair plus the run's lexical index to a feature vector.
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor<'a> {
    index: &'a LexicalIndex,
}

impl<'a> FeatureExtractor<'a> {
    pub fn new(index: &'a LexicalIndex) -> Self {
        Self { index }
    }

    pub fn extract(&self, candidate: &Candidate, opportunity: &Opportunity) -> FeatureVector {
        let lexical_similarity = self
            .index
            .similarity(&candidate.skills_text(), &opportunity.requirements_text());

        FeatureVector {
            lexical_similarity,
            skill_overlap: skill_overlap(&candidate.skills, &opportunity.required_skills),
            aptitude: finite_or_zero(candidate.aptitude) / APTITUDE_MAX,
            location_match: flag(match (&candidate.location, &opportunity.location) {
                (Some(left), Some(right)) => left.matches(right),
                _ => false,
            }),
            sector_match: flag(
                opportunity
                    .sector
                    .as_deref()
                    .filter(|sector| !sector.trim().is_empty())
                    .map(|sector| candidate.is_interested_in(sector))
                    .unwrap_or(false),
            ),
            portfolio: f64::from(candidate.portfolio.min(PORTFOLIO_CAP)) / f64::from(PORTFOLIO_CAP),
            rural: flag(candidate.demographics.rural),
            education: education_weight(candidate.education.as_ref()),
        }
    }
}

/// Candidate skills that exactly match a required skill, over the required-skill count.
fn skill_overlap(skills: &[String], required: &[String]) -> f64 {
    let required_set: HashSet<String> = required
        .iter()
        .map(|skill| skill.trim().to_lowercase())
        .collect();
    let matched = skills
        .iter()
        .filter(|skill| required_set.contains(&skill.trim().to_lowercase()))
        .count();

    matched as f64 / required.len().max(1) as f64
}
