use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::super::domain::{
    Candidate, CandidateId, Demographics, EducationLevel, LocationCategory, Opportunity,
    OpportunityId,
};

pub(crate) fn parse_candidates<R: Read>(reader: R) -> Result<Vec<Candidate>, csv::Error> {
    let mut csv_reader = csv_reader(reader);
    let mut candidates = Vec::new();

    for record in csv_reader.deserialize::<CandidateRow>() {
        candidates.push(record?.into_candidate());
    }

    Ok(candidates)
}

pub(crate) fn parse_opportunities<R: Read>(reader: R) -> Result<Vec<Opportunity>, csv::Error> {
    let mut csv_reader = csv_reader(reader);
    let mut opportunities = Vec::new();

    for record in csv_reader.deserialize::<OpportunityRow>() {
        opportunities.push(record?.into_opportunity());
    }

    Ok(opportunities)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

#[derive(Debug, Deserialize)]
struct CandidateRow {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    skills: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    education: Option<String>,
    #[serde(default, deserialize_with = "finite_score")]
    aptitude: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sectors: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rural: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    preferences: Option<String>,
    #[serde(default)]
    portfolio: Option<u8>,
}

impl CandidateRow {
    fn into_candidate(self) -> Candidate {
        Candidate {
            id: CandidateId(self.id),
            name: self.name,
            skills: split_list(self.skills.as_deref()),
            education: self.education.as_deref().map(EducationLevel::parse),
            aptitude: self.aptitude.unwrap_or(0.0),
            location: self.location.as_deref().map(LocationCategory::parse),
            sector_interests: split_list(self.sectors.as_deref()).into_iter().collect(),
            demographics: Demographics {
                rural: self.rural.as_deref().map(parse_flag).unwrap_or(false),
                category: self.category,
            },
            preferences: split_list(self.preferences.as_deref()),
            portfolio: self.portfolio.unwrap_or(1),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpportunityRow {
    id: String,
    #[serde(default)]
    organization: String,
    #[serde(default)]
    role: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    skills: Option<String>,
    capacity: i32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sector: Option<String>,
}

impl OpportunityRow {
    fn into_opportunity(self) -> Opportunity {
        Opportunity {
            id: OpportunityId(self.id),
            organization: self.organization,
            role: self.role,
            location: self.location.as_deref().map(LocationCategory::parse),
            required_skills: split_list(self.skills.as_deref()),
            capacity: self.capacity,
            sector: self.sector,
        }
    }
}

/// Splits a `;` or `|` separated cell, dropping blank entries.
fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(|c: char| c == ';' || c == '|')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

fn finite_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(value) if !value.is_finite() => Err(serde::de::Error::custom(format!(
            "aptitude must be a finite number, got {value}"
        ))),
        other => Ok(other),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
