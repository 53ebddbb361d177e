use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted candidates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier wrapper for published opportunities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpportunityId(pub String);

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OpportunityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Highest completed education level. Unrecognized tags are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EducationLevel {
    Doctorate,
    Masters,
    Bachelors,
    Diploma,
    HigherSecondary,
    Secondary,
    Other(String),
}

impl EducationLevel {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "phd" | "doctorate" => Self::Doctorate,
            "masters" | "master" | "postgraduate" => Self::Masters,
            "bachelors" | "bachelor" | "undergraduate" | "graduate" => Self::Bachelors,
            "diploma" => Self::Diploma,
            "12th" | "higher secondary" => Self::HigherSecondary,
            "10th" | "secondary" => Self::Secondary,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            EducationLevel::Doctorate => "phd",
            EducationLevel::Masters => "masters",
            EducationLevel::Bachelors => "bachelors",
            EducationLevel::Diploma => "diploma",
            EducationLevel::HigherSecondary => "12th",
            EducationLevel::Secondary => "10th",
            EducationLevel::Other(raw) => raw,
        }
    }
}

impl From<String> for EducationLevel {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<EducationLevel> for String {
    fn from(value: EducationLevel) -> Self {
        value.label().to_string()
    }
}

/// Coarse location bucket shared by candidates and opportunities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocationCategory {
    Urban,
    SemiUrban,
    Rural,
    Remote,
    Other(String),
}

impl LocationCategory {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "urban" | "metro" => Self::Urban,
            "semi-urban" | "semi urban" | "semiurban" => Self::SemiUrban,
            "rural" => Self::Rural,
            "remote" => Self::Remote,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LocationCategory::Urban => "urban",
            LocationCategory::SemiUrban => "semi-urban",
            LocationCategory::Rural => "rural",
            LocationCategory::Remote => "remote",
            LocationCategory::Other(raw) => raw,
        }
    }

    /// Case-insensitive comparison so free-form `Other` tags still line up.
    pub fn matches(&self, other: &LocationCategory) -> bool {
        self.label().eq_ignore_ascii_case(other.label())
    }
}

impl From<String> for LocationCategory {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<LocationCategory> for String {
    fn from(value: LocationCategory) -> Self {
        value.label().to_string()
    }
}

/// Demographic attributes used for representation signals, never for exclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(default)]
    pub rural: bool,
    #[serde(default)]
    pub category: Option<String>,
}

/// Candidate record as delivered by the intake boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Option<EducationLevel>,
    #[serde(default)]
    pub aptitude: f64,
    #[serde(default)]
    pub location: Option<LocationCategory>,
    #[serde(default)]
    pub sector_interests: BTreeSet<String>,
    #[serde(default)]
    pub demographics: Demographics,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default = "default_portfolio")]
    pub portfolio: u8,
}

fn default_portfolio() -> u8 {
    1
}

impl Candidate {
    pub fn skills_text(&self) -> String {
        self.skills.join(" ")
    }

    pub fn is_interested_in(&self, sector: &str) -> bool {
        let sector = sector.trim();
        self.sector_interests
            .iter()
            .any(|interest| interest.trim().eq_ignore_ascii_case(sector))
    }
}

/// Capacity-limited opportunity published by a host organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub location: Option<LocationCategory>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub capacity: i32,
    #[serde(default)]
    pub sector: Option<String>,
}

impl Opportunity {
    pub fn requirements_text(&self) -> String {
        self.required_skills.join(" ")
    }

    /// Only opportunities with at least one seat take part in allocation.
    pub fn is_allocatable(&self) -> bool {
        self.capacity >= 1
    }

    /// Seat count usable by the allocator; zero for non-allocatable opportunities.
    pub fn seats(&self) -> usize {
        usize::try_from(self.capacity).unwrap_or(0)
    }
}
