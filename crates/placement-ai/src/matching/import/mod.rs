mod parser;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::domain::{Candidate, Opportunity};

/// Failure while loading candidate or opportunity records.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV roster data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid JSON roster data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encoding of a roster file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Csv,
    Json,
}

impl RosterFormat {
    /// `.json` files are read as JSON arrays; everything else as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Loads candidate and opportunity rosters handed over by the intake side.
pub struct RosterImporter;

impl RosterImporter {
    pub fn candidates_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Candidate>, ImportError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::candidates_from_reader(file, RosterFormat::from_path(path))
    }

    pub fn opportunities_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<Opportunity>, ImportError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::opportunities_from_reader(file, RosterFormat::from_path(path))
    }

    pub fn candidates_from_reader<R: Read>(
        reader: R,
        format: RosterFormat,
    ) -> Result<Vec<Candidate>, ImportError> {
        match format {
            RosterFormat::Csv => Ok(parser::parse_candidates(reader)?),
            RosterFormat::Json => Ok(serde_json::from_reader(reader)?),
        }
    }

    pub fn opportunities_from_reader<R: Read>(
        reader: R,
        format: RosterFormat,
    ) -> Result<Vec<Opportunity>, ImportError> {
        match format {
            RosterFormat::Csv => Ok(parser::parse_opportunities(reader)?),
            RosterFormat::Json => Ok(serde_json::from_reader(reader)?),
        }
    }
}
