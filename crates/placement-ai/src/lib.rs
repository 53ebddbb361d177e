//! Candidate-to-opportunity matching: lexical similarity, feature extraction, ensemble scoring and
//! capacity-constrained allocation, plus the configuration, telemetry and HTTP plumbing used by the
//! service binary.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
