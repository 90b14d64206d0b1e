//! Injectable reference tables: report-layout signatures and population
//! averages. Built-in defaults, optionally overridden by a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::extraction::FormatSignatures;
use crate::pipeline::imputation::PopulationAverages;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("Failed to load reference tables from {0}: {1}")]
    Load(String, String),

    #[error("Failed to parse reference tables {0}: {1}")]
    Parse(String, String),

    #[error("Invalid reference table: {0}")]
    Invalid(String),
}

/// Immutable after construction; share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceTables {
    #[serde(default)]
    pub signatures: FormatSignatures,
    #[serde(default)]
    pub population_averages: PopulationAverages,
}

impl ReferenceTables {
    /// Parse tables from JSON. A missing section keeps its built-in default;
    /// an unknown key is an error.
    pub fn from_json(source: &str, json: &str) -> Result<Self, ReferenceError> {
        serde_json::from_str(json)
            .map_err(|e| ReferenceError::Parse(source.to_string(), e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ReferenceError::Load(path.display().to_string(), e.to_string()))?;
        let tables = Self::from_json(&path.display().to_string(), &json)?;
        tracing::info!(
            path = %path.display(),
            layouts = tables.signatures.entries().len(),
            "Reference tables loaded"
        );
        Ok(tables)
    }

    /// Built-in tables when `path` does not exist. A file that exists but
    /// cannot be read or parsed is an error, never silently replaced.
    pub fn load_or_default(path: &Path) -> Result<Self, ReferenceError> {
        if !path.exists() {
            tracing::debug!(
                path = %path.display(),
                "No reference tables file, using built-in tables"
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
