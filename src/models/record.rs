use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Biomarker, FormatTag};
use crate::pipeline::extraction::numeric::parse_measurement;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Unrecognized biomarker field: {0}")]
    UnknownBiomarker(String),

    #[error("{biomarker} value must be finite and non-negative, got {value}")]
    InvalidValue { biomarker: Biomarker, value: f64 },

    #[error("Malformed number for {field}: '{value}'")]
    MalformedNumber { field: String, value: String },

    #[error("{0} supplied more than once")]
    DuplicateBiomarker(Biomarker),
}

/// A single measurement in the biomarker's canonical unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerReading {
    pub name: Biomarker,
    pub value: f64,
}

impl BiomarkerReading {
    pub fn new(name: Biomarker, value: f64) -> Result<Self, RecordError> {
        if !value.is_finite() || value < 0.0 {
            return Err(RecordError::InvalidValue {
                biomarker: name,
                value,
            });
        }
        Ok(Self { name, value })
    }
}

/// Sparse biomarker mapping produced by one extraction or manual-entry event.
///
/// A missing biomarker is a missing key. Values are validated on the way in,
/// so every stored value is finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SourceRecordRepr")]
pub struct SourceRecord {
    biomarkers: BTreeMap<Biomarker, f64>,
    format_tag: FormatTag,
}

#[derive(Deserialize)]
struct SourceRecordRepr {
    biomarkers: BTreeMap<Biomarker, f64>,
    format_tag: FormatTag,
}

impl TryFrom<SourceRecordRepr> for SourceRecord {
    type Error = RecordError;

    fn try_from(repr: SourceRecordRepr) -> Result<Self, Self::Error> {
        let mut record = Self::empty(repr.format_tag);
        for (name, value) in repr.biomarkers {
            record.insert_first(BiomarkerReading::new(name, value)?);
        }
        Ok(record)
    }
}

impl SourceRecord {
    pub(crate) fn empty(format_tag: FormatTag) -> Self {
        Self {
            biomarkers: BTreeMap::new(),
            format_tag,
        }
    }

    /// Insert unless the biomarker is already present (first match wins).
    /// Returns whether the reading was stored.
    pub(crate) fn insert_first(&mut self, reading: BiomarkerReading) -> bool {
        if self.biomarkers.contains_key(&reading.name) {
            return false;
        }
        self.biomarkers.insert(reading.name, reading.value);
        true
    }

    /// Build a manual-entry record from typed values.
    pub fn manual<I>(entries: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = (Biomarker, f64)>,
    {
        let mut record = Self::empty(FormatTag::ManualEntry);
        for (name, value) in entries {
            let reading = BiomarkerReading::new(name, value)?;
            if !record.insert_first(reading) {
                return Err(RecordError::DuplicateBiomarker(name));
            }
        }
        Ok(record)
    }

    /// Build a manual-entry record from raw form fields.
    ///
    /// Keys may be canonical codes or common aliases (`GB`, `PLAQ`, `MONO`...).
    /// Blank values mean the field was left empty. Decimal commas are accepted.
    pub fn from_manual_fields<'a, I>(fields: I) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries = Vec::new();
        for (key, raw) in fields {
            let name = Biomarker::from_alias(key)
                .ok_or_else(|| RecordError::UnknownBiomarker(key.to_string()))?;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let value = parse_measurement(trimmed).ok_or_else(|| RecordError::MalformedNumber {
                field: key.to_string(),
                value: raw.to_string(),
            })?;
            entries.push((name, value));
        }
        Self::manual(entries)
    }

    pub fn format_tag(&self) -> FormatTag {
        self.format_tag
    }

    pub fn get(&self, name: Biomarker) -> Option<f64> {
        self.biomarkers.get(&name).copied()
    }

    pub fn contains(&self, name: Biomarker) -> bool {
        self.biomarkers.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.biomarkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomarkers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Biomarker, f64)> + '_ {
        self.biomarkers.iter().map(|(&name, &value)| (name, value))
    }

    /// Readings in canonical order.
    pub fn readings(&self) -> impl Iterator<Item = BiomarkerReading> + '_ {
        self.biomarkers
            .iter()
            .map(|(&name, &value)| BiomarkerReading { name, value })
    }
}
