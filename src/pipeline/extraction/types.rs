use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::numeric::{parse_measurement, unit_matches, ValueTail};
use crate::models::{AbnormalFlag, Biomarker, SourceRecord};

/// Reference interval printed beside a result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    pub low: f64,
    pub high: f64,
}

impl ReferenceRange {
    pub fn new(low: f64, high: f64) -> Option<Self> {
        (low.is_finite() && high.is_finite() && low <= high).then_some(Self { low, high })
    }

    pub fn classify(&self, value: f64) -> AbnormalFlag {
        if value < self.low {
            AbnormalFlag::Low
        } else if value > self.high {
            AbnormalFlag::High
        } else {
            AbnormalFlag::Normal
        }
    }
}

/// One accepted measurement with the context it was read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedReading {
    pub biomarker: Biomarker,
    pub value: f64,
    pub unit: Option<String>,
    pub flag: AbnormalFlag,
    pub reference_range: Option<ReferenceRange>,
    /// Report label or code the value was found under.
    pub source_label: String,
    /// Computed from other readings rather than read from the report.
    pub derived: bool,
}

impl ExtractedReading {
    /// Validate a value token and its tail against the biomarker.
    ///
    /// Returns `None` (biomarker absent) for a malformed number or a unit that
    /// disagrees with the canonical unit. A missing unit is accepted.
    pub(crate) fn from_tokens(
        biomarker: Biomarker,
        source_label: &str,
        value_token: &str,
        tail: ValueTail,
    ) -> Option<Self> {
        let Some(value) = parse_measurement(value_token) else {
            tracing::debug!(
                biomarker = %biomarker,
                token = value_token,
                "Malformed value token, treating biomarker as absent"
            );
            return None;
        };
        if let Some(unit) = tail.unit.as_deref() {
            if !unit_matches(biomarker, unit) {
                tracing::debug!(
                    biomarker = %biomarker,
                    unit,
                    expected = biomarker.canonical_unit(),
                    "Unit mismatch, treating biomarker as absent"
                );
                return None;
            }
        }
        let flag = match (tail.flag, tail.reference_range) {
            (Some(flag), _) => flag,
            (None, Some(range)) => range.classify(value),
            (None, None) => AbnormalFlag::Normal,
        };
        Some(Self {
            biomarker,
            value,
            unit: tail.unit,
            flag,
            reference_range: tail.reference_range,
            source_label: source_label.to_string(),
            derived: false,
        })
    }

    pub(crate) fn derived_nlr(value: f64) -> Self {
        Self {
            biomarker: Biomarker::Nlr,
            value,
            unit: Some(Biomarker::Nlr.canonical_unit().to_string()),
            flag: AbnormalFlag::Normal,
            reference_range: None,
            source_label: "NEUT_PCT / LYMPH_PCT".to_string(),
            derived: true,
        }
    }
}

/// Identity and context lines from the top of a report. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub patient_name: Option<String>,
    pub sex: Option<String>,
    pub age: Option<u32>,
    pub date_of_birth: Option<NaiveDate>,
    pub collected_at: Option<NaiveDateTime>,
    pub prescriber: Option<String>,
    pub laboratory: Option<String>,
}

impl ReportHeader {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Full extraction result: the sparse record plus per-reading context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabReport {
    pub record: SourceRecord,
    /// Accepted readings in report order, derived readings last.
    pub readings: Vec<ExtractedReading>,
    pub header: ReportHeader,
}
