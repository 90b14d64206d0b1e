//! Intake orchestration: report text or manual entry in, complete feature
//! vector and imputation report out.
//!
//! Holds the reference tables and nothing else, so one processor can be
//! shared across threads. Persistence and presentation belong to the caller.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::config;
use crate::models::{FormatTag, RecordError, SourceRecord};
use crate::pipeline::extraction::{
    detect_format, extract_report, ExtractedReading, ExtractionError, LabReport, ReportHeader,
};
use crate::pipeline::imputation::{check_plausibility, impute, FeatureVector, ImputationReport};
use crate::pipeline::risk::{assess, RiskAssessment, RiskError, RiskModel};
use crate::reference::{ReferenceError, ReferenceTables};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Could not read this report. Try another file format or enter the values manually.")]
    CouldNotParse,

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Invalid manual entry: {0}")]
    Record(#[from] RecordError),

    #[error("Risk assessment failed: {0}")]
    Risk(#[from] RiskError),

    #[error("Reference tables unavailable: {0}")]
    Reference(#[from] ReferenceError),
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Everything the persistence and presentation layers need from one intake.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeOutcome {
    pub intake_id: Uuid,
    pub format_tag: FormatTag,
    pub record: SourceRecord,
    /// Per-reading detail; empty for manual entry.
    pub readings: Vec<ExtractedReading>,
    /// `None` for manual entry.
    pub header: Option<ReportHeader>,
    pub features: FeatureVector,
    pub imputation: ImputationReport,
    pub plausibility_warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct IntakeProcessor {
    tables: Arc<ReferenceTables>,
}

impl IntakeProcessor {
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self { tables }
    }

    pub fn detect(&self, raw_text: &str) -> FormatTag {
        detect_format(raw_text, &self.tables.signatures)
    }

    /// Detect the layout, extract, then impute.
    ///
    /// Every layout whose signature matches is parsed and the richest
    /// record is kept; on a tie the higher tier wins. Unrecognized text, or
    /// a recognized layout that yields no biomarker, is `CouldNotParse`,
    /// never a silently imputed empty record.
    pub fn process_text(&self, raw_text: &str) -> Result<IntakeOutcome, IntakeError> {
        let intake_id = Uuid::new_v4();
        let candidates = self.tables.signatures.matching(raw_text);
        if candidates.is_empty() {
            tracing::warn!(
                intake_id = %intake_id,
                text_length = raw_text.len(),
                "Report layout not recognized"
            );
            return Err(IntakeError::CouldNotParse);
        }

        tracing::info!(
            intake_id = %intake_id,
            candidates = ?candidates,
            "Intake: starting extraction"
        );
        let mut best: Option<LabReport> = None;
        for &format_tag in &candidates {
            let report = extract_report(raw_text, format_tag)?;
            if best.as_ref().map_or(true, |b| report.record.len() > b.record.len()) {
                best = Some(report);
            }
        }
        let report = match best {
            Some(report) if !report.record.is_empty() => report,
            _ => {
                tracing::warn!(
                    intake_id = %intake_id,
                    candidates = ?candidates,
                    "Layout recognized but no biomarker could be read"
                );
                return Err(IntakeError::CouldNotParse);
            }
        };
        if report.record.format_tag() != candidates[0] {
            tracing::info!(
                intake_id = %intake_id,
                detected = %candidates[0],
                chosen = %report.record.format_tag(),
                "Lower-tier layout read more biomarkers"
            );
        }

        Ok(self.finish(intake_id, report.record, report.readings, Some(report.header)))
    }

    /// Impute a manual-entry record. Never fails.
    pub fn process_manual(&self, record: SourceRecord) -> IntakeOutcome {
        let intake_id = Uuid::new_v4();
        tracing::info!(
            intake_id = %intake_id,
            biomarkers = record.len(),
            "Intake: manual entry"
        );
        self.finish(intake_id, record, Vec::new(), None)
    }

    /// Manual entry from raw form fields (`"GB" => "5,87"`).
    pub fn process_manual_fields<'a, I>(&self, fields: I) -> Result<IntakeOutcome, IntakeError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let record = SourceRecord::from_manual_fields(fields)?;
        Ok(self.process_manual(record))
    }

    /// Run the classifier on an intake and discount its confidence for
    /// imputed features.
    pub fn assess(
        &self,
        outcome: &IntakeOutcome,
        model: &dyn RiskModel,
    ) -> Result<RiskAssessment, IntakeError> {
        assess(&outcome.features, &outcome.imputation, model).map_err(IntakeError::from)
    }

    fn finish(
        &self,
        intake_id: Uuid,
        record: SourceRecord,
        readings: Vec<ExtractedReading>,
        header: Option<ReportHeader>,
    ) -> IntakeOutcome {
        let (features, imputation) = impute(&record, &self.tables.population_averages);
        let plausibility_warnings = check_plausibility(&features);

        tracing::info!(
            intake_id = %intake_id,
            format = record.format_tag().as_str(),
            biomarkers = record.len(),
            imputed = imputation.imputed_count,
            warnings = plausibility_warnings.len(),
            "Intake complete"
        );

        IntakeOutcome {
            intake_id,
            format_tag: record.format_tag(),
            record,
            readings,
            header,
            features,
            imputation,
            plausibility_warnings,
        }
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Build a processor from the reference tables at the configured path,
/// falling back to the built-in tables when no file exists.
pub fn build_processor() -> Result<IntakeProcessor, IntakeError> {
    let path = config::reference_tables_path();
    let tables = ReferenceTables::load_or_default(&path)?;
    Ok(IntakeProcessor::new(Arc::new(tables)))
}
