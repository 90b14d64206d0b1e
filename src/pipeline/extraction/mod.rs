pub mod types;
pub mod fold;
pub mod numeric;
pub mod signatures;
pub mod labels;
pub mod traditional;
pub mod booklet;
pub mod derive;
pub mod header;

#[cfg(test)]
pub(crate) mod fixtures;

pub use types::*;
pub use signatures::*;
pub use derive::derive_nlr;
pub use header::parse_header;

use thiserror::Error;

use crate::models::{Biomarker, BiomarkerReading, FormatTag, SourceRecord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Unsupported format for extraction: {0}")]
    UnsupportedFormat(FormatTag),
}

/// Sparse biomarker record from raw report text.
pub fn extract(raw_text: &str, format_tag: FormatTag) -> Result<SourceRecord, ExtractionError> {
    extract_report(raw_text, format_tag).map(|report| report.record)
}

/// Extract readings, header context and the sparse record.
///
/// The first accepted reading of a biomarker wins. NLR is derived from the
/// differential percentages only when the report does not print it.
pub fn extract_report(
    raw_text: &str,
    format_tag: FormatTag,
) -> Result<LabReport, ExtractionError> {
    let candidates = match format_tag {
        FormatTag::TraditionalLab => traditional::parse_readings(raw_text),
        FormatTag::QuebecHealthBooklet => booklet::parse_readings(raw_text),
        FormatTag::ManualEntry | FormatTag::Unknown => {
            return Err(ExtractionError::UnsupportedFormat(format_tag));
        }
    };

    let mut record = SourceRecord::empty(format_tag);
    let mut readings = Vec::with_capacity(candidates.len() + 1);
    for candidate in candidates {
        let Ok(reading) = BiomarkerReading::new(candidate.biomarker, candidate.value) else {
            continue;
        };
        if record.insert_first(reading) {
            readings.push(candidate);
        } else {
            tracing::debug!(
                biomarker = %candidate.biomarker,
                label = %candidate.source_label,
                "Later match ignored, first match wins"
            );
        }
    }

    if !record.contains(Biomarker::Nlr) {
        let nlr = derive_nlr(record.get(Biomarker::NeutPct), record.get(Biomarker::LymphPct));
        if let Some(reading) = nlr.and_then(|v| BiomarkerReading::new(Biomarker::Nlr, v).ok()) {
            record.insert_first(reading);
            readings.push(ExtractedReading::derived_nlr(reading.value));
        }
    }

    let header = parse_header(raw_text, format_tag);

    tracing::info!(
        format = format_tag.as_str(),
        biomarkers = record.len(),
        nlr_derived = readings.last().is_some_and(|r| r.derived),
        "Lab report extraction complete"
    );

    Ok(LabReport {
        record,
        readings,
        header,
    })
}
