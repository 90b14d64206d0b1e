use super::ImputationReport;
use crate::models::Biomarker;

/// Confidence lost per imputed required feature.
pub const PENALTY_PER_MISSING_FEATURE: f64 = 0.10;

/// Adjusted classifier confidence never drops below this.
pub const CONFIDENCE_FLOOR: f64 = 0.5;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Penalty for `imputed_count` imputed features, on a two-decimal grid.
pub fn penalty_for(imputed_count: usize) -> f64 {
    round2(imputed_count as f64 * PENALTY_PER_MISSING_FEATURE)
}

/// User-facing note shown next to a prediction built on imputed values.
/// Empty when nothing was imputed.
pub fn warning_text(missing: &[Biomarker], penalty: f64) -> String {
    if missing.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = missing.iter().map(|b| b.as_str()).collect();
    format!(
        "Note: {} biomarker(s) were missing and estimated using population averages: {}. \
         This may affect prediction accuracy (-{:.0}% confidence).",
        missing.len(),
        names.join(", "),
        penalty * 100.0
    )
}

/// Classifier confidence after the imputation penalty, floored at
/// `CONFIDENCE_FLOOR`.
pub fn apply_penalty(base_confidence: f64, report: &ImputationReport) -> f64 {
    (base_confidence - report.confidence_penalty).max(CONFIDENCE_FLOOR)
}
