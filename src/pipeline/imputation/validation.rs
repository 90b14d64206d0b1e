use super::FeatureVector;
use crate::models::Biomarker;

/// Ranges the risk classifier was trained on. At intake, values outside are
/// kept but reported, since they usually mean a transcription error; the
/// classifier refuses to score them.
pub const SAFE_RANGES: &[(Biomarker, f64, f64)] = &[
    (Biomarker::Wbc, 1.0, 50.0),
    (Biomarker::Nlr, 0.5, 50.0),
    (Biomarker::Hgb, 50.0, 200.0),
    (Biomarker::Mcv, 60.0, 120.0),
    (Biomarker::Plt, 50.0, 800.0),
    (Biomarker::Rdw, 10.0, 30.0),
    (Biomarker::MonoAbs, 0.0, 5.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeViolation {
    pub biomarker: Biomarker,
    pub value: f64,
    pub low: f64,
    pub high: f64,
}

/// Features outside their safe range, in `SAFE_RANGES` order. Bounds are
/// inclusive.
pub fn range_violations(features: &FeatureVector) -> Vec<RangeViolation> {
    SAFE_RANGES
        .iter()
        .filter_map(|&(biomarker, low, high)| {
            let value = features.get(biomarker)?;
            (value < low || value > high).then_some(RangeViolation {
                biomarker,
                value,
                low,
                high,
            })
        })
        .collect()
}

/// Warn about features outside the classifier's safe ranges. Never rejects.
pub fn check_plausibility(features: &FeatureVector) -> Vec<String> {
    range_violations(features)
        .into_iter()
        .map(|v| {
            tracing::warn!(
                biomarker = %v.biomarker,
                value = v.value,
                low = v.low,
                high = v.high,
                "Feature outside classifier safe range"
            );
            format!(
                "{} ({}) = {} is outside the expected range {}-{}",
                v.biomarker.display_name(),
                v.biomarker,
                v.value,
                v.low,
                v.high
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SourceRecord, REQUIRED_FEATURES};
    use crate::pipeline::imputation::{impute, PopulationAverages};

    fn vector(entries: &[(Biomarker, f64)]) -> FeatureVector {
        let record = SourceRecord::manual(entries.iter().copied()).unwrap();
        impute(&record, &PopulationAverages::default()).0
    }

    #[test]
    fn safe_ranges_cover_required_features() {
        for name in REQUIRED_FEATURES {
            assert!(SAFE_RANGES.iter().any(|(b, _, _)| *b == name));
        }
    }

    #[test]
    fn population_averages_are_plausible() {
        assert!(check_plausibility(&vector(&[])).is_empty());
    }

    #[test]
    fn out_of_range_values_are_reported() {
        let features = vector(&[(Biomarker::Hgb, 13.7), (Biomarker::Plt, 950.0)]);
        let warnings = check_plausibility(&features);
        assert_eq!(warnings.len(), 2);
        assert_eq!(
            warnings[0],
            "Hemoglobin (HGB) = 13.7 is outside the expected range 50-200"
        );
        assert!(warnings[1].starts_with("Platelets (PLT) = 950"));
    }

    #[test]
    fn violations_carry_the_range() {
        let violations = range_violations(&vector(&[(Biomarker::Rdw, 31.0)]));
        assert_eq!(
            violations,
            vec![RangeViolation {
                biomarker: Biomarker::Rdw,
                value: 31.0,
                low: 10.0,
                high: 30.0,
            }]
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let features = vector(&[(Biomarker::MonoAbs, 0.0), (Biomarker::Wbc, 50.0)]);
        assert!(check_plausibility(&features).is_empty());
        assert!(range_violations(&features).is_empty());
    }
}
