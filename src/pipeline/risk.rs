//! Seam to the external cancer-risk classifier.
//!
//! The classifier itself lives outside this crate; it only has to turn a
//! complete `FeatureVector` into a probability. Vectors outside the ranges
//! the classifier was trained on are refused before it is called.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Biomarker, RiskLevel};
use crate::pipeline::imputation::{
    apply_penalty, range_violations, FeatureVector, ImputationReport,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("Risk model failed: {0}")]
    Model(String),

    #[error("Risk model returned an invalid probability: {0}")]
    InvalidProbability(f64),

    #[error(
        "{name} ({biomarker}) = {value} is outside the range the risk model accepts",
        name = .biomarker.display_name()
    )]
    OutOfRange { biomarker: Biomarker, value: f64 },
}

/// Binary classifier over the seven required features.
pub trait RiskModel {
    /// Probability of the positive (cancer) class, in [0, 1].
    fn predict(&self, features: &FeatureVector) -> Result<f64, RiskError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub probability: f64,
    pub risk_level: RiskLevel,
    /// Classifier confidence after the imputation penalty.
    pub adjusted_confidence: f64,
}

/// Score a feature vector and discount the confidence for imputed inputs.
///
/// The first feature outside its safe range is `OutOfRange` and the model
/// is not called.
pub fn assess(
    features: &FeatureVector,
    report: &ImputationReport,
    model: &dyn RiskModel,
) -> Result<RiskAssessment, RiskError> {
    if let Some(v) = range_violations(features).first() {
        tracing::warn!(
            biomarker = %v.biomarker,
            value = v.value,
            "Refusing to score feature outside classifier range"
        );
        return Err(RiskError::OutOfRange {
            biomarker: v.biomarker,
            value: v.value,
        });
    }

    let probability = model.predict(features)?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(RiskError::InvalidProbability(probability));
    }

    let base_confidence = probability.max(1.0 - probability);
    let assessment = RiskAssessment {
        probability,
        risk_level: RiskLevel::from_probability(probability),
        adjusted_confidence: apply_penalty(base_confidence, report),
    };

    tracing::info!(
        risk_level = assessment.risk_level.as_str(),
        label = assessment.risk_level.label(),
        probability,
        confidence = assessment.adjusted_confidence,
        imputed = report.imputed_count,
        "Risk assessed"
    );
    Ok(assessment)
}

/// Constant-output model for tests and dry runs.
pub struct MockRiskModel {
    outcome: Result<f64, RiskError>,
}

impl MockRiskModel {
    pub fn new(probability: f64) -> Self {
        Self {
            outcome: Ok(probability),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(RiskError::Model(message.to_string())),
        }
    }
}

impl RiskModel for MockRiskModel {
    fn predict(&self, _features: &FeatureVector) -> Result<f64, RiskError> {
        self.outcome.clone()
    }
}
