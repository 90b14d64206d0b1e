//! Fills the classifier's required features from a sparse record and
//! reports how much of the vector was estimated.

pub mod averages;
pub mod confidence;
pub mod validation;

pub use averages::*;
pub use confidence::*;
pub use validation::*;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::{Biomarker, SourceRecord, REQUIRED_FEATURES};

/// Dense classifier input: one finite, non-negative value per required
/// feature, in `REQUIRED_FEATURES` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; REQUIRED_FEATURES.len()],
}

impl FeatureVector {
    pub fn get(&self, name: Biomarker) -> Option<f64> {
        REQUIRED_FEATURES
            .iter()
            .position(|r| *r == name)
            .map(|column| self.values[column])
    }

    /// Row in classifier column order.
    pub fn as_row(&self) -> [f64; REQUIRED_FEATURES.len()] {
        self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (Biomarker, f64)> + '_ {
        REQUIRED_FEATURES.into_iter().zip(self.values)
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name.as_str(), &value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputationReport {
    /// Imputed features in `REQUIRED_FEATURES` order.
    pub missing_features: Vec<Biomarker>,
    pub imputed_count: usize,
    pub confidence_penalty: f64,
    /// Empty when nothing was imputed.
    pub warning_text: String,
}

impl ImputationReport {
    pub fn is_complete(&self) -> bool {
        self.imputed_count == 0
    }
}

/// Build the classifier vector, substituting population averages for
/// absent required features.
///
/// Never fails. The record's layout tag is ignored, so extracted and
/// manually entered records are treated alike.
pub fn impute(
    record: &SourceRecord,
    averages: &PopulationAverages,
) -> (FeatureVector, ImputationReport) {
    let mut values = [0.0; REQUIRED_FEATURES.len()];
    let mut missing_features = Vec::new();

    for (column, name) in REQUIRED_FEATURES.into_iter().enumerate() {
        values[column] = match record.get(name) {
            Some(value) => value,
            None => {
                missing_features.push(name);
                averages.for_column(column)
            }
        };
    }

    let imputed_count = missing_features.len();
    let confidence_penalty = penalty_for(imputed_count);
    let warning_text = warning_text(&missing_features, confidence_penalty);

    if imputed_count > 0 {
        tracing::info!(
            imputed = imputed_count,
            missing = ?missing_features,
            penalty = confidence_penalty,
            "Imputed missing biomarkers with population averages"
        );
    } else {
        tracing::debug!("All required biomarkers present, nothing imputed");
    }

    (
        FeatureVector { values },
        ImputationReport {
            missing_features,
            imputed_count,
            confidence_penalty,
            warning_text,
        },
    )
}
