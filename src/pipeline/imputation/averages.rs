use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Biomarker, REQUIRED_FEATURES};
use crate::reference::ReferenceError;

/// Per-biomarker population constants used in place of missing measurements.
///
/// Always covers every required feature. Extra biomarkers may be listed
/// but are never consulted by `impute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Biomarker, f64>",
    into = "BTreeMap<Biomarker, f64>"
)]
pub struct PopulationAverages {
    required: [f64; REQUIRED_FEATURES.len()],
    extra: BTreeMap<Biomarker, f64>,
}

impl PopulationAverages {
    pub fn new(mut values: BTreeMap<Biomarker, f64>) -> Result<Self, ReferenceError> {
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite() || **v < 0.0) {
            return Err(ReferenceError::Invalid(format!(
                "population average for {name} must be finite and non-negative, got {value}"
            )));
        }
        let mut required = [0.0; REQUIRED_FEATURES.len()];
        for (slot, name) in required.iter_mut().zip(REQUIRED_FEATURES) {
            *slot = values.remove(&name).ok_or_else(|| {
                ReferenceError::Invalid(format!("population average for {name} is missing"))
            })?;
        }
        Ok(Self {
            required,
            extra: values,
        })
    }

    pub fn get(&self, name: Biomarker) -> Option<f64> {
        match REQUIRED_FEATURES.iter().position(|r| *r == name) {
            Some(column) => Some(self.required[column]),
            None => self.extra.get(&name).copied(),
        }
    }

    /// Constant for the required feature at `column` in `REQUIRED_FEATURES` order.
    pub(crate) fn for_column(&self, column: usize) -> f64 {
        self.required[column]
    }
}

impl Default for PopulationAverages {
    /// Training-population means of the risk classifier.
    fn default() -> Self {
        Self {
            // WBC, NLR, HGB, MCV, PLT, RDW, MONO_ABS
            required: [7.2, 2.8, 140.5, 88.2, 285.0, 13.5, 0.6],
            extra: BTreeMap::new(),
        }
    }
}

impl TryFrom<BTreeMap<Biomarker, f64>> for PopulationAverages {
    type Error = ReferenceError;

    fn try_from(values: BTreeMap<Biomarker, f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<PopulationAverages> for BTreeMap<Biomarker, f64> {
    fn from(averages: PopulationAverages) -> Self {
        let mut values = averages.extra;
        values.extend(REQUIRED_FEATURES.into_iter().zip(averages.required));
        values
    }
}
