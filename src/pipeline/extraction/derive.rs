/// Decimal places kept on a derived neutrophil-to-lymphocyte ratio.
pub const NLR_DECIMALS: i32 = 2;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// NLR from the differential percentages.
///
/// `None` when either input is missing, non-finite, or the lymphocyte
/// percentage is not strictly positive.
pub fn derive_nlr(neut_pct: Option<f64>, lymph_pct: Option<f64>) -> Option<f64> {
    let (neut, lymph) = (neut_pct?, lymph_pct?);
    if !neut.is_finite() || !lymph.is_finite() || lymph <= 0.0 {
        return None;
    }
    let ratio = round_to(neut / lymph, NLR_DECIMALS);
    ratio.is_finite().then_some(ratio)
}
