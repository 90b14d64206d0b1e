//! Numeric, unit and flag tokens found next to a biomarker label.
//!
//! Precision over recall: a token that does not look exactly like a
//! measurement is treated as absent, never repaired.

use std::sync::LazyLock;

use regex::Regex;

use super::types::ReferenceRange;
use crate::models::{AbnormalFlag, Biomarker};

static MEASUREMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:[.,][0-9]+)?$").unwrap());

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<low>[0-9]+(?:[.,][0-9]+)?)\s*-\s*(?P<high>[0-9]+(?:[.,][0-9]+)?)").unwrap()
});

/// Parse a measurement token: digits with an optional `.` or `,` decimal part.
/// Signs, exponents, thousands separators and trailing junk are rejected.
pub fn parse_measurement(token: &str) -> Option<f64> {
    let token = token.trim();
    if !MEASUREMENT.is_match(token) {
        return None;
    }
    token
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Normalize spelling variants of a unit: `10*9/L`, `x10E9/L` and `10^9/l`
/// all become `10^9/l`.
pub fn normalize_unit(token: &str) -> String {
    let compact: String = token
        .trim()
        .trim_end_matches([',', ';', '.'])
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
        .replace('×', "x")
        .replace('µ', "u")
        .replace('μ', "u");
    compact
        .trim_start_matches('x')
        .replace("10*", "10^")
        .replace("10e", "10^")
}

/// Spellings accepted for each canonical unit. Same magnitude only:
/// `k/ul` is `10^9/l`, but `g/dl` is not `g/l`. French reports write counts
/// as giga (`G/L`) or tera (`T/L`) per litre; since case is folded away,
/// `g/l` only means giga per litre for the count biomarkers.
fn accepted_units(biomarker: Biomarker) -> &'static [&'static str] {
    match biomarker.canonical_unit() {
        "10^9/L" => &["10^9/l", "10^3/ul", "k/ul", "g/l"],
        "10^12/L" => &["10^12/l", "10^6/ul", "m/ul", "t/l"],
        "g/L" => &["g/l"],
        "L/L" => &["l/l"],
        "fL" => &["fl"],
        "pg" => &["pg"],
        "%" => &["%"],
        _ => &["ratio"],
    }
}

/// Whether a unit token agrees with the biomarker's canonical unit.
pub fn unit_matches(biomarker: Biomarker, token: &str) -> bool {
    let unit = normalize_unit(token);
    accepted_units(biomarker).contains(&unit.as_str())
}

/// What follows the value token on a result line.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ValueTail {
    pub unit: Option<String>,
    pub flag: Option<AbnormalFlag>,
    pub reference_range: Option<ReferenceRange>,
}

fn looks_like_unit(token: &str) -> bool {
    token.contains(['/', '%', '^', '*'])
        || matches!(token.to_lowercase().as_str(), "fl" | "pg" | "ratio")
}

/// Split the remainder of a result line into unit, flag and reference range.
/// Unrecognized tokens (lab codes such as `RADVS`) are ignored.
pub(crate) fn parse_tail(tail: &str) -> ValueTail {
    let reference_range = RANGE.captures(tail).and_then(|c| {
        let low = parse_measurement(&c["low"])?;
        let high = parse_measurement(&c["high"])?;
        ReferenceRange::new(low, high)
    });
    let remainder = RANGE.replace(tail, " ");

    let mut parsed = ValueTail {
        reference_range,
        ..ValueTail::default()
    };
    for token in remainder.split_whitespace() {
        if let Some(flag) = AbnormalFlag::from_report_token(token) {
            parsed.flag.get_or_insert(flag);
            continue;
        }
        if parsed.unit.is_none() && looks_like_unit(token) {
            parsed.unit = Some(token.to_string());
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_point_and_comma() {
        assert_eq!(parse_measurement("5.87"), Some(5.87));
        assert_eq!(parse_measurement("5,87"), Some(5.87));
        assert_eq!(parse_measurement("137"), Some(137.0));
        assert_eq!(parse_measurement(" 0,38 "), Some(0.38));
        assert_eq!(parse_measurement("0"), Some(0.0));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(parse_measurement("5.8.7"), None);
        assert_eq!(parse_measurement("12a"), None);
        assert_eq!(parse_measurement("-3"), None);
        assert_eq!(parse_measurement("+3"), None);
        assert_eq!(parse_measurement("1e3"), None);
        assert_eq!(parse_measurement("5."), None);
        assert_eq!(parse_measurement(".5"), None);
        assert_eq!(parse_measurement("7 200"), None);
        assert_eq!(parse_measurement(""), None);
        assert_eq!(parse_measurement("NaN"), None);
    }

    #[test]
    fn unit_spellings_normalize() {
        assert_eq!(normalize_unit("10*9/L"), "10^9/l");
        assert_eq!(normalize_unit("10^9/L"), "10^9/l");
        assert_eq!(normalize_unit("x10E9/L"), "10^9/l");
        assert_eq!(normalize_unit("×10^9/L"), "10^9/l");
        assert_eq!(normalize_unit("g/L,"), "g/l");
        assert_eq!(normalize_unit(" fL "), "fl");
    }

    #[test]
    fn unit_consistency_never_converts() {
        assert!(unit_matches(Biomarker::Wbc, "10*9/L"));
        assert!(unit_matches(Biomarker::Wbc, "K/uL"));
        assert!(unit_matches(Biomarker::Hgb, "g/L"));
        assert!(!unit_matches(Biomarker::Hgb, "g/dL"));
        assert!(!unit_matches(Biomarker::Wbc, "%"));
        assert!(unit_matches(Biomarker::NeutPct, "%"));
        assert!(unit_matches(Biomarker::Rbc, "10*12/L"));
        assert!(unit_matches(Biomarker::Hct, "L/L"));
        assert!(unit_matches(Biomarker::Mcv, "fL"));
    }

    #[test]
    fn french_si_prefixes_for_counts() {
        assert!(unit_matches(Biomarker::Wbc, "G/L"));
        assert!(unit_matches(Biomarker::Plt, "G/L"));
        assert!(unit_matches(Biomarker::MonoAbs, "G/L"));
        assert!(unit_matches(Biomarker::Rbc, "T/L"));
        assert!(!unit_matches(Biomarker::Rbc, "G/L"));
        assert!(!unit_matches(Biomarker::Wbc, "T/L"));
        assert!(!unit_matches(Biomarker::Hgb, "T/L"));
    }

    #[test]
    fn tail_with_unit_and_range() {
        let tail = parse_tail(" 10^9/L 4.50-11.00 RADVS");
        assert_eq!(tail.unit.as_deref(), Some("10^9/L"));
        assert_eq!(tail.flag, None);
        assert_eq!(tail.reference_range, ReferenceRange::new(4.5, 11.0));
    }

    #[test]
    fn tail_with_flag_before_unit() {
        let tail = parse_tail(" H 10^9/L 4.50-11.00");
        assert_eq!(tail.flag, Some(AbnormalFlag::High));
        assert_eq!(tail.unit.as_deref(), Some("10^9/L"));
    }

    #[test]
    fn tail_with_french_flag() {
        let tail = parse_tail("  g/L  Bas");
        assert_eq!(tail.unit.as_deref(), Some("g/L"));
        assert_eq!(tail.flag, Some(AbnormalFlag::Low));
    }

    #[test]
    fn litre_per_litre_is_a_unit_not_a_flag() {
        let tail = parse_tail(" L/L 0.40-0.50");
        assert_eq!(tail.unit.as_deref(), Some("L/L"));
        assert_eq!(tail.flag, None);
    }

    #[test]
    fn tail_with_spaced_range_and_no_unit() {
        let tail = parse_tail(" 12.7 - 16.0 RADVS");
        assert_eq!(tail.unit, None);
        assert_eq!(tail.reference_range, ReferenceRange::new(12.7, 16.0));
    }
}
