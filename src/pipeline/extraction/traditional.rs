//! Traditional hospital lab layout: one result per line inside the
//! hematology section, with bilingual codes (`GB WBC 5.87 10^9/L 4.50-11.00`)
//! and named differential lines (`Neutrophiles Rel. 63.31 % 40.00-70.00`).

use std::sync::LazyLock;

use regex::Regex;

use super::labels::{differential_cell, traditional_code};
use super::numeric::parse_tail;
use super::types::ExtractedReading;
use crate::models::{units, Biomarker};

const SECTION_START: &[&str] = &["H E M A T O L O G I E", "H E M A T O L O G Y"];
const SECTION_END: &[&str] = &[
    "B I O C H I M I E",
    "B I O C H E M I S T R Y",
    "suite à la page suivante",
];

static CODE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<first>[A-Z]{1,5})\s+(?P<second>[A-Z]{2,5})\s+(?P<value>\S+)(?P<tail>.*)$")
        .unwrap()
});

static SINGLE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<code>[A-Z]{2,5})\s+(?P<value>[0-9]\S*)(?P<tail>.*)$").unwrap()
});

static DIFFERENTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<cell>[^\W\d_]+)\s+(?P<kind>(?i:abs|rel))\.?\s+",
        r"(?:Auto\s+)?(?P<value>\S+)(?P<tail>.*)$",
    ))
    .unwrap()
});

/// Lines between the hematology header and the next section or page break.
/// Without a hematology header the whole text is scanned.
fn hematology_lines(raw_text: &str) -> Vec<&str> {
    let lines: Vec<&str> = raw_text.lines().map(str::trim).collect();
    let start = lines
        .iter()
        .position(|l| SECTION_START.iter().any(|m| l.contains(m)));
    let Some(start) = start else {
        return lines;
    };
    lines[start + 1..]
        .iter()
        .take_while(|l| !SECTION_END.iter().any(|m| l.contains(m)))
        .copied()
        .collect()
}

fn parse_line(line: &str) -> Option<ExtractedReading> {
    if let Some(c) = DIFFERENTIAL.captures(line) {
        let relative = c["kind"].eq_ignore_ascii_case("rel");
        let biomarker = differential_cell(&c["cell"], relative)?;
        let mut tail = parse_tail(&c["tail"]);
        if relative && tail.unit.is_none() {
            tail.unit = Some(units::PERCENT.to_string());
        }
        let label = format!("{} {}", &c["cell"], &c["kind"]);
        return ExtractedReading::from_tokens(biomarker, &label, &c["value"], tail);
    }

    if let Some(c) = CODE_PAIR.captures(line) {
        let resolved = traditional_code(&c["second"]).or_else(|| traditional_code(&c["first"]));
        if let Some(biomarker) = resolved {
            let label = format!("{} {}", &c["first"], &c["second"]);
            let tail = parse_tail(&c["tail"]);
            return ExtractedReading::from_tokens(biomarker, &label, &c["value"], tail);
        }
    }

    let c = SINGLE_CODE.captures(line)?;
    let biomarker = traditional_code(&c["code"])?;
    ExtractedReading::from_tokens(biomarker, &c["code"], &c["value"], parse_tail(&c["tail"]))
}

/// Candidate readings in text order. Duplicates are resolved by the caller.
pub(crate) fn parse_readings(raw_text: &str) -> Vec<ExtractedReading> {
    let readings: Vec<ExtractedReading> = hematology_lines(raw_text)
        .into_iter()
        .filter(|l| !l.is_empty())
        .filter_map(parse_line)
        .collect();
    tracing::debug!(candidates = readings.len(), "Traditional layout scanned");
    readings
}
