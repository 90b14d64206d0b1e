//! Quebec health booklet layout: a French label on its own line, followed
//! within a few lines by `low - high (unit)value  unit`, with the
//! `Valeur de référence` caption in between.

use std::sync::LazyLock;

use regex::Regex;

use super::labels::{find_booklet_label, is_excluded_booklet_line, LabelHit};
use super::numeric::{parse_measurement, parse_tail, ValueTail};
use super::types::{ExtractedReading, ReferenceRange};

/// Lines searched after the label line.
const WINDOW_FOLLOWING_LINES: usize = 3;

static REFERENCE_THEN_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?:(?P<low>[0-9]+(?:[.,][0-9]+)?)\s*-\s*(?P<high>[0-9]+(?:[.,][0-9]+)?)\s*)?",
        r"\((?P<ref_unit>[^()]*)\)\s*(?P<value>[^\s()]+)(?P<tail>.*)$",
    ))
    .unwrap()
});

static STANDALONE_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<value>[0-9]\S*)(?:\s+(?P<tail>[^-\s].*))?$").unwrap()
});

struct RawValue {
    token: String,
    tail: ValueTail,
}

fn read_segment(segment: &str) -> Option<RawValue> {
    if let Some(c) = REFERENCE_THEN_VALUE.captures(segment) {
        let mut tail = parse_tail(&c["tail"]);
        let ref_unit = c["ref_unit"].trim();
        if tail.unit.is_none() && !ref_unit.is_empty() {
            tail.unit = Some(ref_unit.to_string());
        }
        if tail.reference_range.is_none() {
            tail.reference_range = match (c.name("low"), c.name("high")) {
                (Some(low), Some(high)) => parse_measurement(low.as_str())
                    .zip(parse_measurement(high.as_str()))
                    .and_then(|(low, high)| ReferenceRange::new(low, high)),
                _ => None,
            };
        }
        return Some(RawValue {
            token: c["value"].to_string(),
            tail,
        });
    }

    if segment.contains('(') || segment.contains("Valeur de référence") {
        return None;
    }
    let c = STANDALONE_VALUE.captures(segment)?;
    Some(RawValue {
        token: c["value"].to_string(),
        tail: parse_tail(c.name("tail").map_or("", |m| m.as_str())),
    })
}

/// Search the rest of the label line, then the following lines up to the
/// next label. The first value-shaped segment decides: if it fails
/// validation the biomarker is absent.
fn read_window(lines: &[&str], index: usize, hit: LabelHit) -> Option<ExtractedReading> {
    let inline = lines[index][hit.end..]
        .trim_start_matches([':', ' ', '\t'])
        .trim();
    let following = lines
        .iter()
        .skip(index + 1)
        .take(WINDOW_FOLLOWING_LINES)
        .take_while(|l| find_booklet_label(l).is_none())
        .copied();

    std::iter::once(inline)
        .chain(following)
        .find_map(read_segment)
        .and_then(|raw| {
            ExtractedReading::from_tokens(hit.biomarker, hit.label, &raw.token, raw.tail)
        })
}

/// Candidate readings in text order. Duplicates are resolved by the caller.
pub(crate) fn parse_readings(raw_text: &str) -> Vec<ExtractedReading> {
    let lines: Vec<&str> = raw_text.lines().map(str::trim).collect();
    let mut readings = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if is_excluded_booklet_line(line) {
            continue;
        }
        let Some(hit) = find_booklet_label(line) else {
            continue;
        };
        match read_window(&lines, index, hit) {
            Some(reading) => readings.push(reading),
            None => tracing::debug!(label = hit.label, "No usable value near booklet label"),
        }
    }
    tracing::debug!(candidates = readings.len(), "Booklet layout scanned");
    readings
}
