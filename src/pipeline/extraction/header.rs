//! Patient and collection context from the top of a report.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use super::types::ReportHeader;
use crate::models::FormatTag;

static BOOKLET_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Carnet sant[ée]\s+(?P<name>[A-Z][A-Z'-]*)").unwrap());

static BOOKLET_COLLECTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<day>[0-9]{1,2})(?:er)?\s+(?P<month>[^\W\d_]+)\s+(?P<year>[0-9]{4}),",
        r"\s*(?P<hour>[0-9]{1,2})\s*h\s*(?P<minute>[0-9]{2})",
    ))
    .unwrap()
});

static TRADITIONAL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PATIENT EXTERNE\s+(?P<name>[A-Z][A-Z'-]*,\s*[A-Z][A-Z'-]*)").unwrap()
});

static TRADITIONAL_DOB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"N[éÉe]\(e\)/DOB:\s*(?P<dob>[0-9]{4}/[0-9]{2}/[0-9]{2})").unwrap()
});

static TRADITIONAL_AGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Age:\s*(?P<age>[0-9]{1,3})\b").unwrap());

static TRADITIONAL_SEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Sex\(e\):\s*(?P<sex>[MF])\b").unwrap());

static TRADITIONAL_COLLECTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"PR[ÉÈE]LEV[ÉÈE]/COLLECTED\s*(?P<date>[0-9]{4}/[0-9]{2}/[0-9]{2})",
        r"\s*(?P<time>[0-9]{2}:[0-9]{2})",
    ))
    .unwrap()
});

static PRESCRIBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Prescripteur\s*:?[ \t]+(?P<value>[^\r\n]+)").unwrap());

static LABORATORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Laboratoire\s*:?[ \t]+(?P<value>[A-Z][^\r\n]*)").unwrap());

fn french_month(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "janvier" => 1,
        "février" | "fevrier" => 2,
        "mars" => 3,
        "avril" => 4,
        "mai" => 5,
        "juin" => 6,
        "juillet" => 7,
        "août" | "aout" => 8,
        "septembre" => 9,
        "octobre" => 10,
        "novembre" => 11,
        "décembre" | "decembre" => 12,
        _ => return None,
    };
    Some(month)
}

fn capture(re: &Regex, text: &str, group: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.name(group).map(|m| m.as_str().trim().to_string()))
        .filter(|s| !s.is_empty())
}

fn booklet_collected_at(text: &str) -> Option<NaiveDateTime> {
    let c = BOOKLET_COLLECTED.captures(text)?;
    let date = NaiveDate::from_ymd_opt(
        c["year"].parse().ok()?,
        french_month(&c["month"])?,
        c["day"].parse().ok()?,
    )?;
    date.and_hms_opt(c["hour"].parse().ok()?, c["minute"].parse().ok()?, 0)
}

fn traditional_collected_at(text: &str) -> Option<NaiveDateTime> {
    let c = TRADITIONAL_COLLECTED.captures(text)?;
    NaiveDateTime::parse_from_str(&format!("{} {}", &c["date"], &c["time"]), "%Y/%m/%d %H:%M").ok()
}

/// Best-effort header fields. Anything not found stays `None`.
pub fn parse_header(raw_text: &str, format_tag: FormatTag) -> ReportHeader {
    let mut header = ReportHeader {
        prescriber: capture(&PRESCRIBER, raw_text, "value"),
        laboratory: capture(&LABORATORY, raw_text, "value"),
        ..ReportHeader::default()
    };
    match format_tag {
        FormatTag::QuebecHealthBooklet => {
            header.patient_name = capture(&BOOKLET_NAME, raw_text, "name");
            header.collected_at = booklet_collected_at(raw_text);
        }
        FormatTag::TraditionalLab => {
            header.patient_name = capture(&TRADITIONAL_NAME, raw_text, "name");
            header.date_of_birth = capture(&TRADITIONAL_DOB, raw_text, "dob")
                .and_then(|s| NaiveDate::parse_from_str(&s, "%Y/%m/%d").ok());
            header.age = capture(&TRADITIONAL_AGE, raw_text, "age").and_then(|s| s.parse().ok());
            header.sex = capture(&TRADITIONAL_SEX, raw_text, "sex");
            header.collected_at = traditional_collected_at(raw_text);
        }
        FormatTag::ManualEntry | FormatTag::Unknown => {}
    }
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::fixtures;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn booklet_header() {
        let header = parse_header(fixtures::QUEBEC_BOOKLET, FormatTag::QuebecHealthBooklet);
        assert_eq!(header.patient_name.as_deref(), Some("SHAYAN"));
        assert_eq!(header.collected_at, Some(at(2024, 11, 5, 8, 42)));
        assert_eq!(header.prescriber.as_deref(), Some("DR MARTIN"));
        assert_eq!(header.laboratory.as_deref(), Some("CHU DE QUEBEC"));
        assert_eq!(header.age, None);
    }

    #[test]
    fn traditional_header() {
        let header = parse_header(fixtures::TRADITIONAL_LAB, FormatTag::TraditionalLab);
        assert_eq!(header.patient_name.as_deref(), Some("DUPONT, JEAN"));
        assert_eq!(header.date_of_birth, NaiveDate::from_ymd_opt(1970, 3, 14));
        assert_eq!(header.age, Some(54));
        assert_eq!(header.sex.as_deref(), Some("M"));
        assert_eq!(header.collected_at, Some(at(2024, 11, 5, 8, 42)));
        assert_eq!(header.prescriber.as_deref(), Some("DR MARTIN"));
    }

    #[test]
    fn french_months() {
        assert_eq!(french_month("Février"), Some(2));
        assert_eq!(french_month("aout"), Some(8));
        assert_eq!(french_month("décembre"), Some(12));
        assert_eq!(french_month("december"), None);
    }

    #[test]
    fn premier_of_the_month() {
        assert_eq!(
            booklet_collected_at("1er mars 2024, 7 h 05"),
            Some(at(2024, 3, 1, 7, 5))
        );
    }

    #[test]
    fn impossible_dates_are_dropped() {
        assert_eq!(booklet_collected_at("31 février 2024, 7 h 05"), None);
        assert_eq!(
            traditional_collected_at("PRÉLEVÉ/COLLECTED 2024/13/01 08:00"),
            None
        );
    }

    #[test]
    fn missing_header_is_empty() {
        assert!(parse_header("GB WBC 5.87", FormatTag::TraditionalLab).is_empty());
        assert!(parse_header("", FormatTag::QuebecHealthBooklet).is_empty());
    }
}
