//! Source-language labels and codes, mapped to canonical biomarkers.

use std::sync::LazyLock;

use super::fold::fold_for_matching;
use crate::models::Biomarker;

/// Bilingual codes of the traditional layout (`GB WBC`, `HB HGB`, ...).
/// French and English codes are both listed; either resolves.
const TRADITIONAL_CODES: &[(&str, Biomarker)] = &[
    ("WBC", Biomarker::Wbc),
    ("GB", Biomarker::Wbc),
    ("RBC", Biomarker::Rbc),
    ("GR", Biomarker::Rbc),
    ("HGB", Biomarker::Hgb),
    ("HB", Biomarker::Hgb),
    ("HCT", Biomarker::Hct),
    ("HT", Biomarker::Hct),
    ("MCV", Biomarker::Mcv),
    ("VGM", Biomarker::Mcv),
    ("MCH", Biomarker::Mch),
    ("TGMH", Biomarker::Mch),
    ("MCHC", Biomarker::Mchc),
    ("CCMH", Biomarker::Mchc),
    ("RDW", Biomarker::Rdw),
    ("DVE", Biomarker::Rdw),
    ("PLT", Biomarker::Plt),
    ("PLAT", Biomarker::Plt),
    ("PLAQ", Biomarker::Plt),
    ("MPV", Biomarker::Mpv),
    ("VPM", Biomarker::Mpv),
    ("NLR", Biomarker::Nlr),
    ("RNL", Biomarker::Nlr),
];

/// Differential cell names (folded) with their absolute and relative biomarkers.
const DIFFERENTIAL_CELLS: &[(&str, Biomarker, Biomarker)] = &[
    ("neutrophiles", Biomarker::NeutAbs, Biomarker::NeutPct),
    ("neutrophils", Biomarker::NeutAbs, Biomarker::NeutPct),
    ("lymphocytes", Biomarker::LymphAbs, Biomarker::LymphPct),
    ("monocytes", Biomarker::MonoAbs, Biomarker::MonoPct),
    ("eosinophiles", Biomarker::EosAbs, Biomarker::EosPct),
    ("eosinophils", Biomarker::EosAbs, Biomarker::EosPct),
    ("basophiles", Biomarker::BasoAbs, Biomarker::BasoPct),
    ("basophils", Biomarker::BasoAbs, Biomarker::BasoPct),
];

/// Booklet labels, matched case-sensitively. The upper-case `... %` forms
/// are the differential percentages; the mixed-case names are absolute counts.
const BOOKLET_LABELS: &[(&str, Biomarker)] = &[
    ("Leucocytes", Biomarker::Wbc),
    ("Érythrocytes", Biomarker::Rbc),
    ("Erythrocytes", Biomarker::Rbc),
    ("Hémoglobine", Biomarker::Hgb),
    ("Hemoglobine", Biomarker::Hgb),
    ("Hématocrite", Biomarker::Hct),
    ("Hematocrite", Biomarker::Hct),
    ("Volume globulaire moyen", Biomarker::Mcv),
    ("Volume corpusculaire moyen", Biomarker::Mcv),
    ("Hémoglobine globulaire moyenne", Biomarker::Mch),
    ("Teneur corpusculaire moyenne en hémoglobine", Biomarker::Mch),
    ("Concentration corpusculaire moyenne en hémoglobine", Biomarker::Mchc),
    ("Concentration globulaire moyenne en hémoglobine", Biomarker::Mchc),
    ("Largeur de distribution érythrocytaire", Biomarker::Rdw),
    ("Distribution volumétrique des érythrocytes", Biomarker::Rdw),
    ("Plaquettes", Biomarker::Plt),
    ("Volume plaquettaire moyen", Biomarker::Mpv),
    ("Neutrophiles", Biomarker::NeutAbs),
    ("Lymphocytes", Biomarker::LymphAbs),
    ("Monocytes", Biomarker::MonoAbs),
    ("Éosinophiles", Biomarker::EosAbs),
    ("Eosinophiles", Biomarker::EosAbs),
    ("Basophiles", Biomarker::BasoAbs),
    ("NEUTROPHILES %", Biomarker::NeutPct),
    ("LYMPHOCYTES %", Biomarker::LymphPct),
    ("LYMPHOCY TES %", Biomarker::LymphPct),
    ("MONOCYTES %", Biomarker::MonoPct),
    ("ÉOSINOPHILES %", Biomarker::EosPct),
    ("EOSINOPHILES %", Biomarker::EosPct),
    ("EOSINPHILE %", Biomarker::EosPct),
    ("BASOPHILES %", Biomarker::BasoPct),
];

/// Lines that contain a label but never introduce its result.
const BOOKLET_EXCLUDED: &[&str] = &["Valeur de référence", "glyquée", "glyquee"];

static BOOKLET_LABELS_LONGEST_FIRST: LazyLock<Vec<(&'static str, Biomarker)>> =
    LazyLock::new(|| {
        let mut labels = BOOKLET_LABELS.to_vec();
        labels.sort_by_key(|(label, _)| std::cmp::Reverse(label.len()));
        labels
    });

pub fn traditional_code(code: &str) -> Option<Biomarker> {
    TRADITIONAL_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, b)| *b)
}

/// Resolve a differential line (`Neutrophiles abs.` / `Neutrophiles Rel.`).
pub fn differential_cell(cell: &str, relative: bool) -> Option<Biomarker> {
    let folded = fold_for_matching(cell);
    DIFFERENTIAL_CELLS
        .iter()
        .find(|(name, _, _)| *name == folded)
        .map(|&(_, abs, pct)| if relative { pct } else { abs })
}

/// A booklet label found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelHit {
    pub label: &'static str,
    pub biomarker: Biomarker,
    /// Byte offset just past the label.
    pub end: usize,
}

/// Longest booklet label contained in the line, ignoring exclusions.
pub fn find_booklet_label(line: &str) -> Option<LabelHit> {
    BOOKLET_LABELS_LONGEST_FIRST
        .iter()
        .find_map(|&(label, biomarker)| {
            line.find(label).map(|start| LabelHit {
                label,
                biomarker,
                end: start + label.len(),
            })
        })
}

pub fn is_excluded_booklet_line(line: &str) -> bool {
    BOOKLET_EXCLUDED.iter().any(|e| line.contains(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traditional_codes_resolve_both_languages() {
        assert_eq!(traditional_code("GB"), Some(Biomarker::Wbc));
        assert_eq!(traditional_code("WBC"), Some(Biomarker::Wbc));
        assert_eq!(traditional_code("DVE"), Some(Biomarker::Rdw));
        assert_eq!(traditional_code("PLAQ"), Some(Biomarker::Plt));
        assert_eq!(traditional_code("TGMH"), Some(Biomarker::Mch));
        assert_eq!(traditional_code("gb"), None);
        assert_eq!(traditional_code("NA"), None);
    }

    #[test]
    fn differential_cells_split_abs_and_rel() {
        assert_eq!(differential_cell("Neutrophiles", false), Some(Biomarker::NeutAbs));
        assert_eq!(differential_cell("Neutrophiles", true), Some(Biomarker::NeutPct));
        assert_eq!(differential_cell("Éosinophiles", true), Some(Biomarker::EosPct));
        assert_eq!(differential_cell("LYMPHOCYTES", false), Some(Biomarker::LymphAbs));
        assert_eq!(differential_cell("Myelocytes", false), None);
    }

    #[test]
    fn longest_booklet_label_wins() {
        let hit = find_booklet_label("Hémoglobine globulaire moyenne").unwrap();
        assert_eq!(hit.biomarker, Biomarker::Mch);

        let hit = find_booklet_label("Hémoglobine").unwrap();
        assert_eq!(hit.biomarker, Biomarker::Hgb);
        assert_eq!(hit.end, "Hémoglobine".len());

        let hit = find_booklet_label("NEUTROPHILES %").unwrap();
        assert_eq!(hit.biomarker, Biomarker::NeutPct);
        let hit = find_booklet_label("Neutrophiles").unwrap();
        assert_eq!(hit.biomarker, Biomarker::NeutAbs);
    }

    #[test]
    fn label_offset_points_past_label() {
        let line = "Plaquettes 191 10*9/L";
        let hit = find_booklet_label(line).unwrap();
        assert_eq!(&line[hit.end..], " 191 10*9/L");
    }

    #[test]
    fn booklet_exclusions() {
        assert!(is_excluded_booklet_line("Valeur de référence"));
        assert!(is_excluded_booklet_line("Hémoglobine glyquée"));
        assert!(!is_excluded_booklet_line("Hémoglobine"));
        assert!(find_booklet_label("Créatinine").is_none());
    }
}
