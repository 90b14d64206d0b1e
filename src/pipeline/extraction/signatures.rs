//! Lab-report layout detection.
//!
//! The signature table is an ordered list of tiers. Each tier names a layout
//! and a list of predicates over the folded report text; the tier matches
//! when any of its predicates holds. A layout may appear in several tiers,
//! so strong evidence for one layout can outrank weak evidence for another.
//! The first matching tier wins.

use serde::{Deserialize, Serialize};

use super::fold::fold_for_matching;
use crate::models::FormatTag;
use crate::reference::ReferenceError;

/// All `all_of` needles must appear and, if `any_of` is non-empty, at least
/// one of its needles too. An empty predicate never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignaturePredicate {
    #[serde(default)]
    pub all_of: Vec<String>,
    #[serde(default)]
    pub any_of: Vec<String>,
}

impl SignaturePredicate {
    pub fn new(all_of: &[&str], any_of: &[&str]) -> Self {
        Self {
            all_of: all_of.iter().map(|s| fold_for_matching(s)).collect(),
            any_of: any_of.iter().map(|s| fold_for_matching(s)).collect(),
        }
    }

    pub fn matches(&self, folded_text: &str) -> bool {
        if self.all_of.is_empty() && self.any_of.is_empty() {
            return false;
        }
        self.all_of.iter().all(|n| folded_text.contains(n.as_str()))
            && (self.any_of.is_empty()
                || self.any_of.iter().any(|n| folded_text.contains(n.as_str())))
    }

    fn folded(self) -> Self {
        Self {
            all_of: self.all_of.iter().map(|s| fold_for_matching(s)).collect(),
            any_of: self.any_of.iter().map(|s| fold_for_matching(s)).collect(),
        }
    }

    fn has_blank_needle(&self) -> bool {
        self.all_of.iter().chain(&self.any_of).any(|n| n.is_empty())
    }

    fn is_empty(&self) -> bool {
        self.all_of.is_empty() && self.any_of.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatSignature {
    pub tag: FormatTag,
    pub predicates: Vec<SignaturePredicate>,
}

impl FormatSignature {
    pub fn matches(&self, folded_text: &str) -> bool {
        self.predicates.iter().any(|p| p.matches(folded_text))
    }
}

/// Signature tiers in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FormatSignature>", into = "Vec<FormatSignature>")]
pub struct FormatSignatures {
    entries: Vec<FormatSignature>,
}

impl FormatSignatures {
    /// Validate and fold a signature table. Only extractable layouts may
    /// appear, every tier needs at least one predicate, every predicate at
    /// least one needle, and needles must fold to non-empty text.
    pub fn new(entries: Vec<FormatSignature>) -> Result<Self, ReferenceError> {
        let mut folded = Vec::with_capacity(entries.len());
        for entry in entries {
            if !entry.tag.is_extractable() {
                return Err(ReferenceError::Invalid(format!(
                    "signature declared for non-extractable layout {}",
                    entry.tag
                )));
            }
            let predicates: Vec<SignaturePredicate> =
                entry.predicates.into_iter().map(SignaturePredicate::folded).collect();
            if predicates.is_empty() || predicates.iter().any(SignaturePredicate::is_empty) {
                return Err(ReferenceError::Invalid(format!(
                    "layout {} has a signature tier without needles",
                    entry.tag
                )));
            }
            if predicates.iter().any(SignaturePredicate::has_blank_needle) {
                return Err(ReferenceError::Invalid(format!(
                    "layout {} has a blank signature needle",
                    entry.tag
                )));
            }
            folded.push(FormatSignature {
                tag: entry.tag,
                predicates,
            });
        }
        Ok(Self { entries: folded })
    }

    pub fn entries(&self) -> &[FormatSignature] {
        &self.entries
    }

    /// Every layout with a matching tier, each once, ordered by its first
    /// matching tier.
    pub fn matching(&self, raw_text: &str) -> Vec<FormatTag> {
        let folded = fold_for_matching(raw_text);
        let mut tags = Vec::new();
        for entry in &self.entries {
            if !tags.contains(&entry.tag) && entry.matches(&folded) {
                tags.push(entry.tag);
            }
        }
        tags
    }
}

impl TryFrom<Vec<FormatSignature>> for FormatSignatures {
    type Error = ReferenceError;

    fn try_from(entries: Vec<FormatSignature>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<FormatSignatures> for Vec<FormatSignature> {
    fn from(signatures: FormatSignatures) -> Self {
        signatures.entries
    }
}

impl Default for FormatSignatures {
    /// A booklet banner with a hematology heading beats everything. Strong
    /// traditional evidence beats a bare booklet banner, since reports
    /// downloaded from the booklet portal carry that banner too.
    fn default() -> Self {
        let hematology_terms = ["hemogramme", "hematologie", "hematology"];
        let booklet = FormatSignature {
            tag: FormatTag::QuebecHealthBooklet,
            predicates: vec![
                SignaturePredicate::new(&["carnet sante"], &hematology_terms),
                SignaturePredicate::new(&["carnetsante"], &hematology_terms),
            ],
        };
        let traditional = FormatSignature {
            tag: FormatTag::TraditionalLab,
            predicates: vec![
                SignaturePredicate::new(
                    &["patient externe"],
                    &["hematologie", "hematology", "h e m a t o l o g"],
                ),
                SignaturePredicate::new(&["gb wbc"], &[]),
                SignaturePredicate::new(&["hb hgb"], &[]),
                SignaturePredicate::new(&["fsc / cbc"], &[]),
                SignaturePredicate::new(&["fsc/cbc"], &[]),
            ],
        };
        let bare_booklet = FormatSignature {
            tag: FormatTag::QuebecHealthBooklet,
            predicates: vec![SignaturePredicate::new(&["carnet sante"], &[])],
        };
        Self {
            entries: vec![booklet, traditional, bare_booklet],
        }
    }
}

/// Classify raw report text into a layout tag.
///
/// Never fails: text matching no signature (including empty text) is
/// `Unknown`. Never returns `ManualEntry`.
pub fn detect_format(raw_text: &str, signatures: &FormatSignatures) -> FormatTag {
    let matches = signatures.matching(raw_text);
    let tag = matches.first().copied().unwrap_or(FormatTag::Unknown);
    if matches.len() > 1 {
        tracing::debug!(
            candidates = ?matches,
            chosen = %tag,
            "Several report layouts matched, using highest tier"
        );
    }
    tracing::debug!(format = %tag, "Report layout detected");
    tag
}
