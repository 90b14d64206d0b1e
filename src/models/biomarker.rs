use super::enums::str_enum;

str_enum!(
    /// Canonical CBC biomarker codes. Every source-language label maps to one of these.
    Biomarker {
        Wbc => "WBC",
        Rbc => "RBC",
        Hgb => "HGB",
        Hct => "HCT",
        Mcv => "MCV",
        Mch => "MCH",
        Mchc => "MCHC",
        Rdw => "RDW",
        Plt => "PLT",
        Mpv => "MPV",
        NeutAbs => "NEUT_ABS",
        LymphAbs => "LYMPH_ABS",
        MonoAbs => "MONO_ABS",
        EosAbs => "EOS_ABS",
        BasoAbs => "BASO_ABS",
        NeutPct => "NEUT_PCT",
        LymphPct => "LYMPH_PCT",
        MonoPct => "MONO_PCT",
        EosPct => "EOS_PCT",
        BasoPct => "BASO_PCT",
        Nlr => "NLR",
    }
);

/// The classifier's input columns, in column order.
pub const REQUIRED_FEATURES: [Biomarker; 7] = [
    Biomarker::Wbc,
    Biomarker::Nlr,
    Biomarker::Hgb,
    Biomarker::Mcv,
    Biomarker::Plt,
    Biomarker::Rdw,
    Biomarker::MonoAbs,
];

/// Canonical units. Lab reports are expected to already use these;
/// a unit token is only ever compared against them, never converted.
pub mod units {
    pub const PER_NANOLITRE: &str = "10^9/L";
    pub const PER_PICOLITRE: &str = "10^12/L";
    pub const GRAMS_PER_LITRE: &str = "g/L";
    pub const LITRE_PER_LITRE: &str = "L/L";
    pub const FEMTOLITRE: &str = "fL";
    pub const PICOGRAM: &str = "pg";
    pub const PERCENT: &str = "%";
    pub const RATIO: &str = "ratio";
}

impl Biomarker {
    pub fn canonical_unit(&self) -> &'static str {
        match self {
            Self::Wbc
            | Self::Plt
            | Self::NeutAbs
            | Self::LymphAbs
            | Self::MonoAbs
            | Self::EosAbs
            | Self::BasoAbs => units::PER_NANOLITRE,
            Self::Rbc => units::PER_PICOLITRE,
            Self::Hgb | Self::Mchc => units::GRAMS_PER_LITRE,
            Self::Hct => units::LITRE_PER_LITRE,
            Self::Mcv | Self::Mpv => units::FEMTOLITRE,
            Self::Mch => units::PICOGRAM,
            Self::Rdw
            | Self::NeutPct
            | Self::LymphPct
            | Self::MonoPct
            | Self::EosPct
            | Self::BasoPct => units::PERCENT,
            Self::Nlr => units::RATIO,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Wbc => "White Blood Cells",
            Self::Rbc => "Red Blood Cells",
            Self::Hgb => "Hemoglobin",
            Self::Hct => "Hematocrit",
            Self::Mcv => "Mean Corpuscular Volume",
            Self::Mch => "Mean Corpuscular Hemoglobin",
            Self::Mchc => "Mean Corpuscular Hemoglobin Concentration",
            Self::Rdw => "Red Cell Distribution Width",
            Self::Plt => "Platelets",
            Self::Mpv => "Mean Platelet Volume",
            Self::NeutAbs => "Neutrophils Absolute",
            Self::LymphAbs => "Lymphocytes Absolute",
            Self::MonoAbs => "Monocytes Absolute",
            Self::EosAbs => "Eosinophils Absolute",
            Self::BasoAbs => "Basophils Absolute",
            Self::NeutPct => "Neutrophils Percentage",
            Self::LymphPct => "Lymphocytes Percentage",
            Self::MonoPct => "Monocytes Percentage",
            Self::EosPct => "Eosinophils Percentage",
            Self::BasoPct => "Basophils Percentage",
            Self::Nlr => "Neutrophil to Lymphocyte Ratio",
        }
    }

    pub fn is_required(&self) -> bool {
        REQUIRED_FEATURES.contains(self)
    }

    /// Resolve a manual-entry field key: the canonical code or one of the
    /// common French/English aliases, case-insensitive.
    pub fn from_alias(key: &str) -> Option<Self> {
        let upper = key.trim().to_uppercase();
        if let Some(b) = Self::ALL.iter().find(|b| b.as_str() == upper) {
            return Some(*b);
        }
        let b = match upper.as_str() {
            "GB" | "WHITE_BLOOD_CELLS" | "LEUCOCYTES" => Self::Wbc,
            "GR" | "RED_BLOOD_CELLS" | "ÉRYTHROCYTES" | "ERYTHROCYTES" => Self::Rbc,
            "HB" | "HEMOGLOBIN" | "HÉMOGLOBINE" | "HEMOGLOBINE" => Self::Hgb,
            "HT" | "HEMATOCRIT" | "HÉMATOCRITE" | "HEMATOCRITE" => Self::Hct,
            "VGM" => Self::Mcv,
            "TGMH" => Self::Mch,
            "CCMH" => Self::Mchc,
            "DVE" => Self::Rdw,
            "PLAQ" | "PLAT" | "PLATELETS" | "PLAQUETTES" => Self::Plt,
            "VPM" => Self::Mpv,
            "MONO" | "MONOCYTES" => Self::MonoAbs,
            "NEUTROPHIL_LYMPHOCYTE_RATIO" | "RNL" => Self::Nlr,
            _ => return None,
        };
        Some(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn twenty_one_canonical_codes() {
        assert_eq!(Biomarker::ALL.len(), 21);
        for b in Biomarker::ALL {
            assert_eq!(Biomarker::from_str(b.as_str()).unwrap(), *b);
        }
    }

    #[test]
    fn serde_uses_canonical_code() {
        let json = serde_json::to_string(&Biomarker::MonoAbs).unwrap();
        assert_eq!(json, "\"MONO_ABS\"");
        let back: Biomarker = serde_json::from_str("\"NEUT_PCT\"").unwrap();
        assert_eq!(back, Biomarker::NeutPct);
    }

    #[test]
    fn required_features_in_column_order() {
        let codes: Vec<&str> = REQUIRED_FEATURES.iter().map(|b| b.as_str()).collect();
        assert_eq!(codes, ["WBC", "NLR", "HGB", "MCV", "PLT", "RDW", "MONO_ABS"]);
        assert!(Biomarker::Rdw.is_required());
        assert!(!Biomarker::NeutPct.is_required());
    }

    #[test]
    fn canonical_units() {
        assert_eq!(Biomarker::Hgb.canonical_unit(), "g/L");
        assert_eq!(Biomarker::Wbc.canonical_unit(), "10^9/L");
        assert_eq!(Biomarker::MonoAbs.canonical_unit(), "10^9/L");
        assert_eq!(Biomarker::Rbc.canonical_unit(), "10^12/L");
        assert_eq!(Biomarker::LymphPct.canonical_unit(), "%");
        assert_eq!(Biomarker::Nlr.canonical_unit(), "ratio");
    }

    #[test]
    fn aliases_resolve_case_insensitively() {
        assert_eq!(Biomarker::from_alias("wbc"), Some(Biomarker::Wbc));
        assert_eq!(Biomarker::from_alias("GB"), Some(Biomarker::Wbc));
        assert_eq!(Biomarker::from_alias("Hemoglobin"), Some(Biomarker::Hgb));
        assert_eq!(Biomarker::from_alias("plaq"), Some(Biomarker::Plt));
        assert_eq!(Biomarker::from_alias("DVE"), Some(Biomarker::Rdw));
        assert_eq!(Biomarker::from_alias("mono"), Some(Biomarker::MonoAbs));
        assert_eq!(Biomarker::from_alias(" mono_abs "), Some(Biomarker::MonoAbs));
        assert_eq!(Biomarker::from_alias("glucose"), None);
    }
}
