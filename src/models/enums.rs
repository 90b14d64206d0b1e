/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde uses the same SCREAMING_SNAKE_CASE spelling as `as_str`.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err($crate::models::ParseEnumError {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

pub(crate) use str_enum;

str_enum!(
    /// Which lab-report layout a record came from.
    FormatTag {
        TraditionalLab => "TRADITIONAL_LAB",
        QuebecHealthBooklet => "QUEBEC_HEALTH_BOOKLET",
        ManualEntry => "MANUAL_ENTRY",
        Unknown => "UNKNOWN",
    }
);

impl FormatTag {
    /// Layouts `extract` knows how to read.
    pub fn is_extractable(&self) -> bool {
        matches!(self, Self::TraditionalLab | Self::QuebecHealthBooklet)
    }
}

str_enum!(AbnormalFlag {
    Normal => "NORMAL",
    Low => "LOW",
    High => "HIGH",
});

impl AbnormalFlag {
    /// Map a report flag token (`L`, `H`, `Bas`, `Élevé`) to a flag.
    pub fn from_report_token(token: &str) -> Option<Self> {
        match token {
            "L" | "Bas" | "BAS" | "Low" | "LOW" => Some(Self::Low),
            "H" | "Élevé" | "ÉLEVÉ" | "Elevé" | "Eleve" | "High" | "HIGH" => Some(Self::High),
            _ => None,
        }
    }
}

impl Default for AbnormalFlag {
    fn default() -> Self {
        Self::Normal
    }
}

str_enum!(RiskLevel {
    VeryLow => "VERY_LOW",
    Low => "LOW",
    Moderate => "MODERATE",
    High => "HIGH",
    VeryHigh => "VERY_HIGH",
});

impl RiskLevel {
    /// Band a cancer probability in [0, 1].
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.10 {
            Self::VeryLow
        } else if probability < 0.30 {
            Self::Low
        } else if probability < 0.60 {
            Self::Moderate
        } else if probability < 0.80 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low Risk",
            Self::Low => "Low Risk",
            Self::Moderate => "Moderate Risk",
            Self::High => "High Risk",
            Self::VeryHigh => "Very High Risk",
        }
    }
}
