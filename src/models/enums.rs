use serde::Serialize;

use super::patient::InputError;

/// Macro to generate enum with as_str + Display; serialized as the same tag
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(
                #[serde(rename = $s)]
                $variant
            ),+
        }

        impl $name {
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
    };
}

/// Macro to generate a numeric code table: code <-> variant <-> display label.
///
/// Codes arrive as JSON numbers or numeric strings; only integral values
/// listed in the table are accepted.
macro_rules! code_enum {
    ($name:ident, $field:literal { $($variant:ident => ($code:literal, $label:literal)),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Numeric code as fed to the classifier.
            pub fn code(&self) -> u8 {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            pub fn from_code(value: f64) -> Result<Self, InputError> {
                $(
                    if value == f64::from($code as u8) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(InputError::InvalidCode {
                    field: $field,
                    value: crate::models::patient::format_measurement(value),
                })
            }
        }
    };
}

str_enum!(RiskSeverity {
    Moderate => "moderate",
    High => "high",
    Elevated => "elevated",
});

str_enum!(Priority {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(RiskClass {
    Low => "low",
    High => "high",
});

code_enum!(Gender, "gender" {
    Female => (0, "Female"),
    Male => (1, "Male"),
    Other => (2, "Other"),
});

code_enum!(SmokingHistory, "smoking_history" {
    NoInfo => (0, "No Info"),
    Current => (1, "Current"),
    Ever => (2, "Ever"),
    Former => (3, "Former"),
    Never => (4, "Never"),
    NotCurrent => (5, "Not Current"),
});

impl SmokingHistory {
    /// Current or Ever count as a smoking risk.
    pub fn is_risk(&self) -> bool {
        matches!(self, Self::Current | Self::Ever)
    }
}

/// Yes/no clinical flag, encoded `0` (absent) / `1` (present).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Absent,
    Present,
}

impl Flag {
    pub fn code(&self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
        }
    }

    pub fn is_present(&self) -> bool {
        *self == Self::Present
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Absent => "Absent",
            Self::Present => "Present",
        }
    }

    pub fn from_code(field: &'static str, value: f64) -> Result<Self, InputError> {
        if value == 0.0 {
            Ok(Self::Absent)
        } else if value == 1.0 {
            Ok(Self::Present)
        } else {
            Err(InputError::InvalidCode {
                field,
                value: crate::models::patient::format_measurement(value),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoking_code_table() {
        let labels: Vec<&str> = (0..6)
            .map(|c| SmokingHistory::from_code(f64::from(c)).unwrap().label())
            .collect();
        assert_eq!(
            labels,
            vec!["No Info", "Current", "Ever", "Former", "Never", "Not Current"]
        );
    }

    #[test]
    fn only_current_and_ever_are_smoking_risks() {
        let risky: Vec<u8> = (0..6)
            .map(|c| SmokingHistory::from_code(f64::from(c)).unwrap())
            .filter(|s| s.is_risk())
            .map(|s| s.code())
            .collect();
        assert_eq!(risky, vec![1, 2]);
    }

    #[test]
    fn non_integral_code_rejected() {
        let err = SmokingHistory::from_code(1.5).unwrap_err();
        assert_eq!(
            err,
            InputError::InvalidCode {
                field: "smoking_history",
                value: "1.5".into()
            }
        );
    }

    #[test]
    fn unknown_gender_code_rejected() {
        assert!(Gender::from_code(3.0).is_err());
        assert_eq!(Gender::from_code(1.0).unwrap(), Gender::Male);
    }

    #[test]
    fn flag_accepts_only_zero_and_one() {
        assert_eq!(Flag::from_code("hypertension", 0.0).unwrap(), Flag::Absent);
        assert!(Flag::from_code("hypertension", 1.0).unwrap().is_present());
        assert!(Flag::from_code("hypertension", 2.0).is_err());
    }

    #[test]
    fn str_enums_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&RiskSeverity::Elevated).unwrap(), "\"elevated\"");
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"medium\"");
        assert_eq!(RiskClass::High.to_string(), "high");
    }
}
