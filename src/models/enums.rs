use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + Display + std::str::FromStr pattern.
/// Serialized form is the display label.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
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

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(LabStatus {
    Normal => "Normal",
    Low => "Low",
    High => "High",
    CritLow => "Crit Low",
    CritHigh => "Crit High",
});

str_enum!(RiskLevel {
    Low => "Overall Low Risk",
    Moderate => "Moderate Risk – Review",
    High => "High Risk – See Doctor",
});

str_enum!(ExtractionMethod {
    Spatial => "spatial",
    TextFallback => "text_fallback",
});

impl LabStatus {
    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::CritLow | Self::CritHigh)
    }

    /// Low or High: outside the reference range but within the critical band.
    pub fn is_mild(&self) -> bool {
        matches!(self, Self::Low | Self::High)
    }
}
