use serde::{Deserialize, Serialize};
use std::fmt;

/// What the desk is being organized for.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Work,
    Art,
    Leisure,
    /// Any other label; classified with the generic rules.
    #[default]
    Custom,
}

impl Intent {
    /// Map a free-form label onto an intent; unknown labels become `Custom`.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "work" => Self::Work,
            "art" => Self::Art,
            "leisure" => Self::Leisure,
            _ => Self::Custom,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Art => "art",
            Self::Leisure => "leisure",
            Self::Custom => "custom",
        }
    }

    /// Classification rules for each zone, one line per zone.
    pub fn rules(&self) -> &'static str {
        match self {
            Self::Work => {
                "Main Work Area: large work-related items\n\
                 Support Area: small frequently-used office supplies\n\
                 Edge Area: everything else"
            }
            Self::Art => {
                "Main Work Area: large art creation tools\n\
                 Support Area: small art supplies and tools\n\
                 Edge Area: everything else"
            }
            Self::Leisure => {
                "Main Work Area: dining and eating items\n\
                 Support Area: entertainment and reading items\n\
                 Edge Area: everything else"
            }
            Self::Custom => {
                "Main Work Area: largest and most important items\n\
                 Support Area: small frequently-used items\n\
                 Edge Area: everything else"
            }
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
