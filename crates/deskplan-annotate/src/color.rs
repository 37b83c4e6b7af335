use deskplan_core::Rgb;
use deskplan_zones::ZoneKind;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected `#RRGGBB`, got {0:?}")]
    Format(String),
}

/// Parse `#RRGGBB` (leading `#` optional).
pub fn parse_hex_color(s: &str) -> Result<Rgb, ColorParseError> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(ColorParseError::Format(s.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorParseError::Format(s.to_string()))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

fn to_hex(c: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", c[0], c[1], c[2])
}

mod hex {
    use super::*;

    pub fn serialize<S: Serializer>(c: &Rgb, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&to_hex(*c))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Rgb, D::Error> {
        let raw = String::deserialize(d)?;
        parse_hex_color(&raw).map_err(serde::de::Error::custom)
    }
}

/// Arrow color per destination zone, serialized as `#RRGGBB` strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneColors {
    #[serde(with = "hex")]
    pub main_work_area: Rgb,
    #[serde(with = "hex")]
    pub support_area: Rgb,
    #[serde(with = "hex")]
    pub edge_area: Rgb,
}

impl Default for ZoneColors {
    /// Yellow main, orange `#FF5900` support, pink `#FF0055` edge.
    fn default() -> Self {
        Self {
            main_work_area: [255, 200, 0],
            support_area: [255, 89, 0],
            edge_area: [255, 0, 85],
        }
    }
}

impl ZoneColors {
    pub fn color(&self, kind: ZoneKind) -> Rgb {
        match kind {
            ZoneKind::MainWorkArea => self.main_work_area,
            ZoneKind::SupportArea => self.support_area,
            ZoneKind::EdgeArea => self.edge_area,
        }
    }
}
