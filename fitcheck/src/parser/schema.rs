//! Structured product specifications extracted from free-form text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of characters of the original input kept for audit
pub const RAW_EXCERPT_LIMIT: usize = 800;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Panel,
    Breaker,
    Receptacle,
    Plug,
    Evse,
    #[default]
    Unknown,
}

impl ProductType {
    pub const ALL: [ProductType; 6] = [
        ProductType::Unknown,
        ProductType::Panel,
        ProductType::Breaker,
        ProductType::Receptacle,
        ProductType::Plug,
        ProductType::Evse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Panel => "panel",
            ProductType::Breaker => "breaker",
            ProductType::Receptacle => "receptacle",
            ProductType::Plug => "plug",
            ProductType::Evse => "evse",
            ProductType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        ProductType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown product type {:?}", s))
    }
}

/// Supply phase. Serialized with the Ø symbol used on nameplates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    #[serde(rename = "")]
    Unknown,
    #[serde(rename = "1Ø")]
    Single,
    #[serde(rename = "3Ø")]
    Three,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Unknown => "",
            Phase::Single => "1Ø",
            Phase::Three => "3Ø",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    /// Lenient parse for user edits: "1", "1P", "1Ø", "single", "3", "3 phase", ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s.is_empty() {
            return Ok(Phase::Unknown);
        }
        if s.starts_with('1') || s.starts_with("single") {
            return Ok(Phase::Single);
        }
        if s.starts_with('3') || s.starts_with("three") {
            return Ok(Phase::Three);
        }
        Err(format!("unknown phase {:?}", s))
    }
}

/// NEMA enclosure ratings in ascending order of protection.
///
/// Each rating is treated as a superset of the protection of every rating
/// before it, so `Ord` is the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnclosureRating {
    #[serde(rename = "1")]
    Nema1,
    #[serde(rename = "3R")]
    Nema3R,
    #[serde(rename = "4")]
    Nema4,
    #[serde(rename = "4X")]
    Nema4X,
}

impl EnclosureRating {
    pub const HIERARCHY: [EnclosureRating; 4] = [
        EnclosureRating::Nema1,
        EnclosureRating::Nema3R,
        EnclosureRating::Nema4,
        EnclosureRating::Nema4X,
    ];

    /// Parse one of "1", "3R", "4", "4X" (case-insensitive); anything else is unknown
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::HIERARCHY
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnclosureRating::Nema1 => "1",
            EnclosureRating::Nema3R => "3R",
            EnclosureRating::Nema4 => "4",
            EnclosureRating::Nema4X => "4X",
        }
    }
}

impl fmt::Display for EnclosureRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Specifications extracted from one product's text.
///
/// Every field defaults to "not detected". Records are independent: two of
/// them only meet inside an evaluator call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSpecs {
    pub product_type: ProductType,
    pub brand: String,
    pub series: String,
    /// Best-effort model token; may be noise
    pub model: String,
    /// e.g. "240V"; not numerically validated
    pub voltage: String,
    pub phase: Phase,
    pub amps: Option<u32>,
    pub poles: Option<u8>,
    /// "1", "3R", "4", "4X", or whatever an edit put there
    pub nema_enclosure: String,
    /// e.g. "NEMA 14-50"
    pub plug_config: String,
    /// First characters of the original input, for display only
    pub raw_excerpt: String,
}

impl ParsedSpecs {
    /// The enclosure rating, if it is one of the recognized ones
    pub fn enclosure_rating(&self) -> Option<EnclosureRating> {
        EnclosureRating::parse(&self.nema_enclosure)
    }

    /// Amps, treating 0 as not detected
    pub fn known_amps(&self) -> Option<u32> {
        self.amps.filter(|&a| a > 0)
    }

    /// Poles, treating 0 as not detected
    pub fn known_poles(&self) -> Option<u8> {
        self.poles.filter(|&p| p > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosure_hierarchy_order() {
        assert!(EnclosureRating::Nema1 < EnclosureRating::Nema3R);
        assert!(EnclosureRating::Nema3R < EnclosureRating::Nema4);
        assert!(EnclosureRating::Nema4 < EnclosureRating::Nema4X);
    }

    #[test]
    fn test_enclosure_parse() {
        assert_eq!(EnclosureRating::parse("3r"), Some(EnclosureRating::Nema3R));
        assert_eq!(EnclosureRating::parse("4X"), Some(EnclosureRating::Nema4X));
        assert_eq!(EnclosureRating::parse("12"), None);
        assert_eq!(EnclosureRating::parse(""), None);
    }

    #[test]
    fn test_phase_serializes_with_symbol() {
        assert_eq!(serde_json::to_string(&Phase::Single).unwrap(), "\"1Ø\"");
        assert_eq!(serde_json::to_string(&Phase::Unknown).unwrap(), "\"\"");
        let three: Phase = serde_json::from_str("\"3Ø\"").unwrap();
        assert_eq!(three, Phase::Three);
    }

    #[test]
    fn test_phase_lenient_parse() {
        assert_eq!("1P".parse::<Phase>().unwrap(), Phase::Single);
        assert_eq!("three phase".parse::<Phase>().unwrap(), Phase::Three);
        assert_eq!("".parse::<Phase>().unwrap(), Phase::Unknown);
        assert!("2".parse::<Phase>().is_err());
    }

    #[test]
    fn test_product_type_round_trip_names() {
        for t in ProductType::ALL {
            assert_eq!(t.as_str().parse::<ProductType>().unwrap(), t);
        }
        assert_eq!(ProductType::default(), ProductType::Unknown);
        assert!("toaster".parse::<ProductType>().is_err());
    }

    #[test]
    fn test_zero_counts_as_unknown() {
        let specs = ParsedSpecs {
            amps: Some(0),
            poles: Some(2),
            ..Default::default()
        };
        assert_eq!(specs.known_amps(), None);
        assert_eq!(specs.known_poles(), Some(2));
    }
}
