//! Rule Table Schema
//!
//! Data structures for the static compatibility rule table. The table is
//! loaded once, validated, and then only read from.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rules::RulesError;

/// The complete compatibility rule table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleStore {
    /// Brand name -> series table. Key order is the brand detection priority.
    pub brands: IndexMap<String, BrandRules>,

    /// NEMA plug configuration (e.g. "NEMA 14-50") -> rating
    #[serde(default)]
    pub plug_receptacle: IndexMap<String, PlugRating>,

    /// EV charger sizing notes
    #[serde(default)]
    pub ev_charger_rules: EvChargerRules,

    /// Shop category -> URL. Carried for the display layer.
    #[serde(default)]
    pub routes: IndexMap<String, String>,

    /// Advisory text shown with every result
    #[serde(default)]
    pub disclaimer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandRules {
    #[serde(default)]
    pub series: IndexMap<String, SeriesRules>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesRules {
    /// Accepted breaker families, in match priority order
    pub breaker_families: Vec<String>,
}

/// Voltage/amp rating of a plug/receptacle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlugRating {
    pub voltage: String,
    pub amps: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvChargerRules {
    #[serde(default)]
    pub note: String,
}

impl RuleStore {
    /// Parse a rule table from JSON and validate it
    pub fn from_json_str(json: &str) -> Result<Self, RulesError> {
        let store: RuleStore = serde_json::from_str(json)?;
        store.validate()?;
        Ok(store)
    }

    /// Check structural constraints serde cannot express
    pub fn validate(&self) -> Result<(), RulesError> {
        for (brand, rules) in &self.brands {
            if brand.trim().is_empty() {
                return Err(RulesError::Invalid("empty brand name".to_string()));
            }
            for (series, series_rules) in &rules.series {
                if series_rules.breaker_families.is_empty() {
                    return Err(RulesError::Invalid(format!(
                        "{} {} has no breaker families",
                        brand, series
                    )));
                }
            }
        }

        for config in self.plug_receptacle.keys() {
            if !is_plug_config(config) {
                return Err(RulesError::Invalid(format!(
                    "plug configuration {:?} is not of the form \"NEMA d-dd\"",
                    config
                )));
            }
        }

        Ok(())
    }

    /// Brand names in detection priority order
    pub fn brand_names(&self) -> impl Iterator<Item = &str> {
        self.brands.keys().map(String::as_str)
    }

    /// Accepted breaker families for a panel series; empty when the table has no entry
    pub fn breaker_families(&self, brand: &str, series: &str) -> &[String] {
        self.brands
            .get(brand)
            .and_then(|b| b.series.get(series))
            .map(|s| s.breaker_families.as_slice())
            .unwrap_or(&[])
    }

    pub fn plug_rating(&self, config: &str) -> Option<&PlugRating> {
        self.plug_receptacle.get(config)
    }

    pub fn ev_note(&self) -> &str {
        &self.ev_charger_rules.note
    }

    /// Number of (brand, series) entries
    pub fn series_count(&self) -> usize {
        self.brands.values().map(|b| b.series.len()).sum()
    }
}

/// "NEMA " followed by 1-2 digits, a hyphen, and 2 digits
fn is_plug_config(config: &str) -> bool {
    let Some(rest) = config.strip_prefix("NEMA ") else {
        return false;
    };
    let Some((left, right)) = rest.split_once('-') else {
        return false;
    };
    (1..=2).contains(&left.len())
        && right.len() == 2
        && left.chars().chain(right.chars()).all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "brands": {
            "Zeta": { "series": { "Z1": { "breaker_families": ["ZB"] } } },
            "Alpha": { "series": { "A1": { "breaker_families": ["AB", "ABX"] } } }
        },
        "plug_receptacle": { "NEMA 5-15": { "voltage": "125V", "amps": 15 } }
    }"#;

    #[test]
    fn test_brand_order_is_file_order() {
        let store = RuleStore::from_json_str(SMALL).unwrap();
        let brands: Vec<&str> = store.brand_names().collect();
        assert_eq!(brands, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_missing_series_is_empty() {
        let store = RuleStore::from_json_str(SMALL).unwrap();
        assert_eq!(store.breaker_families("Alpha", "A1"), ["AB", "ABX"]);
        assert!(store.breaker_families("Alpha", "A2").is_empty());
        assert!(store.breaker_families("Nobody", "A1").is_empty());
    }

    #[test]
    fn test_optional_sections_default() {
        let store = RuleStore::from_json_str(SMALL).unwrap();
        assert_eq!(store.ev_note(), "");
        assert!(store.routes.is_empty());
        assert_eq!(store.disclaimer, "");
    }

    #[test]
    fn test_rejects_empty_family_list() {
        let json = r#"{ "brands": { "Alpha": { "series": { "A1": { "breaker_families": [] } } } } }"#;
        let err = RuleStore::from_json_str(json).unwrap_err();
        assert!(matches!(err, RulesError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_plug_key() {
        let json = r#"{ "brands": {}, "plug_receptacle": { "14-50": { "voltage": "250V", "amps": 50 } } }"#;
        assert!(RuleStore::from_json_str(json).is_err());
    }

    #[test]
    fn test_plug_config_shape() {
        assert!(is_plug_config("NEMA 5-15"));
        assert!(is_plug_config("NEMA 14-50"));
        assert!(!is_plug_config("NEMA 114-50"));
        assert!(!is_plug_config("NEMA L14-30"));
        assert!(!is_plug_config("NEMA 5-5"));
    }
}
