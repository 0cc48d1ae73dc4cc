//! Plug ↔ Receptacle compatibility.

use crate::analyzer::result::CompatibilityResult;
use crate::analyzer::PairRule;
use crate::parser::schema::{ParsedSpecs, ProductType};
use crate::rules::RuleStore;

pub const SAME_TYPE_REASON: &str =
    "You provided two of the same type. Provide a plug and a receptacle.";
pub const PRODUCT_TYPES_REASON: &str = "Product types must be a plug and a receptacle.";
pub const NO_CONFIG_REASON: &str = "Unable to detect a NEMA configuration like 'NEMA 14-50'.";
pub const UNKNOWN_CONFIG_REASON: &str =
    "NEMA configuration not recognized in rule set (expand rules).";

/// Check a plug/receptacle pair by its NEMA configuration.
///
/// Only one configuration is consulted: A's if present, otherwise B's. When
/// both sides carry a configuration they are not compared with each other.
pub fn check_plug_receptacle(
    a: &ParsedSpecs,
    b: &ParsedSpecs,
    rules: &RuleStore,
) -> CompatibilityResult {
    if a.product_type == b.product_type {
        return CompatibilityResult::rejected(SAME_TYPE_REASON);
    }

    if !is_plug_and_receptacle(a.product_type, b.product_type) {
        return CompatibilityResult::rejected(PRODUCT_TYPES_REASON);
    }

    let config = if a.plug_config.is_empty() {
        &b.plug_config
    } else {
        &a.plug_config
    };
    if config.is_empty() {
        return CompatibilityResult::rejected(NO_CONFIG_REASON);
    }

    match rules.plug_rating(config) {
        Some(rating) => {
            let mut result = CompatibilityResult {
                compatible: true,
                ..Default::default()
            };
            result.suggest(format!(
                "Both should be {}. Verify voltage/amp rating: {} / {}A.",
                config, rating.voltage, rating.amps
            ));
            result
        }
        None => {
            tracing::warn!("Plug configuration {} not in rule table", config);
            CompatibilityResult::rejected(UNKNOWN_CONFIG_REASON)
        }
    }
}

fn is_plug_and_receptacle(a: ProductType, b: ProductType) -> bool {
    matches!(
        (a, b),
        (ProductType::Plug, ProductType::Receptacle) | (ProductType::Receptacle, ProductType::Plug)
    )
}

pub struct PlugReceptacleRule;

impl PairRule for PlugReceptacleRule {
    fn id(&self) -> &str {
        "plug_receptacle"
    }

    fn name(&self) -> &str {
        "Plug ↔ Receptacle"
    }

    fn description(&self) -> &str {
        "NEMA configuration must be known to the rule table; quotes its voltage/amp rating"
    }

    fn applies(&self, a: &ParsedSpecs, b: &ParsedSpecs) -> bool {
        is_plug_and_receptacle(a.product_type, b.product_type)
    }

    fn check(&self, a: &ParsedSpecs, b: &ParsedSpecs, rules: &RuleStore) -> CompatibilityResult {
        check_plug_receptacle(a, b, rules)
    }
}
