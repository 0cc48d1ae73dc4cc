//! Panel ↔ Breaker compatibility.

use crate::analyzer::result::CompatibilityResult;
use crate::analyzer::PairRule;
use crate::parser::schema::{ParsedSpecs, Phase, ProductType};
use crate::rules::RuleStore;

pub const PRODUCT_TYPES_REASON: &str = "Product types must be a panel and a breaker.";
pub const PANEL_UNIDENTIFIED_REASON: &str = "Panel brand/series not identified.";
pub const NO_MAPPING_REASON: &str =
    "No breaker family mapping found for this panel series (expand rules).";
pub const OVERLOAD_REASON: &str =
    "Breaker amp rating exceeds panel main rating; verify application.";
pub const SINGLE_PHASE_POLES_REASON: &str =
    "Pole count atypical for single-phase panels (check spec).";
pub const THREE_PHASE_POLES_REASON: &str =
    "Pole count atypical for three-phase panels (check spec).";

/// Check a breaker against a panel's accepted breaker families.
///
/// Arguments must already be sorted (panel first). Amp and pole checks are
/// advisory: they add reasons but never change `compatible`.
pub fn check_panel_breaker(
    panel: &ParsedSpecs,
    breaker: &ParsedSpecs,
    rules: &RuleStore,
) -> CompatibilityResult {
    if panel.product_type != ProductType::Panel || breaker.product_type != ProductType::Breaker {
        return CompatibilityResult::rejected(PRODUCT_TYPES_REASON);
    }

    if panel.brand.is_empty() || panel.series.is_empty() {
        return CompatibilityResult::rejected(PANEL_UNIDENTIFIED_REASON);
    }

    let families = rules.breaker_families(&panel.brand, &panel.series);
    if families.is_empty() {
        tracing::warn!(
            "No breaker families for {} {} in rule table",
            panel.brand,
            panel.series
        );
        return CompatibilityResult::rejected(NO_MAPPING_REASON);
    }

    let mut result = CompatibilityResult::default();

    // Family inference from the breaker's model and series tokens
    let haystack = format!("{} {}", breaker.model, breaker.series).to_lowercase();
    let inferred = families
        .iter()
        .find(|family| haystack.contains(&family.to_lowercase()));

    match inferred {
        Some(family) => {
            tracing::debug!("Breaker matched family {}", family);
            result.compatible = true;
        }
        None => {
            let accepted = families.join(", ");
            result.reason(format!(
                "Breaker does not appear to be from accepted families for {} {}: {}",
                panel.brand, panel.series, accepted
            ));
            result.suggest(format!("Use breaker family: {}", accepted));
        }
    }

    if let (Some(breaker_amps), Some(panel_amps)) = (breaker.known_amps(), panel.known_amps()) {
        if breaker_amps > panel_amps {
            result.reason(OVERLOAD_REASON);
        }
    }

    if let Some(poles) = breaker.known_poles() {
        match panel.phase {
            Phase::Single if !matches!(poles, 1 | 2) => result.reason(SINGLE_PHASE_POLES_REASON),
            Phase::Three if !matches!(poles, 2 | 3) => result.reason(THREE_PHASE_POLES_REASON),
            _ => {}
        }
    }

    result
}

/// Pair rule accepting a panel and a breaker in either order
pub struct PanelBreakerRule;

impl PairRule for PanelBreakerRule {
    fn id(&self) -> &str {
        "panel_breaker"
    }

    fn name(&self) -> &str {
        "Panel ↔ Breaker"
    }

    fn description(&self) -> &str {
        "Breaker family must be accepted by the panel series; flags overload and atypical pole counts"
    }

    fn applies(&self, a: &ParsedSpecs, b: &ParsedSpecs) -> bool {
        matches!(
            (a.product_type, b.product_type),
            (ProductType::Panel, ProductType::Breaker) | (ProductType::Breaker, ProductType::Panel)
        )
    }

    fn check(&self, a: &ParsedSpecs, b: &ParsedSpecs, rules: &RuleStore) -> CompatibilityResult {
        if a.product_type == ProductType::Panel {
            check_panel_breaker(a, b, rules)
        } else {
            check_panel_breaker(b, a, rules)
        }
    }
}
