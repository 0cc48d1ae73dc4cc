//! Enclosure rating vs. required environment.

use crate::analyzer::result::CompatibilityResult;
use crate::parser::schema::{EnclosureRating, ParsedSpecs};

pub const NO_RATING_REASON: &str = "Product does not specify a NEMA enclosure rating.";
pub const UNKNOWN_RATING_REASON: &str = "Unknown NEMA rating in provided data.";
pub const UPGRADE_SUGGESTION: &str =
    "Select an enclosure rated 3R/4/4X for outdoor/corrosive environments.";

/// Compatible when the product's rating is at or above `required` in the
/// 1 < 3R < 4 < 4X hierarchy.
pub fn check_enclosure(spec: &ParsedSpecs, required: &str) -> CompatibilityResult {
    if spec.nema_enclosure.is_empty() {
        return CompatibilityResult::rejected(NO_RATING_REASON);
    }

    let (Some(actual), Some(needed)) = (spec.enclosure_rating(), EnclosureRating::parse(required))
    else {
        return CompatibilityResult::rejected(UNKNOWN_RATING_REASON);
    };

    let mut result = CompatibilityResult::default();
    if actual >= needed {
        result.compatible = true;
    } else {
        result.reason(format!("NEMA {} is below required {}.", actual, needed));
        result.suggest(UPGRADE_SUGGESTION);
    }

    tracing::debug!(
        "Enclosure NEMA {} vs required {}: compatible={}",
        actual,
        needed,
        result.compatible
    );
    result
}
