//! Compatibility rule table.
//!
//! Brand → series → accepted breaker families, NEMA plug/receptacle
//! ratings, and EV charger notes. Loaded once and passed by reference into
//! extraction and evaluation.
//!
//! # Usage
//!
//! ```
//! use fitcheck::rules::RuleStore;
//!
//! let rules = RuleStore::builtin();
//! assert!(rules.breaker_families("Square D", "QO").iter().any(|f| f == "QO"));
//! ```

pub mod builtin;
pub mod schema;

use thiserror::Error;

pub use schema::{BrandRules, EvChargerRules, PlugRating, RuleStore, SeriesRules};

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Failed to read rule table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse rule table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid rule table: {0}")]
    Invalid(String),
}
