//! Built-in and External Rule Tables
//!
//! The rule table is loaded from:
//! 1. An external JSON file supplied by the caller (user-editable)
//! 2. The embedded JSON file compiled into the binary (fallback)

use std::path::Path;

use crate::rules::schema::RuleStore;
use crate::rules::RulesError;

// Embed the default table into the binary as a fallback
const EMBEDDED_RULES: &str = include_str!("../../rules/compatibility_rules.json");

impl RuleStore {
    /// The rule table embedded at compile time
    pub fn builtin() -> Self {
        match Self::from_json_str(EMBEDDED_RULES) {
            Ok(store) => {
                log_loaded(&store, "embedded");
                store
            }
            Err(e) => {
                // Only reachable if the embedded file is edited into an invalid state
                tracing::error!("Embedded rule table is invalid: {}", e);
                Self::default()
            }
        }
    }

    /// Load a rule table from a JSON file
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&content)?;
        log_loaded(&store, &path.display().to_string());
        Ok(store)
    }

    /// Load an external file when given, falling back to the embedded table
    pub fn load_or_builtin(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };

        match Self::load(path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(
                    "Failed to load rule table from {:?}: {}; using embedded rules",
                    path,
                    e
                );
                Self::builtin()
            }
        }
    }
}

fn log_loaded(store: &RuleStore, source: &str) {
    tracing::info!(
        "Loaded rule table from {}: {} brands, {} series, {} plug configurations",
        source,
        store.brands.len(),
        store.series_count(),
        store.plug_receptacle.len()
    );
}
