//! Compatibility evaluators.
//!
//! Each evaluator is a pure function of its records and the rule table and
//! returns a fresh [`CompatibilityResult`]. Records are never modified.

pub mod enclosure;
pub mod panel_breaker;
pub mod plug_receptacle;
pub mod result;

use std::sync::Arc;

use crate::parser::schema::ParsedSpecs;
use crate::rules::RuleStore;

pub use enclosure::check_enclosure;
pub use panel_breaker::{check_panel_breaker, PanelBreakerRule};
pub use plug_receptacle::{check_plug_receptacle, PlugReceptacleRule};
pub use result::CompatibilityResult;

/// A check between two products
pub trait PairRule: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// Whether this rule handles the pair's product types
    fn applies(&self, a: &ParsedSpecs, b: &ParsedSpecs) -> bool;
    fn check(&self, a: &ParsedSpecs, b: &ParsedSpecs, rules: &RuleStore) -> CompatibilityResult;
}

/// Routes a pair of records to the first rule that applies
pub struct PairEngine {
    rules: Vec<Arc<dyn PairRule>>,
}

impl PairEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_default_rules() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Arc::new(PanelBreakerRule));
        engine.add_rule(Arc::new(PlugReceptacleRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Arc<dyn PairRule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Arc<dyn PairRule>] {
        &self.rules
    }

    /// Find the rule for this pair, if any
    pub fn rule_for(&self, a: &ParsedSpecs, b: &ParsedSpecs) -> Option<&dyn PairRule> {
        self.rules
            .iter()
            .find(|r| r.applies(a, b))
            .map(|r| &**r)
    }

    /// Run the applicable rule; `None` when no rule handles these product types
    pub fn check(
        &self,
        a: &ParsedSpecs,
        b: &ParsedSpecs,
        rules: &RuleStore,
    ) -> Option<(&str, CompatibilityResult)> {
        let rule = self.rule_for(a, b)?;
        let result = rule.check(a, b, rules);
        tracing::debug!(
            "{} verdict: compatible={} ({} reasons)",
            rule.id(),
            result.compatible,
            result.reasons.len()
        );
        Some((rule.id(), result))
    }
}

impl Default for PairEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}
