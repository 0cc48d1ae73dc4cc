use serde::{Deserialize, Serialize};

/// Verdict shared by every evaluator.
///
/// `reasons` explain an incompatibility or carry caveats; `suggestions` are
/// next steps. Both are in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub compatible: bool,
    pub reasons: Vec<String>,
    pub suggestions: Vec<String>,
}

impl CompatibilityResult {
    /// Failed precondition: not compatible, one reason, nothing else
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            compatible: false,
            reasons: vec![reason.into()],
            suggestions: Vec::new(),
        }
    }

    pub fn reason(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    pub fn suggest(&mut self, suggestion: impl Into<String>) {
        self.suggestions.push(suggestion.into());
    }
}
