//! Core checking API shared by the CLI and any other front end.
//! No rendering or session state lives here.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analyzer::{self, CompatibilityResult, PairEngine};
use crate::parser::{ParsedSpecs, SpecExtractor};
use crate::rules::{RuleStore, RulesError};
use crate::sizing::{self, SizingResult};

#[derive(Debug, thiserror::Error)]
pub enum FitCheckError {
    #[error("Rule table error: {0}")]
    Rules(#[from] RulesError),
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Invalid edit: {0}")]
    InvalidPatch(String),
}

/// Where the rule table comes from and how strictly to treat load failures.
#[derive(Clone, Debug, Default)]
pub struct CheckOptions {
    /// External rule table; `None` uses the embedded one
    pub rules_path: Option<PathBuf>,
    /// Fail instead of falling back to the embedded table
    pub strict_rules: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    PanelBreaker,
    PlugReceptacle,
    Enclosure,
}

impl CheckKind {
    pub fn from_rule_id(id: &str) -> Option<Self> {
        match id {
            "panel_breaker" => Some(CheckKind::PanelBreaker),
            "plug_receptacle" => Some(CheckKind::PlugReceptacle),
            "enclosure" => Some(CheckKind::Enclosure),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CheckKind::PanelBreaker => "Panel ↔ Breaker",
            CheckKind::PlugReceptacle => "Plug ↔ Receptacle",
            CheckKind::Enclosure => "Environment / NEMA",
        }
    }
}

/// A verdict plus the metadata a display layer shows alongside it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub id: Uuid,
    pub checked_at: DateTime<Utc>,
    pub kind: CheckKind,
    pub result: CompatibilityResult,
    pub disclaimer: String,
}

/// Rule table, compiled extractor, and pair rules, built once and shared
pub struct FitCheckCore {
    rules: RuleStore,
    extractor: SpecExtractor,
    engine: PairEngine,
}

impl FitCheckCore {
    pub fn new(rules: RuleStore) -> Result<Self, FitCheckError> {
        let extractor = SpecExtractor::new(&rules)?;
        Ok(Self {
            rules,
            extractor,
            engine: PairEngine::with_default_rules(),
        })
    }

    /// Build from options, loading the rule table they point at
    pub fn from_options(options: &CheckOptions) -> Result<Self, FitCheckError> {
        let rules = match (&options.rules_path, options.strict_rules) {
            (Some(path), true) => RuleStore::load(path)?,
            (path, false) => RuleStore::load_or_builtin(path.as_deref()),
            (None, true) => RuleStore::builtin(),
        };
        Self::new(rules)
    }

    pub fn rules(&self) -> &RuleStore {
        &self.rules
    }

    pub fn engine(&self) -> &PairEngine {
        &self.engine
    }

    pub fn extract(&self, text: &str) -> ParsedSpecs {
        self.extractor.extract(text)
    }

    /// Run whichever pair check fits the two product types.
    ///
    /// Panel/breaker pairs are accepted in either order. `None` means no
    /// pair check applies.
    pub fn check_pair(&self, a: &ParsedSpecs, b: &ParsedSpecs) -> Option<CheckReport> {
        let (id, result) = self.engine.check(a, b, &self.rules)?;
        let kind = CheckKind::from_rule_id(id)?;
        Some(self.report(kind, result))
    }

    /// Run a specific pair check regardless of the detected product types.
    ///
    /// `None` for [`CheckKind::Enclosure`], which compares one product
    /// against a required rating rather than against another product.
    pub fn check_pair_as(
        &self,
        kind: CheckKind,
        a: &ParsedSpecs,
        b: &ParsedSpecs,
    ) -> Option<CheckReport> {
        let result = match kind {
            CheckKind::PanelBreaker => analyzer::check_panel_breaker(a, b, &self.rules),
            CheckKind::PlugReceptacle => analyzer::check_plug_receptacle(a, b, &self.rules),
            CheckKind::Enclosure => return None,
        };
        Some(self.report(kind, result))
    }

    pub fn check_enclosure(&self, spec: &ParsedSpecs, required: &str) -> CheckReport {
        self.report(CheckKind::Enclosure, analyzer::check_enclosure(spec, required))
    }

    pub fn size_evse(&self, output_amps: u32) -> SizingResult {
        sizing::size_breaker(output_amps, &self.rules)
    }

    fn report(&self, kind: CheckKind, result: CompatibilityResult) -> CheckReport {
        CheckReport {
            id: Uuid::new_v4(),
            checked_at: Utc::now(),
            kind,
            result,
            disclaimer: self.rules.disclaimer.clone(),
        }
    }
}
