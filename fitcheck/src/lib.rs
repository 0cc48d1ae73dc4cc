//! FitCheck - compatibility checks for electrical products
//!
//! This library turns pasted product text (listings, spec sheets, HTML
//! fragments) into structured specifications and checks pairs of products
//! against a small rule table: panels vs. breakers, plugs vs. receptacles,
//! enclosure ratings vs. environments, plus an EV charger circuit sizer.
//!
//! All results are heuristic and advisory. Present them as "verify before
//! purchase", never as a certified answer.
//!
//! # Quick Start
//!
//! ```
//! use fitcheck::{FitCheckCore, RuleStore};
//!
//! let core = FitCheckCore::new(RuleStore::builtin()).unwrap();
//! let panel = core.extract("Square D QO load center 1Ø 120/240V 200A NEMA 3R");
//! let breaker = core.extract("Square D QO120 breaker 1P 20A");
//!
//! let report = core.check_pair(&panel, &breaker).unwrap();
//! assert!(report.result.compatible);
//! ```
//!
//! # Features
//!
//! - **Spec extraction**: brand, series, model, voltage, phase, amps, poles,
//!   NEMA enclosure and plug configuration
//! - **Panel ↔ Breaker**: breaker family acceptance per panel series
//! - **Plug ↔ Receptacle**: NEMA configuration lookup
//! - **Enclosure**: NEMA 1 < 3R < 4 < 4X
//! - **EV sizing**: 125% continuous-load rule over standard breaker sizes

pub mod analyzer;
pub mod core;
pub mod parser;
pub mod rules;
pub mod sizing;

// Re-export main types
pub use analyzer::{CompatibilityResult, PairEngine, PairRule};
pub use crate::core::{CheckKind, CheckOptions, CheckReport, FitCheckCore, FitCheckError};
pub use parser::{EnclosureRating, ParsedSpecs, Phase, ProductType, SpecExtractor, SpecPatch};
pub use rules::{RuleStore, RulesError};
pub use sizing::{size_breaker, SizingResult};

/// Extract specs with the embedded rule table (convenience wrapper).
pub fn extract(text: &str) -> Result<ParsedSpecs, FitCheckError> {
    let rules = RuleStore::builtin();
    Ok(SpecExtractor::new(&rules)?.extract(text))
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CheckKind, CheckOptions, CheckReport, CompatibilityResult, FitCheckCore, FitCheckError,
        ParsedSpecs, Phase, ProductType, RuleStore, SizingResult, SpecPatch,
    };
}
