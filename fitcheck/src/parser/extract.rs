//! Spec extraction from pasted product text.
//!
//! Every pattern is independent: a miss leaves its field at the default and
//! never blocks the others. Extraction cannot fail.

use regex::Regex;

use crate::parser::schema::{ParsedSpecs, Phase, ProductType, RAW_EXCERPT_LIMIT};
use crate::rules::RuleStore;

/// Distinctive series tokens -> (brand, series), in match priority order.
/// Tokens with surrounding spaces only match as whole words.
pub const SERIES_TOKENS: &[(&str, &str, &str)] = &[
    ("QO", "Square D", "QO"),
    ("HOMELINE", "Square D", "Homeline"),
    ("HOM", "Square D", "Homeline"),
    ("QP", "Siemens", "QP"),
    ("EATON BR", "Eaton", "BR"),
    ("BR ", "Eaton", "BR"),
    ("EATON CH", "Eaton", "CH"),
    (" CH ", "Eaton", "CH"),
    ("THQL", "GE", "THQL"),
    ("THQP", "GE", "THQL"),
    ("LEVITON", "Leviton", "Smart"),
];

/// One step of the product type cascade
struct TypeRule {
    any_of: &'static [&'static str],
    none_of: &'static [&'static str],
    product_type: ProductType,
}

impl TypeRule {
    fn matches(&self, lowered: &str) -> bool {
        self.any_of.iter().any(|k| lowered.contains(k))
            && !self.none_of.iter().any(|k| lowered.contains(k))
    }
}

// First matching rule wins
const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        any_of: &["load center", "panelboard", "loadcenter", "panel "],
        none_of: &[],
        product_type: ProductType::Panel,
    },
    TypeRule {
        any_of: &["breaker", "circuit breaker"],
        none_of: &[],
        product_type: ProductType::Breaker,
    },
    TypeRule {
        any_of: &["receptacle", "outlet"],
        none_of: &[],
        product_type: ProductType::Receptacle,
    },
    TypeRule {
        any_of: &["plug"],
        none_of: &["receptacle"],
        product_type: ProductType::Plug,
    },
    TypeRule {
        any_of: &["ev charger", "evse", "electric vehicle charger"],
        none_of: &[],
        product_type: ProductType::Evse,
    },
];

const MODEL_RE: &str = r"(?i)\b([A-Z0-9-]{4,})\b";
const VOLT_RE: &str = r"(?i)(\d{3})(?:/\d{3})?\s*V|(\d{3})\s*VAC|(\d{3})\s*Volts";
const AMP_RE: &str = r"(?i)(\d{1,3})\s*A\b";
const PHASE_RE: &str = r"(?i)\b(1[ -]?[PØ]|3[ -]?[PØ]|single[- ]?phase|three[- ]?phase)\b";
const POLE_RE: &str = r"(?i)\b(\d)[ -]?(pole|p)\b";
const ENCLOSURE_RE: &str = r"(?i)NEMA\s*(\d+[XR]?)";
const PLUG_RE: &str = r"(?i)NEMA\s*(\d{1,2}-\d{2})";

/// Compiled patterns plus the brand priority list from the rule table
pub struct SpecExtractor {
    brands: Vec<String>,
    model: Regex,
    voltage: Regex,
    amps: Regex,
    phase: Regex,
    poles: Regex,
    enclosure: Regex,
    plug: Regex,
}

impl SpecExtractor {
    pub fn new(rules: &RuleStore) -> Result<Self, regex::Error> {
        Ok(Self {
            brands: rules.brand_names().map(str::to_string).collect(),
            model: Regex::new(MODEL_RE)?,
            voltage: Regex::new(VOLT_RE)?,
            amps: Regex::new(AMP_RE)?,
            phase: Regex::new(PHASE_RE)?,
            poles: Regex::new(POLE_RE)?,
            enclosure: Regex::new(ENCLOSURE_RE)?,
            plug: Regex::new(PLUG_RE)?,
        })
    }

    /// Extract a structured record from free-form text
    pub fn extract(&self, pasted: &str) -> ParsedSpecs {
        let text = normalize(pasted);
        let lowered = text.to_lowercase();

        let mut specs = ParsedSpecs {
            raw_excerpt: pasted.chars().take(RAW_EXCERPT_LIMIT).collect(),
            ..Default::default()
        };

        if let Some(brand) = self.detect_brand(&lowered) {
            specs.brand = brand.to_string();
        }

        if let Some((brand, series)) = detect_series(&lowered) {
            specs.series = series.to_string();
            if specs.brand.is_empty() {
                specs.brand = brand.to_string();
            }
        }

        if let Some(model) = self.capture(&self.model, &text) {
            specs.model = model.to_string();
        }

        specs.voltage = self.detect_voltage(&text).unwrap_or_default();
        specs.amps = self.capture(&self.amps, &text).and_then(|a| a.parse().ok());
        specs.phase = self.detect_phase(&text);
        specs.poles = self
            .capture(&self.poles, &text)
            .and_then(|p| p.parse::<u8>().ok())
            .filter(|&p| p <= 4);
        specs.nema_enclosure = self.detect_enclosure(&text).unwrap_or_default();

        if let Some(config) = self.capture(&self.plug, &text) {
            specs.plug_config = format!("NEMA {}", config);
        }

        specs.product_type = detect_product_type(&lowered);

        tracing::debug!(
            "Extracted {} brand={:?} series={:?} model={:?} amps={:?}",
            specs.product_type,
            specs.brand,
            specs.series,
            specs.model,
            specs.amps
        );

        specs
    }

    fn detect_brand(&self, lowered: &str) -> Option<&str> {
        self.brands
            .iter()
            .find(|b| lowered.contains(&b.to_lowercase()))
            .map(String::as_str)
    }

    /// First capture group of the first match
    fn capture<'t>(&self, re: &Regex, text: &'t str) -> Option<&'t str> {
        let hit = re.captures(text)?.get(1)?.as_str();
        tracing::trace!("pattern {} matched {:?}", re.as_str(), hit);
        Some(hit)
    }

    fn detect_voltage(&self, text: &str) -> Option<String> {
        let caps = self.voltage.captures(text)?;
        caps.iter()
            .skip(1)
            .flatten()
            .next()
            .map(|m| format!("{}V", m.as_str()))
    }

    fn detect_phase(&self, text: &str) -> Phase {
        let Some(m) = self.phase.find(text) else {
            return Phase::Unknown;
        };
        let token = m.as_str().to_lowercase();
        if token.contains('3') || token.starts_with("three") {
            Phase::Three
        } else {
            Phase::Single
        }
    }

    fn detect_enclosure(&self, text: &str) -> Option<String> {
        let token = self
            .enclosure
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .find(|m| !is_plug_config_prefix(m.as_str(), &text[m.end()..]))?
            .as_str()
            .to_uppercase();

        if token.ends_with('R') || token == "3" {
            Some("3R".to_string())
        } else {
            Some(token)
        }
    }
}

/// "NEMA 14-50" is a plug configuration, not an enclosure rating;
/// "NEMA 4X-rated" and "NEMA 1-rated" are enclosure ratings
fn is_plug_config_prefix(token: &str, rest: &str) -> bool {
    let mut tail = rest.chars();
    token.chars().all(|c| c.is_ascii_digit())
        && tail.next() == Some('-')
        && tail.next().is_some_and(|c| c.is_ascii_digit())
        && tail.next().is_some_and(|c| c.is_ascii_digit())
}

/// Collapse whitespace runs and pad with boundary spaces
fn normalize(text: &str) -> String {
    let collapsed: Vec<&str> = text.split_whitespace().collect();
    format!(" {} ", collapsed.join(" "))
}

fn detect_series(lowered: &str) -> Option<(&'static str, &'static str)> {
    SERIES_TOKENS
        .iter()
        .find(|(token, _, _)| lowered.contains(&token.to_lowercase()))
        .map(|&(_, brand, series)| (brand, series))
}

fn detect_product_type(lowered: &str) -> ProductType {
    TYPE_RULES
        .iter()
        .find(|rule| rule.matches(lowered))
        .map(|rule| rule.product_type)
        .unwrap_or_default()
}
