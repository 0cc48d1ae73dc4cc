//! Field overrides applied on top of an extracted record.
//!
//! Editing produces a new record; the extracted one is left as it was.

use serde::{Deserialize, Serialize};

use crate::core::FitCheckError;
use crate::parser::schema::{ParsedSpecs, Phase, ProductType};

/// Upper bound accepted for an amps override
pub const MAX_PATCH_AMPS: u32 = 1000;
/// Upper bound accepted for a poles override
pub const MAX_PATCH_POLES: u8 = 4;

/// One optional override per field. `None` keeps the current value.
///
/// An `amps` or `poles` override of 0 clears the field, matching the
/// zero-means-blank convention of numeric form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecPatch {
    pub product_type: Option<ProductType>,
    pub brand: Option<String>,
    pub series: Option<String>,
    pub model: Option<String>,
    pub voltage: Option<String>,
    pub phase: Option<Phase>,
    pub amps: Option<u32>,
    pub poles: Option<u8>,
    pub nema_enclosure: Option<String>,
    pub plug_config: Option<String>,
    pub raw_excerpt: Option<String>,
}

impl SpecPatch {
    pub fn is_empty(&self) -> bool {
        *self == SpecPatch::default()
    }

    /// Build a patch from `field=value` assignments, e.g. `["amps=20", "series=QO"]`
    pub fn from_assignments<S: AsRef<str>>(assignments: &[S]) -> Result<Self, FitCheckError> {
        let mut patch = SpecPatch::default();

        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (field, value) = assignment.split_once('=').ok_or_else(|| {
                FitCheckError::InvalidPatch(format!("expected field=value, got {:?}", assignment))
            })?;
            let value = value.trim();

            match field.trim() {
                "product_type" | "type" => {
                    patch.product_type = Some(value.parse().map_err(FitCheckError::InvalidPatch)?)
                }
                "brand" => patch.brand = Some(value.to_string()),
                "series" => patch.series = Some(value.to_string()),
                "model" => patch.model = Some(value.to_string()),
                "voltage" => patch.voltage = Some(value.to_string()),
                "phase" => patch.phase = Some(value.parse().map_err(FitCheckError::InvalidPatch)?),
                "amps" => patch.amps = Some(parse_number(field, value)?),
                "poles" => patch.poles = Some(parse_number(field, value)?),
                "nema_enclosure" | "nema" => patch.nema_enclosure = Some(value.to_uppercase()),
                "plug_config" | "plug" => patch.plug_config = Some(value.to_string()),
                "raw_excerpt" => patch.raw_excerpt = Some(value.to_string()),
                other => {
                    return Err(FitCheckError::InvalidPatch(format!(
                        "unknown field {:?}",
                        other
                    )))
                }
            }
        }

        Ok(patch)
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, FitCheckError> {
    value
        .parse()
        .map_err(|_| FitCheckError::InvalidPatch(format!("{} must be a number, got {:?}", field, value)))
}

impl ParsedSpecs {
    /// Return a copy of this record with the patch's overrides applied
    pub fn apply(&self, patch: &SpecPatch) -> Result<ParsedSpecs, FitCheckError> {
        if let Some(amps) = patch.amps {
            if amps > MAX_PATCH_AMPS {
                return Err(FitCheckError::InvalidPatch(format!(
                    "amps must be at most {}, got {}",
                    MAX_PATCH_AMPS, amps
                )));
            }
        }
        if let Some(poles) = patch.poles {
            if poles > MAX_PATCH_POLES {
                return Err(FitCheckError::InvalidPatch(format!(
                    "poles must be at most {}, got {}",
                    MAX_PATCH_POLES, poles
                )));
            }
        }

        let mut out = self.clone();
        if let Some(t) = patch.product_type {
            out.product_type = t;
        }
        if let Some(ref v) = patch.brand {
            out.brand = v.clone();
        }
        if let Some(ref v) = patch.series {
            out.series = v.clone();
        }
        if let Some(ref v) = patch.model {
            out.model = v.clone();
        }
        if let Some(ref v) = patch.voltage {
            out.voltage = v.clone();
        }
        if let Some(p) = patch.phase {
            out.phase = p;
        }
        if let Some(amps) = patch.amps {
            out.amps = Some(amps).filter(|&a| a > 0);
        }
        if let Some(poles) = patch.poles {
            out.poles = Some(poles).filter(|&p| p > 0);
        }
        if let Some(ref v) = patch.nema_enclosure {
            out.nema_enclosure = v.clone();
        }
        if let Some(ref v) = patch.plug_config {
            out.plug_config = v.clone();
        }
        if let Some(ref v) = patch.raw_excerpt {
            out.raw_excerpt = v.clone();
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker() -> ParsedSpecs {
        ParsedSpecs {
            product_type: ProductType::Breaker,
            brand: "Square D".to_string(),
            series: "QO".to_string(),
            amps: Some(20),
            poles: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_apply_leaves_source_untouched() {
        let original = breaker();
        let patch = SpecPatch {
            series: Some("Homeline".to_string()),
            amps: Some(30),
            ..Default::default()
        };

        let edited = original.apply(&patch).unwrap();

        assert_eq!(edited.series, "Homeline");
        assert_eq!(edited.amps, Some(30));
        assert_eq!(edited.brand, "Square D");
        assert_eq!(original, breaker());
    }

    #[test]
    fn test_zero_clears_numeric_fields() {
        let patch = SpecPatch {
            amps: Some(0),
            poles: Some(0),
            ..Default::default()
        };
        let edited = breaker().apply(&patch).unwrap();
        assert_eq!(edited.amps, None);
        assert_eq!(edited.poles, None);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let patch = SpecPatch {
            poles: Some(5),
            ..Default::default()
        };
        assert!(matches!(
            breaker().apply(&patch),
            Err(FitCheckError::InvalidPatch(_))
        ));

        let patch = SpecPatch {
            amps: Some(1001),
            ..Default::default()
        };
        assert!(breaker().apply(&patch).is_err());
    }

    #[test]
    fn test_from_assignments() {
        let patch =
            SpecPatch::from_assignments(&["type=panel", "amps=100", "phase=3P", "nema=4x"]).unwrap();
        assert_eq!(patch.product_type, Some(ProductType::Panel));
        assert_eq!(patch.amps, Some(100));
        assert_eq!(patch.phase, Some(Phase::Three));
        assert_eq!(patch.nema_enclosure.as_deref(), Some("4X"));
        assert!(patch.brand.is_none());
    }

    #[test]
    fn test_from_assignments_errors() {
        assert!(SpecPatch::from_assignments(&["amps"]).is_err());
        assert!(SpecPatch::from_assignments(&["amps=lots"]).is_err());
        assert!(SpecPatch::from_assignments(&["colour=red"]).is_err());
        assert!(SpecPatch::from_assignments(&["type=toaster"]).is_err());
    }

    #[test]
    fn test_empty_patch() {
        let patch = SpecPatch::from_assignments::<&str>(&[]).unwrap();
        assert!(patch.is_empty());
        assert_eq!(breaker().apply(&patch).unwrap(), breaker());
    }
}
