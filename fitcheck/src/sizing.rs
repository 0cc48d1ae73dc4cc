//! EV charger circuit sizing.
//!
//! An EVSE is a continuous load, so the circuit is sized at 125% of the
//! charger's output and rounded up to the next standard breaker size.

use serde::{Deserialize, Serialize};

use crate::rules::RuleStore;

/// Standard breaker sizes considered, ascending
pub const STANDARD_BREAKER_SIZES: [u32; 10] = [15, 20, 30, 40, 50, 60, 70, 80, 90, 100];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizingResult {
    pub evse_output_amps: u32,
    /// `output × 1.25`, rounded half to even
    pub target_amps: u32,
    /// Smallest standard size ≥ target; `None` when the load exceeds every standard size
    pub recommended_breaker: Option<u32>,
    pub note: String,
}

impl SizingResult {
    pub fn is_covered(&self) -> bool {
        self.recommended_breaker.is_some()
    }
}

/// Size the branch breaker for an EVSE with the given continuous output
pub fn size_breaker(output_amps: u32, rules: &RuleStore) -> SizingResult {
    let target_amps = continuous_target(output_amps);
    let recommended_breaker = STANDARD_BREAKER_SIZES
        .iter()
        .copied()
        .find(|&size| size >= target_amps);

    if recommended_breaker.is_none() {
        tracing::debug!(
            "No standard breaker covers {}A (target {}A)",
            output_amps,
            target_amps
        );
    }

    SizingResult {
        evse_output_amps: output_amps,
        target_amps,
        recommended_breaker,
        note: rules.ev_note().to_string(),
    }
}

/// `amps × 5/4` rounded half to even, in integer arithmetic
fn continuous_target(amps: u32) -> u32 {
    let scaled = u64::from(amps) * 5;
    let quotient = scaled / 4;
    let remainder = scaled % 4;
    let rounded = match remainder {
        0 | 1 => quotient,
        3 => quotient + 1,
        // exactly .5
        _ if quotient % 2 == 0 => quotient,
        _ => quotient + 1,
    };
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
