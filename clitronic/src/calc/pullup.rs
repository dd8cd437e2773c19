//! Pull-up resistor guideline
//!
//! Not a numeric solve: the band is the same for any logic level, only the
//! wording mentions the supply voltage.

use crate::calc::CalculationResult;

pub const PULL_UP_MIN_OHMS: u32 = 4_700;
pub const PULL_UP_MAX_OHMS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct PullUpAdvice {
    pub supply_voltage: f64,
    pub min_ohms: u32,
    pub max_ohms: u32,
    pub recommendation: String,
}

pub fn pull_up(supply_voltage: f64) -> CalculationResult {
    CalculationResult::PullUp(PullUpAdvice {
        supply_voltage,
        min_ohms: PULL_UP_MIN_OHMS,
        max_ohms: PULL_UP_MAX_OHMS,
        recommendation: format!(
            "For {}V logic: use 4.7kΩ to 10kΩ. Smaller values = stronger pull-up (faster rise time, more current). \
             Larger values = weaker pull-up (less current, slower). Arduino has built-in ~20kΩ pull-ups via INPUT_PULLUP.",
            supply_voltage
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_is_fixed() {
        for volts in [3.3, 5.0, 12.0] {
            match pull_up(volts) {
                CalculationResult::PullUp(advice) => {
                    assert_eq!(advice.min_ohms, 4_700);
                    assert_eq!(advice.max_ohms, 10_000);
                    assert!(advice.recommendation.starts_with(&format!("For {}V logic", volts)));
                    assert!(advice.recommendation.contains("stronger pull-up"));
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }
}
