//! LED series resistor sizing

use crate::calc::{CalculationResult, NeedsInput};

pub const DEFAULT_FORWARD_VOLTAGE: f64 = 2.0;
pub const DEFAULT_CURRENT_MA: f64 = 20.0;

/// Reference table of stocked resistor values, ascending (ohms)
pub const STANDARD_VALUES: [u32; 14] = [
    10, 22, 47, 100, 150, 220, 330, 470, 680, 1000, 1500, 2200, 3300, 4700,
];

#[derive(Debug, Clone, PartialEq)]
pub struct LedResistor {
    pub supply_voltage: f64,
    pub forward_voltage: f64,
    pub current_ma: f64,
    pub exact_ohms: f64,
    pub nearest_standard_ohms: u32,
    /// I² × R at the standard value
    pub power_mw: f64,
    pub formula: &'static str,
    pub calculation: String,
}

/// R = (Vsupply - Vf) / I, snapped to the standard table
pub fn led_resistor(
    supply_voltage: f64,
    forward_voltage: Option<f64>,
    desired_current_ma: Option<f64>,
) -> CalculationResult {
    let forward_voltage = forward_voltage.unwrap_or(DEFAULT_FORWARD_VOLTAGE);
    let current_ma = desired_current_ma.unwrap_or(DEFAULT_CURRENT_MA);

    if ![supply_voltage, forward_voltage, current_ma]
        .iter()
        .all(|v| v.is_finite())
    {
        return NeedsInput::new("Voltages and current must be finite numbers").into();
    }
    if current_ma <= 0.0 {
        return NeedsInput::new("desired_current_ma must be greater than 0").into();
    }
    if supply_voltage <= forward_voltage {
        return NeedsInput::new(format!(
            "supply_voltage ({} V) must be higher than the LED forward voltage ({} V)",
            supply_voltage, forward_voltage
        ))
        .into();
    }

    let current = current_ma / 1000.0;
    let exact_ohms = (supply_voltage - forward_voltage) / current;
    let nearest = nearest_standard(exact_ohms);
    let power_mw = current * current * f64::from(nearest) * 1000.0;

    CalculationResult::LedResistor(LedResistor {
        supply_voltage,
        forward_voltage,
        current_ma,
        exact_ohms,
        nearest_standard_ohms: nearest,
        power_mw,
        formula: "R = (Vsupply - Vled) / I",
        calculation: format!(
            "R = ({} - {}) / {} = {:.1} Ω",
            supply_voltage, forward_voltage, current, exact_ohms
        ),
    })
}

/// Closest table entry by absolute difference. Only a strictly smaller
/// distance replaces the pick, so the lower of two equidistant values wins.
pub fn nearest_standard(ohms: f64) -> u32 {
    STANDARD_VALUES
        .iter()
        .copied()
        .fold(STANDARD_VALUES[0], |best, candidate| {
            if (f64::from(candidate) - ohms).abs() < (f64::from(best) - ohms).abs() {
                candidate
            } else {
                best
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unwrap_led(result: CalculationResult) -> LedResistor {
        match result {
            CalculationResult::LedResistor(led) => led,
            other => panic!("expected LED result, got {:?}", other),
        }
    }

    #[test]
    fn test_five_volt_red_led() {
        let led = unwrap_led(led_resistor(5.0, Some(2.0), Some(20.0)));
        assert!((led.exact_ohms - 150.0).abs() < 1e-9);
        assert_eq!(led.nearest_standard_ohms, 150);
        assert!((led.power_mw - 60.0).abs() < 1e-9);
        assert_eq!(led.calculation, "R = (5 - 2) / 0.02 = 150.0 Ω");
    }

    #[test]
    fn test_defaults() {
        let led = unwrap_led(led_resistor(5.0, None, None));
        assert_eq!(led.forward_voltage, 2.0);
        assert_eq!(led.current_ma, 20.0);
        assert_eq!(led.nearest_standard_ohms, 150);
    }

    #[test]
    fn test_snaps_to_nearest() {
        // (3.3 - 2.0) / 0.01 = 130 Ω -> 150 is closer than 100
        let led = unwrap_led(led_resistor(3.3, Some(2.0), Some(10.0)));
        assert_eq!(led.nearest_standard_ohms, 150);
        // (12 - 3.2) / 0.02 = 440 Ω -> 470
        let led = unwrap_led(led_resistor(12.0, Some(3.2), Some(20.0)));
        assert_eq!(led.nearest_standard_ohms, 470);
    }

    #[test]
    fn test_tie_goes_to_lower_value() {
        // 185 is exactly between 150 and 220
        assert_eq!(nearest_standard(185.0), 150);
        // 16 is exactly between 10 and 22
        assert_eq!(nearest_standard(16.0), 10);
    }

    #[test]
    fn test_out_of_table_range() {
        assert_eq!(nearest_standard(1.0), 10);
        assert_eq!(nearest_standard(100_000.0), 4700);
    }

    #[test]
    fn test_supply_below_forward_voltage_needs_input() {
        assert!(led_resistor(1.8, Some(2.0), None).is_needs_input());
        assert!(led_resistor(2.0, Some(2.0), None).is_needs_input());
    }

    #[test]
    fn test_non_positive_current_needs_input() {
        assert!(led_resistor(5.0, None, Some(0.0)).is_needs_input());
        assert!(led_resistor(5.0, None, Some(-5.0)).is_needs_input());
        assert!(led_resistor(f64::NAN, None, None).is_needs_input());
    }
}
