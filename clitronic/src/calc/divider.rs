//! Voltage divider solving

use crate::calc::{CalculationResult, NeedsInput};

/// R1 used when the caller does not supply one
pub const SUGGESTED_R1_OHMS: f64 = 10_000.0;

const FORMULA: &str = "Vout = Vin × R2 / (R1 + R2)";

/// R2 solved for a caller-supplied R1
#[derive(Debug, Clone, PartialEq)]
pub struct VoltageDivider {
    pub supply_voltage: f64,
    pub output_voltage: f64,
    pub r1_ohms: f64,
    pub r2_ohms: f64,
    pub formula: &'static str,
    pub calculation: String,
}

/// Advisory pair built around a 10 kΩ R1
#[derive(Debug, Clone, PartialEq)]
pub struct DividerSuggestion {
    pub supply_voltage: f64,
    pub output_voltage: f64,
    pub r1_ohms: f64,
    /// Rounded to the nearest whole ohm
    pub r2_ohms: f64,
    pub formula: &'static str,
    pub suggestion: String,
}

/// Solve R2 = R1 × Vout / (Vin - Vout). `output_voltage` defaults to half
/// the supply; without `r1_ohms` (or with 0) the result is a suggestion.
pub fn voltage_divider(
    supply_voltage: f64,
    output_voltage: Option<f64>,
    r1_ohms: Option<f64>,
) -> CalculationResult {
    let vout = output_voltage.unwrap_or(supply_voltage / 2.0);

    if !supply_voltage.is_finite() || !vout.is_finite() {
        return NeedsInput::new("Voltages must be finite numbers").into();
    }
    if vout == supply_voltage {
        return NeedsInput::new(
            "output_voltage equals supply_voltage; a divider cannot solve for R2 (Vin - Vout = 0)",
        )
        .into();
    }
    if vout <= 0.0 || vout > supply_voltage {
        return NeedsInput::new(format!(
            "output_voltage must be between 0 and the supply voltage ({} V)",
            supply_voltage
        ))
        .into();
    }

    match r1_ohms.filter(|r1| *r1 != 0.0) {
        Some(r1) if !r1.is_finite() || r1 < 0.0 => {
            NeedsInput::new("r1_ohms must be a positive resistance").into()
        }
        Some(r1) => {
            let r2 = r1 * vout / (supply_voltage - vout);
            CalculationResult::VoltageDivider(VoltageDivider {
                supply_voltage,
                output_voltage: vout,
                r1_ohms: r1,
                r2_ohms: r2,
                formula: FORMULA,
                calculation: format!(
                    "R2 = R1 × Vout / (Vin - Vout) = {} × {} / ({} - {}) = {:.1} Ω",
                    r1, vout, supply_voltage, vout, r2
                ),
            })
        }
        None => {
            let r2 = (SUGGESTED_R1_OHMS * vout / (supply_voltage - vout)).round();
            CalculationResult::DividerSuggestion(DividerSuggestion {
                supply_voltage,
                output_voltage: vout,
                r1_ohms: SUGGESTED_R1_OHMS,
                r2_ohms: r2,
                formula: FORMULA,
                suggestion: format!(
                    "For {}V to {}V: use R1=10kΩ, R2={:.0} Ω",
                    supply_voltage, vout, r2
                ),
            })
        }
    }
}
