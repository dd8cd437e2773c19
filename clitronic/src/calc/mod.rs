//! Circuit Calculation Toolset
//!
//! Pure functions for the everyday hobbyist sums: LED series resistors,
//! voltage dividers, pull-up selection and Ohm's law. Nothing here does I/O
//! or keeps state.
//!
//! Every function returns a [`CalculationResult`]. Missing or unusable input
//! is reported as [`CalculationResult::NeedsInput`] rather than an error,
//! because the usual caller is a language model that must always get a
//! well-formed reply to relay.

pub mod divider;
pub mod led;
pub mod ohms;
pub mod pullup;

use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;

pub use divider::{voltage_divider, DividerSuggestion, VoltageDivider};
pub use led::{led_resistor, nearest_standard, LedResistor, STANDARD_VALUES};
pub use ohms::{ohms_law, OhmsInput, OhmsLaw, Solved};
pub use pullup::{pull_up, PullUpAdvice};

#[derive(Debug, Clone, PartialEq)]
pub enum CalculationResult {
    LedResistor(LedResistor),
    VoltageDivider(VoltageDivider),
    DividerSuggestion(DividerSuggestion),
    PullUp(PullUpAdvice),
    OhmsLaw(OhmsLaw),
    NeedsInput(NeedsInput),
}

/// Descriptive "need more fields" reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeedsInput {
    pub message: String,
}

impl NeedsInput {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<NeedsInput> for CalculationResult {
    fn from(needs: NeedsInput) -> Self {
        CalculationResult::NeedsInput(needs)
    }
}

/// Scenarios of the `calculate_resistor` tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResistorScenario {
    Led,
    VoltageDivider,
    Pullup,
}

/// Arguments of the `calculate_resistor` tool; scenario-specific fields
/// are ignored by the other scenarios
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResistorRequest {
    pub scenario: ResistorScenario,
    pub supply_voltage: f64,
    #[serde(default)]
    pub forward_voltage: Option<f64>,
    #[serde(default)]
    pub desired_current_ma: Option<f64>,
    #[serde(default)]
    pub output_voltage: Option<f64>,
    #[serde(default)]
    pub r1_ohms: Option<f64>,
}

pub fn calculate_resistor(request: &ResistorRequest) -> CalculationResult {
    match request.scenario {
        ResistorScenario::Led => led_resistor(
            request.supply_voltage,
            request.forward_voltage,
            request.desired_current_ma,
        ),
        ResistorScenario::VoltageDivider => voltage_divider(
            request.supply_voltage,
            request.output_voltage,
            request.r1_ohms,
        ),
        ResistorScenario::Pullup => pull_up(request.supply_voltage),
    }
}

impl CalculationResult {
    pub fn is_needs_input(&self) -> bool {
        matches!(self, CalculationResult::NeedsInput(_))
    }

    /// The JSON object handed back to the model and printed by `--format json`
    pub fn to_value(&self) -> Value {
        match self {
            CalculationResult::LedResistor(led) => json!({
                "scenario": "LED current limiting",
                "formula": led.formula,
                "calculation": led.calculation,
                "exact_value": format!("{:.1} Ω", led.exact_ohms),
                "nearest_standard": format!("{} Ω", led.nearest_standard_ohms),
                "power_dissipated": format!("{:.1} mW", led.power_mw),
            }),
            CalculationResult::VoltageDivider(d) => json!({
                "scenario": "Voltage divider",
                "formula": d.formula,
                "calculation": d.calculation,
                "r1": format!("{} Ω", d.r1_ohms),
                "r2": format!("{:.1} Ω", d.r2_ohms),
                "output_voltage": format!("{} V", d.output_voltage),
            }),
            CalculationResult::DividerSuggestion(s) => json!({
                "scenario": "Voltage divider",
                "formula": s.formula,
                "suggestion": s.suggestion,
            }),
            CalculationResult::PullUp(p) => json!({
                "scenario": "Pull-up resistor",
                "recommendation": p.recommendation,
            }),
            CalculationResult::OhmsLaw(o) => json!({
                "voltage": o.voltage_display(),
                "current": o.current_display(),
                "resistance": o.resistance_display(),
                "power": o.power_display(),
                "formula_used": o.formula_used,
            }),
            CalculationResult::NeedsInput(n) => json!({ "error": n.message }),
        }
    }
}

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationResult::LedResistor(led) => {
                writeln!(f, "LED current limiting")?;
                writeln!(f, "  Formula:          {}", led.formula)?;
                writeln!(f, "  Calculation:      {}", led.calculation)?;
                writeln!(f, "  Exact value:      {:.1} Ω", led.exact_ohms)?;
                writeln!(f, "  Nearest standard: {} Ω", led.nearest_standard_ohms)?;
                write!(f, "  Power dissipated: {:.1} mW", led.power_mw)
            }
            CalculationResult::VoltageDivider(d) => {
                writeln!(f, "Voltage divider")?;
                writeln!(f, "  Formula:        {}", d.formula)?;
                writeln!(f, "  Calculation:    {}", d.calculation)?;
                writeln!(f, "  R1:             {} Ω", d.r1_ohms)?;
                writeln!(f, "  R2:             {:.1} Ω", d.r2_ohms)?;
                write!(f, "  Output voltage: {} V", d.output_voltage)
            }
            CalculationResult::DividerSuggestion(s) => {
                writeln!(f, "Voltage divider")?;
                writeln!(f, "  Formula:    {}", s.formula)?;
                write!(f, "  Suggestion: {}", s.suggestion)
            }
            CalculationResult::PullUp(p) => {
                writeln!(f, "Pull-up resistor")?;
                write!(f, "  {}", p.recommendation)
            }
            CalculationResult::OhmsLaw(o) => {
                writeln!(f, "Ohm's law ({})", o.formula_used)?;
                writeln!(f, "  Calculation: {}", o.calculation)?;
                writeln!(f, "  Voltage:     {}", o.voltage_display())?;
                writeln!(f, "  Current:     {}", o.current_display())?;
                writeln!(f, "  Resistance:  {}", o.resistance_display())?;
                write!(f, "  Power:       {}", o.power_display())
            }
            CalculationResult::NeedsInput(n) => write!(f, "Need more input: {}", n.message),
        }
    }
}
