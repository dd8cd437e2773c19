//! Ohm's law solver
//!
//! Any two of voltage (V), current (mA) and resistance (Ω) give the third
//! plus power. Current crosses the public boundary in milliamps only; all
//! arithmetic is done in amps.

use crate::calc::{CalculationResult, NeedsInput};
use serde::Deserialize;

const NEED_TWO: &str = "Please provide at least two of: voltage, current_ma, resistance";

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct OhmsInput {
    #[serde(default)]
    pub voltage: Option<f64>,
    #[serde(default)]
    pub current_ma: Option<f64>,
    #[serde(default)]
    pub resistance: Option<f64>,
}

/// The pair of knowns actually used, in priority order V&I, V&R, I&R
#[derive(Debug, Clone, Copy, PartialEq)]
enum KnownPair {
    VoltageCurrent { volts: f64, milliamps: f64 },
    VoltageResistance { volts: f64, ohms: f64 },
    CurrentResistance { milliamps: f64, ohms: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solved {
    Resistance,
    Current,
    Voltage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OhmsLaw {
    pub voltage: f64,
    pub current_ma: f64,
    pub resistance: f64,
    pub power_mw: f64,
    pub solved: Solved,
    pub formula_used: &'static str,
    pub calculation: String,
}

impl OhmsInput {
    fn known_pair(&self) -> Option<KnownPair> {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
        let volts = finite(self.voltage);
        // 0 mA counts as not given
        let milliamps = finite(self.current_ma).filter(|ma| *ma != 0.0);
        let ohms = finite(self.resistance);

        match (volts, milliamps, ohms) {
            (Some(volts), Some(milliamps), _) => {
                Some(KnownPair::VoltageCurrent { volts, milliamps })
            }
            (Some(volts), None, Some(ohms)) => Some(KnownPair::VoltageResistance { volts, ohms }),
            (None, Some(milliamps), Some(ohms)) => {
                Some(KnownPair::CurrentResistance { milliamps, ohms })
            }
            _ => None,
        }
    }
}

pub fn ohms_law(input: &OhmsInput) -> CalculationResult {
    let Some(pair) = input.known_pair() else {
        return NeedsInput::new(NEED_TWO).into();
    };

    match pair {
        KnownPair::VoltageCurrent { volts, milliamps } => {
            let amps = milliamps / 1000.0;
            let ohms = volts / amps;
            CalculationResult::OhmsLaw(OhmsLaw {
                voltage: volts,
                current_ma: milliamps,
                resistance: ohms,
                power_mw: volts * amps * 1000.0,
                solved: Solved::Resistance,
                formula_used: "R = V / I",
                calculation: format!("R = {} / {} = {:.1} Ω", volts, amps, ohms),
            })
        }
        KnownPair::VoltageResistance { ohms, .. } if ohms == 0.0 => {
            NeedsInput::new("resistance must be non-zero to solve for current").into()
        }
        KnownPair::VoltageResistance { volts, ohms } => {
            let amps = volts / ohms;
            CalculationResult::OhmsLaw(OhmsLaw {
                voltage: volts,
                current_ma: amps * 1000.0,
                resistance: ohms,
                power_mw: volts * amps * 1000.0,
                solved: Solved::Current,
                formula_used: "I = V / R",
                calculation: format!("I = {} / {} = {:.2} mA", volts, ohms, amps * 1000.0),
            })
        }
        KnownPair::CurrentResistance { milliamps, ohms } => {
            let amps = milliamps / 1000.0;
            let volts = amps * ohms;
            CalculationResult::OhmsLaw(OhmsLaw {
                voltage: volts,
                current_ma: milliamps,
                resistance: ohms,
                power_mw: volts * amps * 1000.0,
                solved: Solved::Voltage,
                formula_used: "V = I × R",
                calculation: format!("V = {} × {} = {:.2} V", amps, ohms, volts),
            })
        }
    }
}

impl OhmsLaw {
    /// Given quantities print as entered, the solved one rounded
    pub fn voltage_display(&self) -> String {
        match self.solved {
            Solved::Voltage => format!("{:.2} V", self.voltage),
            _ => format!("{} V", self.voltage),
        }
    }

    pub fn current_display(&self) -> String {
        match self.solved {
            Solved::Current => format!("{:.2} mA", self.current_ma),
            _ => format!("{} mA", self.current_ma),
        }
    }

    pub fn resistance_display(&self) -> String {
        match self.solved {
            Solved::Resistance => format!("{:.1} Ω", self.resistance),
            _ => format!("{} Ω", self.resistance),
        }
    }

    pub fn power_display(&self) -> String {
        format!("{:.1} mW", self.power_mw)
    }
}
