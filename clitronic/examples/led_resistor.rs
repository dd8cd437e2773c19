//! Size the series resistor for an LED, then check it with Ohm's law.

use clitronic::calc::{led_resistor, ohms_law, CalculationResult, OhmsInput};

fn main() {
    let result = led_resistor(5.0, Some(2.0), Some(20.0));
    println!("{}\n", result);

    if let CalculationResult::LedResistor(led) = result {
        let check = ohms_law(&OhmsInput {
            voltage: Some(led.supply_voltage - led.forward_voltage),
            current_ma: None,
            resistance: Some(f64::from(led.nearest_standard_ohms)),
        });
        println!("{}", check);
    }
}
