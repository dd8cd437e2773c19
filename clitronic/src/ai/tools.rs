//! Tool Definitions
//!
//! The four tools the chat model may call, with their JSON input schemas,
//! and a registry that executes a named tool against a catalog. Results are
//! plain JSON objects the model relays to the user.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::calc::{calculate_resistor, ohms_law, OhmsInput, ResistorRequest};
use crate::knowledge::{builtin_catalog, Catalog, SearchQuery};

pub const LOOKUP_COMPONENT: &str = "lookup_component";
pub const SEARCH_COMPONENTS: &str = "search_components";
pub const CALCULATE_RESISTOR: &str = "calculate_resistor";
pub const OHMS_LAW: &str = "ohms_law";

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

#[derive(Debug, Deserialize)]
struct LookupArgs {
    query: String,
}

pub struct ToolRegistry<'a> {
    catalog: &'a Catalog,
}

impl ToolRegistry<'static> {
    pub fn builtin() -> Self {
        Self::new(builtin_catalog())
    }
}

impl<'a> ToolRegistry<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: LOOKUP_COMPONENT,
                description: "Look up detailed specifications, pinout, datasheet info, and tips for a specific electronic component. Use this when the user asks about a particular component by name.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The component name or id to look up (e.g. 'resistor', 'led', 'capacitor', 'transistor')"
                        }
                    },
                    "required": ["query"]
                }),
            },
            ToolDefinition {
                name: SEARCH_COMPONENTS,
                description: "Search the component knowledge base by category or keyword. Use this to list components or find components matching criteria.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "enum": ["passive", "active", "input", "output"],
                            "description": "Filter by component category"
                        },
                        "keyword": {
                            "type": "string",
                            "description": "Keyword to search in component names and descriptions"
                        }
                    }
                }),
            },
            ToolDefinition {
                name: CALCULATE_RESISTOR,
                description: "Calculate the correct resistor value for common scenarios: LED current limiting, voltage dividers, or pull-up/pull-down resistors.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "scenario": {
                            "type": "string",
                            "enum": ["led", "voltage_divider", "pullup"],
                            "description": "The type of resistor calculation"
                        },
                        "supply_voltage": { "type": "number", "description": "Supply voltage in volts" },
                        "forward_voltage": { "type": "number", "description": "LED forward voltage in volts (for LED scenario)" },
                        "desired_current_ma": { "type": "number", "description": "Desired current in milliamps (for LED scenario)" },
                        "output_voltage": { "type": "number", "description": "Desired output voltage (for voltage divider)" },
                        "r1_ohms": { "type": "number", "description": "Known resistor value in ohms (for voltage divider, provide R1 to calculate R2)" }
                    },
                    "required": ["scenario", "supply_voltage"]
                }),
            },
            ToolDefinition {
                name: OHMS_LAW,
                description: "Calculate voltage, current, resistance, or power using Ohm's law. Provide any two of the three values (V, I, R) to calculate the third, plus power.",
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "voltage": { "type": "number", "description": "Voltage in volts" },
                        "current_ma": { "type": "number", "description": "Current in milliamps" },
                        "resistance": { "type": "number", "description": "Resistance in ohms" }
                    }
                }),
            },
        ]
    }

    pub fn execute(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        tracing::debug!("Executing tool {} with {}", name, args);

        match name {
            LOOKUP_COMPONENT => {
                let args: LookupArgs = parse_args(name, args)?;
                Ok(self.lookup(&args.query))
            }
            SEARCH_COMPONENTS => {
                let query: SearchQuery = parse_args(name, args)?;
                let results = self.catalog.search(&query);
                Ok(json!({
                    "count": results.len(),
                    "components": results
                        .iter()
                        .map(|c| json!({
                            "id": c.id,
                            "name": c.name,
                            "category": c.category,
                            "description": c.description,
                        }))
                        .collect::<Vec<_>>(),
                }))
            }
            CALCULATE_RESISTOR => {
                let request: ResistorRequest = parse_args(name, args)?;
                Ok(calculate_resistor(&request).to_value())
            }
            OHMS_LAW => {
                let input: OhmsInput = parse_args(name, args)?;
                Ok(ohms_law(&input).to_value())
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    fn lookup(&self, query: &str) -> Value {
        match self.catalog.resolve(query) {
            Some(component) => json!({ "found": true, "component": component }),
            None => {
                let available = self.catalog.ids().collect::<Vec<_>>().join(", ");
                json!({
                    "found": false,
                    "message": format!(
                        "No component found matching \"{}\". Available components: {}.",
                        query, available
                    ),
                })
            }
        }
    }
}

/// Absent arguments are treated as an empty object
fn parse_args<T: for<'de> Deserialize<'de>>(tool: &str, args: Value) -> Result<T, ToolError> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|source| ToolError::InvalidArguments {
        tool: tool.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_cover_all_tools() {
        let names: Vec<&str> = ToolRegistry::builtin()
            .definitions()
            .iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(
            names,
            vec![LOOKUP_COMPONENT, SEARCH_COMPONENTS, CALCULATE_RESISTOR, OHMS_LAW]
        );
    }

    #[test]
    fn test_lookup_found_and_missing() {
        let registry = ToolRegistry::builtin();

        let found = registry
            .execute(LOOKUP_COMPONENT, json!({ "query": "LED" }))
            .unwrap();
        assert_eq!(found["found"], true);
        assert_eq!(found["component"]["id"], "led");
        assert!(found["component"]["circuitExample"].is_string());

        let missing = registry
            .execute(LOOKUP_COMPONENT, json!({ "query": "warp drive" }))
            .unwrap();
        assert_eq!(missing["found"], false);
        let message = missing["message"].as_str().unwrap();
        assert!(message.starts_with("No component found matching \"warp drive\""));
        assert!(message.contains("resistor, led, button"));
    }

    #[test]
    fn test_search_shape() {
        let result = ToolRegistry::builtin()
            .execute(SEARCH_COMPONENTS, json!({ "category": "passive" }))
            .unwrap();
        assert_eq!(result["count"], 2);
        assert_eq!(result["components"][0]["id"], "resistor");
        assert_eq!(result["components"][0]["category"], "passive");
        assert!(result["components"][0].get("specs").is_none());
    }

    #[test]
    fn test_search_without_arguments() {
        let result = ToolRegistry::builtin()
            .execute(SEARCH_COMPONENTS, Value::Null)
            .unwrap();
        assert_eq!(result["count"], 16);
    }

    #[test]
    fn test_calculations() {
        let registry = ToolRegistry::builtin();
        let led = registry
            .execute(
                CALCULATE_RESISTOR,
                json!({ "scenario": "led", "supply_voltage": 5, "forward_voltage": 2, "desired_current_ma": 20 }),
            )
            .unwrap();
        assert_eq!(led["nearest_standard"], "150 Ω");

        let ohms = registry
            .execute(OHMS_LAW, json!({ "voltage": 5, "current_ma": 20 }))
            .unwrap();
        assert_eq!(ohms["resistance"], "250.0 Ω");
        assert_eq!(ohms["power"], "100.0 mW");
    }

    #[test]
    fn test_errors() {
        let registry = ToolRegistry::builtin();
        assert!(matches!(
            registry.execute("summon_datasheet", json!({})),
            Err(ToolError::UnknownTool(name)) if name == "summon_datasheet"
        ));
        assert!(matches!(
            registry.execute(SEARCH_COMPONENTS, json!({ "category": "magnetic" })),
            Err(ToolError::InvalidArguments { .. })
        ));
        assert!(matches!(
            registry.execute(LOOKUP_COMPONENT, json!({})),
            Err(ToolError::InvalidArguments { .. })
        ));
    }
}
