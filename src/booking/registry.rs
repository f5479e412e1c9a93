use crate::config::ToolsConfig;
use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Value};

use super::stubs;

pub const CHECK_ROOM_AVAILABILITY: &str = "check_room_availability";
pub const MAKE_RESERVATION: &str = "make_reservation";

pub type ToolHandler = fn(&Value) -> Result<String, String>;

pub struct BookingTool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub handler: ToolHandler,
}

/// Function-calling tools offered to the model, in registration order.
pub struct ToolRegistry {
    tools: Vec<BookingTool>,
    validate_arguments: bool,
}

fn stay_properties() -> serde_json::Map<String, Value> {
    let properties = json!({
        "hotelName": {
            "type": "string",
            "description": "The name of the hotel"
        },
        "checkInDate": {
            "type": "string",
            "description": "Check-in date in YYYY-MM-DD format"
        },
        "checkOutDate": {
            "type": "string",
            "description": "Check-out date in YYYY-MM-DD format"
        },
        "roomType": {
            "type": "string",
            "description": "Type of room"
        }
    });
    properties.as_object().cloned().unwrap_or_default()
}

impl ToolRegistry {
    pub fn new(config: &ToolsConfig) -> Self {
        let mut registry = Self {
            tools: Vec::new(),
            validate_arguments: config.validate_arguments,
        };
        registry.register_booking_tools(config);
        registry
    }

    fn register_booking_tools(&mut self, config: &ToolsConfig) {
        if config.is_tool_enabled(CHECK_ROOM_AVAILABILITY) {
            self.tools.push(BookingTool {
                name: CHECK_ROOM_AVAILABILITY.to_string(),
                description: "Check the availability of rooms in a given hotel".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": stay_properties(),
                    "required": ["hotelName", "checkInDate", "checkOutDate", "roomType"]
                }),
                handler: stubs::handle_check_room_availability,
            });
        }

        if config.is_tool_enabled(MAKE_RESERVATION) {
            let mut properties = stay_properties();
            properties.insert(
                "guestName".to_string(),
                json!({
                    "type": "string",
                    "description": "Name of the guest"
                }),
            );
            self.tools.push(BookingTool {
                name: MAKE_RESERVATION.to_string(),
                description: "Make a reservation at a hotel".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": properties,
                    "required": ["hotelName", "checkInDate", "checkOutDate", "roomType", "guestName"]
                }),
                handler: stubs::handle_make_reservation,
            });
        }
    }

    pub fn get(&self, name: &str) -> Option<&BookingTool> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn list(&self) -> &[BookingTool] {
        &self.tools
    }

    pub fn validate_arguments(&self, tool_name: &str, arguments: &Value) -> Result<(), String> {
        let tool = self
            .get(tool_name)
            .ok_or_else(|| format!("Tool '{}' not found", tool_name))?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&tool.input_schema)
            .map_err(|e| format!("Invalid tool schema: {}", e))?;

        if let Err(errors) = schema.validate(arguments) {
            let error_messages: Vec<String> = errors
                .map(|e| format!("{}: {}", e.instance_path, e))
                .collect();
            return Err(error_messages.join("; "));
        }

        Ok(())
    }

    /// Run a tool by name. Schema validation only happens when enabled in
    /// the config; the stubs themselves accept any argument object.
    pub fn call_tool(&self, tool_name: &str, arguments: &Value) -> Result<String, String> {
        if self.validate_arguments {
            self.validate_arguments(tool_name, arguments)?;
        }

        let tool = self
            .get(tool_name)
            .ok_or_else(|| format!("Tool '{}' not found", tool_name))?;

        (tool.handler)(arguments)
    }
}

pub fn format_tools_for_llm(registry: &ToolRegistry) -> Vec<Value> {
    registry
        .list()
        .iter()
        .map(|tool| {
            json!({
                "type": "function",
                "function": {
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.input_schema,
                }
            })
        })
        .collect()
}
