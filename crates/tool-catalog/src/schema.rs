use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const FN_MOVE_ACTUATOR: &str = "move_actuator";
pub const FN_GET_STATUS: &str = "get_status";
pub const FN_STOP_ACTUATOR: &str = "stop_actuator";

/// Speed applied to `move_actuator` when the model omits the field.
pub const DEFAULT_SPEED_DPS: f64 = 50.0;

/// One callable action, shaped exactly as the chat endpoint expects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionDecl,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub description: String,
    pub parameters: ParameterSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: BTreeMap<String, PropertySchema>,
    #[serde(default)]
    pub required: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl ToolSchema {
    fn function(name: &str, description: &str, parameters: ParameterSchema) -> Self {
        Self {
            kind: "function".to_string(),
            function: FunctionDecl {
                name: name.to_string(),
                description: description.to_string(),
                parameters,
            },
        }
    }
}

fn motor_id_property(motor_ids: &[String]) -> PropertySchema {
    PropertySchema {
        kind: "string".to_string(),
        description: format!("Motor id ({})", motor_ids.join(", ")),
        one_of: Some(motor_ids.to_vec()),
        minimum: None,
        maximum: None,
    }
}

fn number_property(description: &str, minimum: f64, maximum: f64) -> PropertySchema {
    PropertySchema {
        kind: "number".to_string(),
        description: description.to_string(),
        one_of: None,
        minimum: Some(minimum),
        maximum: Some(maximum),
    }
}

/// Build the catalog for the given motor id set. The result is immutable for
/// the process lifetime and shared by reference with the gateway and the
/// interpreter. Extending it requires a matching interpreter dispatch arm.
pub fn catalog(motor_ids: &[String]) -> Vec<ToolSchema> {
    let move_params = ParameterSchema {
        kind: "object".to_string(),
        properties: BTreeMap::from([
            ("motor_id".to_string(), motor_id_property(motor_ids)),
            (
                "angle".to_string(),
                number_property("Target angle in degrees, -180 to 180", -180.0, 180.0),
            ),
            (
                "speed".to_string(),
                number_property("Rotation speed in degrees per second, 1 to 100", 1.0, 100.0),
            ),
        ]),
        required: vec!["motor_id".to_string(), "angle".to_string()],
    };

    let id_only_params = || ParameterSchema {
        kind: "object".to_string(),
        properties: BTreeMap::from([("motor_id".to_string(), motor_id_property(motor_ids))]),
        required: vec!["motor_id".to_string()],
    };
    let status_params = id_only_params();
    let stop_params = id_only_params();

    vec![
        ToolSchema::function(
            FN_MOVE_ACTUATOR,
            "Rotate the given motor to a target angle at a given speed",
            move_params,
        ),
        ToolSchema::function(
            FN_GET_STATUS,
            "Read the current status of the given motor",
            status_params,
        ),
        ToolSchema::function(
            FN_STOP_ACTUATOR,
            "Stop the given motor immediately",
            stop_params,
        ),
    ]
}

/// Look up a catalog entry by function name.
pub(crate) fn find<'a>(catalog: &'a [ToolSchema], name: &str) -> Option<&'a ToolSchema> {
    catalog.iter().find(|t| t.function.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> Vec<String> {
        vec!["motor_1".to_string(), "motor_2".to_string()]
    }

    #[test]
    fn test_catalog_has_three_actions() {
        let cat = catalog(&ids());
        let names: Vec<&str> = cat.iter().map(|t| t.function.name.as_str()).collect();
        assert_eq!(names, vec![FN_MOVE_ACTUATOR, FN_GET_STATUS, FN_STOP_ACTUATOR]);
    }

    #[test]
    fn test_wire_shape_matches_function_calling_format() {
        let cat = catalog(&ids());
        let value = serde_json::to_value(&cat[0]).unwrap();
        assert_eq!(value["type"], "function");
        assert_eq!(value["function"]["name"], "move_actuator");
        assert_eq!(value["function"]["parameters"]["type"], "object");
        assert_eq!(
            value["function"]["parameters"]["properties"]["motor_id"]["enum"],
            serde_json::json!(["motor_1", "motor_2"])
        );
        assert_eq!(
            value["function"]["parameters"]["properties"]["angle"]["minimum"],
            serde_json::json!(-180.0)
        );
        assert_eq!(
            value["function"]["parameters"]["required"],
            serde_json::json!(["motor_id", "angle"])
        );
    }

    #[test]
    fn test_speed_is_optional() {
        let cat = catalog(&ids());
        let move_schema = find(&cat, FN_MOVE_ACTUATOR).unwrap();
        assert!(!move_schema
            .function
            .parameters
            .required
            .contains(&"speed".to_string()));
    }
}
