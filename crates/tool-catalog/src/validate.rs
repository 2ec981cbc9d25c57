use crate::schema::{find, PropertySchema, ToolSchema};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    #[error("{function}: missing required field {field}")]
    MissingField { function: String, field: String },
    #[error("{function}: unknown field {field}")]
    UnknownField { function: String, field: String },
    #[error("{field}: expected {expected}")]
    WrongType { field: String, expected: &'static str },
    #[error("{field}: value {value} outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{field}: {value:?} is not an allowed value")]
    NotInEnum { field: String, value: String },
}

/// Re-validate one decoded tool invocation against the catalog.
///
/// All checks run against the schema, never against the model's claimed
/// types: unknown function, missing required fields, unknown fields, field
/// types, numeric bounds and enum membership.
pub fn validate_call(
    catalog: &[ToolSchema],
    name: &str,
    args: &Map<String, Value>,
) -> Result<(), ValidationError> {
    let schema = find(catalog, name)
        .ok_or_else(|| ValidationError::UnknownFunction(name.to_string()))?;
    let params = &schema.function.parameters;

    for required in &params.required {
        if !args.contains_key(required) {
            return Err(ValidationError::MissingField {
                function: name.to_string(),
                field: required.clone(),
            });
        }
    }

    for (field, value) in args {
        let Some(prop) = params.properties.get(field) else {
            return Err(ValidationError::UnknownField {
                function: name.to_string(),
                field: field.clone(),
            });
        };
        validate_field(field, prop, value)?;
    }

    Ok(())
}

fn validate_field(
    field: &str,
    prop: &PropertySchema,
    value: &Value,
) -> Result<(), ValidationError> {
    match prop.kind.as_str() {
        "string" => {
            let Some(s) = value.as_str() else {
                return Err(ValidationError::WrongType {
                    field: field.to_string(),
                    expected: "string",
                });
            };
            if let Some(allowed) = &prop.one_of {
                if !allowed.iter().any(|a| a == s) {
                    return Err(ValidationError::NotInEnum {
                        field: field.to_string(),
                        value: s.to_string(),
                    });
                }
            }
            Ok(())
        }
        "number" => {
            let Some(n) = value.as_f64() else {
                return Err(ValidationError::WrongType {
                    field: field.to_string(),
                    expected: "number",
                });
            };
            let min = prop.minimum.unwrap_or(f64::NEG_INFINITY);
            let max = prop.maximum.unwrap_or(f64::INFINITY);
            if n < min || n > max {
                return Err(ValidationError::OutOfRange {
                    field: field.to_string(),
                    value: n,
                    min,
                    max,
                });
            }
            Ok(())
        }
        // The catalog is built in this crate; only the two kinds above exist.
        _ => Err(ValidationError::WrongType {
            field: field.to_string(),
            expected: "supported type",
        }),
    }
}
