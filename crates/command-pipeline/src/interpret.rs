use crate::{CommandOutcome, CommandResult};
use actuator_link::ActuatorLink;
use llm_gateway::{ChatReply, GatewayError};
use motor_registry::{MotorError, MotorRegistry};
use serde_json::{Map, Value};
use thiserror::Error;
use tool_catalog::{
    validate_call, ToolSchema, ValidationError, DEFAULT_SPEED_DPS, FN_GET_STATUS,
    FN_MOVE_ACTUATOR, FN_STOP_ACTUATOR,
};

/// Failure of one tool invocation. Typed here, rendered into the
/// [`CommandResult`] error string at the aggregation boundary.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("undecodable arguments blob: {0}")]
    UndecodableBlob(#[from] serde_json::Error),
    #[error("arguments blob is not a JSON object")]
    BlobNotObject,
    #[error("unsupported arguments form: {0}")]
    UnsupportedForm(Value),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Dispatch(#[from] MotorError),
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    /// The catalog advertised a field this dispatch table cannot read;
    /// the two are meant to stay 1:1.
    #[error("catalog drift: missing {0}")]
    CatalogDrift(&'static str),
}

/// Turn one gateway result into a command outcome.
///
/// Ordered steps: gateway error short-circuits; a reply without tool
/// invocations fails with its own diagnostic text; otherwise every
/// invocation is decoded, validated against the catalog and dispatched.
/// One invocation's failure never aborts the others.
pub fn interpret<L: ActuatorLink>(
    reply: Result<ChatReply, GatewayError>,
    catalog: &[ToolSchema],
    registry: &mut MotorRegistry<L>,
) -> CommandOutcome {
    let reply = match reply {
        Ok(r) => r,
        Err(e) => return CommandOutcome::failure(e.to_string()),
    };

    let calls = match reply.message.tool_calls {
        Some(calls) if !calls.is_empty() => calls,
        _ => {
            // Distinct text from transport failures, same retry treatment.
            tracing::warn!(
                content = %reply.message.content,
                "model returned no tool invocation"
            );
            return CommandOutcome::failure("model returned no tool invocation");
        }
    };

    let mut results = Vec::with_capacity(calls.len());
    for call in calls {
        let name = call.function.name;
        let args = match decode_arguments(call.function.arguments) {
            Ok(args) => args,
            Err(e) => {
                results.push(CommandResult::failed(name, Value::Null, e.to_string()));
                continue;
            }
        };
        let args_value = Value::Object(args.clone());

        if let Err(e) = validate_call(catalog, &name, &args) {
            tracing::warn!(function = %name, "rejected invocation: {e}");
            let error = CallError::from(e);
            results.push(CommandResult::failed(name, args_value, error.to_string()));
            continue;
        }

        // Dispatch table kept 1:1 with the catalog.
        let result = match dispatch(registry, &name, &args) {
            Ok(payload) => CommandResult::ok(name, args_value, payload),
            Err(e) => CommandResult::failed(name, args_value, e.to_string()),
        };
        results.push(result);
    }

    CommandOutcome::from_results(results)
}

/// Accept both wire forms of `arguments`: a JSON-encoded string blob or an
/// already-structured object.
fn decode_arguments(raw: Value) -> Result<Map<String, Value>, CallError> {
    match raw {
        Value::Object(map) => Ok(map),
        Value::String(blob) => match serde_json::from_str::<Value>(&blob)? {
            Value::Object(map) => Ok(map),
            _ => Err(CallError::BlobNotObject),
        },
        other => Err(CallError::UnsupportedForm(other)),
    }
}

fn dispatch<L: ActuatorLink>(
    registry: &mut MotorRegistry<L>,
    name: &str,
    args: &Map<String, Value>,
) -> Result<Value, CallError> {
    // Fields are schema-validated by now; missing/mistyped values here mean
    // the catalog and this table have drifted apart.
    let motor_id = args
        .get("motor_id")
        .and_then(Value::as_str)
        .ok_or(CallError::CatalogDrift("motor_id"))?;

    match name {
        FN_MOVE_ACTUATOR => {
            let angle = args
                .get("angle")
                .and_then(Value::as_f64)
                .ok_or(CallError::CatalogDrift("angle"))?;
            let speed = args
                .get("speed")
                .and_then(Value::as_f64)
                .unwrap_or(DEFAULT_SPEED_DPS);
            Ok(registry.move_to(motor_id, angle, speed)?)
        }
        FN_GET_STATUS => Ok(registry.status(motor_id)?),
        FN_STOP_ACTUATOR => Ok(registry.stop(motor_id)?),
        other => Err(CallError::UnknownFunction(other.to_string())),
    }
}
