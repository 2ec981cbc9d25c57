//! tool-catalog: the fixed catalog of model-callable motor actions
//!
//! The same schema serves two masters: it is advertised to the language model
//! in its native function-calling format, and it re-validates the arguments
//! the model sends back. The model's claimed types are never trusted.

mod schema;
pub use schema::{
    catalog, FunctionDecl, ParameterSchema, PropertySchema, ToolSchema, DEFAULT_SPEED_DPS,
    FN_GET_STATUS, FN_MOVE_ACTUATOR, FN_STOP_ACTUATOR,
};

mod validate;
pub use validate::{validate_call, ValidationError};
