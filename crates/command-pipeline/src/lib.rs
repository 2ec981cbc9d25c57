//! command-pipeline: from one raw model reply to validated motor actions
//!
//! The interpreter extracts tool invocations from a chat reply, re-validates
//! every argument against the tool catalog and dispatches valid calls to the
//! motor registry. The controller wraps gateway call + interpretation in a
//! bounded retry, because the model's function-calling output is not
//! guaranteed reliable per call.

mod outcome;
pub use outcome::{CommandOutcome, CommandResult};

mod interpret;
pub use interpret::{interpret, CallError};

mod controller;
pub use controller::{CommandController, ControllerConfig};

#[cfg(test)]
pub(crate) mod testing;
