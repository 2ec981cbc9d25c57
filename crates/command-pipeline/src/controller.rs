use crate::{interpret, CommandOutcome};
use actuator_link::ActuatorLink;
use llm_gateway::RequestIntent;
use motor_registry::MotorRegistry;
use serde::{Deserialize, Serialize};
use tool_catalog::ToolSchema;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Full gateway+interpretation attempts per command. A malformed reply
    /// may be a one-off sampling artifact, so the whole round-trip is
    /// retried, not just the parse. No backoff between attempts.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    5
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

/// Orchestrates one end-to-end command: gateway call, interpretation,
/// bounded retry. Owns the registry for the process lifetime.
pub struct CommandController<G: RequestIntent, L: ActuatorLink> {
    gateway: G,
    catalog: Vec<ToolSchema>,
    registry: MotorRegistry<L>,
    config: ControllerConfig,
}

impl<G: RequestIntent, L: ActuatorLink> CommandController<G, L> {
    pub fn new(
        gateway: G,
        catalog: Vec<ToolSchema>,
        registry: MotorRegistry<L>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            gateway,
            catalog,
            registry,
            config,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn registry(&self) -> &MotorRegistry<L> {
        &self.registry
    }

    /// Resolve one user command, retrying the full round-trip on failure.
    ///
    /// Stops on the first successful outcome; once the attempt bound is
    /// spent, returns the last outcome obtained, never a synthesized error.
    pub fn execute(&mut self, user_text: &str) -> CommandOutcome {
        tracing::info!(command = user_text, "executing natural-language command");
        let mut last = CommandOutcome::failure("no attempts made");
        for attempt in 1..=self.config.max_attempts {
            let reply = self.gateway.request_intent(user_text);
            let mut outcome = interpret(reply, &self.catalog, &mut self.registry);
            outcome.attempts = attempt;
            if outcome.success {
                tracing::info!(attempt, "command succeeded");
                return outcome;
            }
            tracing::warn!(
                attempt,
                max_attempts = self.config.max_attempts,
                error = outcome.error.as_deref().unwrap_or("per-call failure"),
                "attempt unsuccessful"
            );
            last = outcome;
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        reply_with_calls, reply_without_calls, simulated_registry, ScriptedGateway,
    };
    use motor_registry::MotorStatus;
    use serde_json::json;

    fn catalog() -> Vec<ToolSchema> {
        tool_catalog::catalog(&[
            "motor_1".to_string(),
            "motor_2".to_string(),
            "motor_3".to_string(),
        ])
    }

    fn controller_with_script(
        script: Vec<Result<llm_gateway::ChatReply, llm_gateway::GatewayError>>,
    ) -> CommandController<ScriptedGateway, actuator_link::SimulatedLink> {
        CommandController::new(
            ScriptedGateway::new(script),
            catalog(),
            simulated_registry(),
            ControllerConfig::default(),
        )
    }

    #[test]
    fn test_no_invocation_consumes_exactly_five_attempts() {
        let script = (0..5)
            .map(|_| Ok(reply_without_calls("cannot comply")))
            .collect();
        let mut controller = controller_with_script(script);
        let outcome = controller.execute("wave the flag");
        assert!(!outcome.success);
        assert_eq!(outcome.attempts, 5);
        assert_eq!(controller.gateway().calls(), 5);
        assert_eq!(
            outcome.error.as_deref(),
            Some("model returned no tool invocation")
        );
    }

    #[test]
    fn test_first_success_stops_retrying() {
        let script = vec![
            Ok(reply_without_calls("hmm")),
            Ok(reply_with_calls(vec![(
                "move_actuator",
                json!({"motor_id": "motor_1", "angle": 30}),
            )])),
            Ok(reply_without_calls("never consulted")),
        ];
        let mut controller = controller_with_script(script);
        let outcome = controller.execute("rotate motor 1 to 30 degrees");
        assert!(outcome.success);
        assert_eq!(outcome.attempts, 2);
        assert_eq!(controller.gateway().calls(), 2);
    }

    #[test]
    fn test_last_outcome_is_returned_verbatim() {
        let script = vec![
            Ok(reply_without_calls("")),
            Ok(reply_without_calls("")),
            Ok(reply_without_calls("")),
            Ok(reply_without_calls("")),
            Ok(reply_with_calls(vec![(
                "move_actuator",
                json!({"motor_id": "motor_1", "angle": 500}),
            )])),
        ];
        let mut controller = controller_with_script(script);
        let outcome = controller.execute("spin it way past the end stop");
        assert!(!outcome.success);
        assert_eq!(outcome.attempts, 5);
        // The final attempt's per-call validation failure, not a synthesized error
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.results[0]
            .error
            .as_deref()
            .unwrap_or("")
            .contains("angle"));
    }

    #[test]
    fn test_gateway_errors_are_data_not_panics() {
        let script = (0..5)
            .map(|_| Err(llm_gateway::GatewayError::Decode("boom".to_string())))
            .collect();
        let mut controller = controller_with_script(script);
        let outcome = controller.execute("rotate motor 2");
        assert!(!outcome.success);
        assert_eq!(outcome.attempts, 5);
        assert!(outcome.error.as_deref().unwrap_or("").contains("boom"));
    }

    #[test]
    fn test_attempt_bound_is_configurable() {
        let script = vec![Ok(reply_without_calls("no")), Ok(reply_without_calls("no"))];
        let mut controller = CommandController::new(
            ScriptedGateway::new(script),
            catalog(),
            simulated_registry(),
            ControllerConfig { max_attempts: 2 },
        );
        let outcome = controller.execute("anything");
        assert_eq!(outcome.attempts, 2);
        assert_eq!(controller.gateway().calls(), 2);
    }

    #[test]
    fn test_end_to_end_rotate_motor_two() {
        // "rotate motor 2 to 45 degrees at 30 degrees per second"
        let script = vec![Ok(reply_with_calls(vec![(
            "move_actuator",
            json!({"motor_id": "motor_2", "angle": 45, "speed": 30}),
        )]))];
        let mut controller = controller_with_script(script);
        let outcome = controller.execute("rotate motor 2 to 45 degrees at 30 degrees per second");

        assert!(outcome.success);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].function, "move_actuator");

        let motor = controller.registry().motor("motor_2").unwrap();
        assert_eq!(motor.angle, 45.0);
        assert_eq!(motor.status, MotorStatus::Moving);
    }
}
