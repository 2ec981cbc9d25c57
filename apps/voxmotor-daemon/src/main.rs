//! voxmotor-daemon: natural-language motor control daemon
//!
//! Polls a command source on a fixed cadence, filters recogniser artifacts,
//! coalesces duplicates and hands each fresh command to the pipeline:
//! text -> model gateway -> interpretation -> motor registry.

use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing::{error, info, warn};

use actuator_link::ActuatorLink;
use command_pipeline::{CommandController, CommandOutcome, ControllerConfig};
use llm_gateway::{GatewayConfig, ModelGateway};
use motor_registry::{MotorRegistry, DEFAULT_MOTOR_IDS};

mod source;
use source::{screen_command, CommandSource, Debouncer, Disposition, StdinSource};

#[derive(Parser)]
#[command(name = "voxmotor-daemon")]
#[command(about = "Voice-to-motor control via LLM function calling")]
struct Args {
    /// Model name served by the chat endpoint
    #[arg(long, default_value = "qwen2.5:7b-instruct")]
    model: String,

    /// Base URL of the chat service
    #[arg(long, default_value = "http://localhost:11434")]
    url: String,

    /// Command polling cadence in seconds
    #[arg(long, default_value_t = 3)]
    interval_secs: u64,

    /// Full model round-trips per command before giving up
    #[arg(long, default_value_t = 5)]
    max_attempts: u32,

    /// Execute one command and exit
    #[arg(long)]
    test_command: Option<String>,

    /// Drive physical motors over SocketCAN instead of the simulation
    #[cfg(feature = "rmd-can")]
    #[arg(long)]
    hardware: bool,

    /// CAN interface for the hardware backend
    #[cfg(feature = "rmd-can")]
    #[arg(long, default_value = "can0")]
    can_iface: String,
}

fn main() -> Result<()> {
    setup_tracing();

    let args = Args::parse();

    info!("voxmotor daemon starting");
    info!("model: {} at {}", args.model, args.url);

    let registry = build_registry(&args)?;
    let motor_ids = registry.ids();
    info!(motors = ?motor_ids, "motor registry ready");

    let catalog = tool_catalog::catalog(&motor_ids);
    let gateway_config = GatewayConfig {
        model: args.model.clone(),
        base_url: args.url.clone(),
        ..GatewayConfig::default()
    };
    let gateway = ModelGateway::new(gateway_config, catalog.clone())?;
    if !gateway.ping() {
        warn!("model service not reachable at {}; commands will fail until it is up", args.url);
    }

    let mut controller = CommandController::new(
        gateway,
        catalog,
        registry,
        ControllerConfig {
            max_attempts: args.max_attempts,
        },
    );

    if let Some(command) = args.test_command {
        let outcome = controller.execute(&command);
        report(&outcome);
        return Ok(());
    }

    let mut commands = StdinSource::new();
    let mut debouncer = Debouncer::default();
    loop {
        match commands.next_command() {
            Some(text) => match screen_command(&mut debouncer, &text) {
                Disposition::Forward => {
                    info!("received command: {text}");
                    // Every pipeline failure comes back as data, so the
                    // polling loop itself never has to recover from one.
                    let outcome = controller.execute(&text);
                    report(&outcome);
                }
                Disposition::Artifact => info!("skipping speech artifact: {text}"),
                Disposition::Duplicate => info!("duplicate command coalesced"),
            },
            None => {
                info!("command source exhausted, shutting down");
                break;
            }
        }
        std::thread::sleep(Duration::from_secs(args.interval_secs));
    }

    Ok(())
}

fn report(outcome: &CommandOutcome) {
    match serde_json::to_string(outcome) {
        Ok(json) => info!("command result: {json}"),
        Err(e) => error!("unserializable outcome: {e}"),
    }
}

fn build_registry(args: &Args) -> Result<MotorRegistry<Box<dyn ActuatorLink>>> {
    #[cfg(feature = "rmd-can")]
    if args.hardware {
        let mut links: Vec<(String, Box<dyn ActuatorLink>)> = Vec::new();
        for (index, id) in DEFAULT_MOTOR_IDS.iter().enumerate() {
            let node = u8::try_from(index + 1)?;
            let link = actuator_link::RmdCanLink::open(&args.can_iface, node)
                .map_err(|e| anyhow::anyhow!("opening {} node {node}: {e}", args.can_iface))?;
            links.push((id.to_string(), Box::new(link)));
        }
        return Ok(MotorRegistry::new(links));
    }

    let _ = args;
    info!("using simulated actuator links");
    Ok(MotorRegistry::new(DEFAULT_MOTOR_IDS.iter().map(|id| {
        (
            id.to_string(),
            Box::new(actuator_link::SimulatedLink::new()) as Box<dyn ActuatorLink>,
        )
    })))
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
