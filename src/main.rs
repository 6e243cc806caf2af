//! mmjoy — print the first joystick's capabilities, then its state every tick.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{ArgAction, Parser};
use mmjoy::backends;
use mmjoy::config::{Backend, OutputFormat, PollConfig};
use mmjoy::{ChannelKind, DeviceEnumerator, DeviceState, Joystick, RawJoystickApi};
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mmjoy", version)]
#[command(about = "Poll a joystick through the Windows legacy multimedia API")]
struct Cli {
    /// TOML settings file. Flags given here override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between polls.
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Read this OS joystick slot instead of the first one found.
    #[arg(long)]
    device: Option<u32>,

    /// Print one JSON object per line.
    #[arg(long)]
    json: bool,

    /// Use a built-in simulated joystick instead of the OS.
    #[arg(long = "virtual")]
    use_virtual: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("mmjoy={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = match settings(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(2);
        }
    };

    let api: Arc<dyn RawJoystickApi> = match config.backend {
        Backend::System => backends::system_api(),
        #[cfg(feature = "virtual")]
        Backend::Virtual => Arc::new(backends::virtual_input::VirtualJoystickApi::demo()),
        #[cfg(not(feature = "virtual"))]
        Backend::Virtual => {
            error!("built without the `virtual` feature");
            return ExitCode::from(2);
        }
    };

    let Some(mut stick) = select(&DeviceEnumerator::new(api), config.device) else {
        println!("No joysticks");
        return ExitCode::from(1);
    };

    print_capabilities(&stick, config.output);

    let interval = config.interval();
    loop {
        print_state(stick.poll().as_ref(), config.output);
        std::thread::sleep(interval);
    }
}

fn settings(cli: &Cli) -> mmjoy::Result<PollConfig> {
    let mut config = match &cli.config {
        Some(path) => PollConfig::load(path)?,
        None => PollConfig::default(),
    };
    if let Some(ms) = cli.interval_ms {
        config.interval_ms = ms;
    }
    if cli.device.is_some() {
        config.device = cli.device;
    }
    if cli.json {
        config.output = OutputFormat::Json;
    }
    if cli.use_virtual {
        config.backend = Backend::Virtual;
    }
    Ok(config)
}

/// First enumerated joystick, or the one at `slot` when given.
fn select(enumerator: &DeviceEnumerator, slot: Option<u32>) -> Option<Joystick> {
    let mut sticks = enumerator.enumerate().into_iter();
    match slot {
        Some(id) => sticks.find(|s| s.id() == id),
        None => sticks.next(),
    }
}

fn print_capabilities(stick: &Joystick, output: OutputFormat) {
    let Some(caps) = stick.capabilities() else {
        return;
    };
    match output {
        OutputFormat::Json => {
            let line = serde_json::json!({ "id": stick.id(), "capabilities": caps });
            println!("{line}");
        }
        OutputFormat::Text => {
            println!("{stick}");
            println!(
                "  buttons={} axes={}/{} period={}..{}ms flags={:#x}",
                caps.button_count,
                caps.num_axes,
                caps.max_axes,
                caps.period_min,
                caps.period_max,
                caps.flags.bits()
            );
            for ch in caps.describe() {
                if ch.kind == ChannelKind::Axis {
                    println!("  {:<2} [{}..{}]", ch.name, ch.logical_min, ch.logical_max);
                }
            }
        }
    }
}

fn print_state(state: Option<&DeviceState>, output: OutputFormat) {
    match output {
        OutputFormat::Json => match serde_json::to_string(&state) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!("failed to encode state: {e}"),
        },
        OutputFormat::Text => match state {
            Some(state) => {
                let axes: Vec<String> = state
                    .axes
                    .iter()
                    .map(|(axis, value)| format!("{axis}={value}"))
                    .collect();
                let buttons: String = state
                    .buttons
                    .iter()
                    .map(|&b| if b { '1' } else { '0' })
                    .collect();
                let pov = if state.pov_centered() {
                    "-".to_string()
                } else {
                    state.pov.to_string()
                };
                println!("{} buttons=[{}] pov={}", axes.join(" "), buttons, pov);
            }
            None => println!("(no reading)"),
        },
    }
}
