//! # grblwire
//!
//! Command-line harness for the protocol layer. Loads a controller
//! configuration and a machine snapshot, then writes the requested frames
//! to stdout exactly as a host would receive them.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use grblwire::{
    decode_words, default_config_path, init_logging, AlarmCode, ClientTarget, Config,
    MachineStateSnapshot, Reporter, StatusCode, WriterTransport,
};
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type StdoutReporter = Reporter<WriterTransport<Stdout, io::Sink>>;

/// GRBL wire protocol frame generator
#[derive(Parser, Debug)]
#[command(name = "grblwire")]
#[command(version)]
#[command(long_version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
#[command(about = "Render GRBL controller protocol frames from a configuration and machine snapshot")]
struct Args {
    /// Configuration file (.toml or .json). Defaults to the user config directory.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Machine state snapshot as JSON. Defaults to an idle machine at home.
    #[arg(short, long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Realtime status reports (`?`)
    Status {
        /// Number of consecutive reports
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
    },
    /// Settings dump (`$$`)
    Settings,
    /// Coordinate parameters and probe result (`$#`)
    Params,
    /// Parser modal state (`$G`)
    Modes,
    /// Build info (`$I`)
    Info,
    /// Stored startup lines (`$N`)
    Startup,
    /// Help line (`$`)
    Help,
    /// Welcome banner sent after reset
    Banner,
    /// Alarm frame
    Alarm {
        /// Alarm code, 1 to 9
        code: u8,
    },
    /// Decode the numeric words of a command line
    Decode {
        /// Command line, e.g. `G1X10.5F300`
        line: String,
    },
    /// Write the default configuration to a file
    InitConfig {
        /// Destination (.toml or .json)
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.json)?;

    if let Command::InitConfig { path } = &args.command {
        Config::default()
            .save_to_file(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = load_config(args.config.as_deref())?;
    let snapshot = load_snapshot(args.snapshot.as_deref())?;

    let transport = WriterTransport::serial_only(io::stdout());
    let mut reporter = Reporter::new(transport, config.features.clone(), config.report.clone());

    run(&args.command, &config, &snapshot, &mut reporter)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let path = default_config_path()?;
            Ok(Config::load_or_default(&path)?)
        }
    }
}

fn load_snapshot(path: Option<&Path>) -> anyhow::Result<MachineStateSnapshot> {
    let Some(path) = path else {
        return Ok(MachineStateSnapshot::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot = serde_json::from_str(&content)
        .with_context(|| format!("Invalid snapshot {}", path.display()))?;
    debug!("Loaded snapshot from {}", path.display());
    Ok(snapshot)
}

fn run(
    command: &Command,
    config: &Config,
    snapshot: &MachineStateSnapshot,
    reporter: &mut StdoutReporter,
) -> anyhow::Result<()> {
    let client = ClientTarget::Serial;
    let settings = &config.settings;

    match command {
        Command::Status { count } => {
            for _ in 0..*count {
                reporter.realtime_status(client, snapshot, settings);
            }
        }
        Command::Settings => {
            reporter.settings(client, settings);
            reporter.status_message(client, StatusCode::Ok);
        }
        Command::Params => {
            let store = config.coordinates.to_store();
            if reporter.ngc_parameters(client, &store, snapshot, settings) {
                reporter.status_message(client, StatusCode::Ok);
            }
        }
        Command::Modes => {
            reporter.gcode_modes(client, snapshot, settings);
            reporter.status_message(client, StatusCode::Ok);
        }
        Command::Info => {
            reporter.build_info(client, &config.build_line);
            reporter.status_message(client, StatusCode::Ok);
        }
        Command::Startup => {
            for (index, line) in config.startup_lines.iter().enumerate() {
                let index = u8::try_from(index).context("startup line index")?;
                reporter.startup_line(client, index, line);
            }
            reporter.status_message(client, StatusCode::Ok);
        }
        Command::Help => {
            reporter.help_message(client);
            reporter.status_message(client, StatusCode::Ok);
        }
        Command::Banner => reporter.init_message(ClientTarget::All),
        Command::Alarm { code } => {
            let Some(alarm) = AlarmCode::from_code(*code) else {
                bail!("Unknown alarm code {}", code);
            };
            reporter.alarm_message(alarm);
        }
        Command::Decode { line } => decode_line(line, reporter),
        Command::InitConfig { .. } => {}
    }

    Ok(())
}

/// Echo the line, then print each word letter with its decoded value and
/// acknowledge. A line with a word that has no number is acknowledged with
/// the error alone.
fn decode_line(line: &str, reporter: &mut StdoutReporter) {
    let client = ClientTarget::Serial;
    reporter.echo_line_received(client, line);

    match decode_words(line) {
        Ok(words) => {
            for (letter, value) in words {
                reporter.message(client, &format!("{}={}", letter, value));
            }
            reporter.status_message(client, StatusCode::Ok);
        }
        Err(e) => {
            debug!("Rejected line {:?}: {}", line, e);
            reporter.status_message(client, e.status_code());
        }
    }
}
