use clap::Parser;
use marlin_testbench::{config, report, Timings};
use marlin_testbench::TestCoordinator;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exercise Marlin-family motion-controller firmware over a serial link.",
    long_about = "Runs a fixed sequence of subsystem test agents (hardware, stepper \
drivers, bed probe, safety interlocks) against the connected controller and prints \
a pass/fail summary. The exit code is zero only when every check passed."
)]
struct Args {
    /// Serial port path (e.g. /dev/ttyUSB0 or COM3). Prompts if omitted.
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate override.
    #[arg(short, long)]
    baud: Option<u32>,

    /// Path to a testbench.toml configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit the report as JSON instead of the text summary.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut settings = config.serial.connection_settings();
    if let Some(baud) = args.baud {
        settings.baud_rate = baud;
    }
    settings.port_name = match args.port {
        Some(port) => port,
        None => match prompt_for_port(&settings.port_name) {
            Ok(port) => port,
            Err(e) => {
                error!("failed to read port from stdin: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let timings: Timings = config.timings.timings();
    let mut coordinator = TestCoordinator::new(settings.clone(), timings);

    info!(port = %settings.port_name, "connecting to controller");
    if let Err(e) = coordinator.connect() {
        error!(port = %settings.port_name, "connection failed: {e}");
        return ExitCode::FAILURE;
    }

    let suite = match coordinator.run_all_tests() {
        Ok(suite) => suite,
        Err(e) => {
            error!("test run failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    let rendered = if args.json {
        match report::to_json(&suite) {
            Ok(json) => writeln!(stdout, "{json}"),
            Err(e) => {
                error!("failed to render JSON report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        report::print_summary(&suite, &mut stdout)
    };
    if let Err(e) = rendered {
        error!("failed to write report: {e}");
        return ExitCode::FAILURE;
    }

    if suite.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Ask for the serial port, falling back to the configured default.
fn prompt_for_port(default: &str) -> std::io::Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "Serial port [{default}]: ")?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    let trimmed = line.trim();
    Ok(if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    })
}
