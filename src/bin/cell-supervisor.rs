//! Supervisor entry point.
//!
//! Keeps the service process alive across crashes, the role a process
//! manager would play on a platform that only runs one command.

use clap::Parser;

use pricing_cell::config::SupervisorConfig;
use pricing_cell::lifecycle::Shutdown;
use pricing_cell::observability;
use pricing_cell::supervisor::Supervisor;

#[derive(Parser)]
#[command(name = "cell-supervisor")]
#[command(about = "Restart loop for the pricing cell service", long_about = None)]
struct Cli {
    /// Seconds to wait before restarting a dead child.
    #[arg(long, default_value_t = 5)]
    delay: u64,

    /// Grow the delay exponentially on consecutive failures.
    #[arg(long)]
    backoff: bool,

    /// Ceiling for the grown delay, in seconds.
    #[arg(long, default_value_t = 300)]
    max_delay: u64,

    /// A child that survives this long resets the failure streak.
    #[arg(long, default_value_t = 60)]
    stable_after: u64,

    /// Give up after this many consecutive failed starts.
    #[arg(long)]
    max_restarts: Option<u32>,

    /// Command to run and keep alive.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    observability::logging::init(false);

    let cli = Cli::parse();
    let config = SupervisorConfig {
        restart_delay_secs: cli.delay,
        backoff_enabled: cli.backoff,
        max_delay_secs: cli.max_delay,
        stable_after_secs: cli.stable_after,
        max_restarts: cli.max_restarts,
    };

    let supervisor = match Supervisor::new(cli.command, config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Invalid supervisor invocation");
            return std::process::ExitCode::from(2);
        }
    };

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    match supervisor.run(shutdown.subscribe()).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Supervision ended");
            std::process::ExitCode::FAILURE
        }
    }
}
