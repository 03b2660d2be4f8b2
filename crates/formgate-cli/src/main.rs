//! `formgate` binary: sign-up and login screens in the terminal.

use std::{process::ExitCode, time::Duration};

use clap::Parser;
use formgate_app::{App, Runtime, ValidationRules};
use formgate_cli::{CliError, TerminalDriver};
use formgate_core::LengthBound;
use formgate_harness::{BackendConfig, MemoryBackend};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

/// Sign-up and login forms with live validation.
#[derive(Debug, Parser)]
#[command(name = "formgate", version, about)]
struct Args {
    /// Simulated backend latency in milliseconds
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Minimum username length
    #[arg(long, default_value_t = 3)]
    username_min: usize,

    /// Maximum username length
    #[arg(long, default_value_t = 50)]
    username_max: usize,

    /// Minimum password length
    #[arg(long, default_value_t = 8)]
    password_min: usize,
}

impl Args {
    fn rules(&self) -> ValidationRules {
        let mut rules = ValidationRules::default();
        rules.username = LengthBound::new(self.username_min, self.username_max);
        rules.password.length.min = self.password_min;
        rules
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "formgate exited with an error");
            ExitCode::FAILURE
        },
    }
}

async fn run(args: &Args) -> Result<(), CliError> {
    let backend =
        MemoryBackend::new(BackendConfig { latency: Duration::from_millis(args.latency_ms) });
    let app = App::new(&args.rules())?;
    let driver = TerminalDriver::new(BufReader::new(tokio::io::stdin()), std::io::stdout(), backend);

    let app = Runtime::new(driver, app).run().await?;
    tracing::info!(screen = %app.screen(), signed_in = ?app.signed_in(), "session ended");
    Ok(())
}
