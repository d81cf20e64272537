use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::Parser;
use clinic_queue_shell::{Args, Shell};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the rendered board.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();
    info!(consultation_minutes = config.consultation_minutes, "front desk open");

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut shell = Shell::new(stdin.lock(), io::stdout().lock(), config, args.format())
        .with_prompt(interactive);
    shell.run().context("front desk session failed")?;

    info!(left_waiting = shell.queue().len(), "front desk closed");
    Ok(())
}
