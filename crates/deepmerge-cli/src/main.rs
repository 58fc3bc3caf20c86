use clap::Parser;
use tracing::Level;

mod cli;
mod commands;
mod diff;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let level = if cli.wants_debug_logs() {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
    commands::run_command(cli)
}
