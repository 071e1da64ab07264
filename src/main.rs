//! CLI entry point for surveyor.

mod cli;
mod cmd;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

fn main() {
    init_tracing();

    // Usage errors exit with 1 like every other failure; help and version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Commands::Validate { path, format } => {
            let config = cmd::load_config(&cli.config)?;
            cmd::validate::cmd_validate(&path, format, &config)
        }
        Commands::Generate { id } => {
            let config = cmd::load_config(&cli.config)?;
            cmd::generate::cmd_generate(&id, &config)
        }
        Commands::RebuildIndex => {
            let config = cmd::load_config(&cli.config)?;
            cmd::index::cmd_rebuild_index(&config)
        }
        Commands::Version { verbose } => cmd::util::cmd_version(verbose),
    }
}
