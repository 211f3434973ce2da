// SPDX-License-Identifier: GPL-3.0-only

use std::process::ExitCode;

use clap::Parser;
use lguf_brightness::BrightnessSession;
use lguf_brightness::devices::lg::ultrafine;

use crate::cli::{Cli, Command};

#[macro_use]
extern crate tracing;

mod cli;

fn setup_logs(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "debug" } else { "warn" };
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new(format!(
        "warn,{}={level},lguf_brightness={level}",
        env!("CARGO_CRATE_NAME")
    )));

    if let Ok(journal_layer) = tracing_journald::layer() {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .with(journal_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    let spec = ultrafine::SPEC;
    let mut session = BrightnessSession::open()?;

    match command {
        Command::Get => {
            let value = session.get_brightness()?;
            println!("{} ({}%)", value, spec.value_to_percentage(value));
        }
        Command::Set { level } => {
            let value = level.to_value(&spec);
            session.set_brightness(value)?;
            info!("Brightness set to {}", value);
        }
        Command::Raise { amount } => {
            let value = session.raise_brightness(amount.to_step(&spec))?;
            info!("Brightness raised to {}", value);
        }
        Command::Lower { amount } => {
            let value = session.lower_brightness(amount.to_step(&spec))?;
            info!("Brightness lowered to {}", value);
        }
    }

    session.close()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logs(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
