// SPDX-License-Identifier: GPL-3.0-only
//! Command-line arguments

use std::str::FromStr;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use lguf_brightness::devices::DeviceSpec;

/// Control the backlight of an LG UltraFine display
#[derive(Debug, Parser)]
#[command(name = "lguf", version)]
pub struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the current brightness
    Get,
    /// Set the brightness to a raw value or a percentage (e.g. 27000 or 50%)
    Set { level: Level },
    /// Raise the brightness by a raw amount or a percentage of the full scale
    Raise { amount: Level },
    /// Lower the brightness by a raw amount or a percentage of the full scale
    Lower { amount: Level },
}

/// Brightness argument, either raw protocol units or a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Raw(u16),
    Percent(u16),
}

impl Level {
    /// Absolute brightness value for this level
    pub fn to_value(self, spec: &DeviceSpec) -> u16 {
        match self {
            Level::Raw(value) => value,
            Level::Percent(percentage) => spec.percentage_to_value(percentage),
        }
    }

    /// Relative step for this level
    pub fn to_step(self, spec: &DeviceSpec) -> u16 {
        match self {
            Level::Raw(value) => value,
            Level::Percent(percentage) => spec.percentage_to_step(percentage),
        }
    }
}

impl FromStr for Level {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        match s.strip_suffix('%') {
            Some(percentage) => {
                let percentage: u16 = percentage
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid percentage '{}'", s))?;
                if percentage > 100 {
                    bail!("percentage {} is above 100%", percentage);
                }
                Ok(Level::Percent(percentage))
            }
            None => s
                .parse()
                .map(Level::Raw)
                .with_context(|| format!("invalid brightness value '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lguf_brightness::devices::lg::ultrafine;

    #[test]
    fn test_parse_raw_level() {
        assert_eq!("27000".parse::<Level>().unwrap(), Level::Raw(27000));
        assert_eq!(" 540 ".parse::<Level>().unwrap(), Level::Raw(540));
    }

    #[test]
    fn test_parse_percent_level() {
        assert_eq!("50%".parse::<Level>().unwrap(), Level::Percent(50));
        assert_eq!("0%".parse::<Level>().unwrap(), Level::Percent(0));
        assert_eq!("100%".parse::<Level>().unwrap(), Level::Percent(100));
    }

    #[test]
    fn test_parse_rejects_invalid_levels() {
        assert!("101%".parse::<Level>().is_err());
        assert!("-5".parse::<Level>().is_err());
        assert!("70000".parse::<Level>().is_err());
        assert!("bright".parse::<Level>().is_err());
        assert!("%".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_conversion() {
        let spec = ultrafine::SPEC;

        assert_eq!(Level::Raw(1234).to_value(&spec), 1234);
        assert_eq!(Level::Percent(100).to_value(&spec), 54000);
        assert_eq!(Level::Percent(0).to_value(&spec), 540);
        assert_eq!(Level::Percent(10).to_step(&spec), 5400);
        assert_eq!(Level::Raw(500).to_step(&spec), 500);
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["lguf", "-v", "set", "50%"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Set { level: Level::Percent(50) }));

        let cli = Cli::try_parse_from(["lguf", "lower", "540"]).unwrap();
        assert!(matches!(cli.command, Command::Lower { amount: Level::Raw(540) }));
    }
}
