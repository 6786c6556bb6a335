//! CLI for FAIR Signposting link-set validation.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use signpost_core::config;
use signpost_core::Validator;
use std::path::PathBuf;

use commands::{run_links, run_validate, ValidateOptions};

/// Top-level CLI for the signpost validator.
#[derive(Debug, Parser)]
#[command(name = "signpost")]
#[command(about = "Validate FAIR Signposting link sets (RFC 9264)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Validate a Link Set document against Signposting profiles.
    Validate {
        /// Path to the Link Set JSON document.
        path: PathBuf,

        /// Validator to run; repeat for several. Overrides the configured list.
        #[arg(long = "validator", value_name = "NAME")]
        validators: Vec<Validator>,

        /// Fail on warnings as well as errors.
        #[arg(long)]
        deny_warnings: bool,

        /// Validate each anchor context separately.
        #[arg(long)]
        per_anchor: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Config file to use instead of ~/.config/signpost/config.toml.
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Print the links of a Link Set document.
    Links {
        /// Path to the Link Set JSON document.
        path: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl CliCommand {
    /// Returns `Ok(false)` when validation found problems.
    pub fn run_from_args() -> Result<bool> {
        let cli = Cli::parse();
        cli.command.run()
    }

    pub fn run(self) -> Result<bool> {
        match self {
            CliCommand::Validate {
                path,
                validators,
                deny_warnings,
                per_anchor,
                format,
                config: config_file,
            } => {
                let cfg = match config_file {
                    Some(config_path) => config::load_from(&config_path)?,
                    None => config::load_or_default()?,
                };
                tracing::debug!("loaded config: {:?}", cfg);
                let opts = ValidateOptions {
                    validators: if validators.is_empty() {
                        cfg.validators
                    } else {
                        validators
                    },
                    deny_warnings: deny_warnings || cfg.deny_warnings,
                    per_anchor: per_anchor || cfg.per_anchor,
                    format,
                };
                run_validate(&path, &opts)
            }
            CliCommand::Links { path, format } => {
                run_links(&path, format)?;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests;
