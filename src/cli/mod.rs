//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Keyport using clap.
//!
//! Exit codes: 0 success, 1 partial failure, 2 configuration error,
//! 4 store connection error, 5 fatal error.

pub mod commands;

use clap::{Parser, Subcommand};

/// Keyport - bulk realm and user export
#[derive(Parser, Debug)]
#[command(name = "keyport")]
#[command(version, about, long_about = None)]
#[command(author = "Keyport Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "keyport.toml", env = "KEYPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "KEYPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export realms and their users to the output directory
    Export(commands::export::ExportArgs),

    /// List the realms in the configured store
    ListRealms(commands::list_realms::ListRealmsArgs),

    /// Verify exported artifacts against an export manifest
    Verify(commands::verify::VerifyArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
