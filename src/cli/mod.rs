//! CLI module - Command-line interface for AgroExpert
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// AgroExpert - rule-base backend for agricultural diagnosis
#[derive(Parser)]
#[command(name = "agroexpert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "daemon")]
    Serve,

    /// Probe database connectivity and exit
    #[command(alias = "-c", alias = "--check")]
    Check,

    /// Apply pending database migrations
    Migrate,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
