//! Command-line interface definition for Chatterbox
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the interactive chat shell and the session subcommands.

use clap::{Parser, Subcommand};

/// Chatterbox - chat shell over a simulated agent
///
/// Sign in (mocked), chat with a canned-reply agent, recall previous
/// inputs, and export the transcript.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatterbox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the session database location
    #[arg(long)]
    pub storage_path: Option<String>,

    /// Skip all artificial delays (sign-in and replies)
    #[arg(long)]
    pub instant: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for Chatterbox
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the interactive chat shell
    Chat {
        /// Send this quick prompt (id or title) as the first message
        #[arg(short, long)]
        prompt: Option<String>,
    },

    /// Sign in with an email and password
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List the quick prompts
    Templates,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
