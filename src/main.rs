//! Chatterbox - terminal chat shell
//!
#![doc = "Chatterbox - terminal chat shell"]
#![doc = "Main entry point for the Chatterbox application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatterbox::cli::{Cli, Commands};
use chatterbox::commands;
use chatterbox::config::Config;
use chatterbox::context::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { prompt } => {
            tracing::info!("Starting interactive chat shell");
            if let Some(p) = &prompt {
                tracing::debug!("Sending quick prompt first: {}", p);
            }
            commands::chat::run_chat(config, prompt).await?;
            Ok(())
        }
        Commands::Login { email, password } => {
            let mut ctx = AppContext::from_config(config)?;
            commands::auth::run_login(&mut ctx, email, password).await?;
            Ok(())
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            let mut ctx = AppContext::from_config(config)?;
            commands::auth::run_register(&mut ctx, name, email, password).await?;
            Ok(())
        }
        Commands::Logout => {
            let mut ctx = AppContext::from_config(config)?;
            commands::auth::run_logout(&mut ctx);
            Ok(())
        }
        Commands::Whoami => {
            let ctx = AppContext::from_config(config)?;
            commands::auth::run_whoami(&ctx);
            Ok(())
        }
        Commands::Templates => {
            commands::templates::list_templates();
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so they never mix with the chat transcript.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "chatterbox=debug"
    } else {
        "chatterbox=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
