/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint:

- `chat`: Interactive chat shell
- `auth`: Sign-in, registration and session inspection

Handlers take an [`AppContext`](crate::context::AppContext) so they can be
driven from tests with in-memory storage and an instant responder.
*/

use crate::context::AppContext;
use crate::error::{ChatterboxError, Result};
use crate::render;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

// Special commands parser for the chat shell
pub mod special_commands;

// Quick prompt listing
pub mod templates;

// Arrow-key input recall
pub mod history_keys;

/// Read one line, mapping Ctrl-C and Ctrl-D to `None`
fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(ChatterboxError::from(e).into()),
    }
}

// Chat command handler
pub mod chat {
    //! Interactive chat shell.
    //!
    //! Signs the user in if needed, then runs a readline loop. Plain text is
    //! remembered in the input history and sent to the agent; `/` commands
    //! act on the conversation and session.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use crate::config::Config;
    use crate::conversation::{HistoryDirection, SendOutcome};
    use colored::Colorize;

    /// What the loop does after handling one line
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum ShellAction {
        /// Read the next line with an empty prompt
        Continue,
        /// Read the next line with this text already typed
        Prefill(String),
        /// Leave the shell
        Exit,
    }

    /// Start the interactive chat shell
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `quick_prompt` - Optional quick prompt (id or title) sent first
    ///
    /// # Errors
    ///
    /// Returns an error if the session storage cannot be opened or the
    /// terminal cannot be read
    pub async fn run_chat(config: Config, quick_prompt: Option<String>) -> Result<()> {
        let mut ctx = AppContext::from_config(config)?;
        run_chat_with_context(&mut ctx, quick_prompt).await
    }

    /// Run the chat shell against an existing context
    pub async fn run_chat_with_context(
        ctx: &mut AppContext,
        quick_prompt: Option<String>,
    ) -> Result<()> {
        let mut rl = DefaultEditor::new()?;

        if !ctx.session.is_authenticated() && !sign_in_interactive(ctx, &mut rl).await? {
            println!("Goodbye!");
            return Ok(());
        }

        super::history_keys::bind_history_keys(&mut rl, &ctx.conversation);
        print_welcome_banner(ctx);

        if let Some(key) = quick_prompt {
            println!("{}", render::typing_indicator());
            match ctx.send_template(&key).await {
                Ok(outcome) => print_outcome(&outcome, ctx.config.chat.show_timestamps),
                Err(e) => eprintln!("{}\n", render::failure(&e.to_string())),
            }
        }

        let mut prefill = String::new();
        loop {
            let prompt = render::prompt(ctx.session.state());
            let line = if prefill.is_empty() {
                rl.readline(&prompt)
            } else {
                rl.readline_with_initial(&prompt, (prefill.as_str(), ""))
            };
            prefill.clear();

            match line {
                Ok(line) => match handle_line(ctx, &line).await? {
                    ShellAction::Continue => {}
                    ShellAction::Prefill(text) => prefill = text,
                    ShellAction::Exit => break,
                },
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Handle one line of shell input
    ///
    /// Failures of individual commands are printed and do not end the
    /// shell.
    pub async fn handle_line(ctx: &mut AppContext, line: &str) -> Result<ShellAction> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(ShellAction::Continue);
        }

        let command = match parse_special_command(trimmed) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}\n", render::failure(&e.to_string()));
                return Ok(ShellAction::Continue);
            }
        };

        match command {
            SpecialCommand::None => {
                ctx.conversation.add_to_history(trimmed);
                send_and_print(ctx, trimmed).await?;
            }
            SpecialCommand::Clear => {
                ctx.conversation.clear_chat();
                println!("{}\n", render::success("Chat cleared"));
            }
            SpecialCommand::Export(format) => match ctx.export(format) {
                Ok(path) => println!(
                    "{}\n",
                    render::success(&format!(
                        "Chat exported as {} to {}",
                        format,
                        path.display()
                    ))
                ),
                Err(e) => {
                    eprintln!("{}", render::failure(&e.to_string()));
                    if ctx.conversation.message_count() == 0 {
                        eprintln!("Start a conversation first before exporting.");
                    }
                    eprintln!();
                }
            },
            SpecialCommand::ListTemplates => super::templates::list_templates(),
            SpecialCommand::SendTemplate(key) => {
                println!("{}", render::typing_indicator());
                match ctx.send_template(&key).await {
                    Ok(outcome) => print_outcome(&outcome, ctx.config.chat.show_timestamps),
                    Err(e) => eprintln!("{}\n", render::failure(&e.to_string())),
                }
            }
            SpecialCommand::HistoryUp => {
                let recalled = ctx.conversation.navigate_history(HistoryDirection::Up);
                if recalled.is_empty() {
                    println!("{}", render::warning("No earlier input"));
                }
                return Ok(ShellAction::Prefill(recalled));
            }
            SpecialCommand::HistoryDown => {
                let recalled = ctx.conversation.navigate_history(HistoryDirection::Down);
                return Ok(ShellAction::Prefill(recalled));
            }
            SpecialCommand::ShowHistory => print_history(ctx),
            SpecialCommand::Voice => return Ok(listen(ctx).await),
            SpecialCommand::ShowStatus => print_status_display(ctx),
            SpecialCommand::Logout => {
                ctx.session.logout();
                println!("{}\n", render::success("Signed out"));
                return Ok(ShellAction::Exit);
            }
            SpecialCommand::Help => print_help(),
            SpecialCommand::Exit => return Ok(ShellAction::Exit),
        }

        Ok(ShellAction::Continue)
    }

    async fn send_and_print(ctx: &AppContext, text: &str) -> Result<()> {
        println!("{}", render::typing_indicator());
        let outcome = ctx.conversation.send_message(text).await?;
        print_outcome(&outcome, ctx.config.chat.show_timestamps);
        Ok(())
    }

    fn print_outcome(outcome: &SendOutcome, show_timestamps: bool) {
        match outcome {
            SendOutcome::Delivered(reply) => {
                println!("{}\n", render::format_message(reply, show_timestamps));
            }
            SendOutcome::Discarded => {
                tracing::debug!("Reply arrived after the chat was cleared");
            }
            SendOutcome::Rejected => {}
        }
    }

    async fn listen(ctx: &mut AppContext) -> ShellAction {
        if !ctx.voice.is_available() {
            println!(
                "{}\n",
                render::warning("Speech recognition is not supported in this environment")
            );
            return ShellAction::Continue;
        }

        println!("{}", "Listening…".red());
        match ctx.voice.listen_once().await {
            Ok(Some(text)) => ShellAction::Prefill(text),
            Ok(None) => {
                println!("{}\n", render::warning("No speech detected"));
                ShellAction::Continue
            }
            Err(e) => {
                println!("{}\n", render::warning(&e.to_string()));
                ShellAction::Continue
            }
        }
    }

    async fn sign_in_interactive(ctx: &mut AppContext, rl: &mut DefaultEditor) -> Result<bool> {
        println!("\n{}", "Welcome to Chatterbox".bold());
        println!("Sign in to start chatting.\n");

        loop {
            let Some(choice) = read_line(rl, "[l]ogin, [r]egister or [q]uit: ")? else {
                return Ok(false);
            };

            let signed_in = match choice.trim().to_lowercase().as_str() {
                "l" | "login" => super::auth::prompt_login(ctx, rl).await?,
                "r" | "register" => super::auth::prompt_register(ctx, rl).await?,
                "q" | "quit" | "exit" => return Ok(false),
                _ => {
                    println!("{}", render::warning("Please answer l, r or q"));
                    false
                }
            };

            if signed_in {
                return Ok(true);
            }
        }
    }

    fn print_welcome_banner(ctx: &AppContext) {
        let name = ctx.session.state().display_name().unwrap_or("there");

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                Chatterbox Chat Shell - Welcome!              ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Hello, {}!", name.bold());
        println!("Type '/templates' for quick prompts, '/help' for commands, 'exit' to quit");
        println!("Use the Up and Down arrows to recall earlier inputs\n");
    }

    fn print_history(ctx: &AppContext) {
        let entries = ctx.conversation.history_entries();
        if entries.is_empty() {
            println!("{}\n", "No inputs remembered yet.".yellow());
            return;
        }

        let cursor = ctx.conversation.history_cursor();
        println!("\nInput History (newest first):");
        for (i, entry) in entries.iter().enumerate() {
            let marker = if cursor == Some(i) { ">" } else { " " };
            println!("{} {:>3}. {}", marker.cyan(), i + 1, entry);
        }
        println!();
    }

    fn print_status_display(ctx: &AppContext) {
        let user = ctx
            .session
            .current_user()
            .map(|u| format!("{} <{}>", u.name, u.email))
            .unwrap_or_else(|| "not signed in".to_string());
        let voice = if ctx.voice.is_available() {
            ctx.voice.backend_name().green()
        } else {
            "unavailable".yellow()
        };

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                     Chatterbox Session Status                ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("User:              {}", user);
        println!("Responder:         {}", ctx.conversation.responder_name());
        println!(
            "Conversation Size: {} messages",
            ctx.conversation.message_count()
        );
        println!(
            "Input History:     {} of {} entries",
            ctx.conversation.history_entries().len(),
            ctx.conversation.history_capacity()
        );
        println!("Voice Input:       {}", voice);
        println!("Export Directory:  {}", ctx.config.export.directory);
        println!();
    }

}

// Authentication command handlers
pub mod auth {
    //! Sign-in, registration, sign-out and session inspection.

    use super::*;
    use crate::session::{LoginCredentials, RegisterCredentials, User};
    use colored::Colorize;

    /// Validate credentials and sign in
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Auth` for invalid credentials or a failed
    /// sign-in
    pub async fn login(ctx: &mut AppContext, credentials: LoginCredentials) -> Result<User> {
        credentials.validate()?;
        println!("{}", "Signing in…".dimmed());
        ctx.session.login(credentials).await
    }

    /// Validate credentials and create an account
    pub async fn register(ctx: &mut AppContext, credentials: RegisterCredentials) -> Result<User> {
        credentials.validate()?;
        println!("{}", "Creating account…".dimmed());
        ctx.session.register(credentials).await
    }

    /// `chatterbox login`
    pub async fn run_login(
        ctx: &mut AppContext,
        email: String,
        password: Option<String>,
    ) -> Result<()> {
        let password = match password {
            Some(password) => password,
            None => prompt_password()?,
        };
        let user = login(ctx, LoginCredentials::new(email, password)).await?;
        println!("{}", render::success(&format!("Welcome back, {}!", user.name)));
        Ok(())
    }

    /// `chatterbox register`
    pub async fn run_register(
        ctx: &mut AppContext,
        name: String,
        email: String,
        password: Option<String>,
    ) -> Result<()> {
        let password = match password {
            Some(password) => password,
            None => prompt_password()?,
        };
        let user = register(ctx, RegisterCredentials::new(name, email, password)).await?;
        println!(
            "{}",
            render::success(&format!("Account created. Welcome, {}!", user.name))
        );
        Ok(())
    }

    /// `chatterbox logout`
    pub fn run_logout(ctx: &mut AppContext) {
        if !ctx.session.is_authenticated() {
            println!("{}", "Not signed in.".yellow());
            return;
        }
        ctx.session.logout();
        println!("{}", render::success("Signed out"));
    }

    /// `chatterbox whoami`
    pub fn run_whoami(ctx: &AppContext) {
        match ctx.session.current_user() {
            Some(user) => println!("Signed in as {} <{}>", user.name.bold(), user.email),
            None => println!("{}", "Not signed in.".yellow()),
        }
    }

    fn prompt_password() -> Result<String> {
        let mut rl = DefaultEditor::new()?;
        read_line(&mut rl, "Password: ")?
            .ok_or_else(|| ChatterboxError::Auth("Password is required".to_string()).into())
    }

    /// Ask for email and password, then sign in
    ///
    /// Returns `false` if the user aborted or sign-in failed.
    pub(crate) async fn prompt_login(ctx: &mut AppContext, rl: &mut DefaultEditor) -> Result<bool> {
        let Some(email) = read_line(rl, "Email: ")? else {
            return Ok(false);
        };
        let Some(password) = read_line(rl, "Password: ")? else {
            return Ok(false);
        };

        match login(ctx, LoginCredentials::new(email, password)).await {
            Ok(user) => {
                println!("{}\n", render::success(&format!("Welcome back, {}!", user.name)));
                Ok(true)
            }
            Err(e) => {
                eprintln!("{}\n", render::failure(&e.to_string()));
                Ok(false)
            }
        }
    }

    /// Ask for name, email and password, then create an account
    pub(crate) async fn prompt_register(
        ctx: &mut AppContext,
        rl: &mut DefaultEditor,
    ) -> Result<bool> {
        let Some(name) = read_line(rl, "Name: ")? else {
            return Ok(false);
        };
        let Some(email) = read_line(rl, "Email: ")? else {
            return Ok(false);
        };
        let Some(password) = read_line(rl, "Password: ")? else {
            return Ok(false);
        };

        match register(ctx, RegisterCredentials::new(name, email, password)).await {
            Ok(user) => {
                println!(
                    "{}\n",
                    render::success(&format!("Account created. Welcome, {}!", user.name))
                );
                Ok(true)
            }
            Err(e) => {
                eprintln!("{}\n", render::failure(&e.to_string()));
                Ok(false)
            }
        }
    }

}
