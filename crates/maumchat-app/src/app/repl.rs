use anyhow::Result;
use colored::Colorize;
use maumchat_chat::{ChatDisplay, ChatSession, ExchangeOutcome};
use maumchat_llm_api::ClientFactory;
use maumchat_logging::ConversationLogger;
use maumchat_types::{Role, APP_DISCLAIMER, APP_TITLE, FALLBACK_REPLY, INPUT_PLACEHOLDER};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::IsTerminal;

use crate::app::setup::AppConfig;
use crate::display::TerminalDisplay;

/// Run interactive REPL mode
pub async fn run_repl_mode(config: AppConfig) -> Result<()> {
    println!("{}", APP_TITLE.bright_cyan().bold());
    println!("{}\n", APP_DISCLAIMER.bright_black());
    println!(
        "{}",
        format!("Model: {} • Type 'exit' or 'quit' to leave, '/help' for commands\n", config.client_config.model)
            .bright_black()
    );

    let client = ClientFactory::create(&config.client_config);
    let mut session = ChatSession::new(client);
    session.initialize();

    let mut logger = open_logger(&config).await;
    if let Some(logger) = &mut logger {
        for message in session.transcript() {
            logger.log(message.role.as_str(), &message.content, None).await;
        }
    }

    let mut display = TerminalDisplay::stdout();
    session.render_transcript(&mut display);
    println!("{}", INPUT_PLACEHOLDER.bright_black());

    let erase_echo = std::io::stdout().is_terminal();
    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "You:".bright_green().bold()));

        match readline {
            Ok(line) => {
                let command = line.trim();

                if command.is_empty() {
                    continue;
                }

                if command == "exit" || command == "quit" {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }

                if command == "/help" {
                    print_help();
                    continue;
                }

                if command == "/history" {
                    println!();
                    session.render_transcript(&mut display);
                    continue;
                }

                rl.add_history_entry(line.as_str())?;

                if erase_echo {
                    display.erase_prompt_line();
                }

                let outcome = match session.handle_user_input(&line, &mut display).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        eprintln!("{} {}\n", "Error:".bright_red().bold(), e);
                        continue;
                    }
                };

                if let ExchangeOutcome::Failed(_) = &outcome {
                    display.render_message(Role::Assistant, FALLBACK_REPLY);
                }

                if let Some(logger) = &mut logger {
                    log_exchange(logger, &line, &outcome, session.model(), last_reply(&session)).await;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    if let Some(logger) = &mut logger {
        logger.shutdown().await;
    }

    Ok(())
}

/// Open the conversation log when enabled; failures only disable logging
pub(crate) async fn open_logger(config: &AppConfig) -> Option<ConversationLogger> {
    let dir = config.conversation_log_dir.as_ref()?;
    match ConversationLogger::new(dir).await {
        Ok(logger) => {
            if config.client_config.verbose {
                println!(
                    "{}",
                    format!("📝 Conversation log: {}", logger.file_path().display()).bright_blue()
                );
            }
            Some(logger)
        }
        Err(e) => {
            eprintln!("Logging disabled: {}", e);
            None
        }
    }
}

/// Record one finished exchange: the user line, any failure, then the recorded reply
pub(crate) async fn log_exchange(
    logger: &mut ConversationLogger,
    user_text: &str,
    outcome: &ExchangeOutcome,
    model: &str,
    reply: &str,
) {
    logger.log("user", user_text, None).await;
    if let ExchangeOutcome::Failed(failure) = outcome {
        logger.log_error(&failure.to_string()).await;
    }
    logger.log("assistant", reply, Some(model)).await;
}

pub(crate) fn last_reply(session: &ChatSession) -> &str {
    session
        .transcript()
        .last()
        .map(|m| m.content.as_str())
        .unwrap_or_default()
}

fn print_help() {
    println!("{}", "Commands:".bright_cyan());
    println!("  /history                - Show the conversation so far");
    println!("  /help                   - Show this help");
    println!("  exit, quit              - Leave (Ctrl-D works too)");
    println!();
}
