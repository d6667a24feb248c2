use anyhow::{bail, Result};
use colored::Colorize;
use maumchat_chat::{ChatSession, ExchangeOutcome};
use maumchat_llm_api::ClientFactory;

use crate::app::repl::{last_reply, log_exchange, open_logger};
use crate::app::setup::AppConfig;
use crate::display::TerminalDisplay;

/// Run in task mode - send a single message, stream the reply and exit.
///
/// Returns the recorded reply; an endpoint failure is reported as an error
/// after the fallback reply has been logged.
pub async fn run_task_mode(task_text: &str, config: &AppConfig) -> Result<String> {
    eprintln!("{}", format!("Task: {}", task_text).bright_yellow());

    let client = ClientFactory::create(&config.client_config);
    let mut session = ChatSession::new(client);
    session.initialize();

    let mut logger = open_logger(config).await;
    let mut display = TerminalDisplay::stdout();

    let outcome = session.handle_user_input(task_text, &mut display).await?;
    let reply = last_reply(&session).to_string();

    if let Some(logger) = &mut logger {
        log_exchange(logger, task_text, &outcome, session.model(), &reply).await;
        logger.shutdown().await;
    }

    if let ExchangeOutcome::Failed(failure) = outcome {
        bail!("Task failed: {}", failure);
    }

    Ok(reply)
}
