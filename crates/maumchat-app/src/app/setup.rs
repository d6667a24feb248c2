use anyhow::{bail, Result};
use colored::Colorize;
use maumchat_llm_api::{ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
use maumchat_logging::get_logs_dir;
use std::env;
use std::path::PathBuf;

use crate::cli::Cli;

/// Application configuration derived from CLI arguments and environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client_config: ClientConfig,
    /// JSONL conversation log directory; `None` disables the conversation log
    pub conversation_log_dir: Option<PathBuf>,
}

/// Set up application configuration from CLI arguments and the process environment
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    let config = resolve_config(cli, |name| env::var(name).ok())?;

    if cli.verbose {
        eprintln!(
            "{}",
            format!(
                "🔧 Endpoint: {} • Model: {}",
                config.client_config.completions_url(),
                config.client_config.model
            )
            .bright_black()
        );
    }

    Ok(config)
}

/// Resolve configuration with `lookup` standing in for environment access.
///
/// Precedence: CLI flags > MAUMCHAT_* env > legacy env > defaults.
/// Variables set to an empty string count as unset.
pub fn resolve_config<F>(cli: &Cli, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let api_key = cli.api_key.clone()
        .or_else(|| var("MAUMCHAT_API_KEY"))
        .or_else(|| var("UPSTAGE_API_KEY"))
        .or_else(|| var("OPENAI_API_KEY"));

    let Some(api_key) = api_key else {
        bail!(
            "No API key configured. Pass --api-key or set MAUMCHAT_API_KEY (UPSTAGE_API_KEY and OPENAI_API_KEY are also read)."
        );
    };

    let api_url = cli.api_url.clone()
        .or_else(|| var("MAUMCHAT_API_URL"))
        .or_else(|| var("OPENAI_BASE_URL"))
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let model = cli.model.clone()
        .or_else(|| var("MAUMCHAT_MODEL"))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // Only touch ~/.maumchat when some log is actually written there
    let log_dir = if cli.log_requests || cli.log_conversation {
        Some(match cli.log_dir.clone() {
            Some(dir) => dir,
            None => get_logs_dir()?,
        })
    } else {
        None
    };

    let client_config = ClientConfig {
        api_key,
        api_url,
        model,
        verbose: cli.verbose,
        request_log_dir: log_dir.clone().filter(|_| cli.log_requests),
    };

    Ok(AppConfig {
        client_config,
        conversation_log_dir: log_dir.filter(|_| cli.log_conversation),
    })
}
