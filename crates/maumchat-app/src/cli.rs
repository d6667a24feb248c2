use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// CLI arguments for maumchat
#[derive(Parser, Debug, Default)]
#[command(name = "maumchat")]
#[command(about = "Student counseling chatbot backed by an OpenAI-compatible completion endpoint")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// API key for the completion endpoint.
    /// Falls back to MAUMCHAT_API_KEY, UPSTAGE_API_KEY, then OPENAI_API_KEY
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Base URL of the endpoint (e.g., https://api.upstage.ai/v1 or http://localhost:8080)
    /// Falls back to MAUMCHAT_API_URL, then OPENAI_BASE_URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Model identifier (default: solar-pro2, or MAUMCHAT_MODEL)
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Enable verbose debug output (shows HTTP requests, responses and raw stream lines)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Write every request to a file in the log directory
    #[arg(long)]
    pub log_requests: bool,

    /// Record the conversation as JSONL in the log directory
    #[arg(long)]
    pub log_conversation: bool,

    /// Log directory (default: ~/.maumchat/logs)
    #[arg(long, value_name = "PATH")]
    pub log_dir: Option<PathBuf>,

    /// Send a single message, print the reply and exit
    #[arg(long, value_name = "TEXT")]
    pub task: Option<String>,

    /// Generate shell completions
    #[arg(long, value_enum)]
    pub generate: Option<Shell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "maumchat",
            "--api-key",
            "up_key",
            "--api-url",
            "http://localhost:8080",
            "--model",
            "solar-mini",
            "-v",
            "--log-requests",
            "--log-conversation",
            "--log-dir",
            "/tmp/maumchat-logs",
            "--task",
            "요즘 잠을 못 자요",
        ])
        .unwrap();

        assert_eq!(cli.api_key.as_deref(), Some("up_key"));
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cli.model.as_deref(), Some("solar-mini"));
        assert!(cli.verbose);
        assert!(cli.log_requests);
        assert!(cli.log_conversation);
        assert_eq!(cli.log_dir, Some(PathBuf::from("/tmp/maumchat-logs")));
        assert_eq!(cli.task.as_deref(), Some("요즘 잠을 못 자요"));
        assert!(cli.generate.is_none());
    }

    #[test]
    fn test_defaults_are_unset() {
        let cli = Cli::try_parse_from(["maumchat"]).unwrap();

        assert!(cli.api_key.is_none());
        assert!(cli.model.is_none());
        assert!(!cli.verbose);
        assert!(!cli.log_conversation);
        assert!(cli.task.is_none());
    }

    #[test]
    fn test_generate_accepts_shell_names() {
        let cli = Cli::try_parse_from(["maumchat", "--generate", "bash"]).unwrap();
        assert_eq!(cli.generate, Some(Shell::Bash));

        assert!(Cli::try_parse_from(["maumchat", "--generate", "not-a-shell"]).is_err());
    }
}
