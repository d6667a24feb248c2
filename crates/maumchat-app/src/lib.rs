//! maumchat host application: command line, configuration, terminal display
//! and the interactive and one-shot chat loops.

pub mod app;
pub mod cli;
pub mod display;

pub use app::{resolve_config, run_repl_mode, run_task_mode, setup_from_cli, AppConfig};
pub use cli::Cli;
pub use display::TerminalDisplay;
