use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use std::io;

use maumchat::{run_repl_mode, run_task_mode, setup_from_cli, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Some(shell) = cli.generate {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let app_config = setup_from_cli(&cli)?;

    if let Some(task_text) = cli.task.as_deref() {
        run_task_mode(task_text, &app_config).await?;
        return Ok(());
    }

    run_repl_mode(app_config).await
}
