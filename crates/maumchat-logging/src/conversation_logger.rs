use anyhow::Result;
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

#[derive(Serialize)]
struct LogEntry<'a> {
    timestamp: String, // ISO‑8601 Local time
    role: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

/// Append-only JSONL record of one chat session.
///
/// Write-only: nothing in the application reads these files back.
pub struct ConversationLogger {
    file_path: PathBuf,
    file: Option<tokio::fs::File>,
}

impl ConversationLogger {
    /// Create a new logger inside `logs_dir`; the file name is based on the current local time.
    pub async fn new(logs_dir: &Path) -> Result<Self> {
        fs::create_dir_all(logs_dir).await?;

        let now_local = Local::now();
        let filename = format!(
            "maumchat-{}.jsonl",
            now_local.format("%Y-%m-%d-%H%M%S%.3f")
        );
        let file_path = logs_dir.join(filename);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .await?;
        Ok(Self { file_path, file: Some(file) })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Append a single log entry.
    pub async fn log(&mut self, role: &str, content: &str, model: Option<&str>) {
        let entry = LogEntry {
            timestamp: Local::now().to_rfc3339(),
            role,
            content,
            model,
        };
        let Some(file) = &mut self.file else {
            return;
        };
        if let Ok(json) = serde_json::to_string(&entry) {
            if let Err(e) = file.write_all(json.as_bytes()).await {
                eprintln!("[Logging error] {}", e);
            } else if let Err(e) = file.write_all(b"\n").await {
                eprintln!("[Logging error] {}", e);
            } else {
                let _ = file.flush().await;
            }
        }
    }

    /// Record a user-visible error notice
    pub async fn log_error(&mut self, detail: &str) {
        self.log("error", detail, None).await;
    }

    /// Close the logger (explicit drop). Called on graceful shutdown.
    pub async fn shutdown(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.sync_all().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_logger_writes_one_json_line_per_entry() {
        let temp_dir = TempDir::new().unwrap();
        let mut logger = ConversationLogger::new(temp_dir.path()).await.unwrap();

        logger.log("user", "안녕하세요", None).await;
        logger.log("assistant", "반가워요", Some("solar-pro2")).await;
        logger.log_error("boom").await;
        logger.shutdown().await;

        let content = std::fs::read_to_string(logger.file_path()).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["role"], "user");
        assert_eq!(lines[0]["content"], "안녕하세요");
        assert!(lines[0].get("model").is_none());
        assert_eq!(lines[1]["model"], "solar-pro2");
        assert_eq!(lines[2]["role"], "error");
        assert!(lines[2]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_logging_after_shutdown_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let mut logger = ConversationLogger::new(temp_dir.path()).await.unwrap();
        logger.shutdown().await;
        logger.log("user", "late", None).await;

        let content = std::fs::read_to_string(logger.file_path()).unwrap();
        assert!(content.is_empty());
    }

    #[tokio::test]
    async fn test_logger_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("logs");
        let logger = ConversationLogger::new(&nested).await.unwrap();

        assert!(logger.file_path().starts_with(&nested));
        assert!(logger.file_path().exists());
    }
}
