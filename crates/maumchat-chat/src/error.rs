use thiserror::Error;

/// Rejections raised before an exchange starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyMessage,
}
