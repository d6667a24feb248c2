//! Core types for maumchat
//!
//! This crate provides the message model shared by the completion client,
//! the chat session and the host application, plus the fixed counselor copy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Constants
// ============================================================================

/// Default model identifier sent with every completion request
pub const DEFAULT_MODEL: &str = "solar-pro2";

/// Default base URL of the OpenAI-compatible completion endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://api.upstage.ai/v1";

/// Glyph appended to partially streamed text while the reply is in flight
pub const CURSOR_GLYPH: &str = "▌";

/// Counselor persona given to the model as the first transcript entry
pub const SYSTEM_PROMPT: &str = "당신은 학생들의 심리 상담을 돕는 친절하고 공감 능력 있는 AI 상담사입니다. \
학생들의 이야기를 경청하고, 지지하며, 긍정적인 방향으로 이끌어 주세요. \
전문적인 진단이나 치료는 제공하지 않으며, 필요시 전문가의 도움을 권유할 수 있습니다.";

/// Synthetic assistant greeting seeded right after the system prompt
pub const GREETING: &str = "안녕하세요! 저는 학생들의 마음 건강을 돕는 AI 상담사입니다. \
어떤 이야기든 편하게 나눠주세요. 제가 경청하고 함께 고민해 드릴게요.";

/// Assistant message substituted into the transcript when an exchange fails
pub const FALLBACK_REPLY: &str = "죄송합니다. 현재 상담을 진행할 수 없습니다. 잠시 후 다시 시도해 주세요.";

/// Title shown above the conversation
pub const APP_TITLE: &str = "학생 심리 상담 챗봇 💬";

/// Disclaimer shown under the title
pub const APP_DISCLAIMER: &str = "이 챗봇은 학생들의 심리적 어려움을 경청하고, 지지하며, \
필요한 경우 추가적인 도움을 받을 수 있는 방향을 제시하는 데 목적이 있습니다.\n\
전문적인 의료 또는 심리 치료를 대체할 수 없으며, 긴급한 상황에서는 전문가의 도움을 받으세요.";

/// Placeholder text for the input prompt
pub const INPUT_PLACEHOLDER: &str = "여기에 메시지를 입력하세요...";

/// Build the user-visible notice for a failed completion call
pub fn error_notice(detail: &str) -> String {
    format!("API 호출 중 오류가 발생했습니다: {}", detail)
}

// ============================================================================
// Message Types
// ============================================================================

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// One transcript entry, serialized exactly as the endpoint expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
