use futures_util::StreamExt;
use maumchat_llm_api::{CompletionClient, EndpointFailure};
use maumchat_types::{error_notice, Message, CURSOR_GLYPH, FALLBACK_REPLY, GREETING, SYSTEM_PROMPT};
use std::sync::Arc;

use crate::display::ChatDisplay;
use crate::error::ChatError;
use crate::transcript::Transcript;

/// How a single exchange ended
#[derive(Debug)]
pub enum ExchangeOutcome {
    /// The streamed reply was appended to the transcript
    Completed,
    /// The endpoint failed; the fallback reply was appended instead
    Failed(EndpointFailure),
}

impl ExchangeOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ExchangeOutcome::Completed)
    }
}

/// One user's conversation with the counselor.
///
/// Every mutating operation takes `&mut self`, so a new message cannot be
/// submitted while a reply is still streaming. Sessions never share a
/// transcript; the completion client may be shared.
pub struct ChatSession {
    transcript: Transcript,
    client: Arc<dyn CompletionClient>,
}

impl ChatSession {
    /// Create a session with an empty transcript; call `initialize` before use
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            transcript: Transcript::new(),
            client,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Model identifier used for replies
    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Seed the system prompt and greeting. No-op on a non-empty transcript.
    pub fn initialize(&mut self) {
        if !self.transcript.is_empty() {
            return;
        }
        self.transcript.push(Message::system(SYSTEM_PROMPT));
        self.transcript.push(Message::assistant(GREETING));
    }

    /// Append the user's message and show it
    pub fn submit_user_message(&mut self, text: &str, display: &mut dyn ChatDisplay) -> Result<(), ChatError> {
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let message = Message::user(text);
        display.render_message(message.role, &message.content);
        self.transcript.push(message);
        Ok(())
    }

    /// Stream a reply to the current transcript into the display.
    ///
    /// Endpoint failures never escape: the notice is shown once, partial text
    /// is dropped and the fixed fallback reply is recorded instead.
    pub async fn generate_reply(&mut self, display: &mut dyn ChatDisplay) -> ExchangeOutcome {
        match self.stream_reply(display).await {
            Ok(reply) => {
                self.transcript.push(Message::assistant(reply));
                ExchangeOutcome::Completed
            }
            Err(failure) => {
                display.show_error(&error_notice(&failure.to_string()));
                self.transcript.push(Message::assistant(FALLBACK_REPLY));
                ExchangeOutcome::Failed(failure)
            }
        }
    }

    /// Handle one user submission end to end
    pub async fn handle_user_input(
        &mut self,
        text: &str,
        display: &mut dyn ChatDisplay,
    ) -> Result<ExchangeOutcome, ChatError> {
        self.submit_user_message(text, display)?;
        Ok(self.generate_reply(display).await)
    }

    /// Render every non-system message in order
    pub fn render_transcript(&self, display: &mut dyn ChatDisplay) {
        for message in self.transcript.visible() {
            display.render_message(message.role, &message.content);
        }
    }

    async fn stream_reply(&self, display: &mut dyn ChatDisplay) -> Result<String, EndpointFailure> {
        let mut region = display.create_updatable_region();
        let mut stream = self.client.stream_completion(self.transcript.as_slice()).await?;

        let mut reply = String::new();
        while let Some(chunk) = stream.next().await {
            if let Some(delta) = chunk?.delta {
                reply.push_str(&delta);
                region.update(&format!("{}{}", reply, CURSOR_GLYPH));
            }
        }
        region.update(&reply);

        Ok(reply)
    }
}
