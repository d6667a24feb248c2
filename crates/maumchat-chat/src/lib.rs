//! Conversation management for maumchat
//!
//! This crate owns the transcript of one counseling session and drives a
//! single exchange at a time: append the user's message, stream the reply
//! from the completion endpoint into the display, then record the outcome.

pub mod display;
pub mod error;
pub mod session;
pub mod transcript;

pub use display::{ChatDisplay, UpdatableRegion};
pub use error::ChatError;
pub use session::{ChatSession, ExchangeOutcome};
pub use transcript::Transcript;
