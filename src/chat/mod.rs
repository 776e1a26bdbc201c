//! Conversation state.
//!
//! - [`ChatMessage`] role-tagged transcript entries
//! - [`Transcript`] append-only message list
//! - [`ChatSession`] container tying the transcript to the connection

mod message;
mod session;
mod transcript;

pub use message::{ChatMessage, MessageRole};
pub use session::ChatSession;
pub use transcript::Transcript;
