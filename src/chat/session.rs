//! Chat session: the transcript plus the connection that feeds it.

use super::message::ChatMessage;
use super::transcript::Transcript;
use crate::connection::{decode_payload, Connection};

/// Owns the transcript and the outbound connection handle.
///
/// All mutation goes through [`ChatSession::submit`] and
/// [`ChatSession::receive`]; nothing else can write to the transcript.
#[derive(Debug)]
pub struct ChatSession {
    transcript: Transcript,
    connection: Connection,
}

impl ChatSession {
    pub fn new(connection: Connection) -> Self {
        Self {
            transcript: Transcript::new(),
            connection,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Record a user command and forward it to the service.
    ///
    /// The user entry is appended before the text is queued. Empty text is
    /// recorded and sent like any other command. A closed connection only
    /// gets logged; the entry stays in the transcript.
    pub fn submit(&mut self, command: String) {
        self.transcript.push(ChatMessage::user(command.as_str()));
        if let Err(e) = self.connection.send(command) {
            tracing::warn!("Command not sent: {}", e);
        }
    }

    /// Handle a raw inbound frame.
    ///
    /// Returns `true` if an assistant entry was appended. Frames that cannot
    /// be decoded are logged and dropped.
    pub fn receive(&mut self, raw: &str) -> bool {
        match decode_payload(raw) {
            Ok(content) => {
                self.transcript.push(ChatMessage::assistant(content));
                true
            }
            Err(e) => {
                tracing::warn!("Dropping inbound payload: {}", e);
                false
            }
        }
    }
}
