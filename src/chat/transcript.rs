//! Append-only conversation transcript

use super::message::ChatMessage;

/// Ordered list of messages in arrival order.
///
/// Entries are never removed or edited; the transcript only grows for as
/// long as the session lives.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChatMessage> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a ChatMessage;
    type IntoIter = std::slice::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_transcript() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
        assert!(transcript.messages().last().is_none());
    }

    #[test]
    fn test_push_keeps_arrival_order() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("a"));
        transcript.push(ChatMessage::assistant("b"));
        transcript.push(ChatMessage::user("c"));

        let contents: Vec<&str> = transcript.iter().map(ChatMessage::content).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
        assert_eq!(transcript.messages().last(), Some(&ChatMessage::user("c")));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::user("same"));
        transcript.push(ChatMessage::user("same"));
        assert_eq!(transcript.len(), 2);
    }
}
