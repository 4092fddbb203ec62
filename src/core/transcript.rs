//! # Transcript
//!
//! The ordered, append-only log of messages shown to the user.
//! Messages are immutable once pushed; the only way to change the
//! transcript is to append to it.

use std::fmt;

/// Default greeting seeded as the first bot message of every session.
pub const DEFAULT_GREETING: &str =
    "Welcome! Ask me about movies, actors, or relationships in our database.";

/// Session-unique message identifier, assigned from a monotonic counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "you",
            Sender::Bot => "reel",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: MessageId,
    text: String,
    sender: Sender,
}

impl Message {
    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}

impl Transcript {
    /// Creates a transcript seeded with one bot greeting.
    pub fn new(greeting: &str) -> Self {
        let mut transcript = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        transcript.push(Sender::Bot, greeting.to_string());
        transcript
    }

    /// Appends a message and returns a reference to it.
    pub fn push(&mut self, sender: Sender, text: String) -> &Message {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message { id, text, sender });
        self.messages.last().expect("just pushed")
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
