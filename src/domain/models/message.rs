#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pending: bool,
}

impl Message {
    pub fn new(role: Role, text: &str) -> Message {
        return Message {
            role,
            text: text.to_string(),
            pending: false,
        };
    }

    /// Assistant message standing in for a reply that hasn't arrived yet.
    pub fn placeholder() -> Message {
        return Message {
            role: Role::Assistant,
            text: "".to_string(),
            pending: true,
        };
    }

    pub fn is_pending(&self) -> bool {
        return self.pending;
    }

    /// Gives a pending message its final text. Settled messages are never
    /// touched again, so this returns false if the message already settled.
    pub(super) fn settle(&mut self, text: &str) -> bool {
        if !self.pending {
            return false;
        }

        self.text = text.to_string();
        self.pending = false;

        return true;
    }
}
