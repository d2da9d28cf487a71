#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use super::Message;
use super::Role;
use super::Scope;

/// Tags an accepted submission so its completion can be matched back to it.
pub type TurnId = u64;

/// The live conversation for one scope.
///
/// Only the methods here mutate the message list. A turn appends a user
/// message plus a pending assistant placeholder, and the placeholder is the
/// only message that may change afterwards. `is_busy` is derived from that
/// tail rather than stored, so it can't drift from the messages.
pub struct Session {
    messages: Vec<Message>,
    scope: Scope,
    turn: TurnId,
}

impl Session {
    pub fn new(scope: Scope, greeting: Message) -> Session {
        return Session {
            messages: vec![greeting],
            scope,
            turn: 0,
        };
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub fn scope(&self) -> &Scope {
        return &self.scope;
    }

    pub fn current_turn(&self) -> TurnId {
        return self.turn;
    }

    pub fn is_busy(&self) -> bool {
        if let Some(last) = self.messages.last() {
            return last.is_pending();
        }

        return false;
    }

    /// Appends the user message and its placeholder as one step. Returns the
    /// new turn id, or None when a turn is already pending.
    pub fn append_pair(&mut self, text: &str) -> Option<TurnId> {
        if self.is_busy() {
            return None;
        }

        self.turn += 1;
        self.messages.push(Message::new(Role::User, text));
        self.messages.push(Message::placeholder());

        return Some(self.turn);
    }

    /// Settles the pending placeholder with the reply text.
    pub fn resolve(&mut self, turn: TurnId, text: &str) -> bool {
        return self.settle(turn, text);
    }

    /// Settles the pending placeholder with a failure notice.
    pub fn fail(&mut self, turn: TurnId, text: &str) -> bool {
        return self.settle(turn, text);
    }

    /// Drops the whole history and starts over with a single greeting. The
    /// turn counter keeps counting so ids issued before the reset stay stale.
    pub fn reset(&mut self, scope: Scope, greeting: Message) {
        self.messages = vec![greeting];
        self.scope = scope;
    }

    fn settle(&mut self, turn: TurnId, text: &str) -> bool {
        if turn != self.turn || !self.is_busy() {
            return false;
        }

        match self.messages.last_mut() {
            Some(last) => return last.settle(text),
            None => return false,
        }
    }
}
