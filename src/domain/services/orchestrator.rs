#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;

use super::Greeting;
use crate::domain::models::ReplyRequest;
use crate::domain::models::ReplyService;
use crate::domain::models::Scope;
use crate::domain::models::Session;
use crate::domain::models::TurnOutcome;
use crate::domain::models::TurnRequest;

/// Replaces the placeholder when no reply body could be obtained.
pub const APOLOGY_TEXT: &str = "⚠️ Could not reach the server. Is the backend running?";

/// Drives turns against a session: `Idle -> Pending -> Idle`.
///
/// A turn is split in two so the caller decides where the remote call runs.
/// `submit` validates input and appends the user message with its
/// placeholder, `complete` applies whatever came back. Every failure is
/// turned into chat text here; nothing escapes to the caller as an error.
pub struct Orchestrator {
    session: Session,
}

impl Orchestrator {
    pub fn new(scope: Scope) -> Orchestrator {
        let greeting = Greeting::for_scope(&scope);
        return Orchestrator {
            session: Session::new(scope, greeting),
        };
    }

    pub fn session(&self) -> &Session {
        return &self.session;
    }

    pub fn is_busy(&self) -> bool {
        return self.session.is_busy();
    }

    /// Starts over with a fresh greeting when the scope actually changed. A
    /// pending turn is left running; its completion will no longer match.
    pub fn set_scope(&mut self, scope: Scope) -> bool {
        if *self.session.scope() == scope {
            return false;
        }

        tracing::debug!(
            from = %self.session.scope(),
            to = %scope,
            busy = self.session.is_busy(),
            "Resetting session for new scope"
        );

        let greeting = Greeting::for_scope(&scope);
        self.session.reset(scope, greeting);

        return true;
    }

    /// Accepts a submission, or silently ignores it when the text is blank or
    /// a turn is already pending. The returned request is what should be sent
    /// to the reply service, exactly once.
    pub fn submit(&mut self, raw_text: &str) -> Option<TurnRequest> {
        let text = raw_text.trim();
        if text.is_empty() {
            return None;
        }
        if self.session.is_busy() {
            tracing::debug!("Ignoring submission while a turn is pending");
            return None;
        }

        let request = ReplyRequest::new(text, self.session.messages(), self.session.scope());
        let turn = self.session.append_pair(text)?;

        tracing::debug!(
            turn = turn,
            history = request.history.len(),
            scope = ?request.scope,
            "Submitting turn"
        );

        return Some(TurnRequest { turn, request });
    }

    /// Settles the pending placeholder. Returns false when the outcome
    /// belongs to a turn the session no longer tracks, e.g. after a scope
    /// change, in which case nothing is touched.
    pub fn complete(&mut self, outcome: TurnOutcome) -> bool {
        let turn = outcome.turn;
        let applied = match outcome.result {
            Ok(body) => self.session.resolve(turn, &body.into_text()),
            Err(err) => {
                tracing::warn!(turn = turn, err = ?err, "Reply service request failed");
                self.session.fail(turn, APOLOGY_TEXT)
            }
        };

        if !applied {
            tracing::debug!(
                turn = turn,
                current = self.session.current_turn(),
                "Discarding stale turn completion"
            );
        }

        return applied;
    }

    /// Runs a whole turn inline: submit, one remote call, complete. Returns
    /// false if the submission was rejected.
    pub async fn send(
        &mut self,
        raw_text: &str,
        service: &(dyn ReplyService + Send + Sync),
    ) -> bool {
        let turn_request = match self.submit(raw_text) {
            Some(turn_request) => turn_request,
            None => return false,
        };

        let result = service.get_reply(&turn_request.request).await;
        self.complete(TurnOutcome {
            turn: turn_request.turn,
            result,
        });

        return true;
    }
}
