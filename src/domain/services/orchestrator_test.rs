use std::sync::Mutex;

use anyhow::anyhow;
use anyhow::Result;
use async_trait::async_trait;

use super::Orchestrator;
use super::APOLOGY_TEXT;
use crate::domain::models::Message;
use crate::domain::models::ReplyBody;
use crate::domain::models::ReplyRequest;
use crate::domain::models::ReplyService;
use crate::domain::models::Role;
use crate::domain::models::Scope;
use crate::domain::models::TurnOutcome;
use crate::domain::models::GENERIC_FAILURE_TEXT;

enum Canned {
    Body(ReplyBody),
    Transport(String),
}

struct FakeReplyService {
    canned: Canned,
    requests: Mutex<Vec<ReplyRequest>>,
}

impl FakeReplyService {
    fn new(canned: Canned) -> FakeReplyService {
        return FakeReplyService {
            canned,
            requests: Mutex::new(vec![]),
        };
    }

    fn calls(&self) -> usize {
        return self.requests.lock().unwrap().len();
    }
}

#[async_trait]
impl ReplyService for FakeReplyService {
    async fn get_reply(&self, request: &ReplyRequest) -> Result<ReplyBody> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.canned {
            Canned::Body(body) => return Ok(body.clone()),
            Canned::Transport(err) => return Err(anyhow!(err.to_string())),
        }
    }
}

fn reply(text: &str) -> Result<ReplyBody> {
    return Ok(ReplyBody {
        reply: Some(text.to_string()),
        error: None,
    });
}

fn last_message(orchestrator: &Orchestrator) -> &Message {
    return orchestrator.session().messages().last().unwrap();
}

#[test]
fn it_starts_idle_with_greeting() {
    let orchestrator = Orchestrator::new(Scope::Aggregate);

    assert!(!orchestrator.is_busy());
    assert_eq!(orchestrator.session().messages().len(), 1);
    assert!(last_message(&orchestrator).text.contains("the whole school"));
}

#[test]
fn it_grows_by_two_before_completion() {
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);
    let turn_request = orchestrator.submit("Who is at risk?");

    assert!(turn_request.is_some());
    assert!(orchestrator.is_busy());

    let messages = orchestrator.session().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, Role::User);
    assert_eq!(messages[1].text, "Who is at risk?");
    assert!(messages[2].is_pending());
}

#[test]
fn it_trims_input() {
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);
    let turn_request = orchestrator.submit("  \n Who is at risk?\n ").unwrap();

    assert_eq!(turn_request.request.message, "Who is at risk?");
    assert_eq!(orchestrator.session().messages()[1].text, "Who is at risk?");
}

#[test]
fn it_ignores_blank_input() {
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);

    assert!(orchestrator.submit("").is_none());
    assert!(orchestrator.submit("   \n\t").is_none());
    assert_eq!(orchestrator.session().messages().len(), 1);
    assert!(!orchestrator.is_busy());
    assert_eq!(orchestrator.session().current_turn(), 0);
}

#[test]
fn it_ignores_submission_while_busy() {
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);
    orchestrator.submit("First");
    let before = orchestrator.session().messages().to_vec();

    assert!(orchestrator.submit("Second").is_none());
    assert_eq!(orchestrator.session().messages(), before.as_slice());
    assert!(orchestrator.is_busy());
}

#[test]
fn it_sends_prior_messages_as_history() {
    let mut orchestrator = Orchestrator::new(Scope::parse("10-A"));
    let first = orchestrator.submit("First").unwrap();

    assert_eq!(first.request.history.len(), 1);
    assert_eq!(first.request.history[0].role, Role::Assistant);
    assert_eq!(first.request.scope, Some("10-A".to_string()));

    orchestrator.complete(TurnOutcome {
        turn: first.turn,
        result: reply("Answer"),
    });
    let second = orchestrator.submit("Second").unwrap();

    let history = second
        .request
        .history
        .iter()
        .map(|e| return format!("{}: {}", e.role, e.text))
        .collect::<Vec<String>>();
    assert_eq!(history.len(), 3);
    assert_eq!(history[1], "user: First");
    assert_eq!(history[2], "assistant: Answer");
    assert_eq!(second.request.message, "Second");
}

#[test]
fn it_sends_null_scope_for_aggregate() {
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);
    let turn_request = orchestrator.submit("Hello").unwrap();

    assert_eq!(turn_request.request.scope, None);
}

#[test]
fn it_resolves_with_reply() {
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);
    let turn_request = orchestrator.submit("Hello").unwrap();

    let applied = orchestrator.complete(TurnOutcome {
        turn: turn_request.turn,
        result: reply("**Maya** needs help."),
    });

    assert!(applied);
    assert!(!orchestrator.is_busy());
    assert!(!last_message(&orchestrator).is_pending());
    assert_eq!(last_message(&orchestrator).text, "**Maya** needs help.");
}

#[test]
fn it_shows_server_reported_error() {
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);
    let turn_request = orchestrator.submit("Hello").unwrap();

    orchestrator.complete(TurnOutcome {
        turn: turn_request.turn,
        result: Ok(ReplyBody {
            reply: None,
            error: Some("Model quota exceeded".to_string()),
        }),
    });

    assert!(!orchestrator.is_busy());
    assert_eq!(last_message(&orchestrator).text, "Model quota exceeded");
}

#[test]
fn it_shows_generic_failure_for_empty_body() {
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);
    let turn_request = orchestrator.submit("Hello").unwrap();

    orchestrator.complete(TurnOutcome {
        turn: turn_request.turn,
        result: Ok(ReplyBody::default()),
    });

    assert!(!orchestrator.is_busy());
    assert_eq!(last_message(&orchestrator).text, GENERIC_FAILURE_TEXT);
}

#[test]
fn it_apologizes_on_transport_failure() {
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);
    let turn_request = orchestrator.submit("Hello").unwrap();

    orchestrator.complete(TurnOutcome {
        turn: turn_request.turn,
        result: Err(anyhow!("connection refused")),
    });

    assert!(!orchestrator.is_busy());
    assert!(!last_message(&orchestrator).is_pending());
    assert_eq!(last_message(&orchestrator).text, APOLOGY_TEXT);
}

#[test]
fn it_completes_each_turn_once() {
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);
    let turn_request = orchestrator.submit("Hello").unwrap();

    assert!(orchestrator.complete(TurnOutcome {
        turn: turn_request.turn,
        result: reply("First"),
    }));
    assert!(!orchestrator.complete(TurnOutcome {
        turn: turn_request.turn,
        result: Err(anyhow!("late failure")),
    }));
    assert_eq!(last_message(&orchestrator).text, "First");
}

#[test]
fn it_resets_on_scope_change() {
    let mut orchestrator = Orchestrator::new(Scope::parse("School"));
    for question in ["One", "Two", "Three"] {
        let turn_request = orchestrator.submit(question).unwrap();
        orchestrator.complete(TurnOutcome {
            turn: turn_request.turn,
            result: reply("Answer"),
        });
    }
    assert_eq!(orchestrator.session().messages().len(), 7);

    assert!(orchestrator.set_scope(Scope::parse("10-A")));

    let messages = orchestrator.session().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::Assistant);
    assert!(messages[0].text.contains("10-A"));
    assert!(!orchestrator.is_busy());
    assert_eq!(orchestrator.session().scope(), &Scope::parse("10-A"));
}

#[test]
fn it_ignores_same_scope() {
    let mut orchestrator = Orchestrator::new(Scope::parse("10-A"));
    orchestrator.submit("Hello");

    assert!(!orchestrator.set_scope(Scope::parse("10-A")));
    assert_eq!(orchestrator.session().messages().len(), 3);
    assert!(orchestrator.is_busy());
}

#[test]
fn it_drops_stale_completion_after_scope_change() {
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);
    let stale = orchestrator.submit("Old question").unwrap();

    orchestrator.set_scope(Scope::parse("10-A"));
    assert!(!orchestrator.is_busy());

    let applied = orchestrator.complete(TurnOutcome {
        turn: stale.turn,
        result: reply("Old answer"),
    });

    assert!(!applied);
    assert_eq!(orchestrator.session().messages().len(), 1);
    assert!(last_message(&orchestrator).text.contains("10-A"));
}

#[test]
fn it_drops_stale_completion_during_new_turn() {
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);
    let stale = orchestrator.submit("Old question").unwrap();

    orchestrator.set_scope(Scope::parse("10-A"));
    let fresh = orchestrator.submit("New question").unwrap();

    assert!(!orchestrator.complete(TurnOutcome {
        turn: stale.turn,
        result: reply("Old answer"),
    }));
    assert!(orchestrator.is_busy());
    assert!(last_message(&orchestrator).is_pending());

    assert!(orchestrator.complete(TurnOutcome {
        turn: fresh.turn,
        result: reply("New answer"),
    }));
    assert_eq!(last_message(&orchestrator).text, "New answer");
}

#[tokio::test]
async fn it_sends_full_turn() {
    let service = FakeReplyService::new(Canned::Body(ReplyBody {
        reply: Some("Three students.".to_string()),
        error: None,
    }));
    let mut orchestrator = Orchestrator::new(Scope::parse("10-B"));

    assert!(orchestrator.send("Who is at risk?", &service).await);
    assert_eq!(service.calls(), 1);
    assert!(!orchestrator.is_busy());
    assert_eq!(orchestrator.session().messages().len(), 3);
    assert_eq!(last_message(&orchestrator).text, "Three students.");

    let requests = service.requests.lock().unwrap();
    assert_eq!(requests[0].scope, Some("10-B".to_string()));
}

#[tokio::test]
async fn it_sends_and_absorbs_transport_failure() {
    let service = FakeReplyService::new(Canned::Transport("connection reset".to_string()));
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);

    assert!(orchestrator.send("Hello", &service).await);
    assert_eq!(service.calls(), 1);
    assert!(!orchestrator.is_busy());
    assert_eq!(last_message(&orchestrator).text, APOLOGY_TEXT);
}

#[tokio::test]
async fn it_does_not_call_service_for_rejected_input() {
    let service = FakeReplyService::new(Canned::Body(ReplyBody::default()));
    let mut orchestrator = Orchestrator::new(Scope::Aggregate);

    assert!(!orchestrator.send("   ", &service).await);
    assert_eq!(service.calls(), 0);
    assert_eq!(orchestrator.session().messages().len(), 1);
}
