use super::Session;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::Scope;

fn new_session() -> Session {
    return Session::new(
        Scope::Aggregate,
        Message::new(Role::Assistant, "Hello!"),
    );
}

fn pending_count(session: &Session) -> usize {
    return session
        .messages()
        .iter()
        .filter(|msg| return msg.is_pending())
        .count();
}

#[test]
fn it_starts_with_greeting() {
    let session = new_session();

    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.scope(), &Scope::Aggregate);
    assert_eq!(session.current_turn(), 0);
    assert!(!session.is_busy());
}

#[test]
fn it_appends_pair() {
    let mut session = new_session();
    let turn = session.append_pair("How is 10-A doing?");

    assert_eq!(turn, Some(1));
    assert_eq!(session.messages().len(), 3);
    assert!(session.is_busy());

    let user = &session.messages()[1];
    assert_eq!(user.role, Role::User);
    assert_eq!(user.text, "How is 10-A doing?");
    assert!(!user.is_pending());

    let placeholder = &session.messages()[2];
    assert_eq!(placeholder.role, Role::Assistant);
    assert!(placeholder.is_pending());
}

#[test]
fn it_rejects_pair_while_busy() {
    let mut session = new_session();
    session.append_pair("First");

    assert_eq!(session.append_pair("Second"), None);
    assert_eq!(session.messages().len(), 3);
    assert_eq!(session.current_turn(), 1);
    assert_eq!(pending_count(&session), 1);
}

#[test]
fn it_resolves_current_turn() {
    let mut session = new_session();
    let turn = session.append_pair("First").unwrap();

    assert!(session.resolve(turn, "Answer"));
    assert!(!session.is_busy());
    assert_eq!(session.messages().last().unwrap().text, "Answer");
    assert_eq!(pending_count(&session), 0);
}

#[test]
fn it_fails_current_turn() {
    let mut session = new_session();
    let turn = session.append_pair("First").unwrap();

    assert!(session.fail(turn, "Broken"));
    assert!(!session.is_busy());
    assert_eq!(session.messages().last().unwrap().text, "Broken");
}

#[test]
fn it_settles_only_once() {
    let mut session = new_session();
    let turn = session.append_pair("First").unwrap();

    assert!(session.resolve(turn, "Answer"));
    assert!(!session.fail(turn, "Broken"));
    assert_eq!(session.messages().last().unwrap().text, "Answer");
}

#[test]
fn it_ignores_unknown_turns() {
    let mut session = new_session();
    let turn = session.append_pair("First").unwrap();

    assert!(!session.resolve(turn + 1, "Answer"));
    assert!(session.is_busy());
}

#[test]
fn it_resets_to_single_greeting() {
    let mut session = new_session();
    let turn = session.append_pair("First").unwrap();
    session.resolve(turn, "Answer");
    session.append_pair("Second");

    session.reset(
        Scope::parse("10-A"),
        Message::new(Role::Assistant, "Hello 10-A!"),
    );

    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages()[0].text, "Hello 10-A!");
    assert_eq!(session.scope(), &Scope::parse("10-A"));
    assert!(!session.is_busy());
}

#[test]
fn it_drops_completions_from_before_reset() {
    let mut session = new_session();
    let stale = session.append_pair("First").unwrap();

    session.reset(
        Scope::parse("10-A"),
        Message::new(Role::Assistant, "Hello 10-A!"),
    );
    let fresh = session.append_pair("Second").unwrap();

    assert_ne!(stale, fresh);
    assert!(!session.resolve(stale, "Late answer"));
    assert!(session.is_busy());

    assert!(session.resolve(fresh, "Fresh answer"));
    assert_eq!(session.messages().len(), 3);
    assert_eq!(session.messages()[2].text, "Fresh answer");
}
