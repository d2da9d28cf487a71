use super::Message;
use super::Role;

#[test]
fn it_executes_new() {
    let msg = Message::new(Role::User, "Hi there!");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.role.to_string(), "user");
    assert_eq!(msg.text, "Hi there!".to_string());
    assert!(!msg.is_pending());
}

#[test]
fn it_keeps_tabs_verbatim() {
    let msg = Message::new(Role::User, "\tindented");
    assert_eq!(msg.text, "\tindented");
}

#[test]
fn it_creates_placeholder() {
    let msg = Message::placeholder();
    assert_eq!(msg.role, Role::Assistant);
    assert_eq!(msg.role.to_string(), "assistant");
    assert!(msg.text.is_empty());
    assert!(msg.is_pending());
}

#[test]
fn it_settles_once() {
    let mut msg = Message::placeholder();

    assert!(msg.settle("First"));
    assert!(!msg.is_pending());
    assert_eq!(msg.text, "First");

    assert!(!msg.settle("Second"));
    assert_eq!(msg.text, "First");
}

#[test]
fn it_refuses_to_settle_final_messages() {
    let mut msg = Message::new(Role::Assistant, "Done");
    assert!(!msg.settle("Changed"));
    assert_eq!(msg.text, "Done");
}

#[test]
fn it_serializes_roles_lowercase() {
    let res = serde_json::to_string(&vec![Role::User, Role::Assistant]).unwrap();
    assert_eq!(res, r#"["user","assistant"]"#);
}
