use super::Greeting;
use crate::domain::models::MarkupBlock;
use crate::domain::models::MarkupSpan;
use crate::domain::models::Role;
use crate::domain::models::Scope;
use crate::domain::services::MarkupRenderer;

#[test]
fn it_greets_whole_school() {
    let msg = Greeting::for_scope(&Scope::Aggregate);

    assert_eq!(msg.role, Role::Assistant);
    assert!(!msg.is_pending());
    insta::assert_snapshot!(msg.text, @r###"
    👋 Hi! I'm **PRAXIS AI**, your teaching assistant. I have live access to the data for **the whole school**.

    Ask me anything: at-risk students, cluster insights, performance trends, fairness concerns, and more.
    "###);
}

#[test]
fn it_greets_segment() {
    let msg = Greeting::for_scope(&Scope::parse("10-A"));

    assert!(msg.text.contains("**10-A**"));
    assert!(!msg.text.contains("whole school"));
}

#[test]
fn it_renders_scope_in_bold() {
    let blocks = MarkupRenderer::render(&Greeting::text(&Scope::parse("10-B")));

    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[1], MarkupBlock::Spacer);
    assert!(blocks[0]
        .spans()
        .contains(&MarkupSpan::Bold("10-B".to_string())));
}
