#[cfg(test)]
#[path = "greeting_test.rs"]
mod tests;

use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::Scope;

pub struct Greeting {}

impl Greeting {
    pub fn text(scope: &Scope) -> String {
        return format!(
            "👋 Hi! I'm **PRAXIS AI**, your teaching assistant. I have live access to the data for **{}**.\n\nAsk me anything: at-risk students, cluster insights, performance trends, fairness concerns, and more.",
            scope.prose_name()
        );
    }

    /// The single message a session holds right after (re)activation.
    pub fn for_scope(scope: &Scope) -> Message {
        return Message::new(Role::Assistant, &Greeting::text(scope));
    }
}
