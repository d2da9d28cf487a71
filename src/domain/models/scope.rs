#[cfg(test)]
#[path = "scope_test.rs"]
mod tests;

use std::fmt;

/// Identifier the dashboard uses for "every class at once".
pub const AGGREGATE_SCOPE: &str = "School";

/// The data segment questions are asked against.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Aggregate,
    Segment(String),
}

impl Scope {
    pub fn parse(id: &str) -> Scope {
        let id = id.trim();
        if id.is_empty() || id == AGGREGATE_SCOPE {
            return Scope::Aggregate;
        }

        return Scope::Segment(id.to_string());
    }

    pub fn is_aggregate(&self) -> bool {
        return *self == Scope::Aggregate;
    }

    /// Value sent to the reply service. The aggregate scope has no segment to
    /// filter by, so it goes out as null.
    pub fn wire_value(&self) -> Option<String> {
        match self {
            Scope::Aggregate => return None,
            Scope::Segment(name) => return Some(name.to_string()),
        }
    }

    /// Short label for headers, e.g. "Class 10-A".
    pub fn label(&self) -> String {
        match self {
            Scope::Aggregate => return "All classes".to_string(),
            Scope::Segment(name) => return format!("Class {name}"),
        }
    }

    /// How the scope reads in running text, e.g. "the data for 10-A".
    pub fn prose_name(&self) -> String {
        match self {
            Scope::Aggregate => return "the whole school".to_string(),
            Scope::Segment(name) => return name.to_string(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Aggregate => return f.write_str(AGGREGATE_SCOPE),
            Scope::Segment(name) => return f.write_str(name),
        }
    }
}
