#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;
use super::Role;
use super::Scope;
use super::TurnId;

/// Shown when the reply body carries neither a reply nor an error.
pub const GENERIC_FAILURE_TEXT: &str = "Something went wrong.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub text: String,
}

impl From<&Message> for HistoryEntry {
    fn from(message: &Message) -> HistoryEntry {
        return HistoryEntry {
            role: message.role,
            text: message.text.to_string(),
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyRequest {
    pub message: String,
    pub history: Vec<HistoryEntry>,
    #[serde(rename = "className")]
    pub scope: Option<String>,
}

impl ReplyRequest {
    pub fn new(message: &str, history: &[Message], scope: &Scope) -> ReplyRequest {
        return ReplyRequest {
            message: message.to_string(),
            history: history.iter().map(HistoryEntry::from).collect(),
            scope: scope.wire_value(),
        };
    }
}

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReplyBody {
    /// Text to display for this body: the reply, else the server's error,
    /// else a generic failure. Empty strings count as missing.
    pub fn into_text(self) -> String {
        if let Some(reply) = self.reply.filter(|e| return !e.is_empty()) {
            return reply;
        }

        if let Some(error) = self.error.filter(|e| return !e.is_empty()) {
            return error;
        }

        return GENERIC_FAILURE_TEXT.to_string();
    }
}

/// Falsy JSON values (`null`, `false`, `0`, `""`) count as missing. Other
/// non-string values are shown as their JSON text.
fn field_text(value: serde_json::Value) -> Option<String> {
    return match value {
        serde_json::Value::Null | serde_json::Value::Bool(false) => None,
        serde_json::Value::String(text) if text.is_empty() => None,
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Number(num) if num.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    };
}

/// Reads whatever JSON the server sent. Anything other than an object
/// carries neither field.
impl From<serde_json::Value> for ReplyBody {
    fn from(value: serde_json::Value) -> ReplyBody {
        let mut fields = match value {
            serde_json::Value::Object(fields) => fields,
            _ => return ReplyBody::default(),
        };

        return ReplyBody {
            reply: fields.remove("reply").and_then(field_text),
            error: fields.remove("error").and_then(field_text),
        };
    }
}

/// A request tagged with the turn it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnRequest {
    pub turn: TurnId,
    pub request: ReplyRequest,
}

/// What came back for a turn. `Err` covers transport and parse failures.
#[derive(Debug)]
pub struct TurnOutcome {
    pub turn: TurnId,
    pub result: Result<ReplyBody>,
}

#[async_trait]
pub trait ReplyService {
    /// Sends one turn to the reply service. Called exactly once per accepted
    /// submission; there are no retries.
    ///
    /// An `Ok` body may still carry a server-side error in its `error` field.
    /// `Err` is reserved for failures where no usable body came back at all.
    async fn get_reply(&self, request: &ReplyRequest) -> Result<ReplyBody>;
}

pub type ReplyServiceBox = Box<dyn ReplyService + Send + Sync>;
