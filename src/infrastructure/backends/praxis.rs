#[cfg(test)]
#[path = "praxis_test.rs"]
mod tests;

use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ReplyBody;
use crate::domain::models::ReplyRequest;
use crate::domain::models::ReplyService;

/// The dashboard's chat endpoint.
pub struct PraxisServer {
    url: String,
}

impl Default for PraxisServer {
    fn default() -> PraxisServer {
        return PraxisServer {
            url: Config::get(ConfigKey::ServerURL),
        };
    }
}

#[async_trait]
impl ReplyService for PraxisServer {
    #[allow(clippy::implicit_return)]
    async fn get_reply(&self, request: &ReplyRequest) -> Result<ReplyBody> {
        let url = format!("{url}/api/gemini/chat", url = self.url.trim_end_matches('/'));
        let res = reqwest::Client::new().post(url).json(request).send().await?;

        // Model failures come back as a 500 that still carries an `error`
        // field, so the body is read whatever the status.
        let status = res.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Reply service returned an error status");
        }

        let value = res
            .json::<serde_json::Value>()
            .await
            .with_context(|| return format!("Failed to parse reply body (status {status})"))?;
        let body = ReplyBody::from(value);
        tracing::debug!(body = ?body, "Reply response");

        return Ok(body);
    }
}
