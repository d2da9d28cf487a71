pub mod praxis;

use anyhow::bail;
use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ReplyServiceBox;

pub struct BackendManager {}

impl BackendManager {
    pub fn get() -> Result<ReplyServiceBox> {
        let url = Config::get(ConfigKey::ServerURL);
        if let Err(err) = reqwest::Url::parse(&url) {
            bail!(format!("Invalid server-url '{url}': {err}"));
        }

        return Ok(Box::<praxis::PraxisServer>::default());
    }
}
