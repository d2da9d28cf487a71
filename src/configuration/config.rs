#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::AGGREGATE_SCOPE;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConfigFile,
    Scope,
    Scopes,
    ServerURL,
    Username,
}

/// Directory for praxis' own files when no explicit path is given.
pub fn app_dir() -> path::PathBuf {
    #[cfg(not(target_os = "macos"))]
    let base = dirs::config_dir().unwrap_or_else(env::temp_dir);
    #[cfg(target_os = "macos")]
    let base = dirs::home_dir()
        .map(|home| return home.join(".config"))
        .unwrap_or_else(env::temp_dir);

    return base.join("praxis");
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        match key {
            ConfigKey::ConfigFile => {
                return app_dir().join("config.toml").to_string_lossy().to_string();
            }
            ConfigKey::Scope => return AGGREGATE_SCOPE.to_string(),
            ConfigKey::Scopes => return format!("{AGGREGATE_SCOPE},10-A,10-B,10-C"),
            ConfigKey::ServerURL => return "http://localhost:5001".to_string(),
            ConfigKey::Username => {
                let user = env::var("USER").unwrap_or_default();
                if user.is_empty() {
                    return "User".to_string();
                }

                return user;
            }
        }
    }

    /// Resolves every key from defaults, then the config file, then CLI
    /// arguments and environment variables.
    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(&config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                let val = match doc.get(&key.to_string()) {
                    Some(val) => val,
                    None => continue,
                };

                // Use clap value parsers to do validation.
                let possible_values = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    .map(|arg| {
                        return arg
                            .get_possible_values()
                            .iter()
                            .map(|e| return e.get_name().to_string())
                            .collect::<Vec<String>>();
                    })
                    .unwrap_or_default();

                if let Some(val_str) = val.as_str() {
                    if val_str.is_empty() {
                        continue;
                    }
                    if !possible_values.is_empty() && !possible_values.contains(&val_str.to_string())
                    {
                        bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                    }
                    Config::set(key, val_str);
                } else if let Some(val_arr) = val.as_array() {
                    let items = val_arr
                        .iter()
                        .filter_map(|e| return e.as_str())
                        .collect::<Vec<&str>>();
                    Config::set(key, &items.join(","));
                } else {
                    bail!(format!(
                        "config.toml has an invalid value for key '{key}'. Expected a string."
                    ));
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            config_file = Config::get(ConfigKey::ConfigFile),
            scope = Config::get(ConfigKey::Scope),
            scopes = Config::get(ConfigKey::Scopes),
            server_url = Config::get(ConfigKey::ServerURL),
            username = Config::get(ConfigKey::Username),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                if key == ConfigKey::Username {
                    return Some(
                        "# Your user name displayed on your chat bubbles.\n# username = \"\""
                            .to_string(),
                    );
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default()
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let val = format!("{key} = \"{}\"", Config::default(key));

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
