#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::help_text;
use crate::domain::models::Scope;
use crate::domain::services::MarkupRenderer;
use crate::domain::services::Orchestrator;
use crate::infrastructure::backends::BackendManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("PRAXIS_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return dirs::cache_dir()
        .unwrap_or_else(env::temp_dir)
        .join("praxis");
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

/// Renders markup into its block tree as pretty JSON.
pub fn render_markup(text: &str) -> Result<String> {
    let blocks = MarkupRenderer::render(text);
    return Ok(serde_json::to_string_pretty(&blocks)?);
}

async fn render_stdin() -> Result<()> {
    let mut text = String::new();
    tokio::io::stdin().read_to_string(&mut text).await?;
    println!("{}", render_markup(&text)?);

    return Ok(());
}

/// Runs a single turn without the terminal UI and prints the reply.
async fn ask(question: &str) -> Result<()> {
    let backend = BackendManager::get()?;
    let mut orchestrator = Orchestrator::new(Scope::parse(&Config::get(ConfigKey::Scope)));
    if !orchestrator.send(question, backend.as_ref()).await {
        bail!("Question must not be empty.");
    }

    if let Some(reply) = orchestrator.session().messages().last() {
        println!("{}", reply.text);
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Praxis")
        .hide(true)
        .subcommand(
            Command::new("render").about("Reads assistant markup from stdin and prints the rendered block tree as JSON.")
        )
        .subcommand(
            Command::new("ask")
                .about("Sends one question to the reply service using the configured scope and prints the raw reply.")
                .arg(
                    clap::Arg::new("question")
                        .help("Question to ask")
                        .required(true),
                )
        )
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Praxis with environment variable RUST_LOG=praxis")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn arg_scope() -> Arg {
    return Arg::new(ConfigKey::Scope.to_string())
        .short('s')
        .long(ConfigKey::Scope.to_string())
        .env("PRAXIS_SCOPE")
        .num_args(1)
        .help(format!(
            "Data scope the conversation starts in. Use `School` for all classes. [default: {}]",
            Config::default(ConfigKey::Scope)
        ));
}

fn arg_scopes() -> Arg {
    return Arg::new(ConfigKey::Scopes.to_string())
        .long(ConfigKey::Scopes.to_string())
        .env("PRAXIS_SCOPES")
        .num_args(1)
        .help(format!(
            "Comma separated list of scopes to switch between. [default: {}]",
            Config::default(ConfigKey::Scopes)
        ));
}

fn arg_server_url() -> Arg {
    return Arg::new(ConfigKey::ServerURL.to_string())
        .long(ConfigKey::ServerURL.to_string())
        .env("PRAXIS_SERVER_URL")
        .num_args(1)
        .help(format!(
            "Praxis server URL hosting the chat endpoint. [default: {}]",
            Config::default(ConfigKey::ServerURL)
        ));
}

fn arg_username() -> Arg {
    return Arg::new(ConfigKey::Username.to_string())
        .short('u')
        .long(ConfigKey::Username.to_string())
        .env("PRAXIS_USERNAME")
        .num_args(1)
        .help("Your user name displayed on your chat bubbles. [default: $USER]");
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("praxis")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_scope())
        .arg(arg_scopes())
        .arg(arg_server_url())
        .arg(arg_username())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("PRAXIS_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        );
}

/// Handles one-shot subcommands. Returns true when the chat should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("render", _)) => {
                    render_stdin().await?;
                }
                Some(("ask", ask_matches)) => {
                    Config::load(build(), vec![&matches, debug_matches, ask_matches]).await?;
                    if let Some(question) = ask_matches.get_one::<String>("question") {
                        ask(question).await?;
                    }
                }
                Some(("log-path", _)) => {
                    let log_path = log_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
