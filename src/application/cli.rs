use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendName;
use crate::domain::services::actions::help_text;
use crate::domain::services::TranscriptStore;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
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

fn subcommand_transcript() -> Command {
    return Command::new("transcript")
        .about("Manage the saved chat transcript.")
        .arg_required_else_help(true)
        .subcommand(Command::new("path").about("Print the path to the saved transcript file."))
        .subcommand(Command::new("clear").about("Delete the saved transcript."));
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Finbot")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Finbot with environment variable RUST_LOG=finbot")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn arg_backend() -> Arg {
    return Arg::new(ConfigKey::Backend.to_string())
        .short('b')
        .long(ConfigKey::Backend.to_string())
        .env("FINBOT_BACKEND")
        .num_args(1)
        .help(format!(
            "The backend used to answer questions. [default: {}]",
            Config::default(ConfigKey::Backend)
        ))
        .value_parser(PossibleValuesParser::new(BackendName::VARIANTS));
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.to_string())
        .short('m')
        .long(ConfigKey::Model.to_string())
        .env("FINBOT_MODEL")
        .num_args(1)
        .help(format!(
            "The Gemini model used when talking to the API directly. [default: {}]",
            Config::default(ConfigKey::Model)
        ));
}

fn subcommand_chat() -> Command {
    return Command::new("chat")
        .about("Start chatting with Finbot.")
        .arg(arg_backend())
        .arg(arg_model());
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

    return Command::new("finbot")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(subcommand_transcript())
        .arg(arg_backend())
        .arg(arg_model())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("FINBOT_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("FINBOT_USERNAME")
                .num_args(1)
                .help("Your user name displayed in all chat bubbles.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::FinbotURL.to_string())
                .long(ConfigKey::FinbotURL.to_string())
                .env("FINBOT_URL")
                .num_args(1)
                .help(format!(
                    "Finbot server URL when using the finbot backend. [default: {}]",
                    Config::default(ConfigKey::FinbotURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiURL.to_string())
                .long(ConfigKey::GeminiURL.to_string())
                .env("FINBOT_GEMINI_URL")
                .num_args(1)
                .help(format!(
                    "Gemini API URL when using the gemini backend. [default: {}]",
                    Config::default(ConfigKey::GeminiURL)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiToken.to_string())
                .long(ConfigKey::GeminiToken.to_string())
                .env("FINBOT_GEMINI_TOKEN")
                .num_args(1)
                .help("Gemini API token when using the gemini backend.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::CompletionTimeout.to_string())
                .long(ConfigKey::CompletionTimeout.to_string())
                .env("FINBOT_COMPLETION_TIMEOUT")
                .num_args(1)
                .help(format!(
                    "Time to wait in milliseconds before giving up on a completion request. [default: {}]",
                    Config::default(ConfigKey::CompletionTimeout)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::TranscriptFile.to_string())
                .long(ConfigKey::TranscriptFile.to_string())
                .env("FINBOT_TRANSCRIPT_FILE")
                .num_args(1)
                .help(format!(
                    "Path where the chat transcript is saved between runs. [default: {}]",
                    Config::default(ConfigKey::TranscriptFile)
                ))
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir().unwrap().join("finbot/debug.log");
                    println!("{}", log_path.to_str().unwrap());
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
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
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
        Some(("transcript", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("path", _)) => {
                Config::load(build(), vec![&matches, subcmd_matches]).await?;
                println!("{}", Config::get(ConfigKey::TranscriptFile));
                return Ok(false);
            }
            Some(("clear", _)) => {
                Config::load(build(), vec![&matches, subcmd_matches]).await?;
                TranscriptStore::default().clear().await?;
                println!("Deleted the saved transcript");
                return Ok(false);
            }
            _ => {
                subcommand_transcript().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
