//! # Command-Line Interface / 命令行接口
//!
//! Builds the `sim-harness` command line and dispatches to the subcommands.
//!
//! 构建 `sim-harness` 命令行并分派到各个子命令。

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf};

use crate::core::config::{DEFAULT_CONFIG_FILE, TestMode};
use crate::infra::t;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|arg| arg == "--lang")
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}

fn run_args(command: Command, locale: &str, with_seed: bool) -> Command {
    let command = command
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("arg_verbose", locale = locale).to_string())
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("num")
                .short('n')
                .long("num")
                .help(t!("arg_num", locale = locale).to_string())
                .value_name("N")
                .default_value("1")
                .value_parser(clap::value_parser!(u32).range(1..))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("arg_config", locale = locale).to_string())
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("manifest")
                .short('m')
                .long("manifest")
                .help(t!("arg_manifest", locale = locale).to_string())
                .value_name("MANIFEST")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .help(t!("arg_html", locale = locale).to_string())
                .value_name("HTML")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help(t!("arg_json", locale = locale).to_string())
                .value_name("JSON")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        );

    if with_seed {
        command.arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .help(t!("arg_seed", locale = locale).to_string())
                .value_name("SEED")
                .value_parser(clap::value_parser!(u64))
                .action(ArgAction::Set),
        )
    } else {
        command
    }
}

fn build_cli(locale: &str) -> Command {
    Command::new("sim-harness")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(run_args(
            Command::new("acceptance").about(t!("cmd_acceptance_about", locale = locale).to_string()),
            locale,
            true,
        ))
        .subcommand(run_args(
            Command::new("integration").about(t!("cmd_integration_about", locale = locale).to_string()),
            locale,
            false,
        ))
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help(t!("arg_non_interactive", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn run_request(mode: TestMode, matches: &ArgMatches) -> commands::run::RunRequest {
    let explicit_config = matches.get_one::<PathBuf>("config").cloned();
    commands::run::RunRequest {
        mode,
        verbose: matches.get_flag("verbose"),
        iterations: matches.get_one::<u32>("num").copied().unwrap_or(1),
        seed: if mode == TestMode::Acceptance {
            matches.get_one::<u64>("seed").copied()
        } else {
            None
        },
        config_explicit: explicit_config.is_some(),
        config: explicit_config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
        manifest: matches.get_one::<PathBuf>("manifest").cloned(),
        html: matches.get_one::<PathBuf>("html").cloned(),
        json: matches.get_one::<PathBuf>("json").cloned(),
    }
}

/// Parses the command line and runs the selected subcommand.
/// 解析命令行并运行所选子命令。
pub async fn run() -> Result<()> {
    // Pre-parse language and initialize i18n first.
    let explicit_language = pre_parse_language();
    let language = explicit_language.clone().unwrap_or_else(crate::detect_locale);
    rust_i18n::set_locale(&language);

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("acceptance", sub)) => {
            commands::run::execute(run_request(TestMode::Acceptance, sub), explicit_language).await
        }
        Some(("integration", sub)) => {
            commands::run::execute(run_request(TestMode::Integration, sub), explicit_language).await
        }
        Some(("init", sub)) => {
            commands::init::run_init_wizard(&language, sub.get_flag("non-interactive"))
        }
        // `subcommand_required` makes clap print help before we get here.
        _ => Ok(()),
    }
}
