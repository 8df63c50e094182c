//! # Configuration Initialization Module / 配置初始化模块
//!
//! This module provides an interactive command-line wizard that writes a
//! `Harness.toml` describing where the simulator lives and how it is started.
//!
//! 此模块提供交互式命令行向导，用于写入描述模拟器位置及启动方式的 `Harness.toml`。
//!
//! ## Features / 功能特性
//!
//! - **Interactive Wizard**: Prompts for the launcher, classpath, header file and timeout
//! - **Non-interactive Mode**: Writes the defaults without asking anything
//! - **Overwrite Protection**: Confirmation prompts before overwriting an existing configuration
//!
//! - **交互式向导**: 提示输入启动器、类路径、头文件和超时时间
//! - **非交互模式**: 不询问任何问题直接写入默认值
//! - **覆盖保护**: 覆盖现有配置前的确认提示

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::fs;
use std::path::Path;

use crate::core::config::{HarnessConfig, DEFAULT_CONFIG_FILE};
use crate::infra::t;

/// Runs the interactive wizard to generate a `Harness.toml` file in the
/// current directory.
///
/// 运行交互式向导，在当前目录生成 `Harness.toml` 文件。
pub fn run_init_wizard(language: &str, non_interactive: bool) -> Result<()> {
    let config_path = Path::new(DEFAULT_CONFIG_FILE);

    if non_interactive {
        if config_path.exists() {
            println!(
                "{}",
                t!("init_exists_skipped", locale = language, path = config_path.display()).yellow()
            );
            return Ok(());
        }
        let config = HarnessConfig {
            language: language.to_string(),
            ..HarnessConfig::default()
        };
        return write_config(config_path, &config, language);
    }

    let theme = ColorfulTheme::default();
    println!("\n{}", t!("init_wizard_welcome", locale = language).cyan().bold());
    println!("{}", t!("init_wizard_description", locale = language));

    if config_path.exists() {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!("init_overwrite_prompt", locale = language, path = config_path.display()))
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    let defaults = HarnessConfig::default();

    let java_path: String = Input::with_theme(&theme)
        .with_prompt(t!("init_java_path_prompt", locale = language))
        .default(defaults.java_path.clone())
        .interact_text()?;
    let classpath: String = Input::with_theme(&theme)
        .with_prompt(t!("init_classpath_prompt", locale = language))
        .default(defaults.classpath.clone())
        .interact_text()?;
    let header_file: String = Input::with_theme(&theme)
        .with_prompt(t!("init_header_prompt", locale = language))
        .default(defaults.header_file.clone())
        .interact_text()?;
    let timeout_secs: u64 = Input::with_theme(&theme)
        .with_prompt(t!("init_timeout_prompt", locale = language))
        .default(0)
        .interact_text()?;

    let config = HarnessConfig {
        language: language.to_string(),
        java_path,
        classpath,
        header_file,
        timeout_secs: (timeout_secs > 0).then_some(timeout_secs),
        ..defaults
    };

    write_config(config_path, &config, language)
}

/// Writes the configuration to a file and reports where it went.
fn write_config(path: &Path, config: &HarnessConfig, language: &str) -> Result<()> {
    let content = config.to_toml()?;
    fs::write(path, content)
        .with_context(|| t!("init_write_failed", locale = language, path = path.display()).to_string())?;
    println!(
        "\n{}",
        t!("init_success", locale = language, path = path.display()).green()
    );
    Ok(())
}
