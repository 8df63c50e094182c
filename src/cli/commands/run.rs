//! # Run Command Module / 运行命令模块
//!
//! This module implements the `acceptance` and `integration` commands, which
//! run every test of a manifest against the simulator one or more times.
//!
//! 此模块实现 `acceptance` 和 `integration` 命令，
//! 针对模拟器运行清单中的每个测试一次或多次。

use anyhow::{Context, Result};
use colored::*;
use std::num::NonZeroU32;
use std::path::PathBuf;

use crate::{
    core::{
        batch::run_batch,
        config::{HarnessConfig, RunOptions, TestMode},
        manifest::ManifestSource,
    },
    infra::t,
    reporting::{generate_html_report, print_summary, write_json_report, ConsoleReporter},
};

/// Everything the command line supplied for one batch.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub mode: TestMode,
    pub verbose: bool,
    pub iterations: u32,
    pub seed: Option<u64>,
    pub config: PathBuf,
    /// Whether `config` was named on the command line (and so must exist).
    pub config_explicit: bool,
    pub manifest: Option<PathBuf>,
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Executes a batch with the provided arguments.
///
/// # Arguments
/// * `request` - The options parsed from the command line
/// * `explicit_language` - The `--lang` value, which takes precedence over the config
///
/// # Returns
/// An error when the batch could not run, or when any run did not pass cleanly
pub async fn execute(request: RunRequest, explicit_language: Option<String>) -> Result<()> {
    let config = HarnessConfig::load(&request.config, request.config_explicit)?;
    let locale = explicit_language.unwrap_or_else(|| config.language.clone());
    rust_i18n::set_locale(&locale);

    let options = RunOptions {
        mode: request.mode,
        verbose: request.verbose,
        iterations: NonZeroU32::new(request.iterations)
            .context(t!("iterations_must_be_positive", locale = &locale).to_string())?,
        seed: request.seed,
    };

    print_preamble(&options, &locale);

    let manifest = request
        .manifest
        .unwrap_or_else(|| config.default_manifest(options.mode).to_path_buf());
    println!(
        "{}",
        t!("loading_manifest", locale = &locale, path = manifest.display()).cyan()
    );
    let source = ManifestSource::new(manifest, options.mode);

    let mut reporter = ConsoleReporter::new(&locale);
    let report = run_batch(&source, &config, &options, &mut reporter).await?;

    print_summary(&report, &locale);

    if let Some(report_path) = &request.html {
        println!("\n{}", t!("generating_html", locale = &locale, path = report_path.display()));
        if let Err(e) = generate_html_report(&report, report_path, &locale) {
            eprintln!("{} {:#}", t!("html_failed", locale = &locale).red(), e);
        }
    }
    if let Some(report_path) = &request.json {
        println!("\n{}", t!("generating_json", locale = &locale, path = report_path.display()));
        if let Err(e) = write_json_report(&report, report_path) {
            eprintln!("{} {:#}", t!("json_failed", locale = &locale).red(), e);
        }
    }

    if report.has_problems() {
        anyhow::bail!(t!("batch_had_problems", locale = &locale).to_string());
    }
    println!("\n{}", t!("all_tests_passed", locale = &locale).green().bold());
    Ok(())
}

fn print_preamble(options: &RunOptions, locale: &str) {
    if options.verbose {
        println!("{}", t!("using_verbose", locale = locale));
    }
    if options.iterations.get() > 1 {
        println!("{}", t!("running_n_times", locale = locale, count = options.iterations.get()));
    }
    if let Some(seed) = options.seed {
        println!("{}", t!("using_seed", locale = locale, seed = seed));
    }
}
