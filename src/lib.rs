//! # Sim Harness Library / Sim Harness 库
//!
//! This library provides the core functionality for the simulator test
//! harness: it runs the acceptance or integration tests listed in a manifest
//! against the simulator, parses what the simulator prints and aggregates the
//! results of repeated runs into a report.
//!
//! 此库为模拟器测试工具提供核心功能：
//! 针对模拟器运行清单中列出的验收或集成测试，解析模拟器的输出，
//! 并将多次运行的结果聚合为报告。
//!
//! ## Modules / 模块
//!
//! - `core` - Manifest reader, simulator invoker, output parser, classifier and aggregator
//! - `infra` - Infrastructure services like process execution and path handling
//! - `reporting` - Console, HTML and JSON reports
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 清单读取、模拟器调用、输出解析、结果分类和聚合
//! - `infra` - 基础设施服务，如进程执行和路径处理
//! - `reporting` - 控制台、HTML 和 JSON 报告
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::aggregate;
pub use crate::core::config;
pub use crate::core::models;
pub use crate::core::parser;

/// Detects the system locale and picks the closest available language.
///
/// It attempts to match the full locale (e.g., "zh-CN"), then just the
/// language code (e.g., "en"), and finally falls back to "en".
///
/// 检测系统区域设置并选择最接近的可用语言。
pub fn detect_locale() -> String {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    if available_locales.contains(&locale.as_str()) {
        return locale;
    }
    locale
        .split('-')
        .next()
        .filter(|lang_code| available_locales.contains(lang_code))
        .unwrap_or("en")
        .to_string()
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
