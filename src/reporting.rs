//! # Reporting Module / 报告模块
//!
//! This module handles the display and export of batch reports.
//! It prints colorful, localized progress and summaries to the console and
//! writes HTML and JSON reports to disk.
//!
//! 此模块处理批次报告的显示和导出。
//! 它在控制台打印彩色、本地化的进度和摘要，并将 HTML 和 JSON 报告写入磁盘。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{print_summary, ConsoleReporter};
pub use html::generate_html_report;
pub use json::write_json_report;
