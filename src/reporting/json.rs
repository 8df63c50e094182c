//! # JSON Reporting Module / JSON 报告模块
//!
//! Serializes the batch report for consumption by other tools.
//!
//! 序列化批次报告以供其他工具使用。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::models::BatchReport;

/// Writes the report as pretty-printed JSON to `output_path`.
/// 将报告以格式化 JSON 写入 `output_path`。
pub fn write_json_report(report: &BatchReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report: {}", output_path.display()))
}
