//! # File System Helpers / 文件系统辅助模块
//!
//! Path expansion and resolution for configured locations.
//!
//! 用于已配置位置的路径展开与解析。

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Expands `~` and environment variables in a configured path.
///
/// # Arguments
/// * `raw` - The path as written in the configuration
///
/// # Returns
/// The expanded path, or an error naming the undefined variable
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw).with_context(|| format!("Failed to expand path: {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Makes `path` absolute relative to the current directory without requiring
/// it to exist.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}

/// Expands and then absolutizes a configured path.
pub fn resolve_path(raw: &str) -> Result<PathBuf> {
    absolute_path(&expand_path(raw)?)
}
