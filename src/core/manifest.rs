//! # Manifest Reader Module / 清单读取模块
//!
//! Reads the line-oriented test manifest. Blank lines and lines starting
//! with `;` are ignored; every other line must hold a test name followed by
//! two artifact references whose suffixes depend on the test mode.
//!
//! 读取按行组织的测试清单。空行和以 `;` 开头的行会被忽略；
//! 其余每一行必须包含测试名称，后跟两个后缀取决于测试模式的产物引用。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::config::TestMode;
use crate::core::models::TestCase;

/// Marks a comment line when it is the first non-whitespace character.
pub const COMMENT_MARKER: char = ';';

/// A manifest line that could not be turned into a test case.
/// 无法转换为测试用例的清单行。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line {line} malformed {label}")]
pub struct MalformedLineError {
    /// 1-based line number.
    pub line: usize,
    /// Position of the offending token (1 = first artifact, 2 = second).
    pub token: usize,
    /// Human-readable name of the offending token.
    pub label: &'static str,
}

/// One entry of a parsed manifest.
pub type ManifestEntry = std::result::Result<TestCase, MalformedLineError>;

/// Lazily parses manifest text, yielding one entry per non-blank,
/// non-comment line.
///
/// 惰性解析清单文本，每个非空、非注释行产生一个条目。
pub fn parse_manifest(text: &str, mode: TestMode) -> impl Iterator<Item = ManifestEntry> + '_ {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !is_ignored(line))
        .map(move |(index, line)| parse_line(index + 1, line, mode))
}

fn is_ignored(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER)
}

/// Parses a single line that is known not to be blank or a comment.
pub fn parse_line(line_number: usize, line: &str, mode: TestMode) -> ManifestEntry {
    let mut tokens = line.split_whitespace();
    // Not blank, so there is always a first token.
    let name = tokens.next().unwrap_or_default();
    let (primary_suffix, secondary_suffix) = mode.artifact_suffixes();

    let primary = check_token(tokens.next(), primary_suffix, line_number, 1, mode)?;
    let secondary = check_token(tokens.next(), secondary_suffix, line_number, 2, mode)?;

    Ok(TestCase {
        name: name.to_string(),
        primary_artifact: primary.to_string(),
        secondary_artifact: secondary.to_string(),
    })
}

fn check_token<'a>(
    token: Option<&'a str>,
    suffix: &str,
    line: usize,
    position: usize,
    mode: TestMode,
) -> std::result::Result<&'a str, MalformedLineError> {
    match token {
        Some(token) if token.ends_with(suffix) => Ok(token),
        _ => Err(MalformedLineError {
            line,
            token: position,
            label: mode.artifact_label(position),
        }),
    }
}

/// A manifest on disk. Each call to [`ManifestSource::load`] re-reads the
/// file, so the source can be replayed once per iteration.
///
/// 磁盘上的清单。每次调用 [`ManifestSource::load`] 都会重新读取文件，
/// 因此每轮迭代都可以重放该来源。
#[derive(Debug, Clone)]
pub struct ManifestSource {
    path: PathBuf,
    mode: TestMode,
}

impl ManifestSource {
    pub fn new(path: impl Into<PathBuf>, mode: TestMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the whole manifest. The file is closed before this
    /// returns, whatever the lines contain.
    ///
    /// 读取并解析整个清单。无论内容如何，文件都会在返回前关闭。
    pub fn load(&self) -> Result<Vec<ManifestEntry>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read manifest: {}", self.path.display()))?;
        Ok(parse_manifest(&text, self.mode).collect())
    }
}
