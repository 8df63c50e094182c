//! # Command Execution Module / 命令执行模块
//!
//! Spawns external processes and captures their merged output.
//!
//! 派生外部进程并捕获其合并后的输出。

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::infra::t;

/// Spawns a command, captures its stdout and stderr.
/// Both streams are read concurrently, line by line, into a single string so
/// that lines appear in the order they arrived.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The combined stdout and stderr as a `String`.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
/// 两个流被并发逐行读取到同一个字符串中，使各行按到达顺序出现。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> (std::io::Result<std::process::ExitStatus>, String) {
    let mut child = match cmd
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return (Err(e), String::new()),
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return (
            Err(std::io::Error::other(t!("command.capture_failed").to_string())),
            String::new(),
        );
    };

    let output = Arc::new(tokio::sync::Mutex::new(String::new()));
    let stdout_handle = tokio::spawn(collect_lines(stdout, Arc::clone(&output)));
    let stderr_handle = tokio::spawn(collect_lines(stderr, Arc::clone(&output)));

    let status = child.wait().await;

    // Drain both readers so no trailing output is lost.
    // 等待两个读取任务完成，以免丢失末尾的输出。
    if let Err(e) = stdout_handle.await {
        log::error!("Failed to join stdout task: {}", e);
    }
    if let Err(e) = stderr_handle.await {
        log::error!("Failed to join stderr task: {}", e);
    }

    let text = output.lock().await.clone();
    (status, text)
}

/// Appends each line of `stream` to `output`. Lines are decoded lossily so a
/// stray non-UTF-8 byte only affects its own line.
async fn collect_lines<R>(stream: R, output: Arc<tokio::sync::Mutex<String>>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']);
                let mut output = output.lock().await;
                output.push_str(line);
                output.push('\n');
            }
            Err(e) => {
                log::warn!("Stopped reading child output: {}", e);
                break;
            }
        }
    }
}

/// Renders a program and its arguments as a copy-pasteable shell line.
/// 将程序及其参数渲染为可复制粘贴的 shell 命令行。
pub fn render_command_line(program: &str, args: &[String]) -> String {
    let words = std::iter::once(program).chain(args.iter().map(String::as_str));
    shlex::try_join(words).unwrap_or_else(|_| {
        // Arguments with NUL bytes cannot be quoted; show them raw.
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    })
}
