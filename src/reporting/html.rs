//! # HTML Reporting Module / HTML 报告模块
//!
//! Renders a [`BatchReport`] as a standalone HTML page: batch timing at the
//! top and one results table per iteration.
//!
//! 将 [`BatchReport`] 渲染为独立的 HTML 页面：顶部为批次耗时，每轮迭代一个结果表格。

use anyhow::{Context, Result};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::fs;
use std::path::Path;

use crate::core::models::{format_float, BatchReport, IterationSummary, Outcome, ReportedRun};
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 2em; color: #24292e; }
h1 { border-bottom: 1px solid #e1e4e8; padding-bottom: .3em; }
.generated { color: #6a737d; }
.summary-container { display: flex; gap: 2em; margin: 1.5em 0; }
.summary-item { display: flex; flex-direction: column; }
.summary-item .count { font-size: 1.8em; font-weight: 600; }
.summary-item .label { color: #6a737d; }
table { border-collapse: collapse; width: 100%; margin-bottom: 2em; }
th, td { border: 1px solid #e1e4e8; padding: 6px 10px; text-align: left; vertical-align: top; }
th { background: #f6f8fa; }
pre { margin: 0; white-space: pre-wrap; }
.status-ok { color: #22863a; font-weight: 600; }
.status-failed { color: #cb2431; font-weight: 600; }
.status-error { color: #b08800; font-weight: 600; }
.number { text-align: right; }
"#;

/// Renders the report into an HTML string.
/// 将报告渲染为 HTML 字符串。
pub fn render_html_report(report: &BatchReport, locale: &str) -> String {
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let title = t!("html_report.title", locale = locale).to_string();

    let markup = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (title) }
                p.generated { (t!("html_report.generated", locale = locale, time = generated).to_string()) }
                div.summary-container {
                    (summary_item(&report.iterations.len().to_string(), &t!("html_report.iterations", locale = locale)))
                    (summary_item(&format!("{}s", format_float(report.total_time)), &t!("html_report.total_time", locale = locale)))
                    (summary_item(&format!("{}s", format_float(report.average_time)), &t!("html_report.average_time", locale = locale)))
                }
                @for iteration in &report.iterations {
                    (iteration_table(iteration, locale))
                }
            }
        }
    };
    markup.into_string()
}

/// Writes the HTML report to `output_path`.
pub fn generate_html_report(report: &BatchReport, output_path: &Path, locale: &str) -> Result<()> {
    fs::write(output_path, render_html_report(report, locale))
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))
}

fn summary_item(count: &str, label: &str) -> Markup {
    html! {
        div.summary-item {
            span.count { (count) }
            span.label { (label) }
        }
    }
}

fn iteration_table(iteration: &IterationSummary, locale: &str) -> Markup {
    html! {
        h2 {
            (t!("html_report.iteration", locale = locale, index = iteration.index).to_string())
            " ("
            (format_float(iteration.total_real_seconds))
            "s)"
        }
        table {
            thead {
                tr {
                    th { (t!("html_report.header.name", locale = locale).to_string()) }
                    th { (t!("html_report.header.seed", locale = locale).to_string()) }
                    th { (t!("html_report.header.status", locale = locale).to_string()) }
                    th.number { (t!("html_report.header.real_time", locale = locale).to_string()) }
                    th.number { (t!("html_report.header.wall_time", locale = locale).to_string()) }
                    th { (t!("html_report.header.report", locale = locale).to_string()) }
                }
            }
            tbody {
                @for run in &iteration.runs {
                    @let result = &run.result;
                    tr {
                        td { (result.case.name) }
                        td { (result.seed().map(|s| s.to_string()).unwrap_or_default()) }
                        td class=(status_class(run)) { (status_label(run, locale)) }
                        td.number {
                            (result.elapsed_real_seconds.map(|s| format!("{}s", format_float(s))).unwrap_or_else(|| "N/A".to_string()))
                        }
                        td.number { (format!("{:.2}s", result.wall_time.as_secs_f64())) }
                        td { pre { (run.line) } }
                    }
                }
            }
        }
    }
}

fn status_class(run: &ReportedRun) -> &'static str {
    match run.result.outcome {
        _ if run.is_clean() => "status-ok",
        Outcome::EmergencyFailure { .. } => "status-failed",
        _ => "status-error",
    }
}

fn status_label(run: &ReportedRun, locale: &str) -> String {
    match run.result.outcome {
        Outcome::Ok if run.format_error.is_some() => {
            t!("html_report.status.format_error", locale = locale)
        }
        Outcome::Ok => t!("html_report.status.ok", locale = locale),
        Outcome::EmergencyFailure { .. } => t!("html_report.status.emergency", locale = locale),
        Outcome::MalformedOutput { .. } => t!("html_report.status.malformed", locale = locale),
        Outcome::InvocationFailed { .. } => t!("html_report.status.error", locale = locale),
    }
    .to_string()
}
