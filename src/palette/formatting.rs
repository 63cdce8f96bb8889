//! Formatting utilities for terminal output.
//!
//! Renders command responses, history entries, and errors as plain text,
//! with optional ANSI styling for headers and messages.

use super::{HistoryEntry, Outcome};
use crate::{errors::ErrorRecord, registry::CommandResponse};

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats command names with styling
pub fn format_command(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET)
}

/// Formats descriptions with muted styling
pub fn format_description(text: &str) -> String {
    format!("{}{}{}", Colors::DIM, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Renders a response as plain text.
///
/// Every built-in kind has a rendering. [`CommandResponse::Custom`] kinds
/// are unknown to the core and render as an unsupported-type notice.
pub fn render_response(response: &CommandResponse) -> String {
    match response {
        CommandResponse::Empty => String::new(),
        CommandResponse::Text(text) | CommandResponse::Markup(text) => text.clone(),
        CommandResponse::Json(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        CommandResponse::Table { headers, rows } => render_table(headers, rows),
        CommandResponse::Image { source, alt } => format!("[image: {alt}] {source}"),
        CommandResponse::Custom { kind, .. } => format!("Unsupported output type: {kind}"),
    }
}

/// Renders rows under headers with columns padded to their widest cell.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0; columns];
    for row in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_row = |row: &[String]| {
        row.iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    std::iter::once(render_row(headers))
        .chain(rows.iter().map(|row| render_row(row)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line summary of a history entry.
pub fn format_history_entry(entry: &HistoryEntry) -> String {
    let timestamp = entry.timestamp.format("%H:%M:%S");
    let invocation = if entry.args.is_empty() {
        entry.command_id.clone()
    } else {
        format!("{} {}", entry.command_id, entry.args.join(" "))
    };

    match &entry.outcome {
        Outcome::Result(response) => format!("{timestamp}  {invocation}  ok ({:?})", response.kind()),
        Outcome::Error(record) => format!("{timestamp}  {invocation}  {}", record.code),
    }
}

/// Styled rendering of an error record for the terminal.
pub fn format_error_record(record: &ErrorRecord) -> String {
    let mut lines = record.format().lines().map(str::to_string).collect::<Vec<_>>();
    if let Some(header) = lines.first_mut() {
        *header = format_error(header);
    }
    lines.join("\n")
}
