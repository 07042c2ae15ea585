//! Transcript export to plain text or printable HTML

use crate::conversation::Message;
use crate::error::{ChatterboxError, Result};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use std::fmt;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Output format of an exported transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// One `[timestamp] Sender: text` block per message
    Text,
    /// Standalone HTML page, suitable for printing to PDF from a browser
    Html,
}

impl ExportFormat {
    /// Parse a format name
    ///
    /// "pdf" maps to HTML since the HTML page is the printable form.
    pub fn parse_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Text),
            "html" | "pdf" => Ok(Self::Html),
            other => Err(ChatterboxError::Export(format!(
                "Unknown export format '{}'. Use txt or html",
                other
            ))
            .into()),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Html => write!(f, "HTML"),
        }
    }
}

fn local_timestamp(message: &Message) -> String {
    message
        .timestamp
        .with_timezone(&Local)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Render messages as plain text
pub fn render_text(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|msg| {
            format!(
                "[{}] {}: {}",
                local_timestamp(msg),
                msg.sender.label(),
                msg.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render messages as a standalone HTML document
pub fn render_html(messages: &[Message], date: NaiveDate) -> String {
    let body: String = messages
        .iter()
        .map(|msg| {
            format!(
                r#"    <div class="message {class}">
      <div class="sender">{sender}</div>
      <div>{content}</div>
      <div class="timestamp">{timestamp}</div>
    </div>
"#,
                class = msg.sender.css_class(),
                sender = msg.sender.label(),
                content = escape_html(&msg.content),
                timestamp = local_timestamp(msg),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Chat Export</title>
    <style>
      body {{ font-family: Arial, sans-serif; margin: 20px; }}
      .message {{ margin-bottom: 20px; padding: 10px; border-radius: 8px; }}
      .user {{ background-color: #e3f2fd; margin-left: 20%; }}
      .bot {{ background-color: #f5f5f5; margin-right: 20%; }}
      .timestamp {{ font-size: 12px; color: #666; margin-top: 5px; }}
      .sender {{ font-weight: bold; margin-bottom: 5px; }}
    </style>
  </head>
  <body>
    <h1>Chat Export - {date}</h1>
{body}  </body>
</html>
"#,
        date = date.format("%Y-%m-%d"),
        body = body,
    )
}

/// File name for an export made on `date`
///
/// # Examples
///
/// ```
/// use chatterbox::export::{export_file_name, ExportFormat};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// assert_eq!(export_file_name(ExportFormat::Text, date), "chat-export-2024-03-09.txt");
/// ```
pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("chat-export-{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Write the transcript into `dir`, dated today
///
/// # Errors
///
/// Returns `ChatterboxError::Export` when there are no messages, or an I/O
/// error if the file cannot be written
pub fn export_transcript(messages: &[Message], format: ExportFormat, dir: &Path) -> Result<PathBuf> {
    write_transcript(messages, format, dir, Local::now().date_naive())
}

/// Write the transcript into `dir` using an explicit date for the file name
pub fn write_transcript(
    messages: &[Message],
    format: ExportFormat,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf> {
    if messages.is_empty() {
        return Err(ChatterboxError::Export("No messages to export".to_string()).into());
    }

    let contents = match format {
        ExportFormat::Text => render_text(messages),
        ExportFormat::Html => render_html(messages, date),
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(export_file_name(format, date));
    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write transcript to {}", path.display()))?;

    tracing::info!(path = %path.display(), count = messages.len(), "Exported transcript");
    Ok(path)
}
