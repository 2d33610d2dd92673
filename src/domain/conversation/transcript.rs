//! Transcript export.
//!
//! Renders the persisted messages of a conversation as a downloadable file.

use serde::Deserialize;
use std::str::FromStr;

use super::{Message, Role};
use crate::domain::foundation::ValidationError;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Txt,
    Csv,
    /// HTML document with a heading and one paragraph per message.
    Html,
    /// HTML table with the same columns as the CSV export; opens in spreadsheets.
    Table,
}

impl ExportFormat {
    /// Suffix appended to the conversation title to form the file name.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "_conversa.txt",
            ExportFormat::Csv => "_conversa.csv",
            ExportFormat::Html => "_conversa.html",
            ExportFormat::Table => "_conversa_tabela.html",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain; charset=utf-8",
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Html | ExportFormat::Table => "text/html; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" => Ok(ExportFormat::Txt),
            "csv" => Ok(ExportFormat::Csv),
            "html" => Ok(ExportFormat::Html),
            "table" => Ok(ExportFormat::Table),
            other => Err(ValidationError::invalid_format(
                "format",
                format!("unsupported export format '{}'", other),
            )),
        }
    }
}

/// A rendered transcript ready to be served as a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Renders `messages` (already ordered oldest first) for a conversation titled `title`.
pub fn render_transcript(title: &str, messages: &[Message], format: ExportFormat) -> Transcript {
    let body = match format {
        ExportFormat::Txt => render_txt(messages),
        ExportFormat::Csv => render_csv(messages),
        ExportFormat::Html => render_html(title, messages),
        ExportFormat::Table => render_table(messages),
    };

    Transcript {
        file_name: format!("{}{}", title, format.file_suffix()),
        content_type: format.content_type(),
        body,
    }
}

fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "USER",
        Role::Assistant => "ASSISTANT",
    }
}

fn render_txt(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}\n", speaker(m.role()), m.content()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_csv(messages: &[Message]) -> String {
    let mut out = String::from("Remetente,Mensagem,Timestamp\n");
    for m in messages {
        out.push_str(&csv_field(m.role().as_str()));
        out.push(',');
        out.push_str(&csv_field(m.content()));
        out.push(',');
        out.push_str(&csv_field(&m.created_at().to_rfc3339()));
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn render_html(title: &str, messages: &[Message]) -> String {
    let title = escape_html(title);
    let mut out = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Conversa - {title}</title>\n</head>\n<body>\n<h1>Conversa sobre: {title}</h1>\n"
    );
    for m in messages {
        out.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>\n",
            speaker(m.role()),
            escape_html(m.content())
        ));
    }
    out.push_str("</body>\n</html>\n");
    out
}

fn render_table(messages: &[Message]) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n</head>\n<body>\n<table border=\"1\">\n<tr><th>Remetente</th><th>Mensagem</th><th>Timestamp</th></tr>\n",
    );
    for m in messages {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            m.role().as_str(),
            escape_html(m.content()),
            m.created_at().to_rfc3339()
        ));
    }
    out.push_str("</table>\n</body>\n</html>\n");
    out
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
