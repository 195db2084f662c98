//! # Rendering Module
//!
//! Turns library results into terminal text or JSON. Every `render_*` function
//! returns a `String`; printing is left to `commands.rs`.
//!
//! ## Layouts
//!
//! - File listings: one file per line, the path padded to a shared column
//!   followed by `field=value` pairs.
//! - Single record: path heading, aligned fields, relative timestamps.
//! - Status: aligned `label  value` rows.
//!
//! Widths are measured with `unicode-width` so non-ASCII paths and field names
//! still line up.

use super::styles;
use chrono::{DateTime, Utc};
use filetagapp::attributes::Metadata;
use filetagapp::commands::{CmdMessage, StoreStatus};
use filetagapp::model::File;
use filetagapp::store::Record;
use unicode_width::UnicodeWidthStr;

fn pad_to(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

fn format_fields(metadata: &Metadata, color: bool) -> String {
    metadata
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                styles::field(color).apply_to(k),
                styles::value(color).apply_to(v)
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per file: path, then its fields.
pub fn render_files(files: &[File], color: bool) -> String {
    let paths: Vec<String> = files.iter().map(|f| f.path().display().to_string()).collect();
    let column = paths.iter().map(|p| p.width()).max().unwrap_or(0);

    let mut out = String::new();
    for (file, path) in files.iter().zip(&paths) {
        if file.metadata().is_empty() {
            out.push_str(&format!("{}\n", styles::path(color).apply_to(path)));
            continue;
        }
        out.push_str(&format!(
            "{}  {}\n",
            styles::path(color).apply_to(pad_to(path, column)),
            format_fields(file.metadata(), color)
        ));
    }
    out
}

/// Full view of one stored record.
pub fn render_record(record: &Record, color: bool) -> String {
    let mut out = format!(
        "{}\n",
        styles::heading(color).apply_to(record.path.display())
    );

    let key_width = record.metadata.keys().map(|k| k.width()).max().unwrap_or(0);
    if record.metadata.is_empty() {
        out.push_str(&format!("  {}\n", styles::muted(color).apply_to("(no fields)")));
    }
    for (key, value) in record.metadata.iter() {
        out.push_str(&format!(
            "  {}  {}\n",
            styles::field(color).apply_to(pad_to(key, key_width)),
            styles::value(color).apply_to(value)
        ));
    }

    out.push_str(&format!(
        "  {} {}\n",
        styles::muted(color).apply_to("added  "),
        styles::time(color).apply_to(format_time_ago(record.created_at))
    ));
    out.push_str(&format!(
        "  {} {}\n",
        styles::muted(color).apply_to("updated"),
        styles::time(color).apply_to(format_time_ago(record.updated_at))
    ));
    out
}

pub fn render_status(status: &StoreStatus, color: bool) -> String {
    let records = match status.records {
        Some(count) => count.to_string(),
        None => "unavailable".to_string(),
    };
    let rows = [
        ("store", status.location.display().to_string()),
        ("records", records),
        ("read-only", status.read_only.to_string()),
        ("follow links", status.follow_links.to_string()),
        ("include hidden", status.include_hidden.to_string()),
    ];
    let label_width = rows.iter().map(|(l, _)| l.width()).max().unwrap_or(0);

    rows.iter()
        .map(|(label, value)| {
            format!(
                "{}  {}\n",
                styles::muted(color).apply_to(pad_to(label, label_width)),
                value
            )
        })
        .collect()
}

pub fn render_messages(messages: &[CmdMessage], color: bool) -> String {
    messages
        .iter()
        .map(|m| format!("{}\n", styles::message(&m.level, color).apply_to(&m.content)))
        .collect()
}

pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}
