//! CSV export of accepted videos.

use crate::crawl::VideoRecord;
use crate::output::OutputResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Fixed output columns. Known in advance rather than inferred from the
/// first row, so an empty aggregate still gets a full header.
pub const COLUMNS: [&str; 10] = [
    "keyword",
    "video_id",
    "description",
    "like_count",
    "comment_count",
    "share_count",
    "play_count",
    "author_uniqueId",
    "author_nickname",
    "url",
];

/// Writes the aggregate to `path`: header first, then one row per record
/// in aggregate order. Returns the number of data rows written.
pub fn write_rows(path: &Path, rows: &[VideoRecord]) -> OutputResult<usize> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{}", COLUMNS.join(","))?;

    for row in rows {
        let fields = [
            escape(&row.keyword),
            escape(&row.video_id),
            escape(&row.description),
            row.like_count.to_string(),
            count_field(row.comment_count),
            count_field(row.share_count),
            count_field(row.play_count),
            escape(&row.author_handle),
            escape(&row.author_nickname),
            escape(&row.url),
        ];
        writeln!(out, "{}", fields.join(","))?;
    }

    out.flush()?;
    Ok(rows.len())
}

/// Absent counts export as an empty cell, not zero.
fn count_field(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Quotes a field when it contains a separator, quote, or newline.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
