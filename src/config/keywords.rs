//! Keyword list loading.

use crate::ConfigError;
use std::path::Path;

/// Header-like first cells that are skipped (case-insensitive).
const HEADER_STOPLIST: [&str; 3] = ["keyword", "palabra", "hashtag"];

/// Reads the first CSV column of `path` and returns the cleaned keywords,
/// in row order.
///
/// Blank first cells and header-stoplist matches are dropped. Fails with
/// [`ConfigError::KeywordsNotFound`] when the file does not exist and
/// [`ConfigError::NoKeywords`] when nothing survives filtering.
pub fn read_keywords(path: &Path) -> Result<Vec<String>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::KeywordsNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let mut keywords = Vec::new();

    for line in content.lines() {
        let first = first_field(line);
        let keyword = first.trim();
        if keyword.is_empty() {
            continue;
        }
        if HEADER_STOPLIST
            .iter()
            .any(|header| keyword.eq_ignore_ascii_case(header))
        {
            continue;
        }
        keywords.push(keyword.to_string());
    }

    if keywords.is_empty() {
        return Err(ConfigError::NoKeywords(path.to_path_buf()));
    }

    Ok(keywords)
}

/// Extracts the first CSV field of a line, honoring double-quote escaping.
fn first_field(line: &str) -> String {
    let trimmed = line.trim_start();

    if let Some(rest) = trimmed.strip_prefix('"') {
        let mut field = String::new();
        let mut chars = rest.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    break;
                }
            } else {
                field.push(c);
            }
        }
        field
    } else {
        trimmed.split(',').next().unwrap_or_default().to_string()
    }
}
