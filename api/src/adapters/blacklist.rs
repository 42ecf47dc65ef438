//! Blacklist source
//!
//! Reads the forbidden token list from disk. `.json` files hold a JSON array
//! of strings; any other file holds one token per line with blank lines and
//! `#` comments ignored. Every failure is a `ConfigError` so startup stops.

use std::fs;
use std::path::Path;

use crate::domain::blacklist::Blacklist;
use crate::error::ConfigError;

pub fn load_blacklist(path: &Path) -> Result<Blacklist, ConfigError> {
    let fail = |reason: String| ConfigError::Blacklist {
        path: path.to_path_buf(),
        reason,
    };

    let raw = fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let tokens = if is_json {
        parse_json(&raw).map_err(fail)?
    } else {
        parse_lines(&raw)
    };

    if let Some(bad) = tokens.iter().find(|t| t.chars().any(char::is_whitespace)) {
        return Err(fail(format!(
            "token '{}' contains whitespace and can never match",
            bad
        )));
    }

    let blacklist = Blacklist::new(tokens);
    if blacklist.is_empty() {
        tracing::warn!(path = %path.display(), "Blacklist is empty");
    } else {
        tracing::info!(path = %path.display(), tokens = blacklist.len(), "Blacklist loaded");
    }

    Ok(blacklist)
}

fn parse_json(raw: &str) -> Result<Vec<String>, String> {
    let tokens: Vec<String> =
        serde_json::from_str(raw).map_err(|e| format!("expected a JSON array of strings: {}", e))?;

    if tokens.iter().any(|t| t.is_empty()) {
        return Err("empty token in list".to_string());
    }
    Ok(tokens)
}

fn parse_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
