//! Asset store keys for uploaded recipe images.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::InlineImage;

/// Build the asset key for a recipe image.
///
/// Layout: `recipes/<owner>/<unix-millis>_<token>_<title>.<ext>`
/// - `recipes/u1/1700000000000_9f1c..._Green_Tea.png`
///
/// The owner directory maps one-to-one to the owner id (see
/// [`owner_segment`]) and `token` makes every key unique, so two uploads
/// never share a file.
pub fn recipe_image_path(
    owner_id: &str,
    title: &str,
    image: &InlineImage,
    at: DateTime<Utc>,
    token: Uuid,
) -> String {
    format!(
        "recipes/{}/{}_{}_{}.{}",
        owner_segment(owner_id),
        at.timestamp_millis(),
        token.simple(),
        path_segment(title, "recipe"),
        image.extension()
    )
}

/// Encode an owner id as a single path segment without losing information.
///
/// `[A-Za-z0-9_-]` pass through; every other byte becomes `~XX` (upper-case
/// hex). An empty id encodes as `~`.
pub fn owner_segment(owner_id: &str) -> String {
    if owner_id.is_empty() {
        return "~".to_string();
    }

    let mut out = String::with_capacity(owner_id.len());
    for byte in owner_id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "~{byte:02X}");
        }
    }
    out
}

/// Reduce `raw` to a single safe path segment.
///
/// Whitespace runs become `_`, anything outside `[A-Za-z0-9_-]` is dropped.
/// Returns `fallback` when nothing survives.
pub fn path_segment(raw: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_gap = false;

    for ch in raw.trim().chars() {
        if ch.is_whitespace() {
            pending_gap = true;
            continue;
        }
        if !(ch.is_ascii_alphanumeric() || ch == '_' || ch == '-') {
            continue;
        }
        if pending_gap && !out.is_empty() {
            out.push('_');
        }
        pending_gap = false;
        out.push(ch);
    }

    if out.is_empty() {
        fallback.to_string()
    } else {
        out
    }
}
