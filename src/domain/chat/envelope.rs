//! Relay envelope extraction.
//!
//! The orchestrator wraps user text in an envelope:
//!
//! ```text
//! [ORCHESTRATOR → A.C.E]
//! ...headers...
//! USER_TEXT_BEGIN
//! the actual user text
//! USER_TEXT_END
//! ```
//!
//! Anything that does not start with the marker line is plain user text and
//! passes through untouched. A marked message without a begin sentinel is
//! malformed and also passes through untouched.

use std::borrow::Cow;

/// First non-blank line of every envelope.
pub const ENVELOPE_MARKER: &str = "[ORCHESTRATOR → A.C.E]";

/// Line that opens the user text region.
pub const USER_TEXT_BEGIN: &str = "USER_TEXT_BEGIN";

/// Line that closes the user text region.
pub const USER_TEXT_END: &str = "USER_TEXT_END";

/// Extract the user text from an envelope, or return `input` unchanged.
///
/// Never fails. An envelope whose region is empty yields `""`, which callers
/// treat as "nothing to answer". A missing end sentinel means the region runs
/// to the end of the input.
pub fn extract_user_text(input: &str) -> Cow<'_, str> {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let Some(marker_idx) = lines.iter().position(|line| !line.trim().is_empty()) else {
        return Cow::Borrowed(input);
    };
    if lines[marker_idx].trim() != ENVELOPE_MARKER {
        return Cow::Borrowed(input);
    }

    let Some(begin_idx) = find_line(&lines, marker_idx + 1, USER_TEXT_BEGIN) else {
        return Cow::Borrowed(input);
    };

    let start = begin_idx + 1;
    let end = find_line(&lines, start, USER_TEXT_END).unwrap_or(lines.len());

    let payload = lines[start..end].join("\n");
    Cow::Owned(payload.trim_end_matches('\n').to_string())
}

/// Index of the first line at or after `from` whose trimmed content is `target`.
fn find_line(lines: &[&str], from: usize, target: &str) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, line)| line.trim() == target)
        .map(|(idx, _)| idx)
}
