//! Display formatting for terminal output
//!
//! Plain-text tables for a split and for the transactions a submission
//! would post.

pub mod plan;
pub mod split;

pub use plan::format_plan;
pub use split::format_split;

/// Cut a string to `max_len` characters, marking the cut with "..."
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
