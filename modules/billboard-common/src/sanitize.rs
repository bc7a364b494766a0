use regex::Regex;
use std::sync::LazyLock;

/// Search text longer than this is truncated, never rejected.
pub const SEARCH_TEXT_MAX_CHARS: usize = 100;

static MARKUP_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script[^>]*>.*?</script>|<iframe[^>]*>.*?</iframe>|<object[^>]*>.*?</object>|<embed[^>]*>.*?</embed>",
    )
    .unwrap()
});
static DANGEROUS_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[<>'"&]"#).unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// A cleaned value plus whether cleaning changed anything. The caller may
/// surface `modified` as a warning; the value itself is always usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub text: String,
    pub modified: bool,
}

/// Sanitize free-text search input before it becomes a match key.
///
/// Complete markup blocks go first, then markup-significant characters and
/// control characters, then whitespace collapses to single spaces and the
/// result is trimmed and capped at [`SEARCH_TEXT_MAX_CHARS`] characters.
pub fn sanitize_search_text(input: &str) -> Sanitized {
    let stripped = MARKUP_BLOCK_RE.replace_all(input, "");
    let stripped = DANGEROUS_CHARS_RE.replace_all(&stripped, "");
    let stripped: String = stripped.chars().filter(|c| !c.is_control()).collect();
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");
    let trimmed = collapsed.trim();

    let text: String = trimmed.chars().take(SEARCH_TEXT_MAX_CHARS).collect();
    let modified = text != input;
    if modified {
        tracing::debug!(original = input, cleaned = %text, "search text sanitized");
    }
    Sanitized { text, modified }
}
