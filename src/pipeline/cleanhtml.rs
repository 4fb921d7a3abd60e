//! Response cleaning: isolate an HTML document from free-form model output.
//!
//! Models wrap their answer in markdown fences, preface it with "Sure!
//! here's your page", and append commentary after `</html>` — all despite
//! the prompt forbidding every one of those. This module applies a short
//! deterministic scan to recover the document:
//!
//! 1. If a fenced code block is present, take the body of the first
//!    ```` ```html ````-tagged fence, else the first generic fence; an
//!    unterminated fence leaves the text untouched.
//! 2. Scan (ASCII case-insensitive) for the earliest `<!doctype`, falling
//!    back to `<html`; with neither, return the trimmed text as-is.
//! 3. From that start, truncate immediately after the *last* `</html>`.
//! 4. Trim.
//!
//! The last-`</html>` truncation is a deliberate heuristic: when the model
//! emits several documents in one response, everything between them is kept
//! and only trailing commentary is dropped. Nothing here validates the
//! HTML; malformed markup passes through unchanged, and this function never
//! fails.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_HTML_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)```html[^\n]*\n(.*?)```").unwrap());

static RE_ANY_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```[^\n]*\n(.*?)```").unwrap());

/// Extract a clean HTML document from a model response.
///
/// Output is either a bounded HTML document slice or the original trimmed
/// text — absent markers degrade gracefully, they never error.
pub fn clean_html_response(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut s = text.trim().to_string();

    // Strip markdown fences if present; prefer a ```html-tagged fence.
    if s.contains("```") {
        if find_ci(&s, "```html").is_some() {
            if let Some(caps) = RE_HTML_FENCE.captures(&s) {
                s = caps[1].trim().to_string();
            }
        } else if let Some(caps) = RE_ANY_FENCE.captures(&s) {
            s = caps[1].trim().to_string();
        }
    }

    let start = match find_ci(&s, "<!doctype").or_else(|| find_ci(&s, "<html")) {
        Some(idx) => idx,
        None => return s,
    };

    let doc = &s[start..];
    let doc = match rfind_ci(doc, "</html>") {
        Some(end) => &doc[..end + "</html>".len()],
        None => doc,
    };

    doc.trim().to_string()
}

/// First occurrence of an ASCII `needle` in `haystack`, ignoring ASCII case.
///
/// Byte-offset based so the result stays valid as an index into `haystack`
/// even when the surrounding text is non-ASCII (Devanagari extracts, etc.);
/// `str::to_lowercase` can change byte lengths and is unusable here.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    debug_assert!(needle.is_ascii());
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Last occurrence of an ASCII `needle` in `haystack`, ignoring ASCII case.
fn rfind_ci(haystack: &str, needle: &str) -> Option<usize> {
    debug_assert!(needle.is_ascii());
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len()).rfind(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}
