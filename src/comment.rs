//! Leading block comment handling.
//!
//! Only a comment that opens at byte 0 counts as the file's header. The
//! header ends at the first `*/`; an unterminated comment swallows the rest
//! of the file.

/// Block comment open marker.
pub const OPEN: &str = "/*";
/// Block comment close marker.
pub const CLOSE: &str = "*/";

/// Split a file into its leading comment body and the text after it.
///
/// Returns `None` when the file does not start with [`OPEN`].
fn split_header(content: &str) -> Option<(&str, &str)> {
    let after_open = content.strip_prefix(OPEN)?;
    Some(match after_open.split_once(CLOSE) {
        Some((body, rest)) => (body, rest),
        None => (after_open, ""),
    })
}

/// Extract the cleaned text of the leading block comment.
///
/// Each line loses its leading `*`/space decoration and trailing
/// whitespace; the joined result is trimmed.
pub fn extract(content: &str) -> Option<String> {
    let (body, _) = split_header(content)?;
    let cleaned = body
        .lines()
        .map(|line| line.trim_start_matches(['*', ' ']).trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    Some(cleaned.trim().to_string())
}

/// Render text as a `/** ... */` doc comment followed by a blank line.
pub fn render(text: &str) -> String {
    let mut out = String::from("/**\n");
    for line in text.lines() {
        let decorated = format!(" * {line}");
        out.push_str(decorated.trim_end());
        out.push('\n');
    }
    out.push_str(" */\n\n");
    out
}

/// Replace (or prepend) the leading comment of `content` with `text`.
pub fn replace(content: &str, text: &str) -> String {
    let rest = match split_header(content) {
        Some((_, rest)) => rest,
        None => content,
    };
    let mut out = render(text);
    out.push_str(rest.trim_start());
    out
}
