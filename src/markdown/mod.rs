//! Pure text helpers: escaping, shortening, URL/link classification.

use regex::Regex;
use url::Url;

/// Characters whose existing backslash escapes are stripped before
/// re-escaping, so a title that already went through one escape cycle does
/// not pick up doubled backslashes.
const UNESCAPE_SET: &[char] = &['*', '_', '`', '~', '\\', '[', ']'];

/// Full set escaped on output. Pipe and angle brackets break link labels in
/// tables and HTML-ish contexts even though no prior pass escapes them.
const ESCAPE_SET: &[char] = &['*', '_', '`', '|', '<', '>', '~', '\\', '[', ']'];

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "ico", "tiff", "avif",
];

/// Escape a title so it can sit inside a `[label](url)` construct.
///
/// Runs an unescape pass first so feeding an already-escaped title back
/// through produces single backslashes, never doubles.
pub fn escape_markdown(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if UNESCAPE_SET.contains(&next) {
                    unescaped.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        unescaped.push(c);
    }

    let mut escaped = String::with_capacity(unescaped.len());
    for c in unescaped.chars() {
        if ESCAPE_SET.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Truncate a title to `max` characters plus an ellipsis. A `max` of 0
/// disables shortening; titles within `max + 3` are left alone since the
/// ellipsis would not save anything.
pub fn shorten_title(title: &str, max: usize) -> String {
    if max == 0 {
        return title.to_string();
    }
    let len = title.chars().count();
    if len < max.saturating_add(3) {
        return title.to_string();
    }
    let mut out: String = title.chars().take(max).collect();
    out.push_str("...");
    out
}

/// True iff the trimmed text parses as an absolute URL. Embedded whitespace
/// disqualifies the text even when the parser would percent-encode it.
pub fn is_url(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return false;
    }
    Url::parse(trimmed).is_ok()
}

/// True iff the URL's path ends in a known image extension.
pub fn is_image_url(text: &str) -> bool {
    let trimmed = text.trim();
    let parsed = match Url::parse(trimmed) {
        Ok(u) => u,
        Err(_) => return false,
    };
    let path = parsed.path().to_ascii_lowercase();
    match path.rsplit_once('.') {
        Some((_, ext)) => IMAGE_EXTENSIONS.contains(&ext),
        None => false,
    }
}

/// True iff the text already matches the configured `[label](url)` pattern.
/// A malformed pattern classifies nothing.
pub fn is_linked_url(pattern: &str, text: &str) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(text.trim()),
        Err(_) => false,
    }
}

/// Extract the URL capture from an existing markdown link. The configured
/// pattern yields the URL in its last capture group.
pub fn linked_url(pattern: &str, text: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    let caps = re.captures(text.trim())?;
    caps.iter()
        .skip(1)
        .flatten()
        .last()
        .map(|m| m.as_str().to_string())
}

/// Line/column coordinate in the editor buffer. Columns count characters,
/// matching the offsets the controller derives from substring search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub ch: usize,
}

/// Cursor surroundings handed over by the host editor: the current line's
/// text and the cursor's character column within it.
#[derive(Debug, Clone, Default)]
pub struct CursorContext {
    pub line: String,
    pub ch: usize,
}

/// True iff the two characters before the cursor are `](`, i.e. the cursor
/// sits in the URL slot of a link under construction. Inserting another
/// `[..](..)` there would corrupt it.
pub fn is_inside_markdown_link(ctx: &CursorContext) -> bool {
    let before: String = ctx.line.chars().take(ctx.ch).collect();
    before.ends_with("](")
}

/// True iff the last non-space character before the cursor is a quote or
/// table-cell marker, where auto-linking is undesirable.
pub fn is_after_quote(ctx: &CursorContext) -> bool {
    ctx.line
        .chars()
        .take(ctx.ch)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .find(|c| *c != ' ')
        .map(|c| c == '>' || c == '|')
        .unwrap_or(false)
}

/// Convert a character offset into a line/column position.
pub fn offset_to_position(text: &str, offset: usize) -> Position {
    let mut line = 0;
    let mut ch = 0;
    for c in text.chars().take(offset) {
        if c == '\n' {
            line += 1;
            ch = 0;
        } else {
            ch += 1;
        }
    }
    Position { line, ch }
}
