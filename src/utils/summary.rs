//! Description summaries for index entries.
//!
//! Descriptions arrive as rendered HTML. An entry's summary is the leading
//! paragraph of that HTML, link-free and capped to a character budget.

use regex::Regex;
use std::sync::LazyLock;

/// Default character budget for a summary
pub const DEFAULT_SUMMARY_LIMIT: usize = 140;

static LEADING_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(?:\A\s*|</h1>\s*)<p(?:\s[^>]*)?>(.*?)</p>").expect("static pattern")
});

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<a(?:\s[^>]*)?>(.*?)</a>").expect("static pattern"));

static HTML_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>|[^<]+").expect("static pattern"));

static TRAILING_PARTIAL_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\W+|\W*\w+)\z").expect("static pattern"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[^>]+?>").expect("static pattern"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[xX]([0-9a-fA-F]+)|#([0-9]+)|([a-zA-Z]+));").expect("static pattern")
});

const VOID_TAGS: &[&str] = &["br", "hr", "img", "wbr"];

/// Summarize an HTML description to at most `limit` visible characters.
///
/// Returns `None` when the description is empty or has no leading
/// paragraph. Text inside `<code>` is never cut. Characters are counted
/// after entity decoding, so `&amp;` costs one. Elements that start after
/// the budget is spent are dropped whole. An ellipsis is appended when text
/// was cut, or when the paragraph ends with a colon (it refers to a block
/// that the summary leaves out).
pub fn truncate_description(description: &str, limit: usize) -> Option<String> {
    if description.trim().is_empty() {
        return None;
    }

    let paragraph = LEADING_PARAGRAPH.captures(description)?.get(1)?.as_str();
    let paragraph = LINK.replace_all(paragraph, "$1");

    let mut remaining = limit as isize;
    let mut code_depth = 0usize;
    // Nesting depth inside elements opened after the budget ran out
    let mut dropped_depth = 0usize;
    let mut html = String::with_capacity(paragraph.len());

    for token in HTML_TOKEN.find_iter(&paragraph) {
        let token = token.as_str();

        if token.starts_with('<') {
            let name = tag_name(token);
            let closing = token.starts_with("</");
            let void = VOID_TAGS.contains(&name.as_str()) || token.ends_with("/>");

            if remaining <= 0 {
                if void {
                    continue;
                }
                if closing && dropped_depth > 0 {
                    dropped_depth -= 1;
                    continue;
                }
                if !closing {
                    dropped_depth += 1;
                    continue;
                }
            }

            if name == "code" && !void {
                if closing {
                    code_depth = code_depth.saturating_sub(1);
                } else {
                    code_depth += 1;
                }
            }
            html.push_str(token);
            continue;
        }

        if remaining <= 0 {
            continue;
        }

        let text = decode_entities(token);
        let length = text.chars().count() as isize;
        let budget = remaining;
        remaining -= length;

        if remaining < 0 && code_depth == 0 {
            // Keep one character past the budget so the partial-word trim
            // can see whether the cut landed inside a word.
            let kept: String = text.chars().take(budget as usize + 1).collect();
            html.push_str(&escape_text(&TRAILING_PARTIAL_WORD.replace(&kept, "")));
        } else {
            html.push_str(token);
        }
    }

    if remaining < 0 || html_to_text(&html).ends_with(':') {
        html.push_str("...");
    }

    Some(html)
}

/// Strip HTML tags from a string.
///
/// ```
/// use docsift::utils::strip_tags;
///
/// assert_eq!(strip_tags("<strong>Hello world</strong>"), "Hello world");
/// ```
pub fn strip_tags(text: &str) -> String {
    TAG.replace_all(text, "").into_owned()
}

/// Decode character references. Unknown named entities are kept as written.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let decoded = if let Some(hex) = caps.get(1) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = caps.get(2) {
                dec.as_str().parse().ok().and_then(char::from_u32)
            } else {
                caps.get(3).and_then(|name| match name.as_str() {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                })
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Convert summary HTML to terminal text.
pub fn html_to_text(html: &str) -> String {
    decode_entities(&strip_tags(html))
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('<')
        .trim_start_matches('/')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}
