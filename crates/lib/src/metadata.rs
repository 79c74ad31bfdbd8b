//! # Metadata Extractor
//!
//! Best-effort heuristics over raw markdown. Structural fields (title, author,
//! date, hero image) are looked for only near the top of the document, where
//! front matter, headings and bylines usually live; counts and the preview cover
//! the whole text. Extraction never fails: unmatched fields stay empty.

use crate::constants::{
    MAX_PREVIEW_CHARS, METADATA_SCAN_LINES, UNTITLED_POST, WORDS_PER_MINUTE,
};
use crate::types::BlogMeta;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\s+(.*)$").unwrap());
static AUTHOR_CUE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)author|by\s").unwrap());
static AUTHOR_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:\bby|author[:\s]*)\s*([A-Z][a-z]+ [A-Z][a-z]+)").unwrap()
});
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        \b(?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|June?|July?
            |Aug(?:ust)?|Sep(?:t(?:ember)?)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)
            \.?\x20\d{1,2},?\s*\d{4}
        | \d{4}-\d{2}-\d{2}
        | \d{1,2}/\d{1,2}/\d{4}",
    )
    .unwrap()
});
static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\((https?://[^\s)]+)\)").unwrap());
static BARE_URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());
static MARKUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[#*\[\]()!`>|_~-]").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Derives [`BlogMeta`] from acquired content and its source URL.
pub fn extract_metadata(content: &str, source_url: &str) -> BlogMeta {
    let mut title = String::new();
    let mut author = String::new();
    let mut date = String::new();
    let mut image = String::new();

    for line in content.lines().take(METADATA_SCAN_LINES) {
        if title.is_empty() {
            if let Some(caps) = TITLE_RE.captures(line) {
                title = caps[1].trim().to_string();
            }
        }
        if author.is_empty() && AUTHOR_CUE_RE.is_match(line) {
            if let Some(caps) = AUTHOR_NAME_RE.captures(line) {
                author = caps[1].to_string();
            }
        }
        if date.is_empty() {
            if let Some(m) = DATE_RE.find(line) {
                date = m.as_str().to_string();
            }
        }
        if image.is_empty() {
            if let Some(caps) = IMAGE_RE.captures(line) {
                image = caps[1].to_string();
            }
        }
    }

    if title.is_empty() {
        title = title_from_url(source_url);
    }

    let word_count = count_words(content);

    BlogMeta {
        title,
        author,
        date,
        image,
        word_count,
        reading_time: reading_time_minutes(word_count),
        preview_text: preview_text(content),
    }
}

pub fn count_words(content: &str) -> u64 {
    content.split_whitespace().count() as u64
}

/// `max(1, ceil(word_count / 250))`.
pub fn reading_time_minutes(word_count: u64) -> u64 {
    word_count.div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Title derived from the URL's final path segment, e.g. `my-first_post` → `My First Post`.
pub fn title_from_url(source_url: &str) -> String {
    let Ok(url) = Url::parse(source_url) else {
        return UNTITLED_POST.to_string();
    };
    let slug = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .unwrap_or_default();

    let title = title_case(&slug.replace(['-', '_'], " "));
    if title.trim().is_empty() {
        UNTITLED_POST.to_string()
    } else {
        title.trim().to_string()
    }
}

// Upper-cases the first character of every alphanumeric run.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Plain-text preview of at most 1200 characters that never ends mid-word.
pub fn preview_text(content: &str) -> String {
    let without_urls = BARE_URL_RE.replace_all(content, " ");
    let without_markup = MARKUP_RE.replace_all(&without_urls, " ");
    let plain = WHITESPACE_RE.replace_all(&without_markup, " ");
    let plain = plain.trim();

    let mut chars = plain.char_indices();
    let Some((cut, next)) = chars.nth(MAX_PREVIEW_CHARS) else {
        return plain.to_string();
    };

    let window = &plain[..cut];
    if next.is_whitespace() {
        return window.trim_end().to_string();
    }
    match window.rfind(char::is_whitespace) {
        Some(idx) => window[..idx].trim_end().to_string(),
        None => String::new(),
    }
}
