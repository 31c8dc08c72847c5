//! Read-time derivation of article slugs and excerpts. Neither is ever
//! stored; every response recomputes them from the row.

use regex::Regex;

/// Excerpt length in characters, before the trailing ellipsis.
pub const EXCERPT_LENGTH: usize = 160;

lazy_static::lazy_static! {
    static ref NON_SLUG: Regex = Regex::new("[^a-z0-9]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Lowercase, hyphen-separated, nothing but `a-z0-9`. Idempotent:
/// slugifying a slug returns it unchanged.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let hyphenated = NON_SLUG.replace_all(&lowered, "-");
    hyphenated.trim_matches('-').to_string()
}

/// Plain-text preview of an HTML body: tags stripped, whitespace
/// collapsed, truncated to `limit` characters with a trailing ellipsis
/// iff the stripped text is longer than `limit`.
pub fn excerpt(html: &str, limit: usize) -> String {
    let stripped = strip_html(html);
    let text = WHITESPACE.replace_all(stripped.trim(), " ");
    if text.chars().count() <= limit {
        return text.into_owned();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut.trim_end())
}

fn strip_html(html: &str) -> String {
    let dom = match tl::parse(html, tl::ParserOptions::default()) {
        Ok(dom) => dom,
        Err(_) => return html.to_string(),
    };

    let mut out = String::new();
    for node in dom.nodes() {
        if let tl::Node::Raw(text) = node {
            out.push_str(&text.as_utf8_str());
            out.push(' ');
        }
    }
    out
}

#[test]
fn slug_lowercases_and_hyphenates() {
    assert_eq!(slugify("Lake Bled & Bohinj!"), "lake-bled-bohinj");
}

#[test]
fn slug_drops_non_ascii_letters() {
    assert_eq!(slugify("Škocjan Caves"), "kocjan-caves");
}

#[test]
fn slug_is_idempotent() {
    for title in [
        "A Weekend in Piran",
        "  padded   title  ",
        "already-a-slug",
        "Obalno-kraška 2024",
        "",
    ] {
        let once = slugify(title);
        assert_eq!(slugify(&once), once);
    }
}

#[test]
fn excerpt_returns_short_text_unchanged() {
    assert_eq!(excerpt("<p>Short text.</p>", EXCERPT_LENGTH), "Short text.");
}

#[test]
fn excerpt_strips_markup_and_collapses_whitespace() {
    assert_eq!(
        excerpt("<h1>Piran</h1>\n  <p>Venetian  harbour town.</p>", EXCERPT_LENGTH),
        "Piran Venetian harbour town."
    );
}

#[test]
fn excerpt_truncates_long_text_with_ellipsis() {
    let long = format!("<p>{}</p>", "word ".repeat(100));
    let out = excerpt(&long, 20);
    assert!(out.ends_with("..."));
    assert!(out.chars().count() <= 23);
}

#[test]
fn excerpt_at_exact_limit_is_untouched() {
    let text = "x".repeat(20);
    let html = format!("<p>{}</p>", text);
    assert_eq!(excerpt(&html, 20), text);
}
