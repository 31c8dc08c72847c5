//! Consolidated resource access, one submodule per table. Every
//! function issues one query against its table (the mapping replace
//! issues two sequential statements), logs any failure, and returns
//! the original Diesel error unchanged. Single-row lookups fold
//! `NotFound` into `Ok(None)` so callers branch the same way
//! everywhere.

pub mod articles;
pub mod cities;
pub mod contacts;
pub mod mappings;
pub mod stays;
pub mod tours;

use diesel::QueryResult;
use log::error;

/// Log a failed operation and pass the error through untouched.
fn log_err<T>(op: &str, result: QueryResult<T>) -> QueryResult<T> {
    result.map_err(|err| {
        error!("{} failed: {}", op, err);
        err
    })
}

/// Escape LIKE wildcards so user input matches literally.
pub fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// ILIKE pattern matching `term` as a substring.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// First whitespace-or-hyphen-separated token of a lookup name, used
/// by the fuzzy fallback pass.
fn first_token(name: &str) -> &str {
    name.split(|c: char| c.is_whitespace() || c == '-')
        .find(|token| !token.is_empty())
        .unwrap_or(name)
}

#[test]
fn like_wildcards_are_escaped() {
    assert_eq!(escape_like("100%_sure\\"), "100\\%\\_sure\\\\");
}

#[test]
fn plain_terms_pass_through() {
    assert_eq!(escape_like("Piran"), "Piran");
}

#[test]
fn contains_pattern_wraps_the_escaped_term() {
    assert_eq!(contains_pattern("50%"), "%50\\%%");
}

#[test]
fn first_token_splits_on_spaces_and_hyphens() {
    assert_eq!(first_token("lake-bled-castle"), "lake");
    assert_eq!(first_token("Novo Mesto"), "Novo");
    assert_eq!(first_token("  -Piran"), "Piran");
    assert_eq!(first_token(""), "");
}
