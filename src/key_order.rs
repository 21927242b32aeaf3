//! Ordering for string table keys: all-digit keys first in numeric order, then
//! everything else in a locale-style collation.
//!
//! Orders the keys of emitted Lua tables.

use std::cmp::Ordering;

/// True for non-empty, ASCII-digit-only keys.
pub fn is_numeric_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Numeric keys ascending, then non-numeric keys by [locale_compare].
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    match (is_numeric_key(a), is_numeric_key(b)) {
        (true, true) => compare_digit_strings(a, b),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => locale_compare(a, b),
    }
}

/// Compares two digit strings by value without parsing, so arbitrarily long
/// ids still order correctly. "01" and "1" compare equal.
fn compare_digit_strings(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Symbol,
    Digit,
    Letter,
    Other,
}

fn char_class(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_ascii_punctuation() {
        if matches!(c, '$' | '+' | '<' | '=' | '>' | '^' | '`' | '|' | '~') {
            CharClass::Symbol
        } else {
            CharClass::Punctuation
        }
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Other
    }
}

/// Collation close to the default Unicode locale ordering used by JS
/// `localeCompare`: whitespace < punctuation < symbols < digits < letters,
/// letters compared case-insensitively, and on a case-only difference the
/// lowercase form sorts first.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .map(|c| (char_class(c), fold(c)))
        .cmp(b.chars().map(|c| (char_class(c), fold(c))));
    if primary != Ordering::Equal {
        return primary;
    }
    let tertiary = a
        .chars()
        .map(char::is_uppercase)
        .cmp(b.chars().map(char::is_uppercase));
    tertiary.then_with(|| a.cmp(b))
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
