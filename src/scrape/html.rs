//! Tolerant table extraction from saved wiki HTML.
//!
//! Scans `<table>` blocks by class instead of building a DOM. Good enough for
//! MediaWiki output, where tables are not nested and rows and cells are always
//! closed.

use std::sync::LazyLock;

use regex::Regex;

static TABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table\b([^>]*)>(.*?)</table\s*>").expect("static regex"));
static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\bclass\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).expect("static regex")
});
static ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>").expect("static regex"));
static CELL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(td|th)\b[^>]*>(.*?)</(?:td|th)\s*>").expect("static regex")
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("static regex"));

/// A table reduced to text: header cells of its first row and the data cells
/// of every following row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTable {
    /// `<th>` texts of the first row.
    pub header: Vec<String>,
    /// `<td>` texts per subsequent row; header-only rows come out empty.
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Header,
    Data,
}

fn row_cells(row_html: &str) -> Vec<(CellKind, String)> {
    CELL.captures_iter(row_html)
        .map(|caps| {
            let kind = if caps[1].eq_ignore_ascii_case("th") {
                CellKind::Header
            } else {
                CellKind::Data
            };
            (kind, cell_text(&caps[2]))
        })
        .collect()
}

fn has_class(attrs: &str, class: &str) -> bool {
    CLASS_ATTR.captures(attrs).is_some_and(|caps| {
        caps.iter()
            .skip(1)
            .flatten()
            .any(|value| value.as_str().split_whitespace().any(|name| name == class))
    })
}

/// All tables whose class list contains `class`, in document order.
pub fn extract_tables(html: &str, class: &str) -> Vec<HtmlTable> {
    TABLE
        .captures_iter(html)
        .filter(|caps| has_class(&caps[1], class))
        .map(|caps| {
            let mut rows = ROW.captures_iter(&caps[2]).map(|row| row_cells(&row[1]));
            let header = rows
                .next()
                .map(|cells| {
                    cells
                        .into_iter()
                        .filter(|(kind, _)| *kind == CellKind::Header)
                        .map(|(_, text)| text)
                        .collect()
                })
                .unwrap_or_default();
            let rows = rows
                .map(|cells| {
                    cells
                        .into_iter()
                        .filter(|(kind, _)| *kind == CellKind::Data)
                        .map(|(_, text)| text)
                        .collect()
                })
                .collect();
            HtmlTable { header, rows }
        })
        .collect()
}

/// Visible text of a cell: tags removed, entities decoded, trimmed.
pub fn cell_text(fragment: &str) -> String {
    let stripped = TAG.replace_all(fragment, "");
    decode_entities(&stripped).trim().to_string()
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
