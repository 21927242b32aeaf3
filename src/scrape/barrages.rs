//! Builds the barrages-by-skill-id table from the wiki's barrage tables.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::data::SkillId;
use crate::scrape::html::{extract_tables, HtmlTable};

const TABLE_CLASS: &str = "wikitable";

/// Normalized header names a table must have to count as a barrage table.
pub const REQUIRED_COLUMNS: [&str; 5] = ["skillid", "weaponid", "bulletid", "damage", "notes"];

/// Targeting heuristics over lowercased notes, first match wins.
static TARGETTING_RULES: LazyLock<Vec<(Regex, u8)>> = LazyLock::new(|| {
    [
        (r"priority target|target priority", 1),
        (r"random target|target random", 2),
        (r"nearest target|target nearest", 3),
        (r"target", 4),
    ]
    .into_iter()
    .map(|(pattern, code)| (Regex::new(pattern).expect("static regex"), code))
    .collect()
});

static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("static regex"));
static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("static regex")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedPart {
    pub weapon_id: Option<i64>,
    pub bullet_id: u64,
    pub damage: Option<i64>,
    pub bullet_type: Option<String>,
    pub coeff: Option<f64>,
    pub scaling: Option<f64>,
    pub scaling_stat: Option<String>,
    pub count: u64,
    pub notes: Vec<String>,
    pub proc_percent: Option<f64>,
    pub buff_id: Option<u64>,
    pub light_dmg: f64,
    pub med_dmg: f64,
    pub heavy_dmg: f64,
    pub targetting: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedVariant {
    pub name: String,
    pub parts: Vec<ScrapedPart>,
}

pub type ScrapedBarrages = BTreeMap<SkillId, Vec<ScrapedVariant>>;

/// Lowercase and drop everything but ASCII letters, digits and `_`.
pub fn normalize_header(column: &str) -> String {
    column
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// 1 priority, 2 random, 3 nearest, 4 other mention of "target", 0 none.
pub fn detect_targetting(notes: &str) -> u8 {
    let notes = notes.to_lowercase();
    TARGETTING_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(&notes))
        .map_or(0, |&(_, code)| code)
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Leading integer, ignoring trailing junk ("12px" -> 12).
fn parse_leading_int(text: &str) -> Option<i64> {
    LEADING_INT.captures(text)?[1].parse().ok()
}

/// Leading float, ignoring trailing junk ("1.5x" -> 1.5).
fn parse_leading_float(text: &str) -> Option<f64> {
    LEADING_FLOAT.captures(text)?[1].parse().ok()
}

/// Only all-digit values count.
fn parse_digits(text: &str) -> Option<u64> {
    if is_digits(text) {
        text.parse().ok()
    } else {
        None
    }
}

/// One row after blank-cell inheritance, keyed by normalized column name.
struct Row<'a> {
    cells: HashMap<&'a str, Option<&'a str>>,
}

impl Row<'_> {
    fn text(&self, column: &str) -> Option<&str> {
        self.cells.get(column).copied().flatten()
    }

    fn non_empty(&self, column: &str) -> Option<String> {
        self.text(column)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn float(&self, column: &str) -> Option<f64> {
        self.text(column).and_then(parse_leading_float)
    }

    fn float_or_zero(&self, column: &str) -> f64 {
        self.float(column).unwrap_or(0.0)
    }

    fn to_part(&self, bullet_id: u64) -> ScrapedPart {
        let notes = self.text("notes").unwrap_or("");
        ScrapedPart {
            weapon_id: self.text("weaponid").and_then(parse_leading_int),
            bullet_id,
            damage: self.text("damage").and_then(parse_leading_int),
            bullet_type: self.non_empty("bullettype"),
            coeff: self.float("coeff"),
            scaling: self.float("scaling"),
            scaling_stat: self.non_empty("scalingstat"),
            count: self.text("bulletcount").and_then(parse_digits).unwrap_or(0),
            notes: notes
                .split(',')
                .map(str::trim)
                .filter(|note| !note.is_empty())
                .map(str::to_string)
                .collect(),
            proc_percent: self.float("proc"),
            buff_id: self.text("buffid").and_then(parse_digits),
            light_dmg: self.float_or_zero("lightdmg"),
            med_dmg: self.float_or_zero("meddmg"),
            heavy_dmg: self.float_or_zero("heavydmg"),
            targetting: detect_targetting(notes),
        }
    }
}

fn is_barrage_table(columns: &[String]) -> bool {
    REQUIRED_COLUMNS
        .iter()
        .all(|required| columns.iter().any(|column| column == required))
}

fn scrape_table(table: &HtmlTable, columns: &[String], out: &mut ScrapedBarrages) {
    let mut last_seen: Vec<Option<&str>> = vec![None; columns.len()];
    // Per skill: name of the variant being filled and its index in `out`.
    let mut current_variant: HashMap<SkillId, (String, usize)> = HashMap::new();
    let mut skipped = 0usize;

    for cells in &table.rows {
        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }

        // Blank or missing trailing cells inherit the column's last value.
        for (index, slot) in last_seen.iter_mut().enumerate() {
            if let Some(value) = cells.get(index).filter(|value| !value.is_empty()) {
                *slot = Some(value.as_str());
            }
        }
        let row = Row {
            cells: columns
                .iter()
                .map(String::as_str)
                .zip(last_seen.iter().copied())
                .collect(),
        };

        let skill_id = row
            .text("skillid")
            .and_then(parse_digits)
            .and_then(|id| SkillId::try_from(id).ok());
        let bullet_id = row.text("bulletid").and_then(parse_digits);
        let (Some(skill_id), Some(bullet_id)) = (skill_id, bullet_id) else {
            skipped += 1;
            continue;
        };

        let skill_name = row.text("skillname").unwrap_or("").to_string();
        let variants = out.entry(skill_id).or_default();
        let index = match current_variant.get(&skill_id) {
            Some((name, index)) if *name == skill_name => *index,
            _ => {
                variants.push(ScrapedVariant {
                    name: skill_name.clone(),
                    parts: Vec::new(),
                });
                let index = variants.len() - 1;
                current_variant.insert(skill_id, (skill_name, index));
                index
            }
        };
        variants[index].parts.push(row.to_part(bullet_id));
    }

    if skipped > 0 {
        tracing::debug!(skipped, "skipped rows without a numeric skill or bullet id");
    }
}

/// Every barrage table on the page, merged into one skill-id keyed map.
/// Variant grouping restarts per table; the output accumulates across tables.
///
/// Any `wikitable` on the page is considered, not only those inside the
/// article body; the required-column check is what selects barrage tables.
pub fn scrape_barrages(html: &str) -> ScrapedBarrages {
    let mut out = ScrapedBarrages::new();
    let mut matched = 0usize;
    for table in extract_tables(html, TABLE_CLASS) {
        let columns: Vec<String> = table.header.iter().map(|h| normalize_header(h)).collect();
        if !is_barrage_table(&columns) {
            continue;
        }
        matched += 1;
        scrape_table(&table, &columns, &mut out);
    }
    tracing::info!(tables = matched, skills = out.len(), "scraped barrage tables");
    out
}
