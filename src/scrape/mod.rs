//! Wiki barrage-table scraper. Produces the same barrages-by-skill-id shape
//! as the upstream `barrages.json`, so its output can stand in for that table.

pub mod barrages;
pub mod html;

pub use barrages::{
    detect_targetting, normalize_header, scrape_barrages, ScrapedBarrages, ScrapedPart,
    ScrapedVariant, REQUIRED_COLUMNS,
};
pub use html::{extract_tables, HtmlTable};
