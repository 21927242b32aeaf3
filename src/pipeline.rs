//! End-to-end runs: load tables, build a view, write artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::PipelineConfig;
use crate::data::GameTables;
use crate::error::{PipelineError, Result};
use crate::index::{build_equip_index, build_ship_index};
use crate::output::{write_json, write_lua_module};
use crate::parallel::WorkerPool;
use crate::resolve::resolve_entities;
use crate::scrape::scrape_barrages;

pub const SHIP_INDEX_JSON: &str = "barrages.json";
pub const EQUIP_INDEX_JSON: &str = "barrages2.json";
pub const SHIP_INDEX_LUA: &str = "data.lua";
pub const EQUIP_INDEX_LUA: &str = "data2.lua";

/// Paths written by one run plus the number of top-level entries in each view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub written: Vec<PathBuf>,
    pub entries: Vec<usize>,
}

impl RunReport {
    fn record(&mut self, path: PathBuf, entries: usize) {
        self.written.push(path);
        self.entries.push(entries);
    }
}

/// Sibling `.lua` path for a JSON artifact (`out/data.json` -> `out/data.lua`).
pub fn lua_path_for(json_path: &Path) -> PathBuf {
    json_path.with_extension("lua")
}

fn write_view<T: Serialize>(
    report: &mut RunReport,
    json_path: PathBuf,
    lua_path: Option<PathBuf>,
    view: &T,
    entries: usize,
) -> Result<()> {
    // Serialize once; both artifacts come from the same JSON value.
    let value = serde_json::to_value(view)?;
    write_json(&json_path, &value)?;
    report.record(json_path, entries);
    if let Some(lua_path) = lua_path {
        write_lua_module(&lua_path, &value)?;
        report.record(lua_path, entries);
    }
    Ok(())
}

/// Entity Resolver run: one JSON artifact keyed by entity name, plus a paired
/// Lua module when `with_lua` is set.
pub fn run_resolve(config: &PipelineConfig, output: &Path, with_lua: bool) -> Result<RunReport> {
    let _span = tracing::info_span!("resolve", output = %output.display()).entered();
    let tables = GameTables::load(&config.data)?;
    let view = resolve_entities(&tables, &WorkerPool::with_workers(config.workers));

    let mut report = RunReport::default();
    let lua_path = with_lua.then(|| lua_path_for(output));
    write_view(&mut report, output.to_path_buf(), lua_path, &view, view.len())?;
    Ok(report)
}

/// Skill-Index run: ship and equip/augment indexes as JSON and Lua, written
/// under the configured output directory (created if missing).
pub fn run_skill_index(config: &PipelineConfig) -> Result<RunReport> {
    let _span = tracing::info_span!("skill_index", output_dir = %config.output_dir.display()).entered();
    let out_dir = &config.output_dir;
    fs::create_dir_all(out_dir).map_err(|source| PipelineError::Write {
        path: out_dir.clone(),
        source,
    })?;

    let tables = GameTables::load(&config.data)?;
    let ship_index = WorkerPool::with_workers(config.workers).install(|| build_ship_index(&tables));
    let equip_index = build_equip_index(&tables);

    let mut report = RunReport::default();
    write_view(
        &mut report,
        out_dir.join(SHIP_INDEX_JSON),
        Some(out_dir.join(SHIP_INDEX_LUA)),
        &ship_index,
        ship_index.len(),
    )?;
    write_view(
        &mut report,
        out_dir.join(EQUIP_INDEX_JSON),
        Some(out_dir.join(EQUIP_INDEX_LUA)),
        &equip_index,
        equip_index.len(),
    )?;
    Ok(report)
}

/// Scrape a saved wiki page into a barrages-by-skill-id JSON file.
pub fn run_scrape(input: &Path, output: &Path, with_lua: bool) -> Result<RunReport> {
    let _span = tracing::info_span!("scrape", input = %input.display()).entered();
    let html = fs::read_to_string(input).map_err(|source| PipelineError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let barrages = scrape_barrages(&html);

    let mut report = RunReport::default();
    let lua_path = with_lua.then(|| lua_path_for(output));
    write_view(&mut report, output.to_path_buf(), lua_path, &barrages, barrages.len())?;
    Ok(report)
}
