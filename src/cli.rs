//! Command-line front ends for the three binaries. Each `run_*` returns the
//! process exit code: 0 on success, 1 on a pipeline error, 2 on bad usage.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{
    PipelineConfig, BARRAGES_PATH_ENV, DATA_DIR_ENV, DEFAULT_RESOLVED_OUTPUT_PATH, WORKERS_ENV,
};
use crate::error::Result;
use crate::pipeline::{run_resolve, run_scrape, run_skill_index, RunReport};

const DEFAULT_SCRAPE_INPUT: &str = "test.html";
const DEFAULT_SCRAPE_OUTPUT: &str = "barrages3.json";

/// Install the fmt subscriber. `RUST_LOG` wins; otherwise this crate logs at info.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("barrage_datamine=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Resolve every ship, equipment and augment into the skills it can trigger.
#[derive(Debug, Parser)]
#[command(name = "barrage-datamine", version)]
pub struct ResolveArgs {
    /// Output JSON path.
    #[arg(default_value = DEFAULT_RESOLVED_OUTPUT_PATH)]
    pub output: PathBuf,
    /// Directory holding ships.json, equipments.json, augments.json, skills.json, barrages.json.
    #[arg(long, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,
    /// Alternate barrage table (e.g. scraper output).
    #[arg(long, env = BARRAGES_PATH_ENV)]
    pub barrages: Option<PathBuf>,
    /// Worker threads; 0 uses all cores.
    #[arg(long, env = WORKERS_ENV)]
    pub jobs: Option<usize>,
    /// Also write the Lua data module next to the JSON output.
    #[arg(long)]
    pub lua: bool,
}

impl ResolveArgs {
    fn config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::from_env();
        if let Some(dir) = &self.data_dir {
            config.data = crate::config::DataPaths::in_dir(dir);
        }
        if let Some(barrages) = &self.barrages {
            config.data = config.data.with_barrages(barrages);
        }
        if let Some(jobs) = self.jobs {
            config.workers = jobs;
        }
        config
    }
}

/// Scrape barrage tables from a saved wiki page.
#[derive(Debug, Parser)]
#[command(name = "scrape_barrages", version)]
pub struct ScrapeArgs {
    /// Saved HTML page.
    #[arg(default_value = DEFAULT_SCRAPE_INPUT)]
    pub input: PathBuf,
    /// Output JSON path.
    #[arg(default_value = DEFAULT_SCRAPE_OUTPUT)]
    pub output: PathBuf,
    /// Also write the Lua data module next to the JSON output.
    #[arg(long)]
    pub lua: bool,
}

fn parse_args<P, I, T>(args: I) -> std::result::Result<P, i32>
where
    P: Parser,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    P::try_parse_from(args).map_err(|err| {
        let _ = err.print();
        if err.use_stderr() {
            2
        } else {
            0
        }
    })
}

fn finish(result: Result<RunReport>, what: &str) -> i32 {
    match result {
        Ok(report) => {
            for (path, entries) in report.written.iter().zip(&report.entries) {
                tracing::info!(path = %path.display(), entries, "{what} artifact written");
            }
            0
        }
        Err(err) => {
            tracing::error!(error = %err, "{what} failed");
            1
        }
    }
}

pub fn run_resolve_with_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: ResolveArgs = match parse_args(args) {
        Ok(args) => args,
        Err(code) => return code,
    };
    let config = args.config();
    finish(run_resolve(&config, &args.output, args.lua), "resolve")
}

/// Batch entry: no options, everything comes from the environment.
pub fn run_skill_index_batch() -> i32 {
    finish(run_skill_index(&PipelineConfig::from_env()), "skill index")
}

pub fn run_scrape_with_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: ScrapeArgs = match parse_args(args) {
        Ok(args) => args,
        Err(code) => return code,
    };
    finish(run_scrape(&args.input, &args.output, args.lua), "scrape")
}
