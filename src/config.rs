//! Run configuration: where the source tables live and where artifacts go.
//! Every value has a default and an environment override so the binaries can
//! run without arguments.

use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "AzurLaneData/data";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_RESOLVED_OUTPUT_PATH: &str = "./output/data.json";

pub const DATA_DIR_ENV: &str = "BARRAGE_DATA_DIR";
pub const BARRAGES_PATH_ENV: &str = "BARRAGE_BARRAGES_PATH";
pub const OUTPUT_DIR_ENV: &str = "BARRAGE_OUTPUT_DIR";
pub const WORKERS_ENV: &str = "BARRAGE_WORKERS";

const SHIPS_FILE: &str = "ships.json";
const EQUIPMENTS_FILE: &str = "equipments.json";
const AUGMENTS_FILE: &str = "augments.json";
const SKILLS_FILE: &str = "skills.json";
const BARRAGES_FILE: &str = "barrages.json";

/// Locations of the five source tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub ships: PathBuf,
    pub equipments: PathBuf,
    pub augments: PathBuf,
    pub skills: PathBuf,
    pub barrages: PathBuf,
}

impl DataPaths {
    /// Standard file names under `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let dir = data_dir.as_ref();
        Self {
            ships: dir.join(SHIPS_FILE),
            equipments: dir.join(EQUIPMENTS_FILE),
            augments: dir.join(AUGMENTS_FILE),
            skills: dir.join(SKILLS_FILE),
            barrages: dir.join(BARRAGES_FILE),
        }
    }

    /// Use a different barrage table, e.g. one produced by the scraper.
    pub fn with_barrages(mut self, path: impl Into<PathBuf>) -> Self {
        self.barrages = path.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub data: DataPaths,
    pub output_dir: PathBuf,
    /// Worker threads for per-entity resolution. 0 = rayon default.
    pub workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data: DataPaths::in_dir(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            workers: 0,
        }
    }
}

impl PipelineConfig {
    /// Defaults overridden by `BARRAGE_*` environment variables.
    pub fn from_env() -> Self {
        let data_dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        let mut data = DataPaths::in_dir(data_dir);
        if let Ok(barrages) = env::var(BARRAGES_PATH_ENV) {
            data = data.with_barrages(barrages);
        }
        let output_dir =
            env::var(OUTPUT_DIR_ENV).unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string());
        let workers = match env::var(WORKERS_ENV) {
            Ok(raw) => raw.trim().parse::<usize>().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid {WORKERS_ENV}, using rayon default");
                0
            }),
            Err(_) => 0,
        };

        Self {
            data,
            output_dir: PathBuf::from(output_dir),
            workers,
        }
    }
}
