//! Barrage datamine: joins the game-data tables (ships, equipment, augments,
//! skills, barrages) into per-entity and per-skill views and emits them as
//! JSON and Lua data modules.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod index;
pub mod key_order;
pub mod lua;
pub mod output;
pub mod parallel;
pub mod pipeline;
pub mod resolve;
pub mod scrape;
