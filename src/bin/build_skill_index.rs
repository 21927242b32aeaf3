//! Batch: write the ship and equip/augment skill indexes as JSON and Lua into
//! the output directory (`output/` unless BARRAGE_OUTPUT_DIR is set).
//! Run from project root: cargo run --bin build_skill_index

use barrage_datamine::cli;

fn main() {
    cli::init_tracing();
    tracing::info!("starting barrage datamine");
    std::process::exit(cli::run_skill_index_batch());
}
