//! Scrape the wiki's barrage tables from a saved HTML page.
//! Run from project root: cargo run --bin scrape_barrages [-- page.html out.json]

use barrage_datamine::cli;

fn main() {
    cli::init_tracing();
    std::process::exit(cli::run_scrape_with_args(std::env::args_os()));
}
