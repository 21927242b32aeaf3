use std::env;
use std::process;

use barrage_datamine::cli;

fn main() {
    cli::init_tracing();
    process::exit(cli::run_resolve_with_args(env::args_os()));
}
