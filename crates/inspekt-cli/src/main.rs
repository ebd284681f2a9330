//! Inspekt - vehicle inspection due-date report
//!
//! Merges the local vehicle list with the fleet API and writes a
//! spreadsheet colored by how soon each vehicle's inspection is due.

mod cli;
mod commands;
mod logging;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
