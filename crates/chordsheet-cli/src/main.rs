//! Chordsheet CLI - Convert chord sheets between notation dialects

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialised inside run() once the flags are known
    let app = cli::ChordsheetApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
