// Rust guideline compliant 2026-02-06

//! `snet`: command-line front end for the ShareNet marketplace core.

use clap::Parser;
use sharenet_cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    sharenet_cli::run(Cli::parse())
}
