// Rust guideline compliant 2026-02-06

//! ShareNet CLI library.
//!
//! Exposes argument parsing, command execution and output rendering so the
//! `snet` binary stays thin and tests can drive commands in-process.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;

pub use cli::Cli;
pub use output::{render_error, Reply};

use cli::FormatArg;
use sharenet_app::RepoContext;
use sharenet_core::config::OutputFormat;
use std::process::ExitCode;

/// Picks the output format: flags first, then the data directory config.
pub fn resolve_format(cli: &Cli) -> OutputFormat {
    if cli.json {
        return OutputFormat::Json;
    }
    match cli.format {
        Some(FormatArg::Json) => OutputFormat::Json,
        Some(FormatArg::Table) => OutputFormat::Table,
        Some(FormatArg::Plain) => OutputFormat::Plain,
        None => RepoContext::discover(cli.data_dir.as_deref())
            .and_then(|context| context.load_config())
            .map(|config| config.output_format)
            .unwrap_or_default(),
    }
}

/// Runs one invocation and prints its reply or error.
///
/// Successful replies go to stdout. Failures go to stdout as an error
/// envelope in JSON mode and to stderr otherwise; both exit non-zero.
pub fn run(cli: Cli) -> ExitCode {
    let format = resolve_format(&cli);
    let _guard = match logging::init_tracing(&cli.log_level, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{}", render_error(&err, OutputFormat::Plain));
            return ExitCode::FAILURE;
        }
    };

    match commands::execute(&cli) {
        Ok(reply) => {
            println!("{}", reply.render(format));
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            let rendered = render_error(&err, format);
            if format == OutputFormat::Json {
                println!("{}", rendered);
            } else {
                eprintln!("{}", rendered);
            }
            ExitCode::FAILURE
        }
    }
}
