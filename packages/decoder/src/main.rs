//! CLI entry point for the decoder.

use std::process::ExitCode;

use aas_xml_decoder::cli;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Initialize tracing with WARN level by default, respecting RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e.render_trace());
            ExitCode::FAILURE
        }
    }
}
