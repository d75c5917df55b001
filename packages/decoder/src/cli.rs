//! Command-line interface for the decoder.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;

use crate::compliance::{check_deserialization, Status};
use crate::config::DecoderConfig;
use crate::decode::{CollectingSink, Decoder, Level};
use crate::error::Result;
use crate::report::DecodeSummary;

/// AAS XML Decoder - Decode Asset Administration Shell XML documents.
#[derive(Parser)]
#[command(name = "aas-xml-decoder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a document and print a summary of its contents.
    Decode {
        /// Path to the XML document
        file: PathBuf,

        /// Abort on the first error instead of skipping defective objects
        #[arg(short, long)]
        strict: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Check whether a document can be deserialized.
    Check {
        /// Path to the XML document
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Run the CLI.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            file,
            strict,
            format,
        } => decode_command(&file, strict, format),
        Commands::Check { file } => Ok(check_command(&file)),
    }
}

/// Execute the decode command.
fn decode_command(file: &Path, strict: bool, format: OutputFormat) -> Result<ExitCode> {
    let config = if strict {
        DecoderConfig::strict()
    } else {
        DecoderConfig::lenient()
    };

    let mut sink = CollectingSink::new();
    let store = Decoder::new(config).decode_file(file, &mut sink)?;
    let summary = DecodeSummary::new(&store, strict, sink.into_diagnostics());

    match format {
        OutputFormat::Json => println!("{}", summary.to_json()?),
        OutputFormat::Yaml => print!("{}", summary.to_yaml()?),
        OutputFormat::Text => print_summary(file, &summary),
    }

    Ok(ExitCode::SUCCESS)
}

fn print_summary(file: &Path, summary: &DecodeSummary) {
    println!(
        "{} {} ({} mode)",
        style("Decoded").bold(),
        style(file.display()).cyan(),
        if summary.strict { "strict" } else { "lenient" }
    );
    println!();
    println!("  Objects: {}", style(summary.total).green());
    for (kind, count) in &summary.counts {
        println!("    {kind}: {count}");
    }
    for identifier in &summary.identifiers {
        println!("    - {identifier}");
    }

    if !summary.diagnostics.is_empty() {
        println!();
        println!(
            "  Errors: {}  Warnings: {}",
            style(summary.error_count()).red().bold(),
            style(summary.warning_count()).yellow().bold()
        );
        for diagnostic in &summary.diagnostics {
            let label = match diagnostic.level {
                Level::Error => style("error").red(),
                Level::Warning => style("warning").yellow(),
            };
            println!("{label}: {}", diagnostic.message);
        }
    }
}

/// Execute the check command.
fn check_command(file: &Path) -> ExitCode {
    let (report, _) = check_deserialization(file);

    for step in report.steps() {
        let status = match step.status {
            Status::Success => style(step.status.to_string()).green(),
            Status::Failed => style(step.status.to_string()).red().bold(),
            Status::NotExecuted => style(step.status.to_string()).dim(),
        };
        println!("{status:<14} {}", step.name);
        for diagnostic in &step.diagnostics {
            println!("    {}: {}", diagnostic.level.as_str(), diagnostic.message);
        }
    }

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
