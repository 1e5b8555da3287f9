//! pdf-annot-extract - Entry point
//!
//! Prints the link annotations of a PDF as JSON keyed by page index.

use anyhow::Context;
use clap::Parser;
use pdf_annot_extract::{extract_pdf, source, write_json, OutputConfig, OutputStyle};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Extract link annotations and media boxes from a PDF as JSON.
#[derive(Debug, Parser)]
#[command(name = "pdf-annot-extract", about, version)]
struct Cli {
    /// Indent output with four spaces
    #[arg(long)]
    pretty: bool,

    /// Path to the PDF file ('-' reads standard input)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Password for encrypted PDFs
    #[arg(value_name = "PASSWORD")]
    password: Option<String>,
}

impl Cli {
    fn output_config(&self) -> OutputConfig {
        OutputConfig {
            style: if self.pretty {
                OutputStyle::Pretty
            } else {
                OutputStyle::Compact
            },
            ..OutputConfig::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pdf_annot_extract=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    run(&cli).with_context(|| format!("processing file {}", cli.file.display()))
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let resolved = if cli.file.as_os_str() == "-" {
        source::resolve_reader(std::io::stdin().lock(), "<stdin>")?
    } else {
        source::resolve_path(&cli.file)?
    };
    tracing::debug!(source = %resolved.source_name, "extracting links");

    let result = extract_pdf(&resolved.data, cli.password.as_deref())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_json(&mut out, &result, &cli.output_config())?;
    out.flush()?;
    Ok(())
}
