//! CLI binary for text extraction.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractConfig` and prints a summary.

use anyhow::{Context, Result};
use clap::Parser;
use dastabej::{extract_to_file, ExtractConfig, TextEncoding};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # OCR an image (defaults: sample.jpg → extracted_text.txt, lang en)
  extract-text

  # OCR a PDF (rasterised via pdfium; default lang ne)
  extract-text dastabej.pdf --out extracted_text.txt

  # Higher rasterisation scale, explicit language
  extract-text scan.pdf --pdf-scale 6.0 --lang hi

  # Plain UTF-8 output (default is utf-8-sig, i.e. with a BOM)
  extract-text scan.jpg --encoding utf-8

ENVIRONMENT VARIABLES:
  DASTABEJ_OCR_COMMAND   OCR sidecar program (default: paddleocr)
  PDFIUM_LIB_PATH        Path to an existing libpdfium for PDF input
"#;

/// Extract text from an image or PDF via OCR.
#[derive(Parser, Debug)]
#[command(
    name = "extract-text",
    version,
    about = "Extract text from an image or PDF via OCR",
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input image or PDF file.
    #[arg(default_value = "sample.jpg")]
    input: PathBuf,

    /// Output text file.
    #[arg(long, default_value = "extracted_text.txt")]
    out: PathBuf,

    /// OCR language code. Default: ne for PDF input, en otherwise.
    #[arg(long)]
    lang: Option<String>,

    /// Rasterisation scale factor for PDF pages (1.0–8.0).
    #[arg(long, default_value_t = 4.0)]
    pdf_scale: f32,

    /// Output encoding: utf-8-sig or utf-8.
    #[arg(long, default_value = "utf-8-sig")]
    encoding: String,

    /// OCR sidecar program.
    #[arg(long, env = "DASTABEJ_OCR_COMMAND", default_value = "paddleocr")]
    ocr_command: String,

    /// Enable DEBUG-level logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let encoding: TextEncoding = cli
        .encoding
        .parse()
        .with_context(|| format!("invalid --encoding '{}'", cli.encoding))?;

    let mut builder = ExtractConfig::builder()
        .pdf_scale(cli.pdf_scale)
        .encoding(encoding)
        .ocr_command(&cli.ocr_command);
    if let Some(ref lang) = cli.lang {
        builder = builder.lang(lang);
    }
    let config = builder.build().context("invalid configuration")?;

    let spinner = if cli.quiet {
        None
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(format!("Extracting text from {}…", cli.input.display()));
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    };

    let result = extract_to_file(&cli.input, &cli.out, &config).await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let extraction = result?;

    if !cli.quiet {
        eprintln!(
            "✔ {} page(s), {} chars → {}  ({}ms OCR, {}ms render)",
            extraction.page_count,
            extraction.text.chars().count(),
            cli.out.display(),
            extraction.stats.ocr_duration_ms,
            extraction.stats.render_duration_ms,
        );
    }

    Ok(())
}
