//! CLI binary for site generation.
//!
//! Reads the extracted-text file, makes one completion call, and writes
//! the cleaned HTML. Errors print to stderr and exit non-zero; `--pause`
//! blocks on stdin before exit either way (useful when the binary is
//! double-clicked on Windows and the console would vanish).

use anyhow::{Context, Result};
use clap::Parser;
use dastabej::config::{DEFAULT_API_BASE, DEFAULT_MODEL};
use dastabej::{generate_site, SiteConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Generate index.html from extracted_text.txt
  make-site

  # Explicit paths and model
  make-site --in extracted_text.txt --out site/index.html --model baidu/ernie-4.5-vl-28b-a3b

  # Keep the console open afterwards (Windows double-click)
  make-site --pause

ENVIRONMENT VARIABLES:
  NOVITA_API_KEY      Completion API credential (required)
  DASTABEJ_API_BASE   OpenAI-compatible API base URL override
"#;

/// Generate an explainer website from extracted text via a chat model.
#[derive(Parser, Debug)]
#[command(
    name = "make-site",
    version,
    about = "Generate an explainer website from extracted text via a chat model",
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input text file.
    #[arg(long = "in", default_value = "extracted_text.txt")]
    input: PathBuf,

    /// Output HTML file.
    #[arg(long, default_value = "index.html")]
    out: PathBuf,

    /// Chat model identifier.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// OpenAI-compatible API base URL.
    #[arg(long, env = "DASTABEJ_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Maximum tokens the model may generate.
    #[arg(long, default_value_t = 4000)]
    max_tokens: u32,

    /// Sampling temperature (0.0–2.0).
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// Pause before exit.
    #[arg(long)]
    pause: bool,

    /// Enable DEBUG-level logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
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

    let code = match run(&cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("\nERROR: {e:#}");
            1
        }
    };

    if cli.pause {
        eprint!("{}", pause_prompt(code == 0));
        io::stderr().flush().ok();
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok();
    }

    std::process::exit(code);
}

/// Prompt shown before a `--pause` exit; a successful run is acknowledged.
fn pause_prompt(success: bool) -> &'static str {
    if success {
        "\nDone. Press Enter to exit..."
    } else {
        "\nPress Enter to exit..."
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = SiteConfig::builder()
        .model(&cli.model)
        .api_base(&cli.api_base)
        .max_tokens(cli.max_tokens)
        .temperature(cli.temperature)
        .build()
        .context("invalid configuration")?;

    let spinner = if cli.quiet {
        None
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(format!("Calling {}…", cli.model));
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    };

    let result = generate_site(&cli.input, &cli.out, &config).await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let site = result?;

    if !cli.quiet {
        eprintln!(
            "✔ HTML generated and saved to {} ({} chars, {}ms)",
            cli.out.display(),
            site.html.len(),
            site.duration_ms
        );
    }

    Ok(())
}
