//! Site generation entry points: extracted text → HTML file on disk.

use crate::config::{SiteConfig, TextEncoding};
use crate::error::DastabejError;
use crate::pipeline::completion::{CompletionClient, NovitaClient};
use crate::pipeline::{cleanhtml, textio};
use crate::prompts;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Result of a site-generation run.
#[derive(Debug, Clone)]
pub struct SiteOutput {
    /// The cleaned HTML document that was written to disk.
    pub html: String,
    pub duration_ms: u64,
}

/// Generate an HTML site from the extracted-text file at `input`, writing
/// the result to `output`.
///
/// Builds a [`NovitaClient`] from the environment; a missing credential
/// fails here, before the input file is even opened.
pub async fn generate_site(
    input: &Path,
    output: &Path,
    config: &SiteConfig,
) -> Result<SiteOutput, DastabejError> {
    let client = NovitaClient::from_env(config)?;
    generate_site_with(&client, input, output).await
}

/// [`generate_site`] with a caller-supplied completion client.
pub async fn generate_site_with(
    client: &dyn CompletionClient,
    input: &Path,
    output: &Path,
) -> Result<SiteOutput, DastabejError> {
    let start = Instant::now();

    let text = textio::read_text(input).await?;
    let prompt = prompts::site_prompt(&text);

    let raw = client.complete(&prompt).await?;
    let html = cleanhtml::clean_html_response(&raw);

    // The site file is plain UTF-8; browsers neither need nor want a BOM.
    textio::write_text(output, &html, TextEncoding::Utf8).await?;

    let duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "site written to {} ({} chars, {}ms)",
        output.display(),
        html.len(),
        duration_ms
    );

    Ok(SiteOutput { html, duration_ms })
}
