//! Text extraction entry points: input file → OCR text on disk.
//!
//! The flow is strictly linear: decide the input kind by extension,
//! rasterise PDF pages into a temp directory (cleaned up on drop), run the
//! OCR engine over each page image in order, join pages with the
//! page-break sentinel, and optionally write the result as UTF-8(-BOM).

use crate::config::ExtractConfig;
use crate::error::DastabejError;
use crate::pipeline::ocr::{self, PaddleOcrCommand, TextRecognizer};
use crate::pipeline::{rasterize, textio};
use std::path::Path;
use std::time::Instant;
use tempfile::TempDir;
use tracing::info;

/// Result of a text extraction run.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Recognized text: lines joined by `\n`, pages separated by the
    /// page-break sentinel.
    pub text: String,
    /// Number of page images processed.
    pub page_count: usize,
    /// Timing breakdown.
    pub stats: ExtractionStats,
}

/// Timing for an extraction run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractionStats {
    pub render_duration_ms: u64,
    pub ocr_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// Whether the input selects the PDF rasterisation path.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Extract text from an image or PDF using the configured OCR sidecar.
pub async fn extract_text(
    input: &Path,
    config: &ExtractConfig,
) -> Result<Extraction, DastabejError> {
    let engine = PaddleOcrCommand::new(&config.ocr_command, config.language_for(is_pdf(input)));
    extract_text_with(&engine, input, config).await
}

/// Extract text using a caller-supplied recognizer.
///
/// This is the seam tests use to run the full pipeline without PaddleOCR
/// installed.
pub async fn extract_text_with(
    engine: &dyn TextRecognizer,
    input: &Path,
    config: &ExtractConfig,
) -> Result<Extraction, DastabejError> {
    let total_start = Instant::now();

    if !input.exists() {
        return Err(DastabejError::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    // For PDFs, page images live in a TempDir that is dropped (and the
    // files removed) when this function returns on any path.
    let mut render_duration_ms = 0;
    let mut _pages_dir: Option<TempDir> = None;

    let images = if is_pdf(input) {
        let dir = TempDir::new()
            .map_err(|e| DastabejError::Internal(format!("temp dir: {e}")))?;
        let render_start = Instant::now();
        let paths = rasterize::rasterize_pdf(input, dir.path(), config.pdf_scale).await?;
        render_duration_ms = render_start.elapsed().as_millis() as u64;
        info!("rasterised {} pages in {}ms", paths.len(), render_duration_ms);
        _pages_dir = Some(dir);
        paths
    } else {
        vec![input.to_path_buf()]
    };

    let ocr_start = Instant::now();
    let pages = ocr::recognize_pages(engine, &images).await?;
    let ocr_duration_ms = ocr_start.elapsed().as_millis() as u64;

    let text = ocr::join_pages(&pages);
    info!(
        "recognized {} pages, {} chars in {}ms",
        pages.len(),
        text.len(),
        ocr_duration_ms
    );

    Ok(Extraction {
        text,
        page_count: pages.len(),
        stats: ExtractionStats {
            render_duration_ms,
            ocr_duration_ms,
            total_duration_ms: total_start.elapsed().as_millis() as u64,
        },
    })
}

/// Extract text and write it to `out` in the configured encoding.
pub async fn extract_to_file(
    input: &Path,
    out: &Path,
    config: &ExtractConfig,
) -> Result<Extraction, DastabejError> {
    let engine = PaddleOcrCommand::new(&config.ocr_command, config.language_for(is_pdf(input)));
    extract_to_file_with(&engine, input, out, config).await
}

/// [`extract_to_file`] with a caller-supplied recognizer.
pub async fn extract_to_file_with(
    engine: &dyn TextRecognizer,
    input: &Path,
    out: &Path,
    config: &ExtractConfig,
) -> Result<Extraction, DastabejError> {
    let extraction = extract_text_with(engine, input, config).await?;
    textio::write_text(out, &extraction.text, config.encoding).await?;
    info!("extracted text written to {}", out.display());
    Ok(extraction)
}
