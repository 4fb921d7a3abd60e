//! Error types for the dastabej library.
//!
//! One flat enum covers both tools. The pipeline is fail-fast: every error
//! aborts the current run, there are no retries and no partial recovery, so
//! there is no page-level error type here — the first failure wins.
//!
//! Upstream failures from the OCR engine or the completion endpoint are
//! carried verbatim in [`DastabejError::OcrFailed`] /
//! [`DastabejError::CompletionFailed`] rather than being reclassified; the
//! remaining variants are local conditions the user can act on directly.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the dastabej library.
#[derive(Debug, Error)]
pub enum DastabejError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("input file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Extracted-text file exists but is not valid UTF-8 (with or without BOM).
    #[error("could not decode '{path}' as UTF-8\nRe-run extract-text, or re-save the file as UTF-8.")]
    DecodeFailure { path: PathBuf },

    // ── Capability / configuration errors ─────────────────────────────────
    /// No pdfium library could be bound, so PDF input cannot be rasterised.
    #[error(
        "PDF rasterisation is unavailable: {detail}\n\
         Install pdfium and point PDFIUM_LIB_PATH at it, or pass an image file instead of a PDF."
    )]
    DependencyMissing { detail: String },

    /// A required environment variable is absent.
    #[error(
        "{var} is not set.\n\
         Export it in your shell (or put it in a .env file you source) before running make-site."
    )]
    ConfigurationMissing { var: String },

    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pipeline errors ───────────────────────────────────────────────────
    /// pdfium could not open the document at all.
    #[error("could not open PDF '{path}': {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// pdfium returned an error while rendering or encoding a specific page.
    #[error("rasterisation failed for page {page}: {detail}")]
    RasterizationFailed { page: usize, detail: String },

    /// The OCR engine failed; the upstream message is carried verbatim.
    #[error("OCR engine failed: {detail}")]
    OcrFailed { detail: String },

    /// The completion endpoint failed; the upstream message is carried verbatim.
    #[error("completion request failed: {detail}")]
    CompletionFailed { detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}
