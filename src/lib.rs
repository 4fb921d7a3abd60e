//! # dastabej
//!
//! Turn scanned documents into explainer websites in two steps:
//!
//! 1. **Extract** — rasterise a PDF (or take an image as-is), run an OCR
//!    engine over each page, and write the recognized text to a file.
//! 2. **Generate** — feed that text to a chat-completion endpoint with a
//!    fixed prompt and write the returned HTML page to disk.
//!
//! The two steps ship as independent binaries (`extract-text`,
//! `make-site`) that compose through the text file alone; there is no
//! shared process or state between them.
//!
//! ## Pipeline Overview
//!
//! ```text
//! image / PDF
//!  │
//!  ├─ 1. Rasterize  PDF pages → page-NNN.png via pdfium (spawn_blocking)
//!  ├─ 2. OCR        one engine call per image, ordered rec_texts
//!  ├─ 3. Join       pages joined with a PAGE BREAK sentinel
//!  └─ 4. Write      UTF-8(-BOM) text file
//!                         │
//!  ┌──────────────────────┘
//!  ├─ 5. Prompt     fixed explainer-site template + extracted text
//!  ├─ 6. Complete   one chat-completions call (no retry, no streaming)
//!  ├─ 7. Clean      strip fences, slice <!doctype…</html>
//!  └─ 8. Write      HTML file
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dastabej::{extract_to_file, generate_site, ExtractConfig, SiteConfig};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extraction = extract_to_file(
//!         Path::new("sample.pdf"),
//!         Path::new("extracted_text.txt"),
//!         &ExtractConfig::default(),
//!     )
//!     .await?;
//!     eprintln!("{} pages extracted", extraction.page_count);
//!
//!     // Requires NOVITA_API_KEY in the environment.
//!     let site = generate_site(
//!         Path::new("extracted_text.txt"),
//!         Path::new("index.html"),
//!         &SiteConfig::default(),
//!     )
//!     .await?;
//!     eprintln!("site: {} chars", site.html.len());
//!     Ok(())
//! }
//! ```
//!
//! External collaborators sit behind two narrow traits —
//! [`TextRecognizer`] and [`CompletionClient`] — so both pipelines run in
//! tests with fakes and no network, weights, or sidecar install.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod generate;
pub mod pipeline;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractConfig, SiteConfig, TextEncoding, API_KEY_VAR, DEFAULT_MODEL};
pub use error::DastabejError;
pub use extract::{
    extract_text, extract_text_with, extract_to_file, extract_to_file_with, is_pdf, Extraction,
};
pub use generate::{generate_site, generate_site_with, SiteOutput};
pub use pipeline::cleanhtml::clean_html_response;
pub use pipeline::completion::{CompletionClient, NovitaClient};
pub use pipeline::ocr::{PaddleOcrCommand, TextRecognizer, PAGE_BREAK};
