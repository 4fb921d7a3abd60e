//! Pipeline stages shared by the two tools.
//!
//! Each submodule implements exactly one transformation step, so every
//! stage is independently testable and the external collaborators (OCR
//! engine, completion endpoint) can be swapped for fakes at the trait
//! seams.
//!
//! ## Data flow
//!
//! ```text
//! extract-text:  input ──▶ rasterize ──▶ ocr ──▶ textio
//!                (file)    (pdfium)      (lines)  (UTF-8-BOM file)
//!
//! make-site:     textio ──▶ completion ──▶ cleanhtml ──▶ textio
//!                (read)     (chat API)     (HTML slice)  (HTML file)
//! ```

pub mod cleanhtml;
pub mod completion;
pub mod ocr;
pub mod rasterize;
pub mod textio;
