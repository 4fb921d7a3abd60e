//! PDF rasterisation: render every page to a PNG file via pdfium.
//!
//! Page files are named `page-NNN.png` with a zero-padded 3-digit page
//! number so that lexical sort equals document order even past 99 pages —
//! the OCR stage (and anyone poking at the directory) relies on that.
//! Existing files in the output directory are left alone.
//!
//! pdfium wraps a C++ library with thread-local state that is not safe to
//! drive from async contexts, so the whole render runs inside
//! `tokio::task::spawn_blocking`. The document handle lives only within
//! that blocking scope and is released by drop on every exit path.

use crate::error::DastabejError;
use image::ImageFormat;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name for a 1-based page number; zero-padded so lexical = page order.
pub fn page_file_name(page_num: usize) -> String {
    format!("page-{page_num:03}.png")
}

/// Rasterise all pages of `pdf` into `out_dir`, returning the image paths
/// in page order.
///
/// Creates `out_dir` if absent. `scale` multiplies the page's natural size
/// (1.0 ≈ 72 DPI).
///
/// # Errors
/// [`DastabejError::DependencyMissing`] when no pdfium library can be
/// bound, [`DastabejError::InputNotFound`] / [`DastabejError::CorruptPdf`]
/// for bad input, [`DastabejError::RasterizationFailed`] for per-page
/// render or encode failures.
pub async fn rasterize_pdf(
    pdf: &Path,
    out_dir: &Path,
    scale: f32,
) -> Result<Vec<PathBuf>, DastabejError> {
    if !pdf.exists() {
        return Err(DastabejError::InputNotFound {
            path: pdf.to_path_buf(),
        });
    }

    let pdf = pdf.to_path_buf();
    let out_dir = out_dir.to_path_buf();

    tokio::task::spawn_blocking(move || rasterize_blocking(&pdf, &out_dir, scale))
        .await
        .map_err(|e| DastabejError::Internal(format!("rasterise task panicked: {e}")))?
}

/// Blocking implementation of page rasterisation.
fn rasterize_blocking(
    pdf_path: &Path,
    out_dir: &Path,
    scale: f32,
) -> Result<Vec<PathBuf>, DastabejError> {
    std::fs::create_dir_all(out_dir).map_err(|e| DastabejError::OutputWriteFailed {
        path: out_dir.to_path_buf(),
        source: e,
    })?;

    let pdfium = bind_pdfium()?;

    let document =
        pdfium
            .load_pdf_from_file(pdf_path, None)
            .map_err(|e| DastabejError::CorruptPdf {
                path: pdf_path.to_path_buf(),
                detail: format!("{e:?}"),
            })?;

    let pages = document.pages();
    info!("PDF loaded: {} pages", pages.len());

    let render_config = PdfRenderConfig::new().scale_page_by_factor(scale);

    let mut paths = Vec::with_capacity(pages.len() as usize);

    for (idx, page) in pages.iter().enumerate() {
        let page_num = idx + 1;

        let bitmap = page.render_with_config(&render_config).map_err(|e| {
            DastabejError::RasterizationFailed {
                page: page_num,
                detail: format!("{e:?}"),
            }
        })?;

        let image = bitmap.as_image();
        let path = out_dir.join(page_file_name(page_num));
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| DastabejError::RasterizationFailed {
                page: page_num,
                detail: format!("PNG encode failed: {e}"),
            })?;

        debug!(
            "rendered page {} → {} ({}x{} px)",
            page_num,
            path.display(),
            image.width(),
            image.height()
        );
        paths.push(path);
    }

    Ok(paths)
    // `document` drops here, releasing the pdfium handle.
}

/// Bind to a pdfium library: explicit `PDFIUM_LIB_PATH`, then a copy next
/// to the executable, then the system library.
fn bind_pdfium() -> Result<Pdfium, DastabejError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(path) if !path.is_empty() => Pdfium::bind_to_library(&path),
        _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| DastabejError::DependencyMissing {
        detail: format!("{e:?}"),
    })?;

    Ok(Pdfium::new(bindings))
}
