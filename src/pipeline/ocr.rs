//! OCR: recognize text lines from page images, in reading order.
//!
//! The engine itself is an external collaborator hidden behind the
//! [`TextRecognizer`] trait so tests can substitute a fake. The real
//! implementation, [`PaddleOcrCommand`], shells out to the PaddleOCR CLI
//! once per image and parses the JSON records it prints; each record
//! carries a `res.rec_texts` array whose order is the engine's reading
//! order and is authoritative — nothing here re-sorts it.
//!
//! Page texts are joined with [`PAGE_BREAK`], inserted only *between*
//! pages: a multi-page document gets exactly pageCount − 1 sentinels, a
//! single image gets none.

use crate::error::DastabejError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, warn};

/// Sentinel inserted between consecutive pages' text.
pub const PAGE_BREAK: &str = "\n--- PAGE BREAK ---\n";

/// A narrow interface over an OCR engine: one image in, ordered lines out.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize text in a single image, returning lines in reading order.
    async fn recognize(&self, image: &Path) -> Result<Vec<String>, DastabejError>;
}

/// OCR engine driven through the PaddleOCR sidecar command.
///
/// Invokes `<program> ocr -i <image> --lang <lang>` and scans stdout for
/// JSON result records. The language is fixed at construction; the
/// [`TextRecognizer`] call site only ever supplies an image path.
pub struct PaddleOcrCommand {
    program: String,
    lang: String,
}

impl PaddleOcrCommand {
    pub fn new(program: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            lang: lang.into(),
        }
    }
}

#[async_trait]
impl TextRecognizer for PaddleOcrCommand {
    async fn recognize(&self, image: &Path) -> Result<Vec<String>, DastabejError> {
        debug!("running {} on {}", self.program, image.display());

        let output = Command::new(&self.program)
            .arg("ocr")
            .arg("-i")
            .arg(image)
            .arg("--lang")
            .arg(&self.lang)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DastabejError::OcrFailed {
                        detail: format!(
                            "'{}' not found on PATH — is PaddleOCR installed?",
                            self.program
                        ),
                    }
                } else {
                    DastabejError::OcrFailed {
                        detail: format!("failed to spawn '{}': {e}", self.program),
                    }
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DastabejError::OcrFailed {
                detail: format!("{} exited with {}: {}", self.program, output.status, stderr.trim()),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines = parse_rec_texts(&stdout);
        if lines.is_empty() {
            warn!("no text recognized in {}", image.display());
        }
        Ok(lines)
    }
}

/// One result record as printed by the engine: a JSON object whose
/// top-level `res` payload carries the ordered `rec_texts` array.
#[derive(Debug, Deserialize)]
struct OcrRecord {
    res: OcrPayload,
}

#[derive(Debug, Deserialize)]
struct OcrPayload {
    #[serde(default)]
    rec_texts: Vec<String>,
}

/// Collect `rec_texts` from every JSON record in the engine's stdout,
/// preserving record order. Non-JSON lines (progress chatter, warnings)
/// are skipped.
fn parse_rec_texts(stdout: &str) -> Vec<String> {
    let mut texts = Vec::new();
    for line in stdout.lines() {
        let line = line.trim();
        if !line.starts_with('{') {
            continue;
        }
        if let Ok(record) = serde_json::from_str::<OcrRecord>(line) {
            texts.extend(record.res.rec_texts);
        }
    }
    texts
}

/// Run the engine over `images` in input order, returning one text per page
/// (lines joined with `\n`).
///
/// Each path is checked for existence *before* the engine is invoked, so a
/// typo surfaces as [`DastabejError::InputNotFound`] rather than an opaque
/// engine failure.
pub async fn recognize_pages(
    engine: &dyn TextRecognizer,
    images: &[PathBuf],
) -> Result<Vec<String>, DastabejError> {
    let mut pages = Vec::with_capacity(images.len());

    for image in images {
        if !image.exists() {
            return Err(DastabejError::InputNotFound {
                path: image.clone(),
            });
        }
        let lines = engine.recognize(image).await?;
        debug!("{}: {} lines", image.display(), lines.len());
        pages.push(lines.join("\n"));
    }

    Ok(pages)
}

/// Join page texts with the page-break sentinel (between pages only).
pub fn join_pages(pages: &[String]) -> String {
    pages.join(PAGE_BREAK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct FakeRecognizer;

    #[async_trait]
    impl TextRecognizer for FakeRecognizer {
        async fn recognize(&self, image: &Path) -> Result<Vec<String>, DastabejError> {
            let stem = image.file_stem().unwrap().to_string_lossy().to_string();
            Ok(vec![format!("{stem} line one"), format!("{stem} line two")])
        }
    }

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let p = dir.join(name);
        std::fs::write(&p, b"png").unwrap();
        p
    }

    #[tokio::test]
    async fn pages_keep_input_order_and_line_order() {
        let dir = tempdir().unwrap();
        let images = vec![touch(dir.path(), "b.png"), touch(dir.path(), "a.png")];

        let pages = recognize_pages(&FakeRecognizer, &images).await.unwrap();
        assert_eq!(pages, vec!["b line one\nb line two", "a line one\na line two"]);
    }

    #[tokio::test]
    async fn missing_image_is_input_not_found_before_engine_runs() {
        struct PanicRecognizer;

        #[async_trait]
        impl TextRecognizer for PanicRecognizer {
            async fn recognize(&self, _image: &Path) -> Result<Vec<String>, DastabejError> {
                panic!("engine must not be invoked for a missing path");
            }
        }

        let err = recognize_pages(&PanicRecognizer, &[PathBuf::from("/no/such.png")])
            .await
            .unwrap_err();
        assert!(matches!(err, DastabejError::InputNotFound { .. }));
    }

    #[test]
    fn sentinel_count_is_pages_minus_one() {
        let pages: Vec<String> = (1..=4).map(|i| format!("page {i}")).collect();
        let joined = join_pages(&pages);

        assert_eq!(joined.matches("--- PAGE BREAK ---").count(), 3);
        assert!(!joined.starts_with('\n'), "no sentinel prefix");
        assert!(!joined.ends_with('\n'), "no sentinel suffix");
        assert!(joined.starts_with("page 1"));
        assert!(joined.ends_with("page 4"));
    }

    #[test]
    fn single_page_has_no_sentinel() {
        let joined = join_pages(&["only page".to_string()]);
        assert_eq!(joined, "only page");
        assert!(!joined.contains("PAGE BREAK"));
    }

    #[test]
    fn parse_rec_texts_keeps_order_and_skips_chatter() {
        let stdout = concat!(
            "loading model...\n",
            r#"{"res": {"rec_texts": ["पहिलो", "दोस्रो"], "rec_scores": [0.99, 0.97]}}"#,
            "\n",
            "not json\n",
            r#"{"res": {"rec_texts": ["third"]}}"#,
            "\n",
        );
        assert_eq!(parse_rec_texts(stdout), vec!["पहिलो", "दोस्रो", "third"]);
    }

    #[test]
    fn parse_rec_texts_handles_missing_field() {
        let stdout = r#"{"res": {"rec_scores": [0.5]}}"#;
        assert!(parse_rec_texts(stdout).is_empty());
    }
}
