//! BOM-aware text file I/O shared between the two tools.
//!
//! The extracted-text file is the entire interface between `extract-text`
//! and `make-site`, so both sides must agree on its encoding: written as
//! UTF-8 with an optional BOM, read back with the BOM stripped when
//! present. Writes are plain writes — no temp-file-then-rename — because a
//! run is single-user and a truncated file is simply re-generated.

use crate::config::TextEncoding;
use crate::error::DastabejError;
use std::path::Path;
use tracing::debug;

/// UTF-8 byte-order mark.
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read a text file as UTF-8, stripping a leading BOM when present.
///
/// # Errors
/// [`DastabejError::InputNotFound`] when the file is absent,
/// [`DastabejError::DecodeFailure`] when the bytes are not valid UTF-8.
pub async fn read_text(path: &Path) -> Result<String, DastabejError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DastabejError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(DastabejError::Internal(format!("read {path:?}: {e}"))),
    };

    let body = bytes.strip_prefix(BOM).unwrap_or(&bytes);
    String::from_utf8(body.to_vec()).map_err(|_| DastabejError::DecodeFailure {
        path: path.to_path_buf(),
    })
}

/// Write a text file in the given encoding, creating parent directories.
pub async fn write_text(
    path: &Path,
    content: &str,
    encoding: TextEncoding,
) -> Result<(), DastabejError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DastabejError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }
    }

    let mut bytes = Vec::with_capacity(encoding.bom().len() + content.len());
    bytes.extend_from_slice(encoding.bom());
    bytes.extend_from_slice(content.as_bytes());

    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| DastabejError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!("wrote {} chars to {} ({})", content.len(), path.display(), encoding);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn bom_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("extracted.txt");

        write_text(&path, "नमस्ते\nworld", TextEncoding::Utf8Bom)
            .await
            .unwrap();

        let raw = std::fs::read(&path).unwrap();
        assert!(raw.starts_with(BOM), "file should start with a BOM");

        let text = read_text(&path).await.unwrap();
        assert_eq!(text, "नमस्ते\nworld", "BOM must be stripped on read");
    }

    #[tokio::test]
    async fn plain_utf8_has_no_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.txt");

        write_text(&path, "hello", TextEncoding::Utf8).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn missing_file_is_input_not_found() {
        let err = read_text(Path::new("/definitely/not/here.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, DastabejError::InputNotFound { .. }));
    }

    #[tokio::test]
    async fn invalid_utf8_is_decode_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, [0xFF, 0xFE, 0x41]).unwrap();

        let err = read_text(&path).await.unwrap_err();
        assert!(matches!(err, DastabejError::DecodeFailure { .. }));
    }

    #[tokio::test]
    async fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a/b/out.txt");

        write_text(&path, "x", TextEncoding::Utf8).await.unwrap();
        assert!(path.exists());
    }
}
