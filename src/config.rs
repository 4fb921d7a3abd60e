//! Configuration types for the two pipeline entry points.
//!
//! Everything that used to be an ad-hoc default or an environment lookup in
//! the middle of the pipeline lives here instead: [`ExtractConfig`] drives
//! [`crate::extract`], [`SiteConfig`] drives [`crate::generate`]. Both are
//! built via small builders with documented defaults so callers set only
//! what they care about.
//!
//! The one piece of configuration deliberately *not* here is the API
//! credential: it is read once, eagerly, when
//! [`crate::pipeline::completion::NovitaClient`] is constructed, so a
//! missing key fails before any file is touched.

use crate::error::DastabejError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default chat model, an ERNIE variant served by Novita.
pub const DEFAULT_MODEL: &str = "baidu/ernie-4.5-vl-28b-a3b";

/// Default OpenAI-compatible API base URL (Novita).
pub const DEFAULT_API_BASE: &str = "https://api.novita.ai/openai";

/// Environment variable holding the completion API credential.
pub const API_KEY_VAR: &str = "NOVITA_API_KEY";

// ── Extractor ────────────────────────────────────────────────────────────

/// Configuration for text extraction (rasterisation + OCR).
///
/// # Example
/// ```rust
/// use dastabej::ExtractConfig;
///
/// let config = ExtractConfig::builder()
///     .lang("ne")
///     .pdf_scale(3.0)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// OCR language code. `None` selects a default by input type:
    /// `ne` for PDF input, `en` otherwise.
    pub lang: Option<String>,

    /// Rasterisation scale factor for PDF pages. Range: 1.0–8.0. Default: 4.0.
    ///
    /// 4.0 renders a US-Letter page at roughly 300 DPI, which is where the
    /// OCR engine stops gaining accuracy; higher values only cost memory.
    pub pdf_scale: f32,

    /// Encoding of the output text file. Default: [`TextEncoding::Utf8Bom`].
    ///
    /// The BOM variant exists so the file opens cleanly in Windows Notepad,
    /// which is where these extracts tend to get eyeballed.
    pub encoding: TextEncoding,

    /// OCR sidecar program. Default: `paddleocr`.
    pub ocr_command: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            lang: None,
            pdf_scale: 4.0,
            encoding: TextEncoding::Utf8Bom,
            ocr_command: "paddleocr".to_string(),
        }
    }
}

impl ExtractConfig {
    /// Create a new builder for `ExtractConfig`.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder {
            config: Self::default(),
        }
    }

    /// Resolve the effective language code for the given input kind.
    pub fn language_for(&self, input_is_pdf: bool) -> &str {
        match self.lang.as_deref() {
            Some(lang) => lang,
            None if input_is_pdf => "ne",
            None => "en",
        }
    }
}

/// Builder for [`ExtractConfig`].
#[derive(Debug)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.config.lang = Some(lang.into());
        self
    }

    pub fn pdf_scale(mut self, scale: f32) -> Self {
        self.config.pdf_scale = scale;
        self
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.config.encoding = encoding;
        self
    }

    pub fn ocr_command(mut self, program: impl Into<String>) -> Self {
        self.config.ocr_command = program.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractConfig, DastabejError> {
        let c = &self.config;
        if !(1.0..=8.0).contains(&c.pdf_scale) {
            return Err(DastabejError::InvalidConfig(format!(
                "pdf_scale must be 1.0–8.0, got {}",
                c.pdf_scale
            )));
        }
        if c.ocr_command.trim().is_empty() {
            return Err(DastabejError::InvalidConfig(
                "ocr_command must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Site generator ───────────────────────────────────────────────────────

/// Configuration for HTML site generation from extracted text.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Chat model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Maximum tokens the model may generate. Default: 4000.
    pub max_tokens: u32,

    /// Sampling temperature. Default: 0.7.
    ///
    /// Site generation is a creative task, unlike transcription; 0.7 gives
    /// the model room to pick layout and wording without going off-script.
    pub temperature: f32,

    /// OpenAI-compatible API base URL. Default: [`DEFAULT_API_BASE`].
    pub api_base: String,

    /// HTTP request timeout in seconds. Default: 300.
    ///
    /// A full-page HTML response at 4000 tokens routinely takes over a
    /// minute on the cheaper models.
    pub api_timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4000,
            temperature: 0.7,
            api_base: DEFAULT_API_BASE.to_string(),
            api_timeout_secs: 300,
        }
    }
}

impl SiteConfig {
    /// Create a new builder for `SiteConfig`.
    pub fn builder() -> SiteConfigBuilder {
        SiteConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`SiteConfig`].
#[derive(Debug)]
pub struct SiteConfigBuilder {
    config: SiteConfig,
}

impl SiteConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn max_tokens(mut self, n: u32) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.config.api_base = base.into();
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SiteConfig, DastabejError> {
        let c = &self.config;
        if c.max_tokens == 0 {
            return Err(DastabejError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        if c.model.trim().is_empty() {
            return Err(DastabejError::InvalidConfig("model must not be empty".into()));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Encoding used when writing the extracted-text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    /// UTF-8 with a leading byte-order mark (default).
    #[default]
    Utf8Bom,
    /// Plain UTF-8, no BOM.
    Utf8,
}

impl TextEncoding {
    /// Bytes to prepend to the file content.
    pub fn bom(self) -> &'static [u8] {
        match self {
            TextEncoding::Utf8Bom => b"\xEF\xBB\xBF",
            TextEncoding::Utf8 => b"",
        }
    }
}

impl FromStr for TextEncoding {
    type Err = DastabejError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8-sig" | "utf8-sig" => Ok(TextEncoding::Utf8Bom),
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            other => Err(DastabejError::InvalidConfig(format!(
                "unsupported encoding '{other}' (expected utf-8-sig or utf-8)"
            ))),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8Bom => f.write_str("utf-8-sig"),
            TextEncoding::Utf8 => f.write_str("utf-8"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_defaults_depend_on_input_kind() {
        let config = ExtractConfig::default();
        assert_eq!(config.language_for(true), "ne");
        assert_eq!(config.language_for(false), "en");

        let config = ExtractConfig::builder().lang("hi").build().unwrap();
        assert_eq!(config.language_for(true), "hi");
        assert_eq!(config.language_for(false), "hi");
    }

    #[test]
    fn pdf_scale_out_of_range_is_rejected() {
        assert!(ExtractConfig::builder().pdf_scale(0.5).build().is_err());
        assert!(ExtractConfig::builder().pdf_scale(9.0).build().is_err());
        assert!(ExtractConfig::builder().pdf_scale(4.0).build().is_ok());
    }

    #[test]
    fn site_config_rejects_zero_tokens() {
        assert!(SiteConfig::builder().max_tokens(0).build().is_err());
    }

    #[test]
    fn encoding_parses_both_spellings() {
        assert_eq!(
            "utf-8-sig".parse::<TextEncoding>().unwrap(),
            TextEncoding::Utf8Bom
        );
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert!("latin-1".parse::<TextEncoding>().is_err());
    }

    #[test]
    fn bom_bytes() {
        assert_eq!(TextEncoding::Utf8Bom.bom(), &[0xEF, 0xBB, 0xBF]);
        assert!(TextEncoding::Utf8.bom().is_empty());
    }
}
