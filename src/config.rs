//! Codec configuration.

use std::path::Path;

use serde::Deserialize;

use crate::error::{HuffmanError, Result};

/// Options shared by compression and decompression.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CodecConfig {
    /// Append ` //<char>` to dictionary lines of printable ASCII symbols
    #[serde(default = "default_annotate_printable")]
    pub annotate_printable: bool,

    /// Capacity of the buffered file reader and writer (bytes)
    #[serde(default = "default_io_buffer_size")]
    pub io_buffer_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            annotate_printable: default_annotate_printable(),
            io_buffer_size: default_io_buffer_size(),
        }
    }
}

impl CodecConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CodecConfig =
            serde_json::from_str(json).map_err(|e| HuffmanError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| HuffmanError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn with_annotations(mut self, annotate: bool) -> Self {
        self.annotate_printable = annotate;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.io_buffer_size == 0 {
            return Err(HuffmanError::Config(
                "io_buffer_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_annotate_printable() -> bool {
    true
}

fn default_io_buffer_size() -> usize {
    64 * 1024 // 64KB
}
