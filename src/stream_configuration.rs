//! Configuration types for file sources and correlation

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StreamResult;

/// File configuration for line sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Files read in order. `None` and an empty list are both rejected when
    /// the source is opened.
    pub files: Option<Vec<PathBuf>>,
    pub buffer_size: usize,
    /// Forced decompression for every file.
    pub compression: Option<CompressionType>,
    /// Pick decompression from the file extension when `compression` is
    /// unset.
    pub detect_compression: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionType {
    Gzip,
    /// Raw deflate, no header.
    Deflate,
    /// Deflate in a zlib wrapper, as written by `pigz -z`.
    Zlib,
}

impl CompressionType {
    /// Compression implied by a file extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "gz" | "gzip" => Some(CompressionType::Gzip),
            "deflate" => Some(CompressionType::Deflate),
            "zz" | "zlib" => Some(CompressionType::Zlib),
            _ => None,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            files: None,
            buffer_size: 8192,
            compression: None,
            detect_compression: true,
        }
    }
}

impl FileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the files to read, in order
    pub fn files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files = Some(files.into_iter().map(Into::into).collect());
        self
    }

    /// Set the read buffer size
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Force a decompression for every file
    pub fn compression(mut self, compression: CompressionType) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn detect_compression(mut self, detect: bool) -> Self {
        self.detect_compression = detect;
        self
    }

    /// Load from a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> StreamResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compression to use for one file.
    pub fn compression_for(&self, path: &Path) -> Option<CompressionType> {
        match self.compression {
            Some(compression) => Some(compression),
            None if self.detect_compression => CompressionType::from_path(path),
            None => None,
        }
    }
}

/// Window configuration for correlating two streams
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Most right-hand elements scanned per left-hand element.
    pub lookahead: usize,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self { lookahead: 100 }
    }
}

impl CorrelationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn from_json(json: &str) -> StreamResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
