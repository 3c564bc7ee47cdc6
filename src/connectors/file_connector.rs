//! Line source over one or more (optionally compressed) files

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::{DeflateDecoder, MultiGzDecoder, ZlibDecoder};

use super::stream_connector::StreamConnector;
use crate::error::{StreamError, StreamResult};
use crate::stream::LazyStream;
use crate::stream_configuration::{CompressionType, FileConfig};

/// Connector producing the lines of the configured files, in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileConnector;

impl StreamConnector<String> for FileConnector {
    type Config = FileConfig;

    fn from_source(&self, config: FileConfig) -> StreamResult<LazyStream<String>> {
        open_lines(&config)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// Stream the lines of every file in `config.files`, trailing `\n` removed.
///
/// Only the file list is checked here. Each file is opened when the stream
/// reaches it, so an unreadable file fails the `head`/`get` that needs its
/// first line while earlier files are still read in full.
pub fn open_lines(config: &FileConfig) -> StreamResult<LazyStream<String>> {
    let files = match &config.files {
        None => {
            return Err(StreamError::MissingArgument(
                "no file list given".to_string(),
            ))
        }
        Some(files) if files.is_empty() => {
            return Err(StreamError::EmptyArgument("file list is empty".to_string()))
        }
        Some(files) => files.iter().cloned().collect(),
    };
    let mut reader = MultiFileReader {
        pending: files,
        current: None,
        config: config.clone(),
    };
    Ok(LazyStream::new(move || reader.next_line()))
}

/// Shorthand for [`open_lines`] with default settings.
pub fn file_lines<I, P>(files: I) -> StreamResult<LazyStream<String>>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    open_lines(&FileConfig::new().files(files))
}

struct MultiFileReader {
    pending: VecDeque<PathBuf>,
    current: Option<(PathBuf, Box<dyn BufRead>)>,
    config: FileConfig,
}

fn io_error(path: &Path, err: std::io::Error) -> StreamError {
    StreamError::IO(format!("{}: {}", path.display(), err))
}

impl MultiFileReader {
    fn next_line(&mut self) -> StreamResult<Option<String>> {
        let mut buf = Vec::new();
        loop {
            if self.current.is_none() {
                let path = match self.pending.pop_front() {
                    Some(path) => path,
                    None => return Ok(None),
                };
                let reader = self.open(&path)?;
                self.current = Some((path, reader));
            }

            if let Some((path, reader)) = self.current.as_mut() {
                let read = reader
                    .read_until(b'\n', &mut buf)
                    .map_err(|err| io_error(path, err))?;
                if read > 0 {
                    if buf.last() == Some(&b'\n') {
                        buf.pop();
                    }
                    return Ok(Some(String::from_utf8_lossy(&buf).into_owned()));
                }
                log::debug!("finished reading {}", path.display());
            }
            self.current = None;
        }
    }

    fn open(&self, path: &Path) -> StreamResult<Box<dyn BufRead>> {
        let file = File::open(path).map_err(|err| io_error(path, err))?;
        let capacity = self.config.buffer_size.max(1);
        let compression = self.config.compression_for(path);
        log::debug!("opening {} (compression: {:?})", path.display(), compression);
        Ok(match compression {
            None => Box::new(BufReader::with_capacity(capacity, file)),
            Some(CompressionType::Gzip) => {
                Box::new(BufReader::with_capacity(capacity, MultiGzDecoder::new(file)))
            }
            Some(CompressionType::Deflate) => {
                Box::new(BufReader::with_capacity(capacity, DeflateDecoder::new(file)))
            }
            Some(CompressionType::Zlib) => {
                Box::new(BufReader::with_capacity(capacity, ZlibDecoder::new(file)))
            }
        })
    }
}
