use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};

use crate::config::StreamConfig;
use crate::error::{Result, StreamError};
use crate::stream::{Observer, Stream, StreamState};

/// Stream over a file opened for binary reading.
///
/// The stream owns the file handle exclusively; dropping it (or calling
/// [`close`](Self::close)) closes the handle. Reads go through a
/// [`BufReader`] sized by [`StreamConfig::file_buffer_capacity`].
///
/// Reads land in an internal scratch buffer first, so a failed read leaves
/// the caller's buffer untouched.
#[derive(Debug)]
pub struct FileStream {
    reader: BufReader<File>,
    path: PathBuf,
    scratch: Vec<u8>,
    state: StreamState,
}

impl FileStream {
    /// Open `path` for reading with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Open`] if the file cannot be opened. No stream
    /// is returned in that case.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, StreamConfig::default())
    }

    /// Open `path` for reading with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Open`] if the file cannot be opened.
    pub fn open_with(path: impl AsRef<Path>, config: StreamConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StreamError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("opened file stream {}", path.display());

        Ok(Self {
            reader: BufReader::with_capacity(config.file_buffer_capacity, file),
            path: path.to_path_buf(),
            scratch: Vec::new(),
            state: StreamState::new(config),
        })
    }

    /// Path this stream was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close the file. A failure to close is not reported.
    pub fn close(self) {
        debug!("closing file stream {}", self.path.display());
        drop(self);
    }

    /// Put the file offset back where the stream position says it is.
    ///
    /// `read_exact` may have consumed part of the request before failing.
    fn rewind_to_position(&mut self) {
        if let Err(e) = self.reader.seek(SeekFrom::Start(self.state.position)) {
            warn!(
                "{}: cannot restore offset {} after failed read: {e}",
                self.path.display(),
                self.state.position
            );
        }
    }
}

impl Stream for FileStream {
    fn read_buf(&mut self, buf: &mut [u8]) -> Result<()> {
        self.scratch.clear();
        self.scratch.resize(buf.len(), 0);
        if let Err(source) = self.reader.read_exact(&mut self.scratch) {
            debug!(
                "{}: read of {} bytes at offset {} failed: {source}",
                self.path.display(),
                buf.len(),
                self.state.position
            );
            self.rewind_to_position();
            return Err(StreamError::Io {
                offset: self.state.position,
                requested: buf.len(),
                source,
            });
        }

        buf.copy_from_slice(&self.scratch);
        trace!(
            "{}: read {} bytes at offset {}",
            self.path.display(),
            buf.len(),
            self.state.position
        );
        self.state.delivered(buf);
        Ok(())
    }

    fn position(&self) -> u64 {
        self.state.position
    }

    fn set_observer(&mut self, observer: Option<Observer>) {
        self.state.set_observer(observer);
    }

    fn config(&self) -> &StreamConfig {
        &self.state.config
    }
}
