/// Opening the input of a command as either stream backend.
///
/// `--memory` reads the whole file up front and decodes from a
/// [`MemoryStream`]; otherwise the file is read incrementally through a
/// [`FileStream`]. Commands only ever see an [`AnyStream`], so the decode
/// path is identical for both.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use slv_stream::{AnyStream, FileStream, MemoryStream, StreamConfig};

use crate::StreamArgs;

impl StreamArgs {
    /// Build the stream configuration from the command-line knobs.
    pub fn config(&self) -> StreamConfig {
        let defaults = StreamConfig::default();
        StreamConfig {
            string_chunk_size: self.chunk_size.unwrap_or(defaults.string_chunk_size),
            file_buffer_capacity: self.buffer_size.unwrap_or(defaults.file_buffer_capacity),
        }
    }

    /// Open the input file. When `--memory` is set the file contents are
    /// parked in `holder`, which must outlive the returned stream.
    pub fn open<'a>(&self, holder: &'a mut Option<Vec<u8>>) -> Result<AnyStream<'a>> {
        open_stream(&self.file, self.memory, self.config(), holder)
    }
}

fn open_stream<'a>(
    path: &Path,
    memory: bool,
    config: StreamConfig,
    holder: &'a mut Option<Vec<u8>>,
) -> Result<AnyStream<'a>> {
    if memory {
        let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
        debug!("loaded {} bytes from {} into memory", bytes.len(), path.display());
        let data: &'a Vec<u8> = holder.insert(bytes);
        Ok(MemoryStream::with_config(data, config).into())
    } else {
        let stream = FileStream::open_with(path, config)?;
        Ok(stream.into())
    }
}

/// Total size of the input, used to tell a clean end from a truncated value.
pub fn input_len(path: &Path) -> Result<u64> {
    let meta = fs::metadata(path).with_context(|| format!("cannot stat {}", path.display()))?;
    Ok(meta.len())
}
