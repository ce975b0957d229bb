//! Fixture helpers shared by the integration tests and benches.
//!
//! Every scenario is run against both backends, so most helpers come in
//! pairs: build the bytes, then hand them out as a memory view or as a
//! scratch file on disk.

use std::fs;
use std::path::PathBuf;

use slv_stream::{FileStream, MemoryStream, StreamConfig};
use tempdir::TempDir;

/// Which stream backend a scenario runs against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    File,
    Memory,
}

/// Bytes on disk plus the scratch directory keeping them alive.
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl Fixture {
    /// Write `bytes` to a fresh scratch file.
    ///
    /// # Panics
    ///
    /// Panics if the scratch directory or file cannot be created.
    #[must_use]
    pub fn new(bytes: &[u8]) -> Self {
        let dir = TempDir::new("slv-fixture")
            .unwrap_or_else(|e| panic!("failed to create scratch dir: {e}"));
        let path = dir.path().join("fixture.bin");
        fs::write(&path, bytes)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
        Self {
            _dir: dir,
            path,
            bytes: bytes.to_vec(),
        }
    }

    /// Open the fixture with the given backend and default configuration.
    #[must_use]
    pub fn open(&self, backend: Backend) -> slv_stream::AnyStream<'_> {
        self.open_with(backend, StreamConfig::default())
    }

    /// Open the fixture with the given backend and configuration.
    ///
    /// # Panics
    ///
    /// Panics if the scratch file cannot be opened.
    #[must_use]
    pub fn open_with(&self, backend: Backend, config: StreamConfig) -> slv_stream::AnyStream<'_> {
        match backend {
            Backend::File => FileStream::open_with(&self.path, config)
                .unwrap_or_else(|e| panic!("failed to open fixture: {e}"))
                .into(),
            Backend::Memory => MemoryStream::with_config(&self.bytes, config).into(),
        }
    }
}

/// Concatenate little-endian encodings of `values`.
#[must_use]
pub fn le_u32s(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Concatenate little-endian encodings of `values`.
#[must_use]
pub fn le_f32s(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// `len` non-zero filler bytes followed by a terminator.
#[must_use]
pub fn c_string_of_len(len: usize) -> Vec<u8> {
    let mut bytes: Vec<u8> = (0..len).map(|i| b'a' + (i % 26) as u8).collect();
    bytes.push(0);
    bytes
}
