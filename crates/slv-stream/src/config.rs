/// Growth step of the string decoder when no configuration is given.
pub const DEFAULT_STRING_CHUNK: usize = 32;

/// Capacity of the file backend's read buffer when no configuration is given.
pub const DEFAULT_FILE_BUFFER: usize = 8 * 1024;

/// Tuning knobs shared by both stream backends.
///
/// ```text
/// ┌──────────────────────┬──────────────────────────────────────────────┐
/// │ Field                │ Purpose                                      │
/// ├──────────────────────┼──────────────────────────────────────────────┤
/// │ string_chunk_size    │ Bytes added each time a string buffer grows  │
/// │ file_buffer_capacity │ Size of the BufReader behind a FileStream    │
/// └──────────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// Neither field changes what gets decoded, only how memory is used while
/// decoding it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamConfig {
    /// Growth step of [`read_str`](crate::read_str). A value of zero is
    /// treated as one.
    pub string_chunk_size: usize,

    /// Capacity of the buffered reader wrapping an opened file. Ignored by
    /// memory streams.
    pub file_buffer_capacity: usize,
}

impl StreamConfig {
    /// The effective string growth step (never zero).
    #[must_use]
    pub fn string_chunk(&self) -> usize {
        self.string_chunk_size.max(1)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            string_chunk_size: DEFAULT_STRING_CHUNK,
            file_buffer_capacity: DEFAULT_FILE_BUFFER,
        }
    }
}
