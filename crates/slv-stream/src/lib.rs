//! # slv-stream
//!
//! Binary input streams and the little-endian primitive decoders format
//! parsers are built from.
//!
//! Two interchangeable backends implement [`Stream`]: [`FileStream`] over a
//! file on disk and [`MemoryStream`] over a byte slice the caller already
//! holds. The decoders are generic over the trait, so a parser written
//! against one backend works unchanged against the other.
//!
//! ```text
//!   caller ──► read_u32 / read_f32 / read_str / read_u32_arr ...
//!                  │
//!                  ▼
//!            Stream::read_buf(n)       (all-or-nothing)
//!              ├── FileStream          BufReader<File>
//!              └── MemoryStream<'a>    &'a [u8], bounds-checked
//! ```
//!
//! ```
//! use slv_stream::{MemoryStream, read_f32, read_str, read_u16};
//!
//! let data = b"\x02\x00\x00\x00\x80\x3Fhi\0";
//! let mut stream = MemoryStream::new(data);
//! assert_eq!(read_u16(&mut stream)?, 2);
//! assert_eq!(read_f32(&mut stream)?, 1.0);
//! assert_eq!(read_str(&mut stream)?.as_bytes(), b"hi");
//! # Ok::<(), slv_stream::StreamError>(())
//! ```
#![warn(clippy::pedantic)]

pub mod array;
pub mod config;
pub mod error;
pub mod file;
pub mod float;
pub mod int;
pub mod memory;
pub mod stream;
pub mod string;

pub use array::{read_f32_arr, read_s32_arr, read_u32_arr};
pub use config::StreamConfig;
pub use error::{ErrorKind, Result, StreamError};
pub use file::FileStream;
pub use float::{decode_f32, read_f32};
pub use int::{decode_u16, decode_u32, read_s16, read_s32, read_u16, read_u32, u16_to_s16, u32_to_s32};
pub use memory::MemoryStream;
pub use stream::{AnyStream, Observer, Stream};
pub use string::read_str;
