/// Implementation of `slv strings`.
///
/// Decodes the input as a back-to-back sequence of nul-terminated strings
/// and prints each with its starting offset:
///
/// ```text
/// 0x000000  "textures/wall.tga"
/// 0x000012  ""
/// 0x000013  "sounds/door.wav"
/// ```
///
/// A final string that runs into the end of the file without a terminator
/// is reported as an error.
use anyhow::{Context, Result};
use slv_stream::{Stream, read_str};

use crate::StringsArgs;
use crate::source::input_len;

/// Run the `slv strings` command.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or ends inside a string.
pub fn run(args: &StringsArgs) -> Result<()> {
    let total = input_len(&args.input.file)?;
    let mut holder = None;
    let mut stream = args.input.open(&mut holder)?;

    let mut count = 0usize;
    while stream.position() < total {
        let offset = stream.position();
        let s = read_str(&mut stream).with_context(|| {
            format!("unterminated string at offset {offset:#x} in {}", args.input.file.display())
        })?;
        println!("{offset:#08x}  {:?}", s.to_string_lossy());
        count += 1;
    }
    stream.close();

    log::debug!("{count} strings in {total} bytes");
    Ok(())
}
