/// Implementation of `slv inspect`.
///
/// Decodes the start of a file field by field following a JSON layout
/// manifest and prints one line per field:
///
/// ```text
/// 0x000000  magic    u32    3405691582
/// 0x000004  scale    f32    0.5
/// 0x000008  name     str    "room_01"
/// 0x000010  offsets  u32[4] [16, 32, 48, 64]
/// ---
/// 32 of 4096 bytes decoded
/// ```
///
/// With `--json` the same information is written as one JSON document.
/// With `--trace` every underlying read is echoed to stderr.
use std::fs;

use anyhow::{Context, Result};
use slv_stream::Stream;

use crate::InspectArgs;
use crate::layout::{DecodedField, Layout, Value};
use crate::source::input_len;

/// Bytes of each read shown by `--trace`.
const TRACE_PREVIEW: usize = 16;

/// Run the `slv inspect` command.
///
/// # Errors
///
/// Returns an error if the manifest or input cannot be read, or if any
/// field fails to decode.
pub fn run(args: &InspectArgs) -> Result<()> {
    let manifest = fs::read_to_string(&args.layout)
        .with_context(|| format!("cannot read layout {}", args.layout.display()))?;
    let layout = Layout::from_json(&manifest)
        .with_context(|| format!("in layout {}", args.layout.display()))?;

    let total = input_len(&args.input.file)?;
    let mut holder = None;
    let mut stream = args.input.open(&mut holder)?;

    if args.trace {
        stream.set_observer(Some(Box::new(|pos: u64, bytes: &[u8]| {
            let shown = &bytes[..bytes.len().min(TRACE_PREVIEW)];
            let more = if bytes.len() > TRACE_PREVIEW { "…" } else { "" };
            eprintln!("read @{pos:#08x} +{:<4} {}{more}", bytes.len(), hex::encode(shown));
        })));
    }

    let fields = layout
        .decode(&mut stream, total)
        .with_context(|| format!("failed to decode {}", args.input.file.display()))?;
    let consumed = stream.position();
    stream.close();

    if args.json {
        let doc = serde_json::json!({
            "file": args.input.file.display().to_string(),
            "size": total,
            "consumed": consumed,
            "fields": fields,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let name_width = fields.iter().map(|f| f.name.len()).max().unwrap_or(0);
    for field in &fields {
        println!(
            "{:#08x}  {:<name_width$}  {:<6} {}",
            field.offset,
            field.name,
            type_label(field),
            render_value(&field.value)
        );
    }
    println!("---");
    println!("{consumed} of {total} bytes decoded");

    Ok(())
}

/// Type column, with the element count for arrays (e.g. `u32[4]`).
fn type_label(field: &DecodedField) -> String {
    let len = match &field.value {
        Value::U16s(v) => Some(v.len()),
        Value::S16s(v) => Some(v.len()),
        Value::U32s(v) => Some(v.len()),
        Value::S32s(v) => Some(v.len()),
        Value::F32s(v) => Some(v.len()),
        Value::Bytes(hex) => Some(hex.len() / 2),
        _ => None,
    };
    match len {
        Some(n) => format!("{}[{n}]", field.ty.label()),
        None => field.ty.label().to_string(),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::U16(v) => v.to_string(),
        Value::S16(v) => v.to_string(),
        Value::U32(v) => v.to_string(),
        Value::S32(v) => v.to_string(),
        Value::F32(v) => v.to_string(),
        Value::Str(s) => format!("{s:?}"),
        Value::Bytes(hex) => hex.clone(),
        Value::U16s(v) => format!("{v:?}"),
        Value::S16s(v) => format!("{v:?}"),
        Value::U32s(v) => format!("{v:?}"),
        Value::S32s(v) => format!("{v:?}"),
        Value::F32s(v) => format!("{v:?}"),
    }
}
