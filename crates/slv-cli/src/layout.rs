/// Layout manifests: a JSON description of the fields at the start of a
/// binary file, decoded in order through any [`Stream`].
///
/// ```json
/// {
///   "fields": [
///     { "name": "magic",   "type": "u32" },
///     { "name": "scale",   "type": "f32" },
///     { "name": "name",    "type": "str" },
///     { "name": "offsets", "type": "u32", "count": 4 },
///     { "name": "pad",     "type": "bytes", "count": 2 }
///   ]
/// }
/// ```
///
/// `count` turns a scalar field into a fixed-length array. It is required
/// for `bytes` and rejected for `str`.
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use slv_stream::{
    Stream, read_f32, read_f32_arr, read_s16, read_s32, read_s32_arr, read_str, read_u16,
    read_u32, read_u32_arr,
};

#[derive(Debug, Deserialize)]
pub struct Layout {
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    U16,
    S16,
    U32,
    S32,
    F32,
    Str,
    Bytes,
}

impl FieldType {
    pub fn label(self) -> &'static str {
        match self {
            Self::U16 => "u16",
            Self::S16 => "s16",
            Self::U32 => "u32",
            Self::S32 => "s32",
            Self::F32 => "f32",
            Self::Str => "str",
            Self::Bytes => "bytes",
        }
    }

    /// Encoded size of one element. Strings have no fixed width.
    pub fn width(self) -> u64 {
        match self {
            Self::U16 | Self::S16 => 2,
            Self::U32 | Self::S32 | Self::F32 => 4,
            Self::Bytes => 1,
            Self::Str => 0,
        }
    }
}

/// A decoded field value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    U16(u16),
    S16(i16),
    U32(u32),
    S32(i32),
    F32(f32),
    Str(String),
    /// Raw bytes, rendered as lowercase hex.
    Bytes(String),
    U16s(Vec<u16>),
    S16s(Vec<i16>),
    U32s(Vec<u32>),
    S32s(Vec<i32>),
    F32s(Vec<f32>),
}

/// One field of a decoded layout.
#[derive(Debug, Serialize)]
pub struct DecodedField {
    pub offset: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    pub value: Value,
}

impl Layout {
    /// Parse a manifest and check every field's `count` against its type.
    pub fn from_json(text: &str) -> Result<Self> {
        let layout: Self = serde_json::from_str(text).context("invalid layout manifest")?;
        for field in &layout.fields {
            match (field.ty, field.count) {
                (FieldType::Bytes, None) => bail!("field {:?}: bytes needs a count", field.name),
                (FieldType::Str, Some(_)) => {
                    bail!("field {:?}: str fields cannot have a count", field.name)
                }
                _ => {}
            }
        }
        Ok(layout)
    }

    /// Decode every field in order, stopping at the first failure.
    ///
    /// `input_len` is the size of the whole input; array fields whose
    /// `count` cannot fit in what is left are rejected before anything is
    /// allocated for them.
    pub fn decode<S: Stream + ?Sized>(
        &self,
        stream: &mut S,
        input_len: u64,
    ) -> Result<Vec<DecodedField>> {
        let mut decoded = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let offset = stream.position();
            let value = ensure_fits(field, offset, input_len)
                .and_then(|()| decode_field(stream, field))
                .with_context(|| {
                    format!(
                        "cannot decode field {:?} ({}) at offset {offset}",
                        field.name,
                        field.ty.label()
                    )
                })?;
            decoded.push(DecodedField {
                offset,
                name: field.name.clone(),
                ty: field.ty,
                value,
            });
        }
        Ok(decoded)
    }
}

fn ensure_fits(field: &FieldSpec, offset: u64, input_len: u64) -> Result<()> {
    let Some(count) = field.count else {
        return Ok(());
    };
    let left = input_len.saturating_sub(offset);
    let needed = u64::try_from(count)
        .ok()
        .and_then(|n| n.checked_mul(field.ty.width()));
    match needed {
        Some(n) if n <= left => Ok(()),
        _ => bail!("count {count} does not fit in the {left} bytes left"),
    }
}

fn decode_field<S: Stream + ?Sized>(stream: &mut S, field: &FieldSpec) -> Result<Value> {
    let value = match (field.ty, field.count) {
        (FieldType::U16, None) => Value::U16(read_u16(stream)?),
        (FieldType::S16, None) => Value::S16(read_s16(stream)?),
        (FieldType::U32, None) => Value::U32(read_u32(stream)?),
        (FieldType::S32, None) => Value::S32(read_s32(stream)?),
        (FieldType::F32, None) => Value::F32(read_f32(stream)?),
        (FieldType::Str, _) => Value::Str(read_str(stream)?.to_string_lossy().into_owned()),
        (FieldType::Bytes, count) => {
            let mut buf = vec![0u8; count.unwrap_or(0)];
            stream.read_buf(&mut buf)?;
            Value::Bytes(hex::encode(buf))
        }
        (FieldType::U16, Some(n)) => {
            Value::U16s((0..n).map(|_| read_u16(stream)).collect::<Result<_, _>>()?)
        }
        (FieldType::S16, Some(n)) => {
            Value::S16s((0..n).map(|_| read_s16(stream)).collect::<Result<_, _>>()?)
        }
        (FieldType::U32, Some(n)) => {
            let mut out = vec![0u32; n];
            read_u32_arr(stream, &mut out)?;
            Value::U32s(out)
        }
        (FieldType::S32, Some(n)) => {
            let mut out = vec![0i32; n];
            read_s32_arr(stream, &mut out)?;
            Value::S32s(out)
        }
        (FieldType::F32, Some(n)) => {
            let mut out = vec![0f32; n];
            read_f32_arr(stream, &mut out)?;
            Value::F32s(out)
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use slv_stream::MemoryStream;

    use super::*;

    const MANIFEST: &str = r#"{
        "fields": [
            { "name": "magic", "type": "u32" },
            { "name": "delta", "type": "s16" },
            { "name": "scale", "type": "f32" },
            { "name": "title", "type": "str" },
            { "name": "ids",   "type": "u32", "count": 2 },
            { "name": "pad",   "type": "bytes", "count": 2 }
        ]
    }"#;

    fn sample() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&0xCAFE_u32.to_le_bytes());
        data.extend_from_slice(&(-3i16).to_le_bytes());
        data.extend_from_slice(&0.5f32.to_le_bytes());
        data.extend_from_slice(b"room\0");
        data.extend_from_slice(&[1, 0, 0, 0, 2, 0, 0, 0]);
        data.extend_from_slice(&[0xAB, 0xCD]);
        data
    }

    #[test]
    fn decodes_every_field_with_offsets() {
        let layout = Layout::from_json(MANIFEST).unwrap();
        let data = sample();
        let mut stream = MemoryStream::new(&data);
        let fields = layout.decode(&mut stream, data.len() as u64).unwrap();

        let summary: Vec<(u64, &str, Value)> = fields
            .iter()
            .map(|f| (f.offset, f.name.as_str(), f.value.clone()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, "magic", Value::U32(0xCAFE)),
                (4, "delta", Value::S16(-3)),
                (6, "scale", Value::F32(0.5)),
                (10, "title", Value::Str("room".into())),
                (15, "ids", Value::U32s(vec![1, 2])),
                (23, "pad", Value::Bytes("abcd".into())),
            ]
        );
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn truncated_input_names_the_field() {
        let layout = Layout::from_json(MANIFEST).unwrap();
        let data = sample();
        let mut stream = MemoryStream::new(&data[..20]);
        let err = layout.decode(&mut stream, 20).unwrap_err();
        assert!(err.to_string().contains("\"ids\""), "got: {err}");
    }

    #[test]
    fn oversized_counts_fail_without_allocating() {
        let data = [0u8; 4];
        for manifest in [
            r#"{"fields":[{"name":"x","type":"bytes","count":18446744073709551615}]}"#,
            r#"{"fields":[{"name":"x","type":"u32","count":4611686018427387904}]}"#,
            r#"{"fields":[{"name":"x","type":"s16","count":3}]}"#,
        ] {
            let layout = Layout::from_json(manifest).unwrap();
            let mut stream = MemoryStream::new(&data);
            let err = layout.decode(&mut stream, data.len() as u64).unwrap_err();
            assert!(format!("{err:#}").contains("does not fit"), "got: {err:#}");
            assert_eq!(stream.position(), 0);
        }
    }

    #[test]
    fn count_that_exactly_fits_is_read() {
        let data = [1u8, 0, 2, 0];
        let layout =
            Layout::from_json(r#"{"fields":[{"name":"x","type":"u16","count":2}]}"#).unwrap();
        let mut stream = MemoryStream::new(&data);
        let fields = layout.decode(&mut stream, data.len() as u64).unwrap();
        assert_eq!(fields[0].value, Value::U16s(vec![1, 2]));
    }

    #[test]
    fn bytes_without_count_rejected() {
        let err = Layout::from_json(r#"{"fields":[{"name":"x","type":"bytes"}]}"#).unwrap_err();
        assert!(err.to_string().contains("needs a count"));
    }

    #[test]
    fn unknown_type_rejected() {
        assert!(Layout::from_json(r#"{"fields":[{"name":"x","type":"u64"}]}"#).is_err());
    }

    #[test]
    fn json_output_is_untagged() {
        let field = DecodedField {
            offset: 4,
            name: "n".into(),
            ty: FieldType::S16,
            value: Value::S16s(vec![-1, 2]),
        };
        let json = serde_json::to_string(&field).unwrap();
        assert_eq!(json, r#"{"offset":4,"name":"n","type":"s16","value":[-1,2]}"#);
    }
}
