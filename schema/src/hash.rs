//! Deterministic schema fingerprinting.

use blake3::Hasher;
use cursor::TextEncoding;

use crate::FieldSchema;

/// Computes a deterministic fingerprint identifying a schema revision.
#[must_use]
pub fn schema_fingerprint(schema: &FieldSchema) -> u64 {
    let mut hasher = Hasher::new();
    let text = schema.text();
    write_u8(&mut hasher, encoding_tag(text.encoding));
    write_u8(&mut hasher, u8::from(text.length_prefixed));
    write_len(&mut hasher, schema.len());

    for field in schema.fields() {
        write_len(&mut hasher, field.name.len());
        hasher.update(field.name.as_bytes());
        write_u8(&mut hasher, field.ty.tag());
    }

    let hash = hasher.finalize();
    let mut first = [0u8; 8];
    first.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(first)
}

const fn encoding_tag(encoding: TextEncoding) -> u8 {
    match encoding {
        TextEncoding::Utf8 => 0,
        TextEncoding::Ascii => 1,
        TextEncoding::Utf16Le => 2,
    }
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_len(hasher: &mut Hasher, value: usize) {
    hasher.update(&(value as u64).to_le_bytes());
}
