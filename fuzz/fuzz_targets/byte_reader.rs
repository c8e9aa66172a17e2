#![no_main]

use cursor::{ByteReader, TextEncoding, TextFormat};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 9;
        idx += 1;

        match op {
            0 => {
                let _ = reader.read_u8();
            }
            1 => {
                let _ = reader.read_u16();
            }
            2 => {
                let _ = reader.read_i32();
            }
            3 => {
                let _ = reader.read_f64();
            }
            4 => {
                let len = usize::from(data[idx.saturating_sub(1)] % 32);
                let _ = reader.skip(len);
            }
            5 => {
                let _ = reader.read_length_prefixed_utf16();
            }
            6 => {
                let _ = reader.read_utf16_until_nul(64);
            }
            7 => {
                let _ = reader.read_string(TextFormat::UTF8_PREFIXED);
            }
            _ => {
                let _ = reader.read_string(TextFormat::new(TextEncoding::Ascii, true));
            }
        }
    }
});
