//! Compact length prefixes ("short vec") used throughout the wire format.
//!
//! A length is written as little-endian groups of 7 bits. The high bit of
//! each byte is set when another group follows:
//!
//! ```text
//! 0x0000..=0x007f  -> 1 byte
//! 0x0080..=0x3fff  -> 2 bytes
//! 0x4000..=0xffff  -> 3 bytes
//! ```
//!
//! Lengths on the wire never exceed `u16::MAX`, so decoding stops after
//! three groups instead of reading an unbounded continuation chain.

use crate::error::SolanaError;

/// Maximum number of 7-bit groups a length prefix may occupy.
pub const MAX_ENCODING_LENGTH: usize = 3;

/// Encode a length as a compact prefix.
///
/// `len` must not exceed `u16::MAX`; larger values need more than
/// [`MAX_ENCODING_LENGTH`] groups and [`decode_length`] rejects them.
pub fn encode_length(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_ENCODING_LENGTH);
    append_length(&mut out, len);
    out
}

/// Append the compact prefix for `len` to `buf`.
///
/// Same `u16::MAX` limit as [`encode_length`]. Every length the crate
/// writes is bounded by it: instruction data by `Instruction::compile`,
/// account and signature counts by the 256-account limit.
pub fn append_length(buf: &mut Vec<u8>, len: usize) {
    debug_assert!(
        len <= usize::from(u16::MAX),
        "length {len} does not fit a compact-u16 prefix"
    );
    let mut remaining = len;
    loop {
        let mut byte = (remaining & 0x7f) as u8;
        remaining >>= 7;
        if remaining == 0 {
            buf.push(byte);
            return;
        }
        byte |= 0x80;
        buf.push(byte);
    }
}

/// Decode a compact prefix, returning the value and the bytes that follow it.
pub fn decode_length(data: &[u8]) -> Result<(u16, &[u8]), SolanaError> {
    if data.is_empty() {
        return Err(SolanaError::MalformedData(
            "unexpected end of data while decoding length prefix".into(),
        ));
    }

    let mut value: u32 = 0;
    for (i, byte) in data.iter().take(MAX_ENCODING_LENGTH).enumerate() {
        value |= u32::from(byte & 0x7f) << (i * 7);

        if byte & 0x80 == 0 {
            let value = u16::try_from(value).map_err(|_| {
                SolanaError::MalformedData(format!("length prefix {value} overflows u16"))
            })?;
            return Ok((value, &data[i + 1..]));
        }
    }

    if data.len() < MAX_ENCODING_LENGTH {
        Err(SolanaError::MalformedData(
            "unexpected end of data while decoding length prefix".into(),
        ))
    } else {
        Err(SolanaError::MalformedData(format!(
            "length prefix not terminated within {MAX_ENCODING_LENGTH} bytes"
        )))
    }
}

/// Prefix `items` with their count and concatenate them.
pub fn encode_items<T: AsRef<[u8]>>(items: &[T]) -> Vec<u8> {
    let mut out = encode_length(items.len());
    for item in items {
        out.extend_from_slice(item.as_ref());
    }
    out
}
