//! The compact key token: two length-prefixed unsigned magnitudes,
//! exponent then modulus, wrapped in standard base64.
//!
//! ```text
//! [u32 LE: byte len of exponent][exponent, big-endian]
//! [u32 LE: byte len of modulus ][modulus,  big-endian]
//! ```
//!
//! Lengths are minimal (no leading zero byte, except a lone `0x00` for
//! the value zero). There is no version tag and no checksum; anything
//! that does not parse byte-exactly is a hard error.

use crate::CipherError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use num_bigint::BigUint;

pub fn encode(exponent: &BigUint, modulus: &BigUint) -> String {
    let mut raw = Vec::with_capacity(8 + (exponent.bits() + modulus.bits()) as usize / 8 + 2);
    push_field(&mut raw, exponent);
    push_field(&mut raw, modulus);
    BASE64.encode(raw)
}

pub fn decode(token: &str) -> Result<(BigUint, BigUint), CipherError> {
    let raw = BASE64
        .decode(token)
        .map_err(|e| CipherError::InvalidBase64(e.to_string()))?;

    let mut cursor = 0;
    let exponent = read_field(raw.as_slice(), &mut cursor)?;
    let modulus = read_field(raw.as_slice(), &mut cursor)?;
    if cursor != raw.len() {
        return Err(CipherError::TokenTrailingBytes(raw.len() - cursor));
    }

    Ok((exponent, modulus))
}

fn push_field(raw: &mut Vec<u8>, value: &BigUint) {
    let bytes = value.to_bytes_be();
    raw.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    raw.extend_from_slice(bytes.as_slice());
}

fn read_field(raw: &[u8], cursor: &mut usize) -> Result<BigUint, CipherError> {
    let body_at = *cursor + 4;
    let head = raw
        .get(*cursor..body_at)
        .ok_or(CipherError::TokenTruncated {
            need: 4,
            have: raw.len() - *cursor,
        })?;
    let len = u32::from_le_bytes(head.try_into().expect("slice is 4 bytes")) as usize;

    let end = body_at.checked_add(len).ok_or(CipherError::TokenTruncated {
        need: len,
        have: raw.len() - body_at,
    })?;
    let body = raw.get(body_at..end).ok_or(CipherError::TokenTruncated {
        need: len,
        have: raw.len() - body_at,
    })?;

    *cursor = end;
    Ok(BigUint::from_bytes_be(body))
}
