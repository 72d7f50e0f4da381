//! Base58 GUIDs, generated on the client side.
//!
//! Encoding is the usual base-x big-number conversion over the Bitcoin
//! alphabet. Leading zero bytes are kept as leading `'1'` characters.

use crate::config::{BASE58_ALPHABET, GUID_BYTE_LENGTH};
use crate::core::error::Base58Error;

use super::random::random_bytes;

const BASE: u32 = 58;
const LEADER: char = '1';

/// A fresh random GUID, base58 encoded.
pub fn guid58() -> String {
    let bytes: [u8; GUID_BYTE_LENGTH] = random_bytes();
    encode58(&bytes)
}

/// Encode bytes as base58.
pub fn encode58(source: &[u8]) -> String {
    if source.is_empty() {
        return String::new();
    }

    // Little-endian base58 digits.
    let mut digits: Vec<u32> = vec![0];
    for &byte in source {
        let mut carry = u32::from(byte);
        for digit in digits.iter_mut() {
            carry += *digit << 8;
            *digit = carry % BASE;
            carry /= BASE;
        }
        while carry > 0 {
            digits.push(carry % BASE);
            carry /= BASE;
        }
    }

    // The final byte is always represented by `digits`, even when zero.
    let leading_zeros = source[..source.len() - 1]
        .iter()
        .take_while(|&&byte| byte == 0)
        .count();

    let mut out = String::with_capacity(leading_zeros + digits.len());
    out.extend(std::iter::repeat_n(LEADER, leading_zeros));
    out.extend(
        digits
            .iter()
            .rev()
            .map(|&digit| BASE58_ALPHABET[digit as usize] as char),
    );
    out
}

/// Decode a base58 string produced by [`encode58`].
pub fn decode58(input: &str) -> Result<Vec<u8>, Base58Error> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    // Little-endian bytes.
    let mut bytes: Vec<u32> = vec![0];
    for (position, character) in input.chars().enumerate() {
        let mut carry = alphabet_index(character)
            .ok_or(Base58Error::InvalidCharacter { character, position })?;
        for byte in bytes.iter_mut() {
            carry += *byte * BASE;
            *byte = carry & 0xff;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push(carry & 0xff);
            carry >>= 8;
        }
    }

    let char_count = input.chars().count();
    let leading_zeros = input
        .chars()
        .take(char_count - 1)
        .take_while(|&c| c == LEADER)
        .count();

    let mut out = vec![0u8; leading_zeros];
    out.extend(bytes.iter().rev().map(|&byte| byte as u8));
    Ok(out)
}

fn alphabet_index(character: char) -> Option<u32> {
    BASE58_ALPHABET
        .iter()
        .position(|&c| char::from(c) == character)
        .map(|index| index as u32)
}
