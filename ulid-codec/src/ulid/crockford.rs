/*
 * Copyright 2019 OysterPack Inc.
 *
 *    Licensed under the Apache License, Version 2.0 (the "License");
 *    you may not use this file except in compliance with the License.
 *    You may obtain a copy of the License at
 *
 *        http://www.apache.org/licenses/LICENSE-2.0
 *
 *    Unless required by applicable law or agreed to in writing, software
 *    distributed under the License is distributed on an "AS IS" BASIS,
 *    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *    See the License for the specific language governing permissions and
 *    limitations under the License.
 */

//! [Crockford base32](https://crockford.com/wrmg/base32.html) codec for 128 bit values.
//!
//! - 26 symbols, 5 bits each, most significant symbol first
//! - 26 * 5 = 130 bits, i.e., the leading symbol only carries 3 bits and may not exceed `7`
//! - the alphabet excludes `I`, `L`, `O` and `U`, which are rejected when decoding
//! - decoding is case insensitive, encoding is always uppercase
//!
//! The alphabet's symbols are in ascending ASCII order, which is why comparing encoded strings
//! yields the same order as comparing the encoded values.

use super::InvalidFormatReason;

/// Crockford base32 alphabet
pub const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Number of symbols used to encode a u128
pub const ENCODED_LEN: usize = 26;

const BITS_PER_SYMBOL: usize = 5;
const SYMBOL_MASK: u128 = 0x1F;
// the leading symbol holds the top 3 bits
const MAX_LEADING_SYMBOL: u8 = 7;
const INVALID: u8 = 0xFF;

static DECODE_TABLE: [u8; 256] = decode_table();

const fn decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        let symbol = ALPHABET[i];
        table[symbol as usize] = i as u8;
        table[symbol.to_ascii_lowercase() as usize] = i as u8;
        i += 1;
    }
    table
}

/// Encodes the value into its 26 symbol canonical form.
pub fn encode(value: u128) -> [u8; ENCODED_LEN] {
    let mut buf = [0u8; ENCODED_LEN];
    for (i, symbol) in buf.iter_mut().rev().enumerate() {
        let index = (value >> (i * BITS_PER_SYMBOL)) & SYMBOL_MASK;
        *symbol = ALPHABET[index as usize];
    }
    buf
}

/// Decodes a 26 symbol string.
///
/// Surrounding or embedded whitespace is not trimmed, it is rejected like any other symbol
/// outside the alphabet.
pub fn decode(encoded: &str) -> Result<u128, InvalidFormatReason> {
    let bytes = encoded.as_bytes();
    if bytes.len() != ENCODED_LEN {
        return Err(InvalidFormatReason::InvalidLength(bytes.len()));
    }

    let mut value: u128 = 0;
    for (index, byte) in bytes.iter().enumerate() {
        let symbol = DECODE_TABLE[*byte as usize];
        if symbol == INVALID {
            return Err(InvalidFormatReason::InvalidChar {
                ch: char_at(encoded, index),
                index,
            });
        }
        if index == 0 && symbol > MAX_LEADING_SYMBOL {
            return Err(InvalidFormatReason::Overflow);
        }
        value = (value << BITS_PER_SYMBOL) | u128::from(symbol);
    }
    Ok(value)
}

// `index` is a byte offset, which may land inside a multi-byte char
fn char_at(s: &str, index: usize) -> char {
    s.char_indices()
        .take_while(|(i, _)| *i <= index)
        .last()
        .map(|(_, c)| c)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}
