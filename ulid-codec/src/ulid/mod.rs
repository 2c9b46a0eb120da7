/*
 * Copyright 2018 OysterPack Inc.
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

//! Provides the [ULID](https://github.com/ulid/spec) functionality.

use chrono::{DateTime, Utc};
use failure::Fail;
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{
    fmt,
    str::{self, FromStr},
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use uuid::Uuid;

pub mod crockford;
pub(crate) mod domain;
pub(crate) mod typed;

pub use self::crockford::ENCODED_LEN;

/// Number of bits used by the millisecond timestamp
pub const TIMESTAMP_BITS: u32 = 48;
/// Number of bits used by the random part
pub const RANDOMNESS_BITS: u32 = 80;
/// The largest timestamp that fits into 48 bits, i.e., some time in the year 10889
pub const MAX_TIMESTAMP_MS: u64 = (1 << TIMESTAMP_BITS) - 1;

const RANDOMNESS_MASK: u128 = (1 << RANDOMNESS_BITS) - 1;
const HEX_LEN: usize = 32;

/// Returns a new ULID encoded as a String.
pub fn ulid_str() -> String {
    ULID::generate().to_string()
}

/// Returns a new ULID encoded as u128
pub fn ulid_u128() -> u128 {
    ULID::generate().into()
}

/// Converts a ULID string representation into u128
pub fn ulid_str_into_u128(ulid: &str) -> Result<u128, DecodingError> {
    ulid.parse::<ULID>().map(u128::from)
}

/// Converts a ULID u128 representation into a String
pub fn ulid_u128_into_string(ulid: u128) -> String {
    ULID::from(ulid).to_string()
}

/// Provides the core ULID functionality.
///
/// A ULID is 128 bits: a 48 bit millisecond timestamp followed by 80 bits of randomness. All of
/// its representations sort the same way:
/// - the u128 value
/// - the big-endian bytes, see [to_bytes()](#method.to_bytes)
/// - the canonical 26 character Crockford base32 string
/// - the [Uuid](https://docs.rs/uuid) holding the same bytes
///
/// ```rust
/// # use oysterpack_ulid_codec::*;
/// let id = ULID::generate();
///
/// // Get the ULID creation timestamp
/// let datetime = id.datetime();
///
/// // ULID provides a bunch of useful conversion
/// let id: u128 = ULID::generate().into();
/// let id = ULID::from(id);
/// let (id_1, id_2): (u64, u64) = ULID::generate().into();
///
/// let id3: ULID = "01CVG2MP5HJ45SRJTRRHRQ3RJ0".parse().unwrap();
/// assert_eq!(ULID::from_uuid(id3.to_uuid()), id3);
///
/// // ULIDs are passed by value, i.e., copied
///
/// fn foo(id: ULID) {
///   println!("{}", id);
/// }
///
/// foo(id3);
/// foo(id3);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ULID(u128);

impl ULID {
    /// The all zero ULID
    pub const NIL: ULID = ULID(0);

    /// The largest ULID, encoded as `7ZZZZZZZZZZZZZZZZZZZZZZZZZ`
    pub const MAX: ULID = ULID(u128::MAX);

    /// Constructor which generates a new ULID using the system clock and a thread local random
    /// number generator.
    ///
    /// ULIDs generated within the same millisecond are not ordered amongst each other. Use a
    /// [Generator](../generator/struct.Generator.html) in monotonic mode if that matters.
    pub fn generate() -> ULID {
        ULID::from_parts(system_time_ms(SystemTime::now()), rand::random())
    }

    /// Assembles a ULID from its parts.
    ///
    /// Bits beyond each part's width are discarded, i.e., the timestamp is truncated to 48 bits
    /// and the randomness to 80 bits.
    pub const fn from_parts(timestamp_ms: u64, randomness: u128) -> ULID {
        let timestamp = (timestamp_ms & MAX_TIMESTAMP_MS) as u128;
        ULID((timestamp << RANDOMNESS_BITS) | (randomness & RANDOMNESS_MASK))
    }

    /// Creates a ULID for the specified instant with random bits.
    ///
    /// Returns None if the instant is before the UNIX epoch or beyond what 48 bits of
    /// milliseconds can hold.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Option<ULID> {
        ULID::from_datetime_with_randomness(datetime, rand::random())
    }

    /// Creates a ULID for the specified instant and random part.
    pub fn from_datetime_with_randomness(
        datetime: DateTime<Utc>,
        randomness: u128,
    ) -> Option<ULID> {
        let millis = datetime.timestamp_millis();
        if millis < 0 || millis as u64 > MAX_TIMESTAMP_MS {
            return None;
        }
        Some(ULID::from_parts(millis as u64, randomness))
    }

    /// Parses the canonical string form. Lower case symbols are accepted.
    pub fn from_string(s: &str) -> Result<ULID, DecodingError> {
        crockford::decode(s)
            .map(ULID)
            .map_err(|reason| DecodingError::invalid_format(s, reason))
    }

    /// Returns the timestamp part, i.e., milliseconds since the UNIX epoch.
    pub const fn timestamp_ms(&self) -> u64 {
        (self.0 >> RANDOMNESS_BITS) as u64
    }

    /// Returns the 80 bit random part.
    pub const fn randomness(&self) -> u128 {
        self.0 & RANDOMNESS_MASK
    }

    /// Returns the timestamp of this ULID as a DateTime<Utc>.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from(UNIX_EPOCH + Duration::from_millis(self.timestamp_ms()))
    }

    /// encodes itself as bytes in big-endian order, i.e., network byte order
    pub const fn to_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    /// decodes big-endian bytes - every 16 byte array is a valid ULID
    pub const fn from_bytes(bytes: [u8; 16]) -> ULID {
        ULID(u128::from_be_bytes(bytes))
    }

    /// Reinterprets the ULID bytes as a UUID. No version or variant bits are set, thus the UUID
    /// sorts like the ULID and converts back to the same ULID.
    pub fn to_uuid(&self) -> Uuid {
        Uuid::from_bytes(self.to_bytes())
    }

    /// Reinterprets the UUID bytes as a ULID.
    pub fn from_uuid(uuid: Uuid) -> ULID {
        ULID::from_bytes(*uuid.as_bytes())
    }

    /// Returns the value as 32 lower case hex digits.
    pub fn to_hex(&self) -> String {
        format!("{:032x}", self.0)
    }

    /// Parses 32 hex digits, in either case.
    pub fn from_hex(s: &str) -> Result<ULID, DecodingError> {
        if s.len() != HEX_LEN {
            return Err(DecodingError::invalid_format(
                s,
                InvalidFormatReason::InvalidLength(s.len()),
            ));
        }
        // from_str_radix tolerates a leading '+'
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DecodingError::invalid_format(
                s,
                InvalidFormatReason::InvalidHex,
            ));
        }
        u128::from_str_radix(s, 16)
            .map(ULID)
            .map_err(|_| DecodingError::invalid_format(s, InvalidFormatReason::InvalidHex))
    }

    /// Returns a new ULID with the random part incremented by one.
    /// Overflowing the random part generates a new ULID, i.e., with a new timestamp portion.
    ///
    /// ## Use Cases
    /// 1. In case of collision, use increment as a cheap method to generate a new ULID
    /// 2. An alternative cheaper (faster) way to generate ULID(s), with the following trade offs:
    ///    - ULID(s) will be sequential until they overflow
    ///    - higher probability of collision when multiple ULIDs have the same exact timestamp
    ///      component are used to produce new ULID(s) via incrementing a base ULID.
    pub fn increment(self) -> ULID {
        self.checked_increment().unwrap_or_else(Self::generate)
    }

    /// Returns a new ULID with the same timestamp and the random part incremented by one.
    /// Returns None if the random part would overflow.
    pub fn checked_increment(self) -> Option<ULID> {
        if self.randomness() == RANDOMNESS_MASK {
            None
        } else {
            Some(ULID(self.0 + 1))
        }
    }
}

fn system_time_ms(now: SystemTime) -> u64 {
    match now.duration_since(UNIX_EPOCH) {
        Ok(duration) if duration.as_millis() > u128::from(MAX_TIMESTAMP_MS) => MAX_TIMESTAMP_MS,
        Ok(duration) => duration.as_millis() as u64,
        Err(_) => 0,
    }
}

impl fmt::Display for ULID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let encoded = crockford::encode(self.0);
        // the alphabet is ASCII
        match str::from_utf8(&encoded) {
            Ok(s) => f.write_str(s),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl fmt::Debug for ULID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ULID({})", self)
    }
}

impl FromStr for ULID {
    type Err = DecodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ULID::from_string(s)
    }
}

impl From<u128> for ULID {
    fn from(id: u128) -> Self {
        ULID(id)
    }
}

impl From<(u64, u64)> for ULID {
    fn from((high, low): (u64, u64)) -> Self {
        ULID(u128::from(high) << 64 | u128::from(low))
    }
}

impl From<[u8; 16]> for ULID {
    fn from(bytes: [u8; 16]) -> Self {
        ULID::from_bytes(bytes)
    }
}

impl From<Uuid> for ULID {
    fn from(uuid: Uuid) -> Self {
        ULID::from_uuid(uuid)
    }
}

impl From<ULID> for u128 {
    fn from(ulid: ULID) -> Self {
        ulid.0
    }
}

impl From<ULID> for (u64, u64) {
    fn from(ulid: ULID) -> Self {
        ((ulid.0 >> 64) as u64, ulid.0 as u64)
    }
}

impl From<ULID> for [u8; 16] {
    fn from(ulid: ULID) -> Self {
        ulid.to_bytes()
    }
}

impl From<ULID> for Uuid {
    fn from(ulid: ULID) -> Self {
        ulid.to_uuid()
    }
}

impl Serialize for ULID {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(self.to_string().as_str())
        } else {
            serializer.serialize_u128(self.0)
        }
    }
}

struct ULIDVisitor;

impl<'de> Visitor<'de> for ULIDVisitor {
    type Value = ULID;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a ULID string or u128")
    }

    #[inline]
    fn visit_u8<E>(self, value: u8) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ULID(u128::from(value)))
    }

    #[inline]
    fn visit_u32<E>(self, value: u32) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ULID(u128::from(value)))
    }

    #[inline]
    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ULID(u128::from(value)))
    }

    #[inline]
    fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(ULID(value))
    }

    #[inline]
    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        value
            .parse()
            .map_err(|_| de::Error::invalid_value(de::Unexpected::Str(value), &"a ULID"))
    }
}

impl<'de> Deserialize<'de> for ULID {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(ULIDVisitor)
        } else {
            deserializer.deserialize_u128(ULIDVisitor)
        }
    }
}

/// The error returned when decoding a ULID from its text form fails.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum DecodingError {
    /// The input is not a ULID. The offending input is kept for diagnostics.
    #[fail(display = "invalid ULID format: '{}' : {}", input, reason)]
    InvalidFormat {
        /// the rejected input
        input: String,
        /// why the input was rejected
        reason: InvalidFormatReason,
    },
}

impl DecodingError {
    fn invalid_format(input: &str, reason: InvalidFormatReason) -> DecodingError {
        DecodingError::InvalidFormat {
            input: input.to_string(),
            reason,
        }
    }

    /// Returns the rejected input
    pub fn input(&self) -> &str {
        match self {
            DecodingError::InvalidFormat { input, .. } => input,
        }
    }

    /// Returns why the input was rejected
    pub fn reason(&self) -> InvalidFormatReason {
        match self {
            DecodingError::InvalidFormat { reason, .. } => *reason,
        }
    }
}

/// Details why an input is not a valid ULID.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvalidFormatReason {
    /// The length in bytes does not conform to requirements.
    InvalidLength(usize),
    /// The input contains a character that is not allowed in a [crockford Base32](https://crockford.com/wrmg/base32.html) string.
    InvalidChar {
        /// the offending char
        ch: char,
        /// byte offset of the offending char
        index: usize,
    },
    /// The leading symbol would overflow 128 bits, i.e., the input is greater than `7ZZZZZZZZZZZZZZZZZZZZZZZZZ`
    Overflow,
    /// The input is not hex encoded.
    InvalidHex,
}

impl fmt::Display for InvalidFormatReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidFormatReason::InvalidLength(len) => write!(f, "invalid length: {}", len),
            InvalidFormatReason::InvalidChar { ch, index } => {
                write!(f, "invalid char '{}' at {}", ch.escape_debug(), index)
            }
            InvalidFormatReason::Overflow => f.write_str("overflow"),
            InvalidFormatReason::InvalidHex => f.write_str("invalid hex"),
        }
    }
}
