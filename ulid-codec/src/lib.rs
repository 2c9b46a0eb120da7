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

//! Provides support for universally unique lexicographically sortable identifiers that conform to the
//! [ULID spec](https://github.com/ulid/spec).
//!
//! A [ULID](struct.ULID.html) is 128 bits: a 48 bit millisecond UNIX timestamp followed by 80 random bits.
//! It is encoded as 26 Crockford base32 characters, as 16 big-endian bytes, or as a UUID that shares the
//! same bytes. Ordering agrees across all representations.
//!
//! ## Features
//! - ULID generation via [ULID::generate()](struct.ULID.html#method.generate), or via a
//!   [Generator](generator/struct.Generator.html) for strictly monotonic ULIDs
//! - Crockford base32 encoding and strict decoding. Decoding is case insensitive, and `I`, `L`, `O`, `U`
//!   are rejected. Every failure is reported as [DecodingError::InvalidFormat](enum.DecodingError.html)
//! - lossless UUID interop via [ULID::to_uuid()](struct.ULID.html#method.to_uuid) and
//!   [ULID::from_uuid()](struct.ULID.html#method.from_uuid)
//! - ULIDs can be associated with a domain. Example domains are user ids, request ids, application ids, etc.
//!   - [DomainULID](struct.DomainULID.html) scopes a [ULID](struct.ULID.html) to a [Domain](struct.Domain.html)
//!   - [DomainId](struct.DomainId.html) can be used to define constants, which can then be converted into DomainULID
//!   - [TypedULID](struct.TypedULID.html) enforces the domain via the type system
//!   - [op_ulid!](macro.op_ulid.html) defines ULID new types that can be used as constants
//! - ULIDs are lightweight, thread safe, and require no heap allocation
//! - ULIDs are serializable via [serde](https://crates.io/crates/serde)
//!
//! ### Generating ULIDs
//! ```rust
//! # use oysterpack_ulid_codec::*;
//! let id = ULID::generate();
//! let id_str = id.to_string();
//! assert_eq!(id_str.len(), 26);
//! assert_eq!(ULID::from_string(&id_str).unwrap(), id);
//! ```
//!
//! ### UUID interop
//! ```rust
//! # use oysterpack_ulid_codec::*;
//! let id = ULID::generate();
//! let uuid = id.to_uuid();
//! assert_eq!(ULID::from_uuid(uuid), id);
//! assert_eq!(uuid.as_bytes(), &id.to_bytes());
//! ```
//!
//! ### Generating ULID constants
//! ```rust
//! # #[macro_use]
//! # extern crate oysterpack_ulid_codec;
//! op_ulid! {
//!     /// Foo ID
//!     pub FooId
//! }
//!
//! const FOO_ID: FooId = FooId(1866910953065622895350834727020862173);
//! # fn main() {}
//! ```
//!
//! ### Generating DomainULIDs
//! ```rust
//! # use oysterpack_ulid_codec::*;
//! const DOMAIN: Domain = Domain("Foo");
//! let id = DomainULID::generate(DOMAIN);
//! ```
//!
//! ### Generating DomainULID constants via DomainId
//! ```rust
//! # use oysterpack_ulid_codec::*;
//! pub const FOO_EVENT_ID: DomainId = DomainId(Domain("Foo"), 1866921270748045466739527680884502485);
//! let domain_ulid = FOO_EVENT_ID.as_domain_ulid();
//! ```

#![deny(missing_docs, missing_debug_implementations)]
#![doc(html_root_url = "https://docs.rs/oysterpack_ulid_codec/0.1.0")]

/// re-exporting because it is required by op_ulid!
pub use serde;

#[macro_use]
mod macros;

pub mod config;
pub mod generator;
pub mod ulid;

pub use crate::ulid::{
    ulid_str, ulid_str_into_u128, ulid_u128, ulid_u128_into_string, DecodingError,
    InvalidFormatReason, ENCODED_LEN, MAX_TIMESTAMP_MS, RANDOMNESS_BITS, TIMESTAMP_BITS, ULID,
};

pub use crate::ulid::domain::{Domain, DomainId, DomainULID, HasDomain};
pub use crate::ulid::typed::TypedULID;

pub use crate::config::GeneratorConfig;
pub use crate::generator::{Clock, Generator, Mode, SystemClock};
