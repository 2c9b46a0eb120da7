// Copyright 2018 OysterPack Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # OysterPack ULID
//!
//! Universally Unique Lexicographically Sortable Identifiers, i.e., 128 bit identifiers whose sort order
//! agrees across the numeric value, the 16 byte big-endian form, the UUID form, and the 26 char
//! Crockford base32 string.
//!
//! The workspace is made up of:
//! - [codec](codec/index.html) : ULID generation, encoding and decoding, UUID interop, typed and domain scoped ULIDs
//! - [field](field/index.html) : storage column mapping and source literals
//!
//! ```rust
//! use oysterpack_ulid::{codec::ULID, field::{BackendFeatures, ColumnValue, UlidField}};
//!
//! let field = UlidField::for_backend(&BackendFeatures { has_native_uuid_field: true });
//! let id = ULID::generate();
//! let column = field.prep_value(Some(id.into())).unwrap();
//! assert_eq!(column, Some(ColumnValue::Uuid(id.to_uuid())));
//! ```

#![deny(missing_docs, missing_debug_implementations)]
#![doc(html_root_url = "https://docs.rs/oysterpack_ulid/0.1.0")]

pub use oysterpack_ulid_codec as codec;
pub use oysterpack_ulid_field as field;

pub use oysterpack_ulid_codec::{DecodingError, Generator, ULID};
