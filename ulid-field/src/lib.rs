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

//! Storage integration for [ULID](../oysterpack_ulid_codec/struct.ULID.html)s.
//!
//! - [field](field/index.html) maps ULIDs to native UUID columns, or to text columns when the backend has
//!   no UUID column type
//! - [literal](literal/index.html) renders values as source literals, e.g., for generated migrations

#![deny(missing_docs, missing_debug_implementations)]
#![doc(html_root_url = "https://docs.rs/oysterpack_ulid_field/0.1.0")]

pub mod field;
pub mod literal;

pub use crate::field::{
    BackendFeatures, ColumnMapping, ColumnValue, FieldConfig, FieldValue, InvalidValue,
    NativeUuidColumn, StorageMode, TextColumn, UlidField, DESCRIPTION, MAX_LENGTH,
};
pub use crate::literal::{AlreadyInitialized, Literal, LiteralRegistry};
