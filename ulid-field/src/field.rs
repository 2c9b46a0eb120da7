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

//! Maps ULIDs to and from storage columns.
//!
//! The column representation is picked once, when the [UlidField](struct.UlidField.html) is constructed:
//! - [StorageMode::NativeUuid](enum.StorageMode.html) stores the ULID bytes in a native UUID column
//! - [StorageMode::Text](enum.StorageMode.html) stores the 26 char canonical string
//!
//! ```rust
//! # use oysterpack_ulid_field::*;
//! # use oysterpack_ulid_codec::ULID;
//! let field = UlidField::for_backend(&BackendFeatures { has_native_uuid_field: false });
//! let id = ULID::generate();
//! let column = field.prep_value(Some(id.into())).unwrap();
//! assert_eq!(column, Some(ColumnValue::Text(id.to_string())));
//! assert_eq!(field.from_db_value(column).unwrap(), Some(id));
//! ```

use failure::Fail;
use log::debug;
use oysterpack_ulid_codec::{DecodingError, ULID};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Max length of the text representation
pub const MAX_LENGTH: usize = 26;

/// Field description
pub const DESCRIPTION: &str = "Universally Unique Lexicographically Sortable Identifier";

/// hex encoded ULIDs are accepted when reading text columns
const HEX_LENGTH: usize = 32;

/// How ULIDs are stored
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// the ULID bytes are stored as a UUID
    NativeUuid,
    /// the canonical ULID string is stored
    Text,
}

impl StorageMode {
    /// Native UUID storage is used when the backend supports it.
    pub fn for_backend(features: &BackendFeatures) -> StorageMode {
        if features.has_native_uuid_field {
            StorageMode::NativeUuid
        } else {
            StorageMode::Text
        }
    }
}

/// Storage backend capabilities
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct BackendFeatures {
    /// true if the backend has a native UUID column type
    pub has_native_uuid_field: bool,
}

/// Column value as read from, or written to, storage
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ColumnValue {
    /// native UUID column
    Uuid(Uuid),
    /// text column
    Text(String),
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColumnValue::Uuid(uuid) => fmt::Display::fmt(&uuid.to_hyphenated(), f),
            ColumnValue::Text(text) => f.write_str(text),
        }
    }
}

/// Application side values that can be converted into a ULID
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum FieldValue {
    /// already a ULID
    Ulid(ULID),
    /// UUID that shares the ULID bytes
    Uuid(Uuid),
    /// canonical ULID string
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldValue::Ulid(ulid) => fmt::Display::fmt(ulid, f),
            FieldValue::Uuid(uuid) => fmt::Display::fmt(&uuid.to_hyphenated(), f),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<ULID> for FieldValue {
    fn from(ulid: ULID) -> Self {
        FieldValue::Ulid(ulid)
    }
}

impl From<Uuid> for FieldValue {
    fn from(uuid: Uuid) -> Self {
        FieldValue::Uuid(uuid)
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

/// Column mapping strategy
pub trait ColumnMapping: fmt::Debug + Send + Sync {
    /// the storage mode implemented by the mapping
    fn storage_mode(&self) -> StorageMode;

    /// converts the ULID into its column representation
    fn to_column(&self, ulid: ULID) -> ColumnValue;

    /// converts the column value back into a ULID.
    /// Only the column representation that is produced by the mapping is accepted.
    fn from_column(&self, value: ColumnValue) -> Result<ULID, InvalidValue>;
}

/// Stores ULIDs in native UUID columns
#[derive(Debug, Copy, Clone, Default)]
pub struct NativeUuidColumn;

impl ColumnMapping for NativeUuidColumn {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::NativeUuid
    }

    fn to_column(&self, ulid: ULID) -> ColumnValue {
        ColumnValue::Uuid(ulid.to_uuid())
    }

    fn from_column(&self, value: ColumnValue) -> Result<ULID, InvalidValue> {
        match value {
            ColumnValue::Uuid(uuid) => Ok(ULID::from_uuid(uuid)),
            other @ ColumnValue::Text(_) => Err(InvalidValue::unsupported(&other)),
        }
    }
}

/// Stores ULIDs in text columns
#[derive(Debug, Copy, Clone, Default)]
pub struct TextColumn;

impl ColumnMapping for TextColumn {
    fn storage_mode(&self) -> StorageMode {
        StorageMode::Text
    }

    fn to_column(&self, ulid: ULID) -> ColumnValue {
        ColumnValue::Text(ulid.to_string())
    }

    fn from_column(&self, value: ColumnValue) -> Result<ULID, InvalidValue> {
        match value {
            ColumnValue::Text(text) => {
                let ulid = if text.len() == HEX_LENGTH {
                    ULID::from_hex(&text)
                } else {
                    ULID::from_string(&text)
                };
                ulid.map_err(|err| InvalidValue::malformed(text, err))
            }
            other @ ColumnValue::Uuid(_) => Err(InvalidValue::unsupported(&other)),
        }
    }
}

/// ULID field config
///
/// ```rust
/// # use oysterpack_ulid_field::*;
/// let config: FieldConfig = serde_json::from_str(r#"{"storage":"native_uuid"}"#).unwrap();
/// assert_eq!(config.storage, StorageMode::NativeUuid);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FieldConfig {
    /// storage mode
    pub storage: StorageMode,
}

/// Converts ULIDs to and from the column representation that was chosen at construction time.
#[derive(Debug)]
pub struct UlidField {
    mapping: Box<dyn ColumnMapping>,
}

impl UlidField {
    /// constructor
    pub fn new(storage: StorageMode) -> UlidField {
        let mapping: Box<dyn ColumnMapping> = match storage {
            StorageMode::NativeUuid => Box::new(NativeUuidColumn),
            StorageMode::Text => Box::new(TextColumn),
        };
        debug!("UlidField storage mode: {:?}", storage);
        UlidField { mapping }
    }

    /// Picks the storage mode based on the backend features
    pub fn for_backend(features: &BackendFeatures) -> UlidField {
        UlidField::new(StorageMode::for_backend(features))
    }

    /// constructs the field from its config
    pub fn from_config(config: &FieldConfig) -> UlidField {
        UlidField::new(config.storage)
    }

    /// Uses a custom column mapping
    pub fn with_mapping(mapping: Box<dyn ColumnMapping>) -> UlidField {
        UlidField { mapping }
    }

    /// storage mode
    pub fn storage_mode(&self) -> StorageMode {
        self.mapping.storage_mode()
    }

    /// Default value for new records, i.e., a newly generated ULID
    pub fn default_value(&self) -> ULID {
        ULID::generate()
    }

    /// Converts an application value into a ULID. Empty strings are rejected.
    pub fn to_ulid<V: Into<FieldValue>>(&self, value: V) -> Result<ULID, InvalidValue> {
        match value.into() {
            FieldValue::Ulid(ulid) => Ok(ulid),
            FieldValue::Uuid(uuid) => Ok(ULID::from_uuid(uuid)),
            FieldValue::Text(text) => {
                ULID::from_string(&text).map_err(|err| InvalidValue::malformed(text, err))
            }
        }
    }

    /// Prepares the value for storage. None maps to NULL.
    pub fn prep_value(
        &self,
        value: Option<FieldValue>,
    ) -> Result<Option<ColumnValue>, InvalidValue> {
        match value {
            Some(value) => self
                .to_ulid(value)
                .map(|ulid| Some(self.mapping.to_column(ulid))),
            None => Ok(None),
        }
    }

    /// Converts a stored value back into a ULID. NULL maps to None.
    pub fn from_db_value(&self, value: Option<ColumnValue>) -> Result<Option<ULID>, InvalidValue> {
        match value {
            Some(value) => self.mapping.from_column(value).map(Some),
            None => Ok(None),
        }
    }
}

/// The value could not be converted into a ULID.
#[derive(Debug, Clone, Eq, PartialEq, Fail)]
pub enum InvalidValue {
    /// The value failed to decode
    #[fail(display = "'{}' is not a valid ULID.", value)]
    Malformed {
        /// the offending value
        value: String,
        /// decoding failure
        #[cause]
        cause: DecodingError,
    },
    /// The value representation is not supported by the column mapping
    #[fail(display = "'{}' is not a valid ULID.", value)]
    Unsupported {
        /// the offending value
        value: String,
    },
}

impl InvalidValue {
    fn malformed(value: String, cause: DecodingError) -> InvalidValue {
        InvalidValue::Malformed { value, cause }
    }

    fn unsupported(value: &ColumnValue) -> InvalidValue {
        InvalidValue::Unsupported {
            value: value.to_string(),
        }
    }

    /// Returns the offending value
    pub fn value(&self) -> &str {
        match self {
            InvalidValue::Malformed { value, .. } | InvalidValue::Unsupported { value } => value,
        }
    }

    /// Returns the decoding error, if the value failed to decode
    pub fn decoding_error(&self) -> Option<&DecodingError> {
        match self {
            InvalidValue::Malformed { cause, .. } => Some(cause),
            InvalidValue::Unsupported { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use log::info;
    use oysterpack_testing::run_test;
    use oysterpack_ulid_codec::InvalidFormatReason;

    const ULID_STR: &str = "01ARZ3NDEKTSV4RRFFQ69G5FAV";
    const UUID_STR: &str = "01563e3a-b5d3-d676-4c61-efb99302bd5b";

    fn ulid() -> ULID {
        ULID::from_string(ULID_STR).unwrap()
    }

    fn uuid() -> Uuid {
        Uuid::parse_str(UUID_STR).unwrap()
    }

    #[test]
    fn storage_mode_for_backend() {
        let native = BackendFeatures {
            has_native_uuid_field: true,
        };
        assert_eq!(StorageMode::for_backend(&native), StorageMode::NativeUuid);
        assert_eq!(
            StorageMode::for_backend(&BackendFeatures::default()),
            StorageMode::Text
        );
        assert_eq!(
            UlidField::for_backend(&native).storage_mode(),
            StorageMode::NativeUuid
        );
    }

    #[test]
    fn native_uuid_prep_value() {
        run_test("native_uuid_prep_value", || {
            let field = UlidField::new(StorageMode::NativeUuid);
            info!("{:?}", field);
            let expected = Some(ColumnValue::Uuid(uuid()));
            assert_eq!(field.prep_value(Some(ulid().into())).unwrap(), expected);
            assert_eq!(field.prep_value(Some(ULID_STR.into())).unwrap(), expected);
            assert_eq!(field.prep_value(Some(uuid().into())).unwrap(), expected);
            assert_eq!(field.prep_value(None).unwrap(), None);
        });
    }

    #[test]
    fn text_prep_value() {
        let field = UlidField::new(StorageMode::Text);
        let expected = Some(ColumnValue::Text(ULID_STR.to_string()));
        assert_eq!(field.prep_value(Some(ulid().into())).unwrap(), expected);
        assert_eq!(field.prep_value(Some(uuid().into())).unwrap(), expected);
        assert_eq!(
            field
                .prep_value(Some(ULID_STR.to_lowercase().into()))
                .unwrap(),
            expected
        );
        assert_eq!(field.prep_value(None).unwrap(), None);
    }

    #[test]
    fn from_db_value() {
        let field = UlidField::new(StorageMode::NativeUuid);
        assert_eq!(
            field
                .from_db_value(Some(ColumnValue::Uuid(uuid())))
                .unwrap(),
            Some(ulid())
        );
        assert_eq!(field.from_db_value(None).unwrap(), None);

        let field = UlidField::new(StorageMode::Text);
        assert_eq!(
            field
                .from_db_value(Some(ColumnValue::Text(ULID_STR.to_string())))
                .unwrap(),
            Some(ulid())
        );
        assert_eq!(field.from_db_value(None).unwrap(), None);
    }

    #[test]
    fn text_column_accepts_hex_rows() {
        let field = UlidField::new(StorageMode::Text);
        let hex = ulid().to_hex();
        assert_eq!(hex.len(), HEX_LENGTH);
        assert_eq!(
            field.from_db_value(Some(ColumnValue::Text(hex))).unwrap(),
            Some(ulid())
        );
    }

    #[test]
    fn column_mappings_reject_foreign_representations() {
        let field = UlidField::new(StorageMode::NativeUuid);
        let err = field
            .from_db_value(Some(ColumnValue::Text(ULID_STR.to_string())))
            .unwrap_err();
        assert_eq!(err.value(), ULID_STR);
        assert!(err.decoding_error().is_none());

        let field = UlidField::new(StorageMode::Text);
        let err = field
            .from_db_value(Some(ColumnValue::Uuid(uuid())))
            .unwrap_err();
        assert_eq!(err.value(), UUID_STR);
        assert_eq!(err.to_string(), format!("'{}' is not a valid ULID.", UUID_STR));
    }

    #[test]
    fn invalid_values() {
        run_test("invalid_values", || {
            let field = UlidField::new(StorageMode::Text);
            for value in &["", "not-a-ulid", "01ARZ3NDEKTSV4RRFFQ69G5FAU", "8ZZZZZZZZZZZZZZZZZZZZZZZZZ"] {
                let err = field.to_ulid(*value).unwrap_err();
                info!("{}", err);
                assert_eq!(err.value(), *value);
                assert_eq!(err.to_string(), format!("'{}' is not a valid ULID.", value));
                let cause = err.decoding_error().unwrap();
                assert_eq!(cause.input(), *value);
                assert!(err.cause().is_some());
            }

            let err = field.prep_value(Some("".into())).unwrap_err();
            assert_eq!(
                err.decoding_error().map(DecodingError::reason),
                Some(InvalidFormatReason::InvalidLength(0))
            );

            let err = field
                .from_db_value(Some(ColumnValue::Text("01ARZ3NDEKTSV4RRFFQ69G5FA".to_string())))
                .unwrap_err();
            assert_eq!(err.value(), "01ARZ3NDEKTSV4RRFFQ69G5FA");
        });
    }

    #[test]
    fn field_config() {
        let config: FieldConfig = serde_json::from_str(r#"{"storage":"text"}"#).unwrap();
        assert_eq!(config.storage, StorageMode::Text);
        let field = UlidField::from_config(&config);
        assert_eq!(field.storage_mode(), StorageMode::Text);
        assert_eq!(
            serde_json::to_string(&FieldConfig {
                storage: StorageMode::NativeUuid
            })
            .unwrap(),
            r#"{"storage":"native_uuid"}"#
        );
        assert!(serde_json::from_str::<FieldConfig>(r#"{"storage":"blob"}"#).is_err());
    }

    #[test]
    fn custom_mapping() {
        #[derive(Debug)]
        struct LowercaseText;

        impl ColumnMapping for LowercaseText {
            fn storage_mode(&self) -> StorageMode {
                StorageMode::Text
            }

            fn to_column(&self, ulid: ULID) -> ColumnValue {
                ColumnValue::Text(ulid.to_string().to_lowercase())
            }

            fn from_column(&self, value: ColumnValue) -> Result<ULID, InvalidValue> {
                TextColumn.from_column(value)
            }
        }

        let field = UlidField::with_mapping(Box::new(LowercaseText));
        let column = field.prep_value(Some(ulid().into())).unwrap();
        assert_eq!(column, Some(ColumnValue::Text(ULID_STR.to_lowercase())));
        assert_eq!(field.from_db_value(column).unwrap(), Some(ulid()));
    }

    #[test]
    fn default_value() {
        let field = UlidField::new(StorageMode::NativeUuid);
        assert_ne!(field.default_value(), field.default_value());
        assert_eq!(MAX_LENGTH, oysterpack_ulid_codec::ENCODED_LEN);
    }
}
