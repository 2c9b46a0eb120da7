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

//! macros

/// Used to define ULID constants in a type safe manner.
///
/// The new type implements : Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Display, FromStr,
/// Serialize, Deserialize
///
/// The new type serializes the same way as [ULID](ulid/struct.ULID.html), i.e., as the canonical string for
/// human readable formats and as a u128 otherwise.
///
/// ```rust
///  #[macro_use]
///  extern crate oysterpack_ulid_codec;
///
///  use oysterpack_ulid_codec::ULID;
///
///  op_ulid! {
///     /// Foo ID
///     pub FooId
/// }
///
///  pub const FOO_ID: FooId = FooId(1866910953065622895350834727020862173);
///
///  fn main() {
///     let ulid: ULID = FOO_ID.into();
///     let ulid_str = FOO_ID.to_string();
///     assert_eq!(ulid, ulid_str.parse::<ULID>().unwrap());
///     assert_eq!(ulid, FOO_ID.ulid());
///     assert_eq!(FOO_ID, ulid_str.parse::<FooId>().unwrap());
///  }
/// ```
///
#[macro_export]
macro_rules! op_ulid {
    (
    $(#[$outer:meta])*
    $struct_vis:vis $Name:ident
    ) => {
        $(#[$outer])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        $struct_vis struct $Name(pub u128);

        impl $Name {
            /// generates a new ID
            pub fn generate() -> $Name {
                $crate::ULID::generate().into()
            }

            /// returns the ID as a ULID
            pub fn ulid(&self) -> $crate::ULID {
                self.0.into()
            }
        }

        impl From<$Name> for $crate::ULID {
            fn from(id: $Name) -> $crate::ULID {
                id.0.into()
            }
        }

        impl From<$crate::ULID> for $Name {
            fn from(ulid: $crate::ULID) -> $Name {
                $Name(ulid.into())
            }
        }

        impl From<$crate::DomainULID> for $Name {
            fn from(ulid: $crate::DomainULID) -> $Name {
                $Name(ulid.ulid().into())
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.ulid(), f)
            }
        }

        impl std::str::FromStr for $Name {
            type Err = $crate::DecodingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::ULID::from_string(s).map($Name::from)
            }
        }

        impl $crate::serde::Serialize for $Name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::serde::Serializer,
            {
                $crate::serde::Serialize::serialize(&self.ulid(), serializer)
            }
        }

        impl<'de> $crate::serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::serde::Deserializer<'de>,
            {
                <$crate::ULID as $crate::serde::Deserialize<'de>>::deserialize(deserializer)
                    .map($Name::from)
            }
        }
    };
}
