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

//! Provides support for compiler enforced typed ULID(s)

use super::{DecodingError, ULID};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};
use uuid::Uuid;

/// A TypedULID represents a domain specific ULID, where the domain is defined and enforced by the
/// type system.
///
/// ## How to define a TypedULID for structs
/// ```rust
/// # use oysterpack_ulid_codec::TypedULID;
/// struct Foo;
/// type FooId = TypedULID<Foo>;
/// let id = FooId::generate();
/// ```
/// ## How to define TypedULID for traits
/// ```rust
/// # use oysterpack_ulid_codec::TypedULID;
/// trait Foo{}
/// // traits are not Send. Send is added to the type def in order to satisfy TypedULID type constraints
/// // in order to be able to send the TypedULID across threads
/// type FooId = TypedULID<dyn Foo + Send + Sync>;
/// let id = FooId::generate();
/// ```
///
/// TypedULID&lt;T&gt; can be converted to a [DomainULID](struct.DomainULID.html) automatically if the
/// TypedULID type T implements [HasDomain](trait.HasDomain.html).
///
/// ```rust
/// # use oysterpack_ulid_codec::*;
/// struct Foo;
///
/// impl HasDomain for Foo {
///     const DOMAIN: Domain = Domain("Foo");
/// }
///
/// type FooId = TypedULID<Foo>;
/// let id = FooId::generate();
/// let id: DomainULID = id.into();
/// assert_eq!(id.domain(), Foo::DOMAIN.name());
///
/// ```
pub struct TypedULID<T: 'static + ?Sized> {
    id: ULID,
    _type: PhantomData<T>,
}

impl<T: 'static + ?Sized> TypedULID<T> {
    /// TypedULID(s) created within the same millisecond are not ordered, i.e., their random parts
    /// decide.
    pub fn generate() -> TypedULID<T> {
        ULID::generate().into()
    }

    /// Creates the next strictly monotonic ULID for the given previous ULID.
    /// Returns None if the random part of the next ULID would overflow.
    pub fn next(previous: TypedULID<T>) -> Option<TypedULID<T>> {
        previous.id.checked_increment().map(TypedULID::from)
    }

    /// returns the ulid
    pub fn ulid(&self) -> ULID {
        self.id
    }

    /// Returns a new ULID with the random part incremented by one.
    /// Overflowing the random part generates a new TypedULID, i.e., with a new timestamp portion.
    pub fn increment(self) -> TypedULID<T> {
        self.id.increment().into()
    }

    /// Reinterprets the ULID bytes as a UUID
    pub fn to_uuid(&self) -> Uuid {
        self.id.to_uuid()
    }
}

impl<T: 'static + ?Sized> Serialize for TypedULID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.id.serialize(serializer)
    }
}

impl<'de, T: 'static + ?Sized> Deserialize<'de> for TypedULID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        ULID::deserialize(deserializer).map(TypedULID::from)
    }
}

impl<T: 'static + ?Sized> fmt::Display for TypedULID<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        fmt::Display::fmt(&self.id, f)
    }
}

impl<T: 'static + ?Sized> PartialEq for TypedULID<T> {
    fn eq(&self, other: &TypedULID<T>) -> bool {
        self.id == other.id
    }
}

impl<T: 'static + ?Sized> PartialOrd for TypedULID<T> {
    fn partial_cmp(&self, other: &TypedULID<T>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: 'static + ?Sized> Eq for TypedULID<T> {}

impl<T: 'static + ?Sized> Ord for TypedULID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<T: 'static + ?Sized> Hash for TypedULID<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: 'static + ?Sized> Copy for TypedULID<T> {}

impl<T: 'static + ?Sized> Clone for TypedULID<T> {
    fn clone(&self) -> TypedULID<T> {
        *self
    }
}

impl<T: 'static + ?Sized> fmt::Debug for TypedULID<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.id)
    }
}

impl<T: 'static + ?Sized> From<[u8; 16]> for TypedULID<T> {
    fn from(bytes: [u8; 16]) -> Self {
        ULID::from(bytes).into()
    }
}

impl<T: 'static + ?Sized> From<u128> for TypedULID<T> {
    fn from(id: u128) -> Self {
        ULID::from(id).into()
    }
}

impl<T: 'static + ?Sized> From<(u64, u64)> for TypedULID<T> {
    fn from(id: (u64, u64)) -> Self {
        ULID::from(id).into()
    }
}

impl<T: 'static + ?Sized> From<Uuid> for TypedULID<T> {
    fn from(uuid: Uuid) -> Self {
        ULID::from(uuid).into()
    }
}

impl<T: 'static + ?Sized> From<ULID> for TypedULID<T> {
    fn from(id: ULID) -> Self {
        TypedULID {
            id,
            _type: PhantomData,
        }
    }
}

impl<T: 'static + ?Sized> From<TypedULID<T>> for u128 {
    fn from(ulid: TypedULID<T>) -> Self {
        ulid.id.into()
    }
}

impl<T: 'static + ?Sized> From<TypedULID<T>> for ULID {
    fn from(ulid: TypedULID<T>) -> Self {
        ulid.id
    }
}

impl<T: 'static + ?Sized> From<TypedULID<T>> for (u64, u64) {
    fn from(ulid: TypedULID<T>) -> Self {
        ulid.id.into()
    }
}

impl<T: 'static + ?Sized> FromStr for TypedULID<T> {
    type Err = DecodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ULID::from_str(s).map(TypedULID::from)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::*;
    use log::info;
    use oysterpack_testing::run_test;

    #[derive(Debug)]
    struct User;

    impl HasDomain for User {
        const DOMAIN: Domain = Domain("User");
    }

    type UserId = TypedULID<User>;

    trait Foo {}

    type FooId = TypedULID<dyn Foo + Send + Sync>;

    #[test]
    fn typed_ulid_hash_uniqueness() {
        use std::collections::HashSet;
        let count = 100_000;

        let mut hashes = HashSet::new();
        for _ in 0..count {
            assert!(hashes.insert(UserId::generate()))
        }
    }

    #[test]
    fn typed_ulid_str() {
        run_test("typed_ulid_str", || {
            let id = FooId::generate();
            let id_str = id.to_string();
            info!("typed_ulid_str: {}", id_str);
            let id2 = FooId::from_str(&id_str).unwrap();
            assert_eq!(id, id2);
            assert!(FooId::from_str("8ZZZZZZZZZZZZZZZZZZZZZZZZZ").is_err());
        });
    }

    #[test]
    fn typed_ulid_eq() {
        let id = FooId::generate();
        let id_u128: u128 = id.into();
        assert_eq!(id, TypedULID::from(id_u128));
        assert_eq!(id, TypedULID::from(id.to_uuid()));
    }

    #[test]
    fn typed_ulid_ordered() {
        use std::{thread, time::Duration};
        let mut id = FooId::generate();
        for _ in 0..10 {
            thread::sleep(Duration::from_millis(2));
            let temp = FooId::generate();
            assert!(temp > id);
            id = temp;
        }
    }

    #[test]
    fn typed_ulid_next() {
        let mut id = FooId::generate();
        for _ in 0..1000 {
            let temp = FooId::next(id).unwrap();
            assert!(temp > id);
            assert_eq!(temp.ulid().timestamp_ms(), id.ulid().timestamp_ms());
            id = temp;
        }

        let last: FooId = ULID::from_parts(1, (1 << 80) - 1).into();
        assert!(FooId::next(last).is_none());
        assert!(last.increment() > last);
    }

    #[test]
    fn typed_ulid_is_thread_safe() {
        use std::thread;

        let id = FooId::generate();
        let t = thread::spawn(move || id);
        assert!(t.join().unwrap() == id);

        let id = UserId::generate();
        let t = thread::spawn(move || id);
        assert!(t.join().unwrap() == id);
    }

    #[test]
    fn typed_ulid_serde() {
        struct Foo;
        let id = TypedULID::<Foo>::generate();
        let id_bytes = bincode::serialize(&id).unwrap();
        let id2: TypedULID<Foo> = bincode::deserialize(&id_bytes).unwrap();
        assert_eq!(id, id2);

        let id_json = serde_json::to_string(&id).unwrap();
        assert_eq!(id_json, format!("\"{}\"", id.ulid()));
        let id3: TypedULID<Foo> = serde_json::from_str(&id_json).unwrap();
        assert_eq!(id, id3);

        let id4: TypedULID<Foo> = serde_json::from_str("123").unwrap();
        assert_eq!(id4.ulid(), ULID::from(123u128));
    }

    #[test]
    fn typed_ulid_into_ulid() {
        let foo_id = FooId::generate();
        let foo_ulid: ULID = foo_id.into();
        assert_eq!(foo_id.ulid(), foo_ulid);
    }
}
