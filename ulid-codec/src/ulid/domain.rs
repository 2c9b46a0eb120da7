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

//! Provides support for domain scoped ULID(s), that are scoped by the code, i.e., not enforced by the compiler.

use super::{typed::TypedULID, ULID};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a generic form of TypedULID&lt;T&gt;, i.e., it's a ULID for the specified domain.
///
/// TypedULID&lt;T&gt; is a typed ULID. However, there are use cases where we want to erase the type and have
/// a generic. An example use case is tagging events with ULID(s) for different domains.
///
/// ## Example DomainULID generator function
/// ```rust
/// # use oysterpack_ulid_codec::*;
/// fn new_request_id() -> DomainULID {
///     const DOMAIN: Domain = Domain("Request");
///     DomainULID::generate(DOMAIN)
/// }
///
/// let request_id =  new_request_id();
/// assert_eq!(request_id.domain(), "Request");
/// assert!(request_id.to_string().starts_with("Request/"));
/// ```
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct DomainULID {
    domain: String,
    id: ULID,
}

impl DomainULID {
    /// Constructs a new ULID as DomainULID
    pub fn generate(domain: Domain) -> DomainULID {
        DomainULID::from_ulid(domain, ULID::generate())
    }

    /// Associates the Domain to the ULID
    pub fn from_ulid<T: Into<ULID>>(domain: Domain, id: T) -> DomainULID {
        DomainULID {
            domain: domain.to_string(),
            id: id.into(),
        }
    }

    /// Getter for the domain
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the ULID, e.g., 01CAT3X5Y5G9A62FH1FA6T9GVR
    pub fn ulid(&self) -> ULID {
        self.id
    }
}

impl fmt::Display for DomainULID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.id)
    }
}

impl<T: HasDomain> From<TypedULID<T>> for DomainULID {
    fn from(uid: TypedULID<T>) -> Self {
        DomainULID::from_ulid(T::DOMAIN, uid.ulid())
    }
}

/// Domain ID is used to define constants
///
/// ```rust
/// # use oysterpack_ulid_codec::*;
/// const FOO_ID: DomainId = DomainId(Domain("Foo"),1866919584682221951251731635731565689);
/// let foo_id: DomainULID = FOO_ID.as_domain_ulid();
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DomainId(pub Domain, pub u128);

impl DomainId {
    /// returns the id as a DomainULID
    pub fn as_domain_ulid(&self) -> DomainULID {
        DomainULID::from_ulid(self.0, self.1)
    }

    /// returns the ID's ULID
    pub fn ulid(&self) -> ULID {
        self.1.into()
    }

    /// Domain getter
    pub fn domain(&self) -> Domain {
        self.0
    }
}

impl From<DomainId> for DomainULID {
    fn from(id: DomainId) -> Self {
        id.as_domain_ulid()
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.0, self.ulid())
    }
}

/// Models the domain used by [DomainULID](struct.DomainULID.html).
///
/// Domain(s) are static and are defined as consts.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Domain(pub &'static str);

impl Domain {
    /// Returns the domain name
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        self.0
    }
}

/// Meant to be implemented by domain types to associate the Domain with the type.
///
/// ## Example
/// ```rust
/// use oysterpack_ulid_codec::*;
///
/// struct User;
///
/// impl HasDomain for User {
///     const DOMAIN: Domain = Domain("User");
/// }
///
/// type UserId = TypedULID<User>;
///
/// let id : DomainULID = UserId::generate().into();
/// assert_eq!(id.domain(), User::DOMAIN.name());
/// ```
pub trait HasDomain {
    /// Domain
    const DOMAIN: Domain;
}

#[cfg(test)]
mod tests {

    use super::*;
    use log::info;
    use oysterpack_testing::run_test;

    #[derive(Debug)]
    struct User;

    impl HasDomain for User {
        const DOMAIN: Domain = Domain("User");
    }

    #[test]
    fn domain_ulid() {
        run_test("domain_ulid", || {
            let id: DomainULID = DomainULID::generate(User::DOMAIN);
            assert_eq!(id.domain(), User::DOMAIN.name());
            info!("DomainULID: {}", serde_json::to_string_pretty(&id).unwrap());
            info!("{:?} => {}", id, id);
            assert_eq!(id.to_string(), format!("User/{}", id.ulid()));

            let json = serde_json::to_string(&id).unwrap();
            let id2: DomainULID = serde_json::from_str(&json).unwrap();
            assert_eq!(id, id2);
        });
    }

    #[test]
    fn typed_ulid_into_domain_ulid() {
        let typed = TypedULID::<User>::generate();
        let id: DomainULID = typed.into();
        assert_eq!(id.domain(), "User");
        assert_eq!(id.ulid(), typed.ulid());
    }

    #[test]
    fn domain_id() {
        const FOO_ID: DomainId = DomainId(Domain("Foo"), 1_866_919_584_682_221_951_251_731_635_731_565_689);
        let id: DomainULID = FOO_ID.into();
        assert_eq!(id.domain(), FOO_ID.domain().name());
        assert_eq!(id.ulid(), FOO_ID.ulid());
        assert_eq!(FOO_ID.to_string(), id.to_string());
    }

    #[test]
    fn domain() {
        const USERS: Domain = Domain("users");
        assert_eq!(USERS.as_ref(), "users");
        assert_eq!(USERS.as_ref(), USERS.name());
    }
}
