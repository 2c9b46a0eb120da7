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

//! Renders values as Rust source literals, e.g., for generated migration code.
//!
//! Literal writers are registered explicitly per type in a [LiteralRegistry](struct.LiteralRegistry.html).
//! A registry can be installed process wide exactly once via [init()](fn.init.html).
//!
//! ```rust
//! # use oysterpack_ulid_field::literal::*;
//! # use oysterpack_ulid_codec::ULID;
//! let registry = LiteralRegistry::with_defaults();
//! let literal = registry.literal_for(&ULID::from(1u128)).unwrap();
//! assert_eq!(literal.expr(), "ULID::from_bytes([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1])");
//! assert!(literal.imports().contains("use oysterpack_ulid_codec::ULID;"));
//! ```

use failure::Fail;
use log::info;
use once_cell::sync::OnceCell;
use oysterpack_ulid_codec::ULID;
use std::{
    any::{Any, TypeId},
    collections::{BTreeSet, HashMap},
    fmt,
};

static REGISTRY: OnceCell<LiteralRegistry> = OnceCell::new();

/// Installs the process wide registry. Only the first call succeeds.
pub fn init(registry: LiteralRegistry) -> Result<(), AlreadyInitialized> {
    let count = registry.len();
    REGISTRY.set(registry).map_err(|_| AlreadyInitialized)?;
    info!("literal registry initialized with {} type(s)", count);
    Ok(())
}

/// Returns the process wide registry, if it has been initialized.
pub fn registry() -> Option<&'static LiteralRegistry> {
    REGISTRY.get()
}

/// Returned when the process wide registry is already initialized.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Fail)]
#[fail(display = "The literal registry is already initialized.")]
pub struct AlreadyInitialized;

/// A source expression along with the imports it requires
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Literal {
    expr: String,
    imports: BTreeSet<String>,
}

impl Literal {
    /// constructor
    pub fn new<E, I>(expr: E, imports: I) -> Literal
    where
        E: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Literal {
            expr: expr.into(),
            imports: imports.into_iter().map(Into::into).collect(),
        }
    }

    /// source expression
    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// import statements required by the expression
    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }

    /// consumes the literal
    pub fn into_parts(self) -> (String, BTreeSet<String>) {
        (self.expr, self.imports)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.expr)
    }
}

/// Renders the ULID via its big-endian bytes
pub fn ulid_literal(ulid: &ULID) -> Literal {
    Literal::new(
        format!("ULID::from_bytes({:?})", ulid.to_bytes()),
        vec!["use oysterpack_ulid_codec::ULID;"],
    )
}

type LiteralWriter = Box<dyn Fn(&dyn Any) -> Option<Literal> + Send + Sync>;

/// Maps types to literal writers
#[derive(Default)]
pub struct LiteralRegistry {
    writers: HashMap<TypeId, LiteralWriter>,
}

impl LiteralRegistry {
    /// empty registry
    pub fn new() -> LiteralRegistry {
        LiteralRegistry::default()
    }

    /// registry with the ULID literal writer registered
    pub fn with_defaults() -> LiteralRegistry {
        let mut registry = LiteralRegistry::new();
        registry.register::<ULID>(ulid_literal);
        registry
    }

    /// Registers the literal writer for type T, replacing any writer that was registered before.
    pub fn register<T: Any>(&mut self, writer: fn(&T) -> Literal) -> &mut LiteralRegistry {
        self.writers.insert(
            TypeId::of::<T>(),
            Box::new(move |value: &dyn Any| value.downcast_ref::<T>().map(writer)),
        );
        self
    }

    /// Returns true if a writer is registered for type T
    pub fn contains<T: Any>(&self) -> bool {
        self.writers.contains_key(&TypeId::of::<T>())
    }

    /// Renders the value, if a writer is registered for its type
    pub fn literal_for<T: Any>(&self, value: &T) -> Option<Literal> {
        self.literal_for_any(value)
    }

    /// Renders the value based on its runtime type
    pub fn literal_for_any(&self, value: &dyn Any) -> Option<Literal> {
        self.writers
            .get(&value.type_id())
            .and_then(|writer| writer(value))
    }

    /// number of registered types
    pub fn len(&self) -> usize {
        self.writers.len()
    }

    /// true if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

impl fmt::Debug for LiteralRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("LiteralRegistry")
            .field("types", &self.writers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use oysterpack_testing::run_test;
    use uuid::Uuid;

    fn uuid_literal(uuid: &Uuid) -> Literal {
        Literal::new(
            format!("Uuid::from_bytes({:?})", uuid.as_bytes()),
            vec!["use uuid::Uuid;"],
        )
    }

    #[test]
    fn ulid_literal_uses_bytes() {
        let ulid = ULID::from_string("01ARZ3NDEKTSV4RRFFQ69G5FAV").unwrap();
        let literal = ulid_literal(&ulid);
        assert_eq!(
            literal.expr(),
            "ULID::from_bytes([1, 86, 62, 58, 181, 211, 214, 118, 76, 97, 239, 185, 147, 2, 189, 91])"
        );
        assert_eq!(literal.to_string(), literal.expr());
        let (_, imports) = literal.into_parts();
        assert_eq!(
            imports.into_iter().collect::<Vec<_>>(),
            vec!["use oysterpack_ulid_codec::ULID;".to_string()]
        );
    }

    #[test]
    fn registry_dispatches_on_type() {
        let mut registry = LiteralRegistry::with_defaults();
        assert!(registry.contains::<ULID>());
        assert!(!registry.contains::<Uuid>());
        let uuid = Uuid::from_bytes([0; 16]);
        assert!(registry.literal_for(&uuid).is_none());

        registry.register::<Uuid>(uuid_literal);
        assert_eq!(registry.len(), 2);
        let literal = registry.literal_for(&uuid).unwrap();
        assert!(literal.expr().starts_with("Uuid::from_bytes("));

        let ulid = ULID::generate();
        let values: Vec<Box<dyn Any>> = vec![Box::new(ulid), Box::new(uuid), Box::new(1u8)];
        let literals: Vec<Option<Literal>> = values
            .iter()
            .map(|value| registry.literal_for_any(value.as_ref()))
            .collect();
        assert_eq!(literals[0], Some(ulid_literal(&ulid)));
        assert_eq!(literals[1], Some(uuid_literal(&uuid)));
        assert_eq!(literals[2], None);
    }

    #[test]
    fn register_replaces_previous_writer() {
        fn short(ulid: &ULID) -> Literal {
            Literal::new(format!("\"{}\".parse::<ULID>()?", ulid), Vec::<String>::new())
        }

        let mut registry = LiteralRegistry::with_defaults();
        registry.register::<ULID>(short);
        assert_eq!(registry.len(), 1);
        let literal = registry.literal_for(&ULID::NIL).unwrap();
        assert_eq!(literal.expr(), "\"00000000000000000000000000\".parse::<ULID>()?");
        assert!(literal.imports().is_empty());
    }

    #[test]
    fn init_once() {
        run_test("init_once", || {
            assert!(LiteralRegistry::new().is_empty());
            init(LiteralRegistry::with_defaults()).unwrap();
            let registry = registry().unwrap();
            assert!(registry.contains::<ULID>());
            assert_eq!(init(LiteralRegistry::new()), Err(AlreadyInitialized));
            assert_eq!(super::registry().unwrap().len(), 1);
        });
    }
}
