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

use oysterpack_ulid_codec::{Generator, ULID};
use oysterpack_ulid_field::*;

fn store_and_load(field: &UlidField, ids: &[ULID]) -> Vec<ULID> {
    ids.iter()
        .map(|id| field.prep_value(Some((*id).into())).unwrap())
        .map(|column| field.from_db_value(column).unwrap().unwrap())
        .collect()
}

#[test]
fn stored_ulids_keep_their_order() {
    let mut generator = Generator::new();
    let ids: Vec<ULID> = (0..1_000).map(|_| generator.generate()).collect();

    for features in &[
        BackendFeatures {
            has_native_uuid_field: true,
        },
        BackendFeatures {
            has_native_uuid_field: false,
        },
    ] {
        let field = UlidField::for_backend(features);
        let columns: Vec<ColumnValue> = ids
            .iter()
            .map(|id| field.prep_value(Some((*id).into())).unwrap().unwrap())
            .collect();
        let mut sorted = columns.clone();
        sorted.sort_by(|a, b| match (a, b) {
            (ColumnValue::Uuid(a), ColumnValue::Uuid(b)) => a.cmp(b),
            (ColumnValue::Text(a), ColumnValue::Text(b)) => a.cmp(b),
            _ => panic!("mixed column values"),
        });
        assert_eq!(columns, sorted);
        assert_eq!(store_and_load(&field, &ids), ids);
    }
}

#[test]
fn literal_registry_is_installed_once() {
    assert!(literal::registry().is_none());
    literal::init(LiteralRegistry::with_defaults()).unwrap();
    let id = ULID::generate();
    let literal = literal::registry().unwrap().literal_for(&id).unwrap();
    assert_eq!(literal.expr(), format!("ULID::from_bytes({:?})", id.to_bytes()));
    assert_eq!(
        literal::init(LiteralRegistry::with_defaults()),
        Err(AlreadyInitialized)
    );
}
