//! Property tests for the entity-component store.
//!
//! Random sequences of entity creation and component writes are replayed
//! against a simple model; id issuance, presence and filtered iteration must
//! agree with it after every step.

use eco_ecs::prelude::*;
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;

const COMPONENTS: [&str; 3] = ["pos", "vel", "tag"];

/// Operations we can perform on the store.
#[derive(Debug, Clone)]
enum EcoOp {
    CreateEntity,
    Set(usize, usize, i64),
    QueryOne(usize),
    QueryPair(usize, usize),
}

fn eco_op_strategy() -> impl Strategy<Value = EcoOp> {
    prop_oneof![
        Just(EcoOp::CreateEntity),
        (0..3usize, 0..100usize, any::<i64>()).prop_map(|(c, e, v)| EcoOp::Set(c, e, v)),
        (0..3usize).prop_map(EcoOp::QueryOne),
        (0..3usize, 0..3usize).prop_map(|(a, b)| EcoOp::QueryPair(a, b)),
    ]
}

fn setup_eco(seed: u64) -> Eco {
    let mut eco = Eco::with_config(EcoConfig { id_seed: seed });
    eco.create_component("pos", json!({"x": 0, "y": 0}));
    eco.create_component("vel", json!({"dx": 0}));
    eco.create_component("tag", json!(true));
    eco
}

fn small_object() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-e]", any::<i32>(), 0..5).prop_map(|m| {
        m.into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect::<Map<String, Value>>()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn ids_are_seed_plus_offset(seed in 1u64..1_000_000, count in 1usize..200) {
        let mut eco = Eco::with_config(EcoConfig { id_seed: seed });
        for n in 0..count {
            let e = eco.create_entity();
            prop_assert_eq!(e.id().to_raw(), seed + n as u64);
        }
        prop_assert_eq!(eco.entities().count(), count);
    }

    #[test]
    fn random_ops_agree_with_model(
        seed in 1u64..1_000,
        ops in prop::collection::vec(eco_op_strategy(), 1..60),
    ) {
        let mut eco = setup_eco(seed);
        let mut entities: Vec<Entity> = Vec::new();
        let mut has: [BTreeSet<u64>; 3] = Default::default();

        for op in ops {
            match op {
                EcoOp::CreateEntity => {
                    let e = eco.create_entity();
                    for name in COMPONENTS {
                        prop_assert!(!eco.component(name).has(e.id()));
                    }
                    entities.push(e);
                }
                EcoOp::Set(c, idx, v) => {
                    if !entities.is_empty() {
                        let e = entities[idx % entities.len()];
                        eco.set_component(COMPONENTS[c], e.id(), json!({"x": v})).unwrap();
                        prop_assert!(eco.component(COMPONENTS[c]).has(e.id()));
                        has[c].insert(e.id().to_raw());
                    }
                }
                EcoOp::QueryOne(c) => {
                    let got: Vec<u64> = eco
                        .query(&[COMPONENTS[c]])
                        .map(|e| e.id().to_raw())
                        .collect();
                    let expected: Vec<u64> = has[c].iter().copied().collect();
                    prop_assert_eq!(got, expected);
                }
                EcoOp::QueryPair(a, b) => {
                    let got: Vec<u64> = eco
                        .query(&[COMPONENTS[a], COMPONENTS[b]])
                        .map(|e| e.id().to_raw())
                        .collect();
                    let expected: Vec<u64> = has[a].intersection(&has[b]).copied().collect();
                    prop_assert_eq!(got, expected);
                }
            }

            // Stores only ever hold ids that were written.
            for (c, name) in COMPONENTS.iter().enumerate() {
                prop_assert_eq!(eco.component(name).len(), has[c].len());
            }
        }
    }

    #[test]
    fn merge_matches_key_by_key_model(
        defaults in small_object(),
        overrides in small_object(),
    ) {
        let mut store = ComponentStore::new(defaults.clone());
        let id = EntityId::from_raw(1);
        store.set(id, Value::Object(overrides.clone()));
        let merged = store.get(id).and_then(Value::as_object).cloned().unwrap();

        for (key, value) in &merged {
            let expected = overrides.get(key).or_else(|| defaults.get(key));
            prop_assert_eq!(Some(value), expected);
        }
        let keys: BTreeSet<&String> = defaults.keys().chain(overrides.keys()).collect();
        prop_assert_eq!(merged.len(), keys.len());

        // Default keys come first, in their original order.
        let leading: Vec<&String> = merged.keys().take(defaults.len()).collect();
        let default_keys: Vec<&String> = defaults.keys().collect();
        prop_assert_eq!(leading, default_keys);
    }

    #[test]
    fn unknown_names_never_report_presence(name in "[a-z]{1,12}", raw in any::<u64>()) {
        let eco = setup_eco(1);
        prop_assume!(!COMPONENTS.contains(&name.as_str()));
        let store = eco.component(&name);
        prop_assert!(!store.has(EntityId::from_raw(raw)));
        prop_assert!(store.get(EntityId::from_raw(raw)).is_none());
    }
}
