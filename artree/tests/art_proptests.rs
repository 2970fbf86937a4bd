//! Model-based property tests: random action sequences applied to both the
//! tree and a BTreeMap must stay observably identical.

use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest_derive::Arbitrary;

use artree::AdaptiveRadixTree;

/// Actions to run against both implementations.
#[derive(Arbitrary, Debug, Clone)]
enum Action {
    Insert(KeyValue),
    Get(Key),
    Remove(Key),
}

#[derive(Debug, Clone)]
struct Key(Vec<u8>);

#[derive(Debug, Clone, Arbitrary)]
struct KeyValue {
    key: Key,
    value: u64,
}

impl Arbitrary for Key {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            // Empty key
            Just(Key(vec![])),
            // Short keys over a tiny alphabet, maximizing collisions and
            // prefix relationships
            prop::collection::vec(1u8..4, 1..6).prop_map(Key),
            // Arbitrary non-terminator bytes
            prop::collection::vec(1u8..=255, 1..32).prop_map(Key),
            // Keys with natural delimiters to exercise prefix compression
            "[a-z]{4,8}/[a-z]{1,8}".prop_map(|s| Key(s.into_bytes())),
            // Shared stems longer than the inline prefix window
            "[a-z]{1,4}".prop_map(|suffix| {
                let mut key = vec![b'p'; 40];
                key.extend_from_slice(suffix.as_bytes());
                Key(key)
            }),
        ]
        .boxed()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn tree_behaves_like_btreemap(actions: Vec<Action>) {
        let mut tree = AdaptiveRadixTree::new();
        let mut model: BTreeMap<Vec<u8>, u64> = BTreeMap::new();

        for action in actions {
            match action {
                Action::Insert(KeyValue { key, value }) => {
                    let replaced = tree.insert(&key.0, value).unwrap();
                    let model_replaced = model.insert(key.0.clone(), value);
                    prop_assert_eq!(replaced, model_replaced);
                }
                Action::Get(key) => {
                    prop_assert_eq!(tree.get(&key.0), model.get(&key.0));
                }
                Action::Remove(key) => {
                    let removed = tree.remove(&key.0);
                    let model_removed = model.remove(&key.0);
                    prop_assert_eq!(removed, model_removed);
                }
            }
            prop_assert_eq!(tree.len(), model.len());
        }

        // Everything the model still holds must be reachable, and nothing
        // else.
        for (key, value) in &model {
            prop_assert_eq!(tree.get(key), Some(value));
        }
        prop_assert_eq!(tree.stats().num_leaves, model.len());
    }

    #[test]
    fn insert_then_lookup_round_trips(keys: Vec<Key>) {
        let mut tree = AdaptiveRadixTree::new();
        let mut distinct: BTreeMap<Vec<u8>, usize> = BTreeMap::new();

        for (i, key) in keys.iter().enumerate() {
            tree.insert(&key.0, i).unwrap();
            distinct.insert(key.0.clone(), i);
        }

        prop_assert_eq!(tree.len(), distinct.len());
        for (key, value) in &distinct {
            prop_assert_eq!(tree.get(key), Some(value));
        }
    }
}
