use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest_derive::Arbitrary;

use crate::{Entry, HashTrie, Key32};

/// Simple model implementation using BTreeMap for comparison
#[derive(Default)]
struct Model {
    map: BTreeMap<u64, u64>,
}

impl Model {
    fn insert(&mut self, key: u64, value: u64) -> Option<u64> {
        self.map.insert(key, value)
    }

    fn get(&self, key: &u64) -> Option<&u64> {
        self.map.get(key)
    }

    fn remove(&mut self, key: &u64) -> Option<u64> {
        self.map.remove(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Actions to test against both implementations
#[derive(Arbitrary, Debug, Clone)]
enum Action {
    Insert(Key, u64),
    Get(Key),
    Remove(Key),
}

/// Wrapper for key generation with custom strategy
#[derive(Debug, Clone, Copy)]
struct Key(u64);

impl Arbitrary for Key {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            // Tiny key space: replacements and removal hits stay common
            (0u64..16).prop_map(Key),
            // Clustered keys sharing low hash structure
            (0u64..4096).prop_map(Key),
            // Anything
            any::<u64>().prop_map(Key),
        ]
        .boxed()
    }
}

/// Test harness that executes actions on both HashTrie and Model
#[derive(Default)]
struct Test {
    trie: HashTrie<(u64, u64)>,
    model: Model,
}

impl Test {
    fn execute(&mut self, action: Action) {
        match action {
            Action::Insert(key, value) => {
                let trie_result = self.trie.insert((key.0, value)).map(|(_, v)| v);
                let model_result = self.model.insert(key.0, value);
                assert_eq!(
                    trie_result, model_result,
                    "Insert mismatch: key={:?}, trie_result={:?}, model_result={:?}",
                    key, trie_result, model_result
                );
            }
            Action::Get(key) => {
                let trie_result = self.trie.get(&key.0).map(|(_, v)| v);
                let model_result = self.model.get(&key.0);
                assert_eq!(
                    trie_result, model_result,
                    "Get mismatch: key={:?}, trie_result={:?}, model_result={:?}",
                    key, trie_result, model_result
                );
            }
            Action::Remove(key) => {
                let trie_result = self.trie.remove(&key.0).map(|(_, v)| v);
                let model_result = self.model.remove(&key.0);
                assert_eq!(
                    trie_result, model_result,
                    "Remove mismatch: key={:?}, trie_result={:?}, model_result={:?}",
                    key, trie_result, model_result
                );
            }
        }
        // Always verify len and the structural invariants
        assert_eq!(
            self.trie.len(),
            self.model.len(),
            "Length mismatch after action: trie={}, model={}",
            self.trie.len(),
            self.model.len()
        );
        assert_eq!(
            self.trie.is_empty(),
            self.model.is_empty(),
            "is_empty mismatch: trie={}, model={}",
            self.trie.is_empty(),
            self.model.is_empty()
        );
        self.trie.audit();
    }
}

/// Key with a constant hash: the adversarial oracle the linear-overflow
/// path exists for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Colliding(u8);

impl Key32 for Colliding {
    fn hash32(&self) -> u32 {
        7
    }
}

impl Entry for Colliding {
    type Key = Colliding;

    fn key(&self) -> &Colliding {
        self
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn proptest_vs_btreemap(actions in prop::collection::vec(any::<Action>(), 1..64)) {
        let mut test = Test::default();
        for action in actions {
            test.execute(action);
        }
    }

    #[test]
    fn proptest_constant_hash(ops in prop::collection::vec(any::<(bool, u8)>(), 1..48)) {
        let mut trie: HashTrie<Colliding> = HashTrie::new();
        let mut model: std::collections::BTreeSet<u8> = std::collections::BTreeSet::new();

        for (insert, k) in ops {
            if insert {
                prop_assert_eq!(trie.insert(Colliding(k)).is_some(), !model.insert(k));
            } else {
                prop_assert_eq!(trie.remove(&Colliding(k)).is_some(), model.remove(&k));
            }
            prop_assert_eq!(trie.len(), model.len());
            trie.audit();
        }

        for &k in &model {
            prop_assert_eq!(trie.get(&Colliding(k)), Some(&Colliding(k)));
        }
    }
}
