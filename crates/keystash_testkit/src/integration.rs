//! Model-checking harness.
//!
//! Applies operations to a backend and to a plain `HashMap` model side by
//! side, asserting after every step that the backend answers exactly what
//! the model predicts.

use crate::generators::Operation;
use keystash_storage::StorageBackend;
use std::collections::HashMap;

/// A backend paired with the reference model it must agree with.
pub struct ModelHarness<'a> {
    backend: &'a mut dyn StorageBackend,
    model: HashMap<String, String>,
}

impl<'a> ModelHarness<'a> {
    /// Wraps an empty backend.
    pub fn new(backend: &'a mut dyn StorageBackend) -> Self {
        assert!(
            backend.list_keys().is_empty(),
            "Model harness requires an empty backend"
        );
        Self {
            backend,
            model: HashMap::new(),
        }
    }

    /// Applies one operation and checks its result against the model.
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::Store { key, value } => {
                assert!(self.backend.store(key, value), "store {key:?} failed");
                self.model.insert(key.clone(), value.clone());
            }
            Operation::Remove { key } => {
                let expected = self.model.remove(key).is_some();
                assert_eq!(self.backend.remove(key), expected, "remove {key:?}");
            }
            Operation::Retrieve { key } => {
                let expected = self.model.get(key).cloned().unwrap_or_default();
                assert_eq!(self.backend.retrieve(key), expected, "retrieve {key:?}");
            }
            Operation::ListKeys => {
                assert_eq!(self.backend.list_keys(), self.expected_keys());
            }
            Operation::Clear => {
                self.backend.clear();
                self.model.clear();
            }
        }
    }

    /// Applies every operation in order.
    pub fn apply_all(&mut self, ops: &[Operation]) {
        for op in ops {
            self.apply(op);
        }
    }

    /// Checks the full contents of the backend against the model.
    pub fn verify_all(&self) {
        assert_eq!(self.backend.list_keys(), self.expected_keys());
        for (key, value) in &self.model {
            assert_eq!(&self.backend.retrieve(key), value, "value of {key:?}");
        }
    }

    /// Returns the model's current contents.
    pub fn model(&self) -> &HashMap<String, String> {
        &self.model
    }

    fn expected_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.model.keys().cloned().collect();
        keys.sort();
        keys
    }
}
