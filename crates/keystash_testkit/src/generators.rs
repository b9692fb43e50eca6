//! Property-based test generators using proptest.
//!
//! Keys and values are biased towards the characters the file format has
//! to escape, since plain alphanumerics exercise very little.

use proptest::prelude::*;

/// Strategy for short alphanumeric keys, prone to collisions.
pub fn simple_key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]{1,3}").expect("Invalid regex")
}

/// Strategy for strings built mostly from reserved characters.
pub fn hostile_string_strategy(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => prop::sample::select(vec!['=', '\\', '\n', '\r', '\t']),
            2 => prop::char::range('a', 'c'),
            1 => any::<char>(),
        ],
        0..=max_len,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for keys: a mix of simple and hostile strings.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        2 => simple_key_strategy(),
        1 => hostile_string_strategy(12),
    ]
}

/// Strategy for values, including the empty string.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => Just(String::new()),
        2 => prop::string::string_regex("[a-z0-9 ]{1,16}").expect("Invalid regex"),
        3 => hostile_string_strategy(32),
    ]
}

/// A single backend operation.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Store a value
    Store {
        /// Key
        key: String,
        /// Value
        value: String,
    },
    /// Remove a key
    Remove {
        /// Key
        key: String,
    },
    /// Retrieve a key
    Retrieve {
        /// Key
        key: String,
    },
    /// List all keys
    ListKeys,
    /// Remove everything
    Clear,
}

/// Strategy for generating operations.
pub fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        6 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| Operation::Store { key, value }),
        2 => key_strategy().prop_map(|key| Operation::Remove { key }),
        3 => key_strategy().prop_map(|key| Operation::Retrieve { key }),
        1 => Just(Operation::ListKeys),
        1 => Just(Operation::Clear),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(operation_strategy(), min_ops..max_ops)
}

/// Strategy for generating a key-value map to store in one go.
pub fn entries_strategy(max_entries: usize) -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..=max_entries)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests, suited to the file backend
    /// which rewrites its file on every mutation.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn simple_keys_are_short(key in simple_key_strategy()) {
            prop_assert!(!key.is_empty() && key.len() <= 3);
        }

        #[test]
        fn hostile_strings_respect_length(s in hostile_string_strategy(8)) {
            prop_assert!(s.chars().count() <= 8);
        }

        #[test]
        fn sequences_respect_bounds(ops in operation_sequence_strategy(2, 10)) {
            prop_assert!(ops.len() >= 2 && ops.len() < 10);
        }
    }
}
