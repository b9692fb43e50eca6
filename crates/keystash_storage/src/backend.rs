//! Storage backend trait definition.

use crate::stats::StatsSnapshot;

/// A string key-value storage backend.
///
/// Backends report failures through sentinels rather than errors: mutators
/// return `false`, readers return empty results. Callers own all error
/// policy.
///
/// # Invariants
///
/// - After a successful `store(k, v)`, `retrieve(k)` returns `v`
/// - `retrieve` of an absent key returns an empty string, which is
///   indistinguishable from a stored empty value
/// - `remove` returns `true` only if the key existed
/// - `list_keys` is sorted lexicographically and free of duplicates
///
/// # Implementors
///
/// - [`super::MemoryBackend`] - Process-lifetime storage
/// - [`super::FileBackend`] - Persistent storage in a flat text file
pub trait StorageBackend: Send + Sync {
    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// Returns `false` if the value could not be persisted.
    fn store(&mut self, key: &str, value: &str) -> bool;

    /// Returns the value stored under `key`, or an empty string if absent.
    fn retrieve(&self, key: &str) -> String;

    /// Removes `key`.
    ///
    /// Returns `true` only if the key existed and the removal was persisted.
    fn remove(&mut self, key: &str) -> bool;

    /// Returns all keys in lexicographic order.
    fn list_keys(&self) -> Vec<String>;

    /// Removes all entries.
    fn clear(&mut self);

    /// Returns a fixed label identifying the backend implementation.
    fn backend_type(&self) -> &'static str;

    /// Returns the access counters recorded so far.
    fn stats(&self) -> StatsSnapshot;

    /// Renders a human-readable diagnostics report.
    fn debug_info(&self) -> String;
}

/// Maximum number of sample entries shown by [`StorageBackend::debug_info`].
pub(crate) const DEBUG_SAMPLE_ENTRIES: usize = 3;

/// Appends the sample-entry section of a debug report.
///
/// Entries are shown in key order so reports are stable across runs.
pub(crate) fn write_samples<'a, I>(out: &mut String, entries: I)
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    let mut entries: Vec<_> = entries.into_iter().collect();
    if entries.is_empty() {
        return;
    }
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    out.push_str("  Sample entries:\n");
    for (key, value) in entries.into_iter().take(DEBUG_SAMPLE_ENTRIES) {
        out.push_str(&format!("    {key:?} -> {value:?}\n"));
    }
}

/// Collects and sorts the keys of a map.
pub(crate) fn sorted_keys<'a, I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut keys: Vec<String> = keys.into_iter().cloned().collect();
    keys.sort_unstable();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn sorted_keys_orders_lexicographically() {
        let map: HashMap<String, String> = [("b", ""), ("a", ""), ("B", "")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert_eq!(sorted_keys(map.keys()), vec!["B", "a", "b"]);
    }

    #[test]
    fn samples_are_capped_and_ordered() {
        let map: HashMap<String, String> = ["d", "c", "b", "a"]
            .into_iter()
            .map(|k| (k.to_string(), k.to_uppercase()))
            .collect();

        let mut out = String::new();
        write_samples(&mut out, &map);

        assert!(out.starts_with("  Sample entries:\n"));
        assert!(out.contains("\"a\" -> \"A\""));
        assert!(out.contains("\"c\" -> \"C\""));
        assert!(!out.contains("\"d\""));
    }

    #[test]
    fn samples_skip_empty_maps() {
        let map: HashMap<String, String> = HashMap::new();
        let mut out = String::new();
        write_samples(&mut out, &map);
        assert!(out.is_empty());
    }
}
