//! Benchmark utilities.

use rand::distributions::{Alphanumeric, DistString};
use rand::seq::SliceRandom;
use rand::Rng;

/// Characters the file format has to escape.
const RESERVED: [char; 5] = ['=', '\\', '\n', '\r', '\t'];

/// Generate a random alphanumeric string of the given length.
pub fn random_text(len: usize) -> String {
    Alphanumeric.sample_string(&mut rand::thread_rng(), len)
}

/// Generate a string of the given length where roughly one character in
/// `every` is reserved.
pub fn random_escaped_text(len: usize, every: u32) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            if rng.gen_ratio(1, every.max(1)) {
                *RESERVED.choose(&mut rng).unwrap_or(&'=')
            } else {
                rng.sample(Alphanumeric) as char
            }
        })
        .collect()
}

/// Generate `count` entries `key_{i}` with random values of `value_len`.
pub fn generate_entries(count: usize, value_len: usize) -> Vec<(String, String)> {
    (0..count)
        .map(|i| (format!("key_{i:06}"), random_text(value_len)))
        .collect()
}
