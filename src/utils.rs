use std::hash::BuildHasherDefault;

use dashmap::DashMap;
use indexmap::IndexMap;
use rustc_hash::FxHasher;

pub type FastDashMap<K, V> = DashMap<K, V, BuildHasherDefault<FxHasher>>;
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Case-insensitive comparison that also folds Cyrillic.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.len() == b.len() && a.eq_ignore_ascii_case(b) {
        return true;
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
