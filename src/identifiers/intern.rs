//! Process-scoped string interner backing the identifier and currency types.
//!
//! Entries are append-only and immutable once published, so concurrent
//! readers never observe a partial write. Interning deduplicates identical
//! strings into one `'static` allocation, making every identifier a `Copy`
//! handle with equality and hashing by string value.

use std::sync::OnceLock;

use dashmap::DashMap;

static STRINGS: OnceLock<DashMap<String, &'static str>> = OnceLock::new();

/// Returns the canonical `'static` copy of `value`, allocating it on first
/// sight. The allocation lives for the remainder of the process.
pub(crate) fn intern(value: &str) -> &'static str {
    let strings = STRINGS.get_or_init(DashMap::new);
    if let Some(existing) = strings.get(value) {
        return *existing;
    }
    // The entry API holds the shard lock, so a racing insert of the same
    // key settles on a single canonical allocation.
    *strings
        .entry(value.to_owned())
        .or_insert_with(|| Box::leak(value.to_owned().into_boxed_str()))
        .value()
}
