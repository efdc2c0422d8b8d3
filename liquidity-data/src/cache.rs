//! Liquidity lookup cache for on-demand (country, method-set) slices.
//!
//! Keys are normalised by sorting the method list before joining, so two
//! selections with the same set but different click order share one entry.
//! Each country keeps only its most recent method-set entries, and every
//! outgoing request carries a sequence number so a stale response can never
//! overwrite the display for a newer selection.

use crate::types::LiquiditySlice;
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::HashMap;
use tracing::debug;

/// Method-set entries retained per country, oldest evicted first.
pub const RECENT_SETS_PER_COUNTRY: usize = 8;

/// Normalised cache key for a method set.
fn method_set_key(methods: &[String]) -> String {
    methods.iter().sorted().join("|")
}

/// Session cache of on-demand liquidity slices.
#[derive(Debug, Default)]
pub struct LiquidityCache {
    /// Per-country entries keyed by normalised method set, insertion ordered.
    entries: HashMap<String, IndexMap<String, LiquiditySlice>>,
    /// Latest issued request sequence per country.
    latest_seq: HashMap<String, u64>,
    next_seq: u64,
}

impl LiquidityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an outgoing liquidity request for `country`.
    ///
    /// Returns the sequence number the response must echo to be applied.
    /// Issuing a new request for the same country supersedes any in-flight
    /// one, whose response will then be discarded on arrival.
    pub fn issue(&mut self, country: &str) -> u64 {
        self.next_seq += 1;
        self.latest_seq.insert(country.to_string(), self.next_seq);
        self.next_seq
    }

    /// Store a response, unless a newer request has been issued for `country`.
    ///
    /// Returns whether the entry was applied.
    pub fn apply(
        &mut self,
        country: &str,
        methods: &[String],
        seq: u64,
        slice: LiquiditySlice,
    ) -> bool {
        if self.latest_seq.get(country) != Some(&seq) {
            debug!(%country, seq, "discarding stale liquidity response");
            return false;
        }

        let key = method_set_key(methods);
        let per_country = self.entries.entry(country.to_string()).or_default();

        // Re-inserting moves the entry to the newest slot.
        per_country.shift_remove(&key);
        while per_country.len() >= RECENT_SETS_PER_COUNTRY {
            per_country.shift_remove_index(0);
        }
        per_country.insert(key, slice);
        true
    }

    /// Look up the slice for the exact (country, method-set) combination.
    ///
    /// Absent means the display falls back to the row's aggregate values.
    pub fn lookup(&self, country: &str, methods: &[String]) -> Option<&LiquiditySlice> {
        self.entries
            .get(country)?
            .get(&method_set_key(methods))
    }

    /// Drop all entries and in-flight bookkeeping (view teardown).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.latest_seq.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn methods(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn slice(liquidity: f64, vwap: f64) -> LiquiditySlice {
        LiquiditySlice {
            specific_liquidity: liquidity,
            specific_vwap: vwap,
        }
    }

    #[test]
    fn test_lookup_never_requested_is_absent() {
        let cache = LiquidityCache::new();
        assert!(cache.lookup("Argentina", &methods(&["Wise"])).is_none());
    }

    #[test]
    fn test_key_is_insensitive_to_method_order() {
        let mut cache = LiquidityCache::new();
        let seq = cache.issue("Argentina");
        assert!(cache.apply(
            "Argentina",
            &methods(&["Wise", "Bank Transfer"]),
            seq,
            slice(100.0, 2.0)
        ));

        let hit = cache
            .lookup("Argentina", &methods(&["Bank Transfer", "Wise"]))
            .unwrap();
        assert_eq!(hit.specific_liquidity, 100.0);
    }

    #[test]
    fn test_stale_sequence_is_discarded() {
        let mut cache = LiquidityCache::new();
        let first = cache.issue("Kenya");
        let second = cache.issue("Kenya");

        // Response to the superseded request arrives late and is dropped.
        assert!(!cache.apply("Kenya", &methods(&["M-Pesa"]), first, slice(1.0, 1.0)));
        assert!(cache.lookup("Kenya", &methods(&["M-Pesa"])).is_none());

        assert!(cache.apply(
            "Kenya",
            &methods(&["Bank Transfer"]),
            second,
            slice(2.0, 2.0)
        ));
        assert_eq!(
            cache
                .lookup("Kenya", &methods(&["Bank Transfer"]))
                .unwrap()
                .specific_liquidity,
            2.0
        );
    }

    #[test]
    fn test_sequences_are_tracked_per_country() {
        let mut cache = LiquidityCache::new();
        let kenya = cache.issue("Kenya");
        let argentina = cache.issue("Argentina");

        // A newer request for another country must not invalidate this one.
        assert!(cache.apply("Kenya", &methods(&["M-Pesa"]), kenya, slice(1.0, 1.0)));
        assert!(cache.apply(
            "Argentina",
            &methods(&["Wise"]),
            argentina,
            slice(2.0, 2.0)
        ));
    }

    #[test]
    fn test_per_country_entries_are_bounded() {
        let mut cache = LiquidityCache::new();
        for i in 0..(RECENT_SETS_PER_COUNTRY + 3) {
            let set = vec![format!("Method {i}")];
            let seq = cache.issue("Vietnam");
            assert!(cache.apply("Vietnam", &set, seq, slice(i as f64, 1.0)));
        }

        assert!(cache.lookup("Vietnam", &methods(&["Method 0"])).is_none());
        let newest = vec![format!("Method {}", RECENT_SETS_PER_COUNTRY + 2)];
        assert!(cache.lookup("Vietnam", &newest).is_some());
        assert_eq!(
            cache.entries.get("Vietnam").unwrap().len(),
            RECENT_SETS_PER_COUNTRY
        );
    }

    #[test]
    fn test_clear_drops_entries_and_sequences() {
        let mut cache = LiquidityCache::new();
        let seq = cache.issue("Kenya");
        assert!(cache.apply("Kenya", &methods(&["M-Pesa"]), seq, slice(1.0, 1.0)));

        cache.clear();
        assert!(cache.lookup("Kenya", &methods(&["M-Pesa"])).is_none());
        // A pre-teardown response cannot resurrect into the fresh session.
        assert!(!cache.apply("Kenya", &methods(&["M-Pesa"]), seq, slice(1.0, 1.0)));
    }
}
