//! Probe-outcome cache
//!
//! Entries are advisory: a fresh hit avoids a redundant probe within the TTL
//! window, never more. Concurrent probes for the same URL are not
//! deduplicated; the last writer wins, which is acceptable for an
//! eventually-consistent advisory cache.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use portico_core::dto::status::UrlCheckDetails;

/// Terminal outcome of a readiness probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub ready: bool,
    pub details: UrlCheckDetails,
}

/// Cache abstraction owned by the prober.
///
/// Injected at construction so tests can isolate or replace it. `get` must
/// never return an entry older than the implementation's TTL.
pub trait ReadinessCache: Send + Sync {
    fn get(&self, url: &str) -> Option<ProbeOutcome>;
    fn put(&self, url: &str, outcome: ProbeOutcome);
}

struct Entry {
    inserted_at: Instant,
    outcome: ProbeOutcome,
}

/// In-memory TTL cache keyed by probe URL.
///
/// Expired entries are dropped lazily when a read observes them; there is no
/// background sweeper.
pub struct TtlReadinessCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl TtlReadinessCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl ReadinessCache for TtlReadinessCache {
    fn get(&self, url: &str) -> Option<ProbeOutcome> {
        let mut entries = self.entries.lock().expect("readiness cache lock poisoned");

        match entries.get(url) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => Some(entry.outcome.clone()),
            Some(_) => {
                entries.remove(url);
                None
            }
            None => None,
        }
    }

    fn put(&self, url: &str, outcome: ProbeOutcome) {
        let mut entries = self.entries.lock().expect("readiness cache lock poisoned");
        entries.insert(
            url.to_string(),
            Entry {
                inserted_at: Instant::now(),
                outcome,
            },
        );
    }
}
