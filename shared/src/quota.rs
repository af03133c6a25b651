use chrono::{Local, NaiveDate};
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

pub const COUNTS_KEY_PREFIX: &str = "roleta_counts_";

#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    Unavailable,
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "Storage unavailable"),
            Self::Io(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// String key-value persistence (localStorage in the browser).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Source of the local calendar date that scopes daily counts.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Unbounded,
    Limited(u32),
}

impl Remaining {
    pub fn is_available(self) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Limited(n) => n > 0,
        }
    }

    pub fn is_limited(self) -> bool {
        matches!(self, Self::Limited(_))
    }
}

/// How the spin consults and updates prize availability.
pub trait QuotaPolicy {
    fn remaining(&self, label: &str) -> Remaining;
    fn consume(&self, label: &str);
}

impl<T: QuotaPolicy + ?Sized> QuotaPolicy for Box<T> {
    fn remaining(&self, label: &str) -> Remaining {
        (**self).remaining(label)
    }

    fn consume(&self, label: &str) {
        (**self).consume(label)
    }
}

/// Policy for wheels without daily caps (lead-gated variant).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoQuota;

impl QuotaPolicy for NoQuota {
    fn remaining(&self, _label: &str) -> Remaining {
        Remaining::Unbounded
    }

    fn consume(&self, _label: &str) {}
}

/// Per-label daily caps persisted as one JSON object per calendar day.
pub struct QuotaStore<S, C = LocalClock> {
    limits: BTreeMap<String, u32>,
    store: S,
    clock: C,
}

impl<S: KeyValueStore> QuotaStore<S, LocalClock> {
    pub fn new(limits: BTreeMap<String, u32>, store: S) -> Self {
        Self::with_clock(limits, store, LocalClock)
    }
}

impl<S: KeyValueStore, C: Clock> QuotaStore<S, C> {
    pub fn with_clock(limits: BTreeMap<String, u32>, store: S, clock: C) -> Self {
        Self { limits, store, clock }
    }

    pub fn limit(&self, label: &str) -> Option<u32> {
        self.limits.get(label).copied().filter(|&l| l > 0)
    }

    pub fn storage_key(&self) -> String {
        format!("{}{}", COUNTS_KEY_PREFIX, day_key(self.clock.today()))
    }

    /// Today's counts; any storage or parse failure reads as "nothing used".
    pub fn used_counts(&self) -> HashMap<String, u32> {
        let key = self.storage_key();
        match self.store.get(&key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed quota data under {}: {}", key, e);
                HashMap::new()
            }),
            Ok(None) => HashMap::new(),
            Err(e) => {
                warn!("Could not read quota counts: {}", e);
                HashMap::new()
            }
        }
    }

    pub fn used(&self, label: &str) -> u32 {
        self.used_counts().get(label).copied().unwrap_or(0)
    }

    fn save_counts(&self, counts: &HashMap<String, u32>) {
        let raw = match serde_json::to_string(counts) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not encode quota counts: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(&self.storage_key(), &raw) {
            warn!("Could not persist quota counts: {}", e);
        }
    }
}

impl<S: KeyValueStore, C: Clock> QuotaPolicy for QuotaStore<S, C> {
    fn remaining(&self, label: &str) -> Remaining {
        match self.limit(label) {
            None => Remaining::Unbounded,
            Some(limit) => Remaining::Limited(limit.saturating_sub(self.used(label))),
        }
    }

    fn consume(&self, label: &str) {
        if self.limit(label).is_none() {
            return;
        }
        let mut counts = self.used_counts();
        let used = counts.entry(label.to_string()).or_insert(0);
        *used += 1;
        debug!("Consumed one '{}' ({} used today)", label, used);
        self.save_counts(&counts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FixedClock(Cell<NaiveDate>);

    impl Clock for &FixedClock {
        fn today(&self) -> NaiveDate {
            self.0.get()
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io("quota exceeded".into()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn limits() -> BTreeMap<String, u32> {
        [("Garrafa".to_string(), 20), ("Caneta".to_string(), 2)].into_iter().collect()
    }

    #[test]
    fn exhausted_label_reports_zero() {
        let store = MemoryStore::new();
        let clock = FixedClock(Cell::new(date(2024, 3, 9)));
        store.set("roleta_counts_2024-03-09", r#"{"Garrafa":20}"#).unwrap();
        let quota = QuotaStore::with_clock(limits(), &store, &clock);
        assert_eq!(quota.remaining("Garrafa"), Remaining::Limited(0));
        assert!(!quota.remaining("Garrafa").is_available());
    }

    #[test]
    fn consume_counts_down_to_zero() {
        let store = MemoryStore::new();
        let clock = FixedClock(Cell::new(date(2024, 3, 9)));
        let quota = QuotaStore::with_clock(limits(), &store, &clock);
        assert_eq!(quota.remaining("Caneta"), Remaining::Limited(2));
        quota.consume("Caneta");
        quota.consume("Caneta");
        assert_eq!(quota.remaining("Caneta"), Remaining::Limited(0));
        quota.consume("Caneta");
        assert_eq!(quota.remaining("Caneta"), Remaining::Limited(0));
    }

    #[test]
    fn unlimited_labels_are_not_tracked() {
        let store = MemoryStore::new();
        let quota = QuotaStore::new(limits(), &store);
        assert_eq!(quota.remaining("Perdeu a vez"), Remaining::Unbounded);
        quota.consume("Perdeu a vez");
        assert_eq!(store.get(&quota.storage_key()).unwrap(), None);
    }

    #[test]
    fn counts_reset_on_new_day() {
        let store = MemoryStore::new();
        let clock = FixedClock(Cell::new(date(2024, 3, 9)));
        let quota = QuotaStore::with_clock(limits(), &store, &clock);
        quota.consume("Caneta");
        quota.consume("Caneta");
        assert_eq!(quota.remaining("Caneta"), Remaining::Limited(0));

        clock.0.set(date(2024, 3, 10));
        assert_eq!(quota.storage_key(), "roleta_counts_2024-03-10");
        assert_eq!(quota.remaining("Caneta"), Remaining::Limited(2));
    }

    #[test]
    fn malformed_or_unavailable_storage_reads_as_unused() {
        let store = MemoryStore::new();
        let clock = FixedClock(Cell::new(date(2024, 3, 9)));
        store.set("roleta_counts_2024-03-09", "{not json").unwrap();
        let quota = QuotaStore::with_clock(limits(), &store, &clock);
        assert_eq!(quota.remaining("Garrafa"), Remaining::Limited(20));

        let broken = QuotaStore::new(limits(), BrokenStore);
        assert_eq!(broken.remaining("Garrafa"), Remaining::Limited(20));
        broken.consume("Garrafa");
        assert_eq!(broken.remaining("Garrafa"), Remaining::Limited(20));
    }
}
