//! # Key-Value Ledger Trait and Reference Implementations
//!
//! The substrate contract is deliberately minimal — `get`, `put`,
//! `range_scan` — because that is all the host ledger platform offers
//! per invocation. Scans iterate in lexicographic key order, finite,
//! one pass. An empty bound means "unbounded" on that side.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::PathBuf;

use crate::error::LedgerError;

/// One entry yielded by a range scan.
pub type ScanEntry = (String, Vec<u8>);

/// The key-value substrate the engine persists through.
///
/// Implementations must serialize conflicting writes to the same keys
/// across invocations (commit-time conflict detection or total order via
/// consensus); the engine performs no locking of its own.
pub trait KeyValueLedger {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Store `value` under `key`, overwriting any previous value.
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Scan `[start, end)` in lexicographic key order.
    ///
    /// An empty `start` or `end` leaves that side unbounded, matching the
    /// host platform's range-query convention.
    fn range_scan<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn Iterator<Item = ScanEntry> + 'a>, LedgerError>;
}

impl<L: KeyValueLedger + ?Sized> KeyValueLedger for &mut L {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        (**self).put(key, value)
    }

    fn range_scan<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn Iterator<Item = ScanEntry> + 'a>, LedgerError> {
        (**self).range_scan(start, end)
    }
}

/// Select the `(start, end)` slice of a key-ordered map, honoring the
/// empty-bound-is-unbounded convention.
fn range_bounds(start: &str, end: &str) -> (Bound<String>, Bound<String>) {
    let lo = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start.to_string())
    };
    let hi = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end.to_string())
    };
    (lo, hi)
}

// ─── MemoryLedger ────────────────────────────────────────────────────

/// In-memory ledger for tests and single-process embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryLedger {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueLedger for MemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn range_scan<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn Iterator<Item = ScanEntry> + 'a>, LedgerError> {
        let bounds = range_bounds(start, end);
        Ok(Box::new(
            self.entries
                .range(bounds)
                .map(|(k, v)| (k.clone(), v.clone())),
        ))
    }
}

// ─── FileLedger ──────────────────────────────────────────────────────

/// JSON-file-backed ledger so CLI invocations share process state.
///
/// Values in this stack are canonical JSON, so the file stores them as
/// UTF-8 strings and stays readable with ordinary tools. Every `put`
/// writes the file through; a half-written file is avoided by writing to
/// a sibling temp path and renaming over the target.
#[derive(Debug)]
pub struct FileLedger {
    path: PathBuf,
    entries: BTreeMap<String, Vec<u8>>,
}

impl FileLedger {
    /// Open the ledger at `path`, loading existing entries if the file
    /// exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            let decoded: BTreeMap<String, String> = serde_json::from_str(&raw)
                .map_err(|e| LedgerError::Codec(format!("ledger file {}: {e}", path.display())))?;
            decoded
                .into_iter()
                .map(|(k, v)| (k, v.into_bytes()))
                .collect()
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    /// The backing file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn persist(&self) -> Result<(), LedgerError> {
        let mut encoded = BTreeMap::new();
        for (k, v) in &self.entries {
            let s = std::str::from_utf8(v).map_err(|_| {
                LedgerError::Codec(format!("value under key {k:?} is not UTF-8"))
            })?;
            encoded.insert(k.clone(), s.to_string());
        }
        let raw = serde_json::to_string_pretty(&encoded)
            .map_err(|e| LedgerError::Codec(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, raw)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueLedger for FileLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.entries.insert(key.to_string(), value);
        self.persist()
    }

    fn range_scan<'a>(
        &'a self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn Iterator<Item = ScanEntry> + 'a>, LedgerError> {
        let bounds = range_bounds(start, end);
        Ok(Box::new(
            self.entries
                .range(bounds)
                .map(|(k, v)| (k.clone(), v.clone())),
        ))
    }
}
