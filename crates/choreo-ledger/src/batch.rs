//! # Staged Write Batches
//!
//! A single `advance` call can mutate several elements: the element
//! itself, the variables record, and every propagation target. The host
//! substrate only guarantees whatever per-invocation atomicity it has; if
//! a later write fails, earlier writes must not have become visible.
//!
//! [`LedgerBatch`] gives the engine that all-or-nothing behavior: writes
//! stage in the batch, reads see staged values first (an invocation must
//! observe its own writes while auto-advancing downstream elements), and
//! [`LedgerBatch::commit()`] applies everything at once. Dropping the
//! batch without committing discards every staged write.

use std::collections::BTreeMap;

use crate::error::LedgerError;
use crate::kv::{KeyValueLedger, ScanEntry};

/// A write overlay on top of a base ledger.
///
/// Implements [`KeyValueLedger`] itself, so typed stores work the same
/// over a batch as over a bare ledger.
#[derive(Debug)]
pub struct LedgerBatch<'a, L: KeyValueLedger> {
    base: &'a mut L,
    staged: BTreeMap<String, Vec<u8>>,
}

impl<'a, L: KeyValueLedger> LedgerBatch<'a, L> {
    /// Start a new batch over `base`.
    pub fn new(base: &'a mut L) -> Self {
        Self {
            base,
            staged: BTreeMap::new(),
        }
    }

    /// Number of staged writes.
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }

    /// Apply every staged write to the base ledger, in key order.
    ///
    /// Consumes the batch. If the base ledger fails partway through, the
    /// substrate's own per-invocation guarantees decide visibility — the
    /// engine surfaces the error and the caller must re-check state.
    pub fn commit(self) -> Result<(), LedgerError> {
        for (key, value) in self.staged {
            self.base.put(&key, value)?;
        }
        Ok(())
    }
}

impl<L: KeyValueLedger> KeyValueLedger for LedgerBatch<'_, L> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        if let Some(v) = self.staged.get(key) {
            return Ok(Some(v.clone()));
        }
        self.base.get(key)
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.staged.insert(key.to_string(), value);
        Ok(())
    }

    fn range_scan<'s>(
        &'s self,
        start: &str,
        end: &str,
    ) -> Result<Box<dyn Iterator<Item = ScanEntry> + 's>, LedgerError> {
        // Merge base and staged views; staged wins on key collision.
        let mut merged: BTreeMap<String, Vec<u8>> =
            self.base.range_scan(start, end)?.collect();
        for (k, v) in &self.staged {
            let in_lo = start.is_empty() || k.as_str() >= start;
            let in_hi = end.is_empty() || k.as_str() < end;
            if in_lo && in_hi {
                merged.insert(k.clone(), v.clone());
            }
        }
        Ok(Box::new(merged.into_iter()))
    }
}
