//! Result cache keyed by the content of both input tables.

use tracing::debug;

use super::engine::compare;
use crate::error::Result;
use crate::models::report::Report;
use crate::models::table::{ContentHash, Table};

/// Identity of one (base, comparer) input pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub base: ContentHash,
    pub comparer: ContentHash,
}

impl CacheKey {
    pub fn of(base: &Table, comparer: &Table) -> Self {
        Self {
            base: base.content_hash(),
            comparer: comparer.content_hash(),
        }
    }
}

/// Holds the report for the most recent input pair.
///
/// A lookup with different content for either table replaces the entry.
#[derive(Debug, Default)]
pub struct ReportCache {
    entry: Option<(CacheKey, Report)>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached report for exactly this input pair, if any.
    pub fn get(&self, base: &Table, comparer: &Table) -> Option<&Report> {
        let key = CacheKey::of(base, comparer);
        match &self.entry {
            Some((cached, report)) if *cached == key => Some(report),
            _ => None,
        }
    }

    /// Return the cached report for this pair or compute and store a new one.
    ///
    /// A failed computation leaves the cache empty.
    pub fn get_or_compute<F>(&mut self, base: &Table, comparer: &Table, compute: F) -> Result<&Report>
    where
        F: FnOnce(&Table, &Table) -> Result<Report>,
    {
        let key = CacheKey::of(base, comparer);

        let report = match self.entry.take() {
            Some((cached, report)) if cached == key => {
                debug!("Report cache hit for base {} / comparer {}", key.base, key.comparer);
                report
            }
            _ => compute(base, comparer)?,
        };

        Ok(&self.entry.insert((key, report)).1)
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

/// Comparison session reusing the last report while inputs are unchanged.
#[derive(Debug, Default)]
pub struct Session {
    cache: ReportCache,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for the pair, computed with [`compare`] on a cache miss.
    pub fn report(&mut self, base: &Table, comparer: &Table) -> Result<&Report> {
        self.cache.get_or_compute(base, comparer, compare)
    }

    pub fn cache(&self) -> &ReportCache {
        &self.cache
    }
}
