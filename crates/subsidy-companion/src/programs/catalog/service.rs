use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use super::super::domain::{ProgramRecord, ProgramStats};
use super::super::eligibility::pack::{
    ExportDispatcher, ExportError, ExportReceipt, PackExportRequest,
};
use super::query::{filter_and_sort, CatalogQuery};
use super::source::{CacheKey, FreshnessConfig, ProgramSource, SourceError};
use super::views::{card_view, deadline_view, DeadlineViewModel, ProgramCardView};

/// Service composing the upstream program source, the per-endpoint cache, and
/// the pack export dispatcher.
///
/// Each endpoint caches independently under its [`CacheKey`]. A miss fetches
/// and overwrites the slot; two concurrent misses both fetch and the later
/// write wins. Fetch errors fall back to the last good payload for that key,
/// or to an empty payload when none exists yet.
pub struct CompanionService<S, D> {
    source: Arc<S>,
    dispatcher: Arc<D>,
    freshness: FreshnessConfig,
    slots: Mutex<HashMap<CacheKey, CacheSlot>>,
    failures: Mutex<HashMap<CacheKey, String>>,
}

#[derive(Clone)]
enum CachedPayload {
    Records(Vec<ProgramRecord>),
    Stats(ProgramStats),
}

struct CacheSlot {
    payload: CachedPayload,
    fetched_at: DateTime<Utc>,
}

impl<S, D> CompanionService<S, D>
where
    S: ProgramSource + 'static,
    D: ExportDispatcher + 'static,
{
    pub fn new(source: Arc<S>, dispatcher: Arc<D>, freshness: FreshnessConfig) -> Self {
        Self {
            source,
            dispatcher,
            freshness,
            slots: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Full catalog, served from cache while the programs window is fresh.
    pub fn programs(&self, now: DateTime<Utc>) -> Vec<ProgramRecord> {
        self.resolve_records(CacheKey::Programs, now, || self.source.fetch_programs())
    }

    /// Catalog filtered and sorted per the query, on top of the cached list.
    pub fn browse(&self, query: &CatalogQuery, now: DateTime<Utc>) -> Vec<ProgramRecord> {
        filter_and_sort(&self.programs(now), query)
    }

    pub fn browse_cards(&self, query: &CatalogQuery, now: DateTime<Utc>) -> Vec<ProgramCardView> {
        self.browse(query, now).iter().map(card_view).collect()
    }

    pub fn deadlines_soon(&self, days: u32, now: DateTime<Utc>) -> Vec<ProgramRecord> {
        self.resolve_records(CacheKey::DeadlinesSoon { days }, now, || {
            self.source.fetch_deadlines_soon(days)
        })
    }

    /// Deadline board rows with day counts relative to `now`'s date.
    pub fn deadline_board(&self, days: u32, now: DateTime<Utc>) -> Vec<DeadlineViewModel> {
        let today = now.date_naive();
        self.deadlines_soon(days, now)
            .iter()
            .map(|record| deadline_view(record, today))
            .collect()
    }

    pub fn stats(&self, now: DateTime<Utc>) -> ProgramStats {
        if let Some(CachedPayload::Stats(stats)) = self.fresh_payload(&CacheKey::Stats, now) {
            return stats;
        }

        match self.source.fetch_stats() {
            Ok(stats) => {
                self.store(CacheKey::Stats, CachedPayload::Stats(stats.clone()), now);
                stats
            }
            Err(error) => {
                self.note_failure(CacheKey::Stats, &error);
                match self.stale_payload(&CacheKey::Stats) {
                    Some(CachedPayload::Stats(stats)) => stats,
                    _ => ProgramStats::default(),
                }
            }
        }
    }

    pub fn high_priority(&self, now: DateTime<Utc>) -> Vec<ProgramRecord> {
        self.resolve_records(CacheKey::HighPriority, now, || {
            self.source.fetch_high_priority()
        })
    }

    /// Validate and queue a pack export, returning the acknowledgement.
    pub fn export(&self, request: PackExportRequest) -> Result<ExportReceipt, ExportError> {
        let job = request.into_job()?;
        let receipt = ExportReceipt::for_job(&job);
        self.dispatcher.dispatch(job)?;
        Ok(receipt)
    }

    /// Last fetch error recorded for the key, cleared by the next good fetch.
    pub fn last_failure(&self, key: &CacheKey) -> Option<String> {
        let failures = self.failures.lock().expect("catalog failure mutex poisoned");
        failures.get(key).cloned()
    }

    fn resolve_records(
        &self,
        key: CacheKey,
        now: DateTime<Utc>,
        fetch: impl FnOnce() -> Result<Vec<ProgramRecord>, SourceError>,
    ) -> Vec<ProgramRecord> {
        if let Some(CachedPayload::Records(records)) = self.fresh_payload(&key, now) {
            return records;
        }

        match fetch() {
            Ok(records) => {
                self.store(key, CachedPayload::Records(records.clone()), now);
                records
            }
            Err(error) => {
                self.note_failure(key, &error);
                match self.stale_payload(&key) {
                    Some(CachedPayload::Records(records)) => records,
                    _ => Vec::new(),
                }
            }
        }
    }

    fn fresh_payload(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<CachedPayload> {
        let slots = self.slots.lock().expect("catalog cache mutex poisoned");
        let slot = slots.get(key)?;
        let age = now.signed_duration_since(slot.fetched_at);
        if age < self.freshness.window_for(key) {
            Some(slot.payload.clone())
        } else {
            None
        }
    }

    fn stale_payload(&self, key: &CacheKey) -> Option<CachedPayload> {
        let slots = self.slots.lock().expect("catalog cache mutex poisoned");
        slots.get(key).map(|slot| slot.payload.clone())
    }

    fn store(&self, key: CacheKey, payload: CachedPayload, now: DateTime<Utc>) {
        {
            let mut slots = self.slots.lock().expect("catalog cache mutex poisoned");
            slots.insert(key, CacheSlot { payload, fetched_at: now });
        }

        let mut failures = self.failures.lock().expect("catalog failure mutex poisoned");
        failures.remove(&key);
    }

    fn note_failure(&self, key: CacheKey, error: &SourceError) {
        let mut failures = self.failures.lock().expect("catalog failure mutex poisoned");
        failures.insert(key, error.to_string());
    }
}
