//! Bounding-box facility loader.
//!
//! Resolves a viewport to the regencies overlapping it, fetches facilities
//! for regencies not loaded yet and merges the results into the session's
//! marker list. The loaded-region set only grows after a regency's
//! facilities arrived, so a failed regency is retried by the next pass.
//!
//! Every pass takes a sequence number when it starts. A pass is applied
//! only if no later pass has been applied before it and no Clear Map
//! happened since it started; otherwise its results are dropped.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::Mutex;

use crate::features::map::models::{BoundingBox, Facility};
use crate::features::regions::models::RegionSearchResult;
use crate::modules::backend::{BackendAuth, BackendError, BackendResult};

/// Region search and per-regency facility lookup
#[async_trait]
pub trait FacilitySource: Send + Sync {
    async fn search_by_bounding_box(
        &self,
        bounds: &BoundingBox,
        auth: &BackendAuth,
    ) -> BackendResult<RegionSearchResult>;

    /// Facilities of one regency, already normalised
    async fn regency_facilities(
        &self,
        regency_id: &str,
        auth: &BackendAuth,
    ) -> BackendResult<Vec<Facility>>;
}

/// What a single resolution pass did
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// Viewport had a non-finite corner; nothing was requested
    Skipped,
    /// Region search failed; state unchanged
    SearchFailed(BackendError),
    /// Viewport resolved to no regency
    NoRegions,
    Applied {
        /// Regencies fetched by this pass
        fetched: Vec<String>,
        /// Regencies whose fetch failed (left out of the loaded set)
        failed: Vec<String>,
        /// Facilities from this pass that fell inside the viewport
        added: usize,
        /// Some regency fetch was rejected as unauthenticated
        unauthorized: bool,
    },
    /// A newer pass or a Clear Map overtook this one; results dropped
    Stale,
}

#[derive(Debug, Default)]
struct LoaderState {
    facilities: Vec<Facility>,
    loaded: BTreeSet<String>,
    last_applied: u64,
    generation: u64,
}

pub struct FacilityLoader {
    source: Arc<dyn FacilitySource>,
    state: Mutex<LoaderState>,
    next_seq: AtomicU64,
}

impl FacilityLoader {
    pub fn new(source: Arc<dyn FacilitySource>) -> Self {
        Self {
            source,
            state: Mutex::new(LoaderState::default()),
            next_seq: AtomicU64::new(0),
        }
    }

    pub async fn facilities(&self) -> Vec<Facility> {
        self.state.lock().await.facilities.clone()
    }

    pub async fn loaded_regions(&self) -> BTreeSet<String> {
        self.state.lock().await.loaded.clone()
    }

    /// Forget every loaded facility and regency. Passes still in flight are
    /// discarded when they complete.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.facilities.clear();
        state.loaded.clear();
        state.generation += 1;
        tracing::debug!("Map cleared (generation {})", state.generation);
    }

    pub async fn resolve(&self, bounds: BoundingBox, auth: &BackendAuth) -> LoadOutcome {
        if !bounds.is_finite() {
            tracing::debug!("Ignoring viewport with non-finite corners: {:?}", bounds);
            return LoadOutcome::Skipped;
        }

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let (generation, already_loaded) = {
            let state = self.state.lock().await;
            (state.generation, state.loaded.clone())
        };

        let search = match self.source.search_by_bounding_box(&bounds, auth).await {
            Ok(search) => search,
            Err(e) => {
                tracing::warn!("Region search for viewport failed: {}", e);
                return LoadOutcome::SearchFailed(e);
            }
        };

        let candidates = search.candidate_regencies();
        if candidates.is_empty() {
            tracing::debug!("Viewport pass {} resolved to no regencies", seq);
            return LoadOutcome::NoRegions;
        }

        let to_fetch: Vec<String> = candidates.difference(&already_loaded).cloned().collect();

        let results = join_all(to_fetch.iter().map(|regency_id| async move {
            let result = self.source.regency_facilities(regency_id, auth).await;
            (regency_id.clone(), result)
        }))
        .await;

        let mut fetched = Vec::new();
        let mut failed = Vec::new();
        let mut unauthorized = false;
        let mut incoming = Vec::new();
        for (regency_id, result) in results {
            match result {
                Ok(facilities) => {
                    incoming.extend(
                        facilities
                            .into_iter()
                            .filter(|f| bounds.contains(&f.coordinate())),
                    );
                    fetched.push(regency_id);
                }
                Err(e) => {
                    tracing::warn!("Failed to load facilities for regency {}: {}", regency_id, e);
                    unauthorized |= e.is_unauthorized();
                    failed.push(regency_id);
                }
            }
        }

        let mut state = self.state.lock().await;
        if state.generation != generation || seq < state.last_applied {
            tracing::debug!(
                "Discarding viewport pass {} (last applied {}, generation {} -> {})",
                seq,
                state.last_applied,
                generation,
                state.generation
            );
            return LoadOutcome::Stale;
        }

        state.last_applied = seq;
        let added = incoming.len();
        state
            .facilities
            .retain(|f| !fetched.contains(&f.regency_id));
        state.facilities.extend(incoming);
        state.loaded.extend(fetched.iter().cloned());

        tracing::debug!(
            "Viewport pass {} loaded {} regencies ({} failed), {} facilities in view",
            seq,
            fetched.len(),
            failed.len(),
            added
        );

        LoadOutcome::Applied {
            fetched,
            failed,
            added,
            unauthorized,
        }
    }
}
