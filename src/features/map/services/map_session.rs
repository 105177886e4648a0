use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{watch, RwLock};
use utoipa::ToSchema;

use crate::features::auth::session_store::AuthSessionStore;
use crate::features::map::debounce::Debouncer;
use crate::features::map::loader::{FacilityLoader, FacilitySource, LoadOutcome};
use crate::features::map::models::{BoundingBox, Facility, FacilityType};

/// Progress of facility loading as shown next to the map
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Failed { message: String },
}

/// Runs resolution passes; shared with the debounced jobs
struct PassRunner {
    loader: FacilityLoader,
    auth: Arc<AuthSessionStore>,
    status: watch::Sender<LoadStatus>,
    in_flight: AtomicUsize,
}

impl PassRunner {
    async fn run(&self, bounds: BoundingBox) -> LoadOutcome {
        if bounds.is_finite() {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            self.status.send_replace(LoadStatus::Loading);
        }

        let credentials = self.auth.credentials().await;
        let outcome = self.loader.resolve(bounds, &credentials).await;

        if matches!(outcome, LoadOutcome::Skipped) {
            return outcome;
        }
        let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;

        match &outcome {
            LoadOutcome::SearchFailed(e) => {
                if e.is_unauthorized() {
                    self.auth.invalidate().await;
                }
                self.status.send_replace(LoadStatus::Failed {
                    message: format!("Failed to load facilities: {}", e),
                });
            }
            LoadOutcome::Applied { unauthorized, .. } => {
                if *unauthorized {
                    self.auth.invalidate().await;
                }
                if remaining == 0 {
                    self.status.send_replace(LoadStatus::Ready);
                }
            }
            LoadOutcome::NoRegions => {
                if remaining == 0 {
                    self.status.send_replace(LoadStatus::Ready);
                }
            }
            LoadOutcome::Stale => {
                // A newer pass already reported; only settle a dangling spinner
                self.status.send_if_modified(|status| {
                    if remaining == 0 && *status == LoadStatus::Loading {
                        *status = LoadStatus::Ready;
                        true
                    } else {
                        false
                    }
                });
            }
            LoadOutcome::Skipped => {}
        }

        outcome
    }
}

/// One browser's map: latest viewport, debounced loading and the markers
/// accumulated so far
pub struct MapSession {
    runner: Arc<PassRunner>,
    debouncer: Debouncer,
    bounds: RwLock<Option<BoundingBox>>,
}

impl MapSession {
    pub fn new(
        source: Arc<dyn FacilitySource>,
        auth: Arc<AuthSessionStore>,
        debounce: Duration,
    ) -> Self {
        let (status, _) = watch::channel(LoadStatus::Idle);
        Self {
            runner: Arc::new(PassRunner {
                loader: FacilityLoader::new(source),
                auth,
                status,
                in_flight: AtomicUsize::new(0),
            }),
            debouncer: Debouncer::new(debounce),
            bounds: RwLock::new(None),
        }
    }

    /// Record a map move and load facilities once the map settles
    pub async fn record_viewport(&self, bounds: BoundingBox) {
        *self.bounds.write().await = Some(bounds);
        tracing::debug!(
            "Viewport recorded, loading in {:?} unless the map moves again",
            self.debouncer.window()
        );

        let runner = self.runner.clone();
        self.debouncer
            .schedule(async move {
                runner.run(bounds).await;
            })
            .await;
    }

    /// Load facilities for `bounds` right away, replacing any pending move
    pub async fn resolve_now(&self, bounds: BoundingBox) -> LoadOutcome {
        *self.bounds.write().await = Some(bounds);
        self.debouncer.cancel().await;
        self.runner.run(bounds).await
    }

    /// Clear Map: forget markers and loaded regencies
    pub async fn clear(&self) {
        self.debouncer.cancel().await;
        self.runner.loader.clear().await;
        self.runner.status.send_replace(LoadStatus::Idle);
    }

    /// Markers, optionally restricted to a set of enabled facility types
    pub async fn facilities(&self, enabled: Option<&BTreeSet<FacilityType>>) -> Vec<Facility> {
        let facilities = self.runner.loader.facilities().await;
        match enabled {
            Some(types) => facilities
                .into_iter()
                .filter(|f| types.contains(&f.facility_type))
                .collect(),
            None => facilities,
        }
    }

    pub async fn loaded_regions(&self) -> BTreeSet<String> {
        self.runner.loader.loaded_regions().await
    }

    pub async fn bounds(&self) -> Option<BoundingBox> {
        *self.bounds.read().await
    }

    pub fn status(&self) -> LoadStatus {
        self.runner.status.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<LoadStatus> {
        self.runner.status.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::map::models::Coordinate;
    use crate::features::auth::dtos::LoginRequestDto;
    use crate::features::auth::model::AuthPayload;
    use crate::modules::backend::BackendError;
    use crate::shared::test_helpers::{
        facility_at, region, sample_user, FakeAuthGateway, FakeFacilitySource,
    };
    use serde_json::json;

    const WINDOW: Duration = Duration::from_millis(400);

    fn bounds() -> BoundingBox {
        BoundingBox::new(Coordinate::new(-6.80, 107.70), Coordinate::new(-6.95, 107.55))
    }

    async fn session(source: &Arc<FakeFacilitySource>) -> (MapSession, Arc<AuthSessionStore>) {
        let gateway = Arc::new(FakeAuthGateway::signed_in(sample_user()));
        let auth = Arc::new(AuthSessionStore::new(
            gateway,
            "http://localhost:3000/auth/callback".to_string(),
        ));
        auth.refresh().await;
        (MapSession::new(source.clone(), auth.clone(), WINDOW), auth)
    }

    fn seeded_source() -> Arc<FakeFacilitySource> {
        let source = Arc::new(FakeFacilitySource::default());
        source.set_regions(vec![region("R1", "regency", None)]);
        source.set_facilities(
            "R1",
            vec![
                facility_at("h", "R1", -6.90, 107.60),
                {
                    let mut clinic = facility_at("c", "R1", -6.91, 107.61);
                    clinic.facility_type = FacilityType::Clinic;
                    clinic
                },
            ],
        );
        source
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_moves_trigger_one_search() {
        let source = seeded_source();
        let (map, _) = session(&source).await;

        let mut last = bounds();
        for i in 0..5 {
            last = bounds();
            last.north_east.lat += 0.001 * i as f64;
            map.record_viewport(last).await;
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(source.search_calls(), 0);
        assert_eq!(map.bounds().await, Some(last));

        tokio::time::sleep(WINDOW).await;
        tokio::task::yield_now().await;

        assert_eq!(source.search_calls(), 1);
        assert_eq!(map.status(), LoadStatus::Ready);
        assert_eq!(map.facilities(None).await.len(), 2);
    }

    #[tokio::test]
    async fn test_status_subscribers_see_the_pass_settle() {
        let source = seeded_source();
        let (map, _) = session(&source).await;
        let mut status = map.subscribe_status();
        assert_eq!(*status.borrow(), LoadStatus::Idle);

        map.record_viewport(bounds()).await;
        let settled = tokio::time::timeout(
            Duration::from_secs(5),
            status.wait_for(|s| *s == LoadStatus::Ready),
        )
        .await;

        assert!(matches!(settled, Ok(Ok(_))));
        assert_eq!(source.search_calls(), 1);
    }

    #[tokio::test]
    async fn test_type_filter() {
        let source = seeded_source();
        let (map, _) = session(&source).await;
        map.resolve_now(bounds()).await;

        let clinics = map
            .facilities(Some(&BTreeSet::from([FacilityType::Clinic])))
            .await;
        assert_eq!(clinics.len(), 1);
        assert_eq!(clinics[0].id, "c");
        assert!(map.facilities(Some(&BTreeSet::new())).await.is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_search_signs_session_out() {
        let source = seeded_source();
        let (map, auth) = session(&source).await;
        assert!(auth.snapshot().is_authenticated());

        source.set_search_error(Some(BackendError::from_response(
            401,
            "Unauthorized",
            &json!({"message": "Token expired"}),
        )));
        let outcome = map.resolve_now(bounds()).await;

        assert!(matches!(outcome, LoadOutcome::SearchFailed(_)));
        assert!(!auth.snapshot().is_authenticated());
        assert!(matches!(map.status(), LoadStatus::Failed { message } if message.contains("Token expired")));
    }

    #[tokio::test]
    async fn test_unauthorized_facility_fetch_signs_session_out() {
        let source = seeded_source();
        let (map, auth) = session(&source).await;
        assert!(auth.snapshot().is_authenticated());

        source.set_regency_error(
            "R1",
            Some(BackendError::from_response(
                401,
                "Unauthorized",
                &json!({"message": "Token expired"}),
            )),
        );
        let outcome = map.resolve_now(bounds()).await;

        assert!(matches!(
            outcome,
            LoadOutcome::Applied {
                unauthorized: true,
                ..
            }
        ));
        assert!(!auth.snapshot().is_authenticated());
        assert!(map.facilities(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_token_is_forwarded_to_source() {
        let source = seeded_source();
        let gateway = Arc::new(FakeAuthGateway::signed_in(sample_user()));
        gateway.set_auth_result(Ok(AuthPayload {
            user: Some(sample_user()),
            token: Some("tok-7".to_string()),
            expires_at: None,
        }));
        let auth = Arc::new(AuthSessionStore::new(gateway, String::new()));
        auth.login(LoginRequestDto {
            email: "dewi@example.com".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap();
        let map = MapSession::new(source.clone(), auth, WINDOW);

        map.resolve_now(bounds()).await;

        assert_eq!(source.last_token().as_deref(), Some("tok-7"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_pending_move() {
        let source = seeded_source();
        let (map, _) = session(&source).await;
        map.resolve_now(bounds()).await;

        map.record_viewport(bounds()).await;
        map.clear().await;
        tokio::time::sleep(WINDOW * 2).await;

        assert_eq!(source.search_calls(), 1);
        assert_eq!(map.status(), LoadStatus::Idle);
        assert!(map.facilities(None).await.is_empty());
        assert!(map.loaded_regions().await.is_empty());
    }
}
