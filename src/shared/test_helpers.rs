//! Fixtures shared by unit tests: a mock planning backend, fake auth and
//! facility sources, and pre-wired app sessions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use serde_json::json;
use uuid::Uuid;

use crate::core::config::{BackendConfig, SessionConfig};
use crate::core::middleware::{app_session_middleware, auth_middleware};
use crate::features::app_sessions::{AppSession, AppSessionRegistry, SessionDeps};
use crate::features::auth::clients::AuthGateway;
use crate::features::auth::dtos::{LoginRequestDto, RegisterRequestDto};
use crate::features::auth::model::{AuthPayload, SessionUser};
use crate::features::auth::session_store::AuthSessionStore;
use crate::features::map::loader::FacilitySource;
use crate::features::map::models::{BoundingBox, Facility, FacilityType};
use crate::features::map::services::MapSession;
use crate::features::regions::models::{RegionKind, RegionRef, RegionSearchResult};
use crate::modules::backend::{BackendAuth, BackendError, BackendResult};

pub const TEST_DEBOUNCE: Duration = Duration::from_millis(400);

// ==================== Mock planning backend ====================

/// Serve `router` on an ephemeral local port and return its base URL
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn backend_config(base: &str) -> BackendConfig {
    BackendConfig {
        api_base_url: base.to_string(),
        api_version: "v1".to_string(),
        request_timeout: Duration::from_secs(5),
    }
}

pub fn unauthorized() -> BackendError {
    BackendError::from_response(401, "Unauthorized", &json!({"message": "Not authenticated"}))
}

// ==================== Fixtures ====================

pub fn sample_user() -> SessionUser {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    SessionUser {
        id: Uuid::new_v4().to_string(),
        email: SafeEmail().fake(),
        name: Some(format!("{} {}", first, last)),
        provider: Some("password".to_string()),
        is_active: true,
        first_name: Some(first),
        last_name: Some(last),
        username: Some(Username().fake()),
        avatar: None,
    }
}

/// A hospital of regency `regency_id` at the given position
pub fn facility_at(id: &str, regency_id: &str, lat: f64, lng: f64) -> Facility {
    Facility {
        id: id.to_string(),
        name: format!("Facility {}", id),
        facility_type: FacilityType::Hospital,
        latitude: lat,
        longitude: lng,
        regency_id: regency_id.to_string(),
        regency_name: None,
        sub_district_id: None,
        sub_district_name: None,
    }
}

pub fn region(id: &str, kind: &str, parent_id: Option<&str>) -> RegionRef {
    RegionRef {
        id: id.to_string(),
        name: format!("Region {}", id),
        kind: RegionKind::parse(kind).unwrap(),
        parent_id: parent_id.map(str::to_string),
    }
}

// ==================== Fake auth gateway ====================

struct FakeAuthState {
    current_user: BackendResult<SessionUser>,
    auth_result: BackendResult<AuthPayload>,
    logout_result: BackendResult<()>,
    calls: Vec<String>,
    last_token: Option<String>,
}

/// Scriptable `AuthGateway` that records every call
pub struct FakeAuthGateway {
    state: Mutex<FakeAuthState>,
}

impl FakeAuthGateway {
    /// `/auth/me` answers with `user`; sign-in calls return `user` without a token
    pub fn signed_in(user: SessionUser) -> Self {
        Self::with(
            Ok(user.clone()),
            Ok(AuthPayload {
                user: Some(user),
                token: None,
                expires_at: None,
            }),
        )
    }

    /// Every credential check fails with 401
    pub fn signed_out() -> Self {
        Self::with(Err(unauthorized()), Err(unauthorized()))
    }

    fn with(
        current_user: BackendResult<SessionUser>,
        auth_result: BackendResult<AuthPayload>,
    ) -> Self {
        Self {
            state: Mutex::new(FakeAuthState {
                current_user,
                auth_result,
                logout_result: Ok(()),
                calls: Vec::new(),
                last_token: None,
            }),
        }
    }

    /// Result of login, register and the OAuth code exchange
    pub fn set_auth_result(&self, result: BackendResult<AuthPayload>) {
        self.state.lock().unwrap().auth_result = result;
    }

    pub fn set_logout_result(&self, result: BackendResult<()>) {
        self.state.lock().unwrap().logout_result = result;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Token passed to the most recent `current_user` call
    pub fn last_token(&self) -> Option<String> {
        self.state.lock().unwrap().last_token.clone()
    }

    fn record(&self, call: &str) -> std::sync::MutexGuard<'_, FakeAuthState> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.to_string());
        state
    }
}

#[async_trait]
impl AuthGateway for FakeAuthGateway {
    async fn current_user(&self, auth: &BackendAuth) -> BackendResult<SessionUser> {
        let mut state = self.record("current_user");
        state.last_token = auth.token().map(str::to_string);
        state.current_user.clone()
    }

    async fn login(
        &self,
        _credentials: &LoginRequestDto,
        _auth: &BackendAuth,
    ) -> BackendResult<AuthPayload> {
        self.record("login").auth_result.clone()
    }

    async fn register(
        &self,
        _form: &RegisterRequestDto,
        _auth: &BackendAuth,
    ) -> BackendResult<AuthPayload> {
        self.record("register").auth_result.clone()
    }

    async fn logout(&self, _auth: &BackendAuth) -> BackendResult<()> {
        self.record("logout").logout_result.clone()
    }

    async fn exchange_google_code(
        &self,
        _code: &str,
        _state: Option<&str>,
        _auth: &BackendAuth,
    ) -> BackendResult<AuthPayload> {
        self.record("exchange_google_code").auth_result.clone()
    }

    fn google_authorization_url(&self, redirect_uri: &str) -> String {
        format!(
            "http://backend.test/api/v1/auth/google?redirect_uri={}",
            urlencoding::encode(redirect_uri)
        )
    }
}

// ==================== Fake facility source ====================

#[derive(Default)]
struct FakeSourceState {
    regions: Vec<RegionRef>,
    facilities: HashMap<String, Vec<Facility>>,
    delays: HashMap<String, Duration>,
    failing: HashMap<String, BackendError>,
    search_error: Option<BackendError>,
    search_calls: usize,
    fetches: HashMap<String, usize>,
    last_token: Option<String>,
}

/// In-memory `FacilitySource`; region search answers with the configured
/// regions whatever the viewport
#[derive(Default)]
pub struct FakeFacilitySource {
    state: Mutex<FakeSourceState>,
}

impl FakeFacilitySource {
    pub fn set_regions(&self, regions: Vec<RegionRef>) {
        self.state.lock().unwrap().regions = regions;
    }

    pub fn set_facilities(&self, regency_id: &str, facilities: Vec<Facility>) {
        self.state
            .lock()
            .unwrap()
            .facilities
            .insert(regency_id.to_string(), facilities);
    }

    /// Delay the facility fetch of one regency
    pub fn set_delay(&self, regency_id: &str, delay: Duration) {
        self.state
            .lock()
            .unwrap()
            .delays
            .insert(regency_id.to_string(), delay);
    }

    pub fn fail_regency(&self, regency_id: &str, fail: bool) {
        self.set_regency_error(
            regency_id,
            fail.then(|| {
                BackendError::from_response(
                    500,
                    "Internal Server Error",
                    &json!({"message": "facility lookup failed"}),
                )
            }),
        );
    }

    pub fn set_regency_error(&self, regency_id: &str, error: Option<BackendError>) {
        let mut state = self.state.lock().unwrap();
        match error {
            Some(e) => state.failing.insert(regency_id.to_string(), e),
            None => state.failing.remove(regency_id),
        };
    }

    pub fn fail_search(&self, fail: bool) {
        self.set_search_error(fail.then(|| BackendError::Transport("connection reset".to_string())));
    }

    pub fn set_search_error(&self, error: Option<BackendError>) {
        self.state.lock().unwrap().search_error = error;
    }

    pub fn search_calls(&self) -> usize {
        self.state.lock().unwrap().search_calls
    }

    pub fn facility_fetches(&self, regency_id: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .fetches
            .get(regency_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn last_token(&self) -> Option<String> {
        self.state.lock().unwrap().last_token.clone()
    }
}

#[async_trait]
impl FacilitySource for FakeFacilitySource {
    async fn search_by_bounding_box(
        &self,
        _bounds: &BoundingBox,
        auth: &BackendAuth,
    ) -> BackendResult<RegionSearchResult> {
        let mut state = self.state.lock().unwrap();
        state.search_calls += 1;
        state.last_token = auth.token().map(str::to_string);
        match &state.search_error {
            Some(e) => Err(e.clone()),
            None => Ok(RegionSearchResult {
                primary_region: None,
                regions: state.regions.clone(),
            }),
        }
    }

    async fn regency_facilities(
        &self,
        regency_id: &str,
        _auth: &BackendAuth,
    ) -> BackendResult<Vec<Facility>> {
        let delay = {
            let mut state = self.state.lock().unwrap();
            *state.fetches.entry(regency_id.to_string()).or_default() += 1;
            state.delays.get(regency_id).copied()
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.state.lock().unwrap();
        if let Some(e) = state.failing.get(regency_id) {
            return Err(e.clone());
        }
        Ok(state.facilities.get(regency_id).cloned().unwrap_or_default())
    }
}

// ==================== App sessions ====================

pub fn test_session_config() -> SessionConfig {
    SessionConfig {
        cookie_name: "cliva_session".to_string(),
        cookie_secure: false,
        idle_ttl: Duration::from_secs(3600),
        sweep_interval: Duration::from_secs(60),
        max_sessions: 100,
    }
}

pub fn test_deps(gateway: Arc<FakeAuthGateway>, source: Arc<FakeFacilitySource>) -> SessionDeps {
    SessionDeps {
        auth_gateway: gateway,
        facility_source: source,
        map_debounce: TEST_DEBOUNCE,
        callback_url: "http://localhost:3000/auth/callback".to_string(),
    }
}

pub fn test_registry(gateway: Arc<FakeAuthGateway>) -> AppSessionRegistry {
    test_registry_with(gateway, Arc::new(FakeFacilitySource::default()))
}

pub fn test_registry_with(
    gateway: Arc<FakeAuthGateway>,
    source: Arc<FakeFacilitySource>,
) -> AppSessionRegistry {
    AppSessionRegistry::new(test_deps(gateway, source), test_session_config())
}

/// A standalone app session, not registered anywhere
pub fn test_app_session(gateway: Arc<FakeAuthGateway>) -> Arc<AppSession> {
    let auth = Arc::new(AuthSessionStore::new(
        gateway,
        "http://localhost:3000/auth/callback".to_string(),
    ));
    let map = MapSession::new(
        Arc::new(FakeFacilitySource::default()),
        auth.clone(),
        TEST_DEBOUNCE,
    );
    Arc::new(AppSession::new(Uuid::new_v4().to_string(), auth, map))
}

/// Serve feature routes behind the auth guard and the session middleware,
/// keeping the session cookie between requests
pub fn protected_server(routes: Router, registry: Arc<AppSessionRegistry>) -> TestServer {
    let app = routes
        .route_layer(axum::middleware::from_fn(auth_middleware))
        .layer(axum::middleware::from_fn_with_state(
            registry,
            app_session_middleware,
        ));
    let mut server = TestServer::new(app).unwrap();
    server.save_cookies();
    server
}
