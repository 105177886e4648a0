use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::config::SessionConfig;
use crate::features::app_sessions::session::AppSession;
use crate::features::auth::clients::AuthGateway;
use crate::features::auth::session_store::AuthSessionStore;
use crate::features::map::loader::FacilitySource;
use crate::features::map::services::MapSession;

/// What a new app session is wired to
#[derive(Clone)]
pub struct SessionDeps {
    pub auth_gateway: Arc<dyn AuthGateway>,
    pub facility_source: Arc<dyn FacilitySource>,
    pub map_debounce: Duration,
    /// OAuth redirect target on the web app
    pub callback_url: String,
}

/// In-memory app sessions keyed by the session cookie
pub struct AppSessionRegistry {
    sessions: RwLock<HashMap<String, Arc<AppSession>>>,
    deps: SessionDeps,
    config: SessionConfig,
}

impl AppSessionRegistry {
    pub fn new(deps: SessionDeps, config: SessionConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            deps,
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Session for a cookie value, or a fresh one when it is missing or unknown.
    /// The flag tells whether a new session was created. At capacity, idle
    /// sessions are swept and then the longest idle ones evicted.
    pub async fn get_or_create(&self, id: Option<&str>) -> (Arc<AppSession>, bool) {
        if let Some(id) = id {
            if let Some(session) = self.sessions.read().await.get(id) {
                return (session.clone(), false);
            }
        }

        let session = Arc::new(self.build(Uuid::new_v4().to_string()));
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.config.max_sessions {
            let ttl = self.config.idle_ttl;
            sessions.retain(|_, session| session.idle_for() <= ttl);
        }
        while sessions.len() >= self.config.max_sessions.max(1) {
            let Some(oldest) = sessions
                .iter()
                .max_by_key(|(_, session)| session.idle_for())
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            sessions.remove(&oldest);
            tracing::warn!(
                "App session limit {} reached, evicted session {}",
                self.config.max_sessions,
                oldest
            );
        }
        sessions.insert(session.id().to_string(), session.clone());
        drop(sessions);

        tracing::debug!("Created app session {}", session.id());
        (session, true)
    }

    pub async fn get(&self, id: &str) -> Option<Arc<AppSession>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Drop sessions idle for longer than the configured TTL. Returns how many
    /// were removed.
    pub async fn sweep_idle(&self) -> usize {
        let ttl = self.config.idle_ttl;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.idle_for() <= ttl);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn build(&self, id: String) -> AppSession {
        let auth = Arc::new(AuthSessionStore::new(
            self.deps.auth_gateway.clone(),
            self.deps.callback_url.clone(),
        ));
        let map = MapSession::new(
            self.deps.facility_source.clone(),
            auth.clone(),
            self.deps.map_debounce,
        );
        AppSession::new(id, auth, map)
    }
}
