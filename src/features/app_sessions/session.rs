use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::core::error::{AppError, Result};
use crate::features::analysis::models::PriorityData;
use crate::features::auth::session_store::AuthSessionStore;
use crate::features::chatbot::models::ChatMessage;
use crate::features::map::services::MapSession;
use crate::features::simulation::models::SimulationResult;
use crate::modules::backend::{BackendAuth, BackendResult};
use crate::shared::constants::CHAT_HISTORY_LIMIT;

/// Dashboard results kept for export and the assistant. Never persisted.
#[derive(Debug, Default)]
pub struct Workspace {
    pub last_simulation: Option<SimulationResult>,
    pub last_priority: Option<PriorityData>,
    chat_history: VecDeque<ChatMessage>,
}

impl Workspace {
    pub fn push_chat(&mut self, message: ChatMessage) {
        self.chat_history.push_back(message);
        while self.chat_history.len() > CHAT_HISTORY_LIMIT {
            self.chat_history.pop_front();
        }
    }

    pub fn clear_chat(&mut self) {
        self.chat_history.clear();
    }

    pub fn chat_history(&self) -> Vec<ChatMessage> {
        self.chat_history.iter().cloned().collect()
    }
}

/// Everything the service holds on behalf of one browser
pub struct AppSession {
    id: String,
    pub auth: Arc<AuthSessionStore>,
    pub map: MapSession,
    workspace: RwLock<Workspace>,
    simulation_running: AtomicBool,
    last_seen: std::sync::Mutex<Instant>,
}

impl AppSession {
    pub fn new(id: String, auth: Arc<AuthSessionStore>, map: MapSession) -> Self {
        Self {
            id,
            auth,
            map,
            workspace: RwLock::new(Workspace::default()),
            simulation_running: AtomicBool::new(false),
            last_seen: std::sync::Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn touch(&self) {
        if let Ok(mut last_seen) = self.last_seen.lock() {
            *last_seen = Instant::now();
        }
    }

    pub fn idle_for(&self) -> Duration {
        self.last_seen
            .lock()
            .map(|last_seen| last_seen.elapsed())
            .unwrap_or_default()
    }

    /// Token and backend cookies to present on this session's behalf
    pub async fn credentials(&self) -> BackendAuth {
        self.auth.credentials().await
    }

    /// Convert a backend result made on behalf of this session, signing the
    /// session out when the backend rejected its credentials
    pub async fn observe<T>(&self, result: BackendResult<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                if e.is_unauthorized() {
                    self.auth.invalidate().await;
                }
                Err(AppError::from(e))
            }
        }
    }

    pub async fn workspace(&self) -> tokio::sync::RwLockReadGuard<'_, Workspace> {
        self.workspace.read().await
    }

    pub async fn workspace_mut(&self) -> tokio::sync::RwLockWriteGuard<'_, Workspace> {
        self.workspace.write().await
    }

    /// Forget the map and dashboard results, e.g. after sign-out
    pub async fn reset(&self) {
        self.map.clear().await;
        *self.workspace.write().await = Workspace::default();
    }

    /// Claim the session's single simulation slot
    pub fn begin_simulation(&self) -> Result<SimulationPermit<'_>> {
        self.simulation_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| {
                AppError::Conflict("A simulation is already running for this session".to_string())
            })?;
        Ok(SimulationPermit {
            flag: &self.simulation_running,
        })
    }

    pub fn simulation_running(&self) -> bool {
        self.simulation_running.load(Ordering::SeqCst)
    }
}

/// Releases the simulation slot when dropped
pub struct SimulationPermit<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SimulationPermit<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
