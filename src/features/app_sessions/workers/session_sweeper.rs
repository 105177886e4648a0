use std::sync::Arc;

use tokio::time::interval;

use crate::features::app_sessions::registry::AppSessionRegistry;

/// Background worker expiring idle app sessions, the server-side counterpart
/// of closing the browser tab
pub struct SessionSweeper {
    registry: Arc<AppSessionRegistry>,
}

impl SessionSweeper {
    pub fn new(registry: Arc<AppSessionRegistry>) -> Self {
        Self { registry }
    }

    /// Run the sweeper in a background loop
    pub async fn run(&self) {
        let every = self.registry.config().sweep_interval;
        tracing::info!("Starting session sweeper (every {:?})", every);

        let mut interval = interval(every);
        loop {
            interval.tick().await;
            self.sweep_once().await;
        }
    }

    pub async fn sweep_once(&self) -> usize {
        let removed = self.registry.sweep_idle().await;
        if removed > 0 {
            tracing::info!(
                "Expired {} idle app sessions, {} remaining",
                removed,
                self.registry.len().await
            );
        }
        removed
    }
}
