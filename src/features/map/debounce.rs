use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Cancel-and-reschedule timer. Only the last job scheduled within a quiet
/// window runs. Once a job has been dispatched it runs to completion on its
/// own task; later schedules no longer affect it.
pub struct Debouncer {
    window: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(None),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub async fn schedule<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Spawn under the lock so the stored timer is always the newest one
        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let window = self.window;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // Detach so aborting a later timer cannot cancel this job
            tokio::spawn(job);
        }));
    }

    /// Drop the pending job, if its window has not elapsed yet
    pub async fn cancel(&self) {
        if let Some(previous) = self.pending.lock().await.take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.get_mut().take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex as StdMutex};

    type Runs = Arc<StdMutex<Vec<u32>>>;

    fn record(runs: &Runs, n: u32) -> impl Future<Output = ()> + Send + 'static {
        let runs = runs.clone();
        async move {
            runs.lock().unwrap().push(n);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_event_in_window_runs() {
        let debouncer = Debouncer::new(Duration::from_millis(400));
        let runs = Runs::default();

        debouncer.schedule(record(&runs, 1)).await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(record(&runs, 2)).await;
        tokio::time::sleep(Duration::from_millis(300)).await;
        debouncer.schedule(record(&runs, 3)).await;

        tokio::time::sleep(Duration::from_millis(399)).await;
        assert!(runs.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(*runs.lock().unwrap(), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_further_apart_than_window_each_run() {
        let debouncer = Debouncer::new(Duration::from_millis(400));
        let runs = Runs::default();

        debouncer.schedule(record(&runs, 1)).await;
        tokio::time::sleep(Duration::from_millis(450)).await;
        debouncer.schedule(record(&runs, 2)).await;
        tokio::time::sleep(Duration::from_millis(450)).await;
        tokio::task::yield_now().await;

        assert_eq!(*runs.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatched_job_is_not_cancelled() {
        let debouncer = Debouncer::new(Duration::from_millis(400));
        let finished = Arc::new(AtomicUsize::new(0));

        let counter = finished.clone();
        debouncer
            .schedule(async move {
                tokio::time::sleep(Duration::from_millis(1000)).await;
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        // Window elapsed, job is in flight
        tokio::time::sleep(Duration::from_millis(500)).await;
        debouncer.schedule(async {}).await;
        debouncer.cancel().await;

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_schedules_leave_one_timer() {
        let debouncer = Arc::new(Debouncer::new(Duration::from_millis(400)));
        let runs = Runs::default();

        let schedules = (1..=8).map(|n| {
            let debouncer = debouncer.clone();
            let job = record(&runs, n);
            tokio::spawn(async move { debouncer.schedule(job).await })
        });
        for schedule in futures::future::join_all(schedules).await {
            schedule.unwrap();
        }

        tokio::time::sleep(Duration::from_millis(1000)).await;
        tokio::task::yield_now().await;
        assert_eq!(runs.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_job() {
        let debouncer = Debouncer::new(Duration::from_millis(400));
        let runs = Runs::default();

        debouncer.schedule(record(&runs, 1)).await;
        debouncer.cancel().await;
        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert!(runs.lock().unwrap().is_empty());
    }
}
