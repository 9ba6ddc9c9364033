//! Deferred publishing
//!
//! A blog created with a future `schedule` stays out of public reads until
//! its marker is cleared. [`PublishScheduler`] keeps one tokio task per blog
//! that sleeps until the scheduled instant and then clears the marker.
//! Scheduling the same blog again replaces the pending job, deleting the blog
//! cancels it, and a fired job only removes its own registry entry. A blog
//! that goes public drops the cached homepage snapshot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use blog_cache::HomepageCache;
use blog_core::traits::BlogRepository;
use blog_core::Snowflake;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::AbortHandle;
use tracing::{debug, error, info, instrument, warn};

use super::error::ServiceResult;

struct Job {
    generation: u64,
    handle: AbortHandle,
}

pub struct PublishScheduler {
    blog_repo: Arc<dyn BlogRepository>,
    homepage_cache: Option<HomepageCache>,
    jobs: Arc<DashMap<Snowflake, Job>>,
    next_generation: AtomicU64,
}

impl PublishScheduler {
    pub fn new(blog_repo: Arc<dyn BlogRepository>) -> Self {
        Self {
            blog_repo,
            homepage_cache: None,
            jobs: Arc::new(DashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Snapshot to drop whenever a scheduled blog becomes public
    pub fn with_homepage_cache(mut self, cache: Option<HomepageCache>) -> Self {
        self.homepage_cache = cache;
        self
    }

    /// Clear the schedule of `blog_id` at `at`. An instant in the past fires
    /// immediately. Must be called from within a tokio runtime.
    pub fn schedule(&self, blog_id: Snowflake, at: DateTime<Utc>) {
        let delay = (at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        // Hold the entry while spawning so a zero-delay job cannot finish
        // before it is registered.
        let entry = self.jobs.entry(blog_id);
        let task = tokio::spawn(fire(
            Arc::clone(&self.blog_repo),
            self.homepage_cache.clone(),
            Arc::clone(&self.jobs),
            blog_id,
            generation,
            delay,
        ));
        let job = Job {
            generation,
            handle: task.abort_handle(),
        };

        match entry {
            Entry::Occupied(mut occupied) => {
                occupied.get().handle.abort();
                occupied.insert(job);
                debug!(blog_id = %blog_id, "Replaced pending publish job");
            }
            Entry::Vacant(vacant) => {
                vacant.insert(job);
            }
        }

        info!(blog_id = %blog_id, at = %at, delay_ms = delay.as_millis() as u64, "Blog publish scheduled");
    }

    /// Abort the pending job of `blog_id`. Returns false when none was pending.
    pub fn cancel(&self, blog_id: Snowflake) -> bool {
        match self.jobs.remove(&blog_id) {
            Some((_, job)) => {
                job.handle.abort();
                info!(blog_id = %blog_id, "Blog publish cancelled");
                true
            }
            None => false,
        }
    }

    pub fn is_scheduled(&self, blog_id: Snowflake) -> bool {
        self.jobs.contains_key(&blog_id)
    }

    /// Number of jobs that have neither fired nor been cancelled
    pub fn pending_count(&self) -> usize {
        self.jobs.len()
    }

    /// Re-arm a job for every blog whose schedule marker is still set
    #[instrument(skip(self))]
    pub async fn restore(&self) -> ServiceResult<usize> {
        let pending = self.blog_repo.pending_schedules().await?;
        for item in &pending {
            self.schedule(item.blog_id, item.at);
        }
        info!(count = pending.len(), "Restored pending publish jobs");
        Ok(pending.len())
    }
}

async fn fire(
    blog_repo: Arc<dyn BlogRepository>,
    homepage_cache: Option<HomepageCache>,
    jobs: Arc<DashMap<Snowflake, Job>>,
    blog_id: Snowflake,
    generation: u64,
    delay: Duration,
) {
    tokio::time::sleep(delay).await;

    match blog_repo.clear_schedule(blog_id).await {
        Ok(true) => {
            info!(blog_id = %blog_id, "Scheduled blog published");
            if let Some(cache) = &homepage_cache {
                if let Err(e) = cache.invalidate().await {
                    warn!(blog_id = %blog_id, error = %e, "Homepage cache invalidation failed");
                }
            }
        }
        Ok(false) => warn!(blog_id = %blog_id, "Scheduled blog no longer exists"),
        Err(e) => error!(blog_id = %blog_id, error = %e, "Failed to clear blog schedule"),
    }

    jobs.remove_if(&blog_id, |_, job| job.generation == generation);
}

impl Drop for PublishScheduler {
    fn drop(&mut self) {
        for job in self.jobs.iter() {
            job.handle.abort();
        }
    }
}

impl std::fmt::Debug for PublishScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishScheduler")
            .field("pending", &self.jobs.len())
            .finish_non_exhaustive()
    }
}
