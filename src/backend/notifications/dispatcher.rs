//! # Notification Dispatcher
//!
//! Decouples account handlers from mail delivery. Handlers call
//! [`NotificationDispatcher::enqueue`], which never blocks and never fails
//! the request; a fixed pool of worker tasks drains a bounded queue, renders
//! each job and hands it to the configured [`Mailer`], retrying with
//! exponential backoff.
//!
//! ## Delivery guarantees
//!
//! Jobs live only in process memory. A job is retried up to
//! `max_attempts` times and then dropped with an error log. A job enqueued
//! while `queue_capacity` jobs are already waiting is dropped the same way.
//! Jobs still queued when the process exits are lost.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use swapp_auth::backend::notifications::{
//!     LogMailer, NotificationDispatcher, NotificationJob, NotificationKind,
//! };
//! use swapp_auth::shared::config::NotificationConfig;
//!
//! # async fn example() {
//! let dispatcher = NotificationDispatcher::start(&NotificationConfig::default(), Arc::new(LogMailer));
//! dispatcher.enqueue(NotificationJob::new(NotificationKind::Registered, "Ana", "a@x.com"));
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Mutex;

use crate::backend::notifications::jobs::NotificationJob;
use crate::backend::notifications::mailer::Mailer;
use crate::backend::notifications::retry::RetryPolicy;
use crate::backend::notifications::templates;
use crate::shared::config::NotificationConfig;

/// Handle used by request handlers to queue notifications
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    sender: mpsc::Sender<NotificationJob>,
}

impl NotificationDispatcher {
    /// Spawn the worker pool and return a handle to its queue
    ///
    /// Must be called from within a Tokio runtime. Workers exit once every
    /// clone of the returned handle has been dropped and the queue is empty.
    pub fn start(config: &NotificationConfig, mailer: Arc<dyn Mailer>) -> Self {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let receiver = Arc::new(Mutex::new(receiver));
        let policy = RetryPolicy::from_config(config);
        let workers = config.workers.max(1);

        for worker_id in 0..workers {
            let receiver = Arc::clone(&receiver);
            let mailer = Arc::clone(&mailer);
            tokio::spawn(async move {
                run_worker(worker_id, receiver, mailer, policy).await;
            });
        }

        tracing::info!(
            workers,
            capacity = config.queue_capacity,
            max_attempts = policy.max_attempts,
            "Notification workers started"
        );

        Self { sender }
    }

    /// Queue a job without blocking the caller
    ///
    /// Returns false when the job was dropped: the queue is full or the
    /// workers are gone. Dropped jobs are logged at `error`.
    pub fn enqueue(&self, job: NotificationJob) -> bool {
        let kind = job.kind;
        match self.sender.try_send(job) {
            Ok(()) => {
                tracing::debug!(?kind, "Notification queued");
                true
            }
            Err(TrySendError::Full(job)) => {
                tracing::error!(?kind, to = %job.email, "Notification queue full, job dropped");
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::error!(?kind, "Notification queue closed, job dropped");
                false
            }
        }
    }
}

async fn run_worker(
    worker_id: usize,
    receiver: Arc<Mutex<mpsc::Receiver<NotificationJob>>>,
    mailer: Arc<dyn Mailer>,
    policy: RetryPolicy,
) {
    loop {
        let next = receiver.lock().await.recv().await;
        let Some(job) = next else {
            tracing::debug!(worker_id, "Notification queue closed, worker exiting");
            return;
        };
        deliver(&job, mailer.as_ref(), &policy).await;
    }
}

/// Render and send one job, retrying per `policy`
///
/// Returns whether the message was eventually accepted.
pub async fn deliver(job: &NotificationJob, mailer: &dyn Mailer, policy: &RetryPolicy) -> bool {
    let email = templates::render(job);

    for attempt in 1..=policy.max_attempts {
        match mailer.send(&email).await {
            Ok(()) => {
                tracing::info!(kind = ?job.kind, to = %job.email, attempt, "Notification delivered");
                return true;
            }
            Err(e) if policy.should_retry(attempt) => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    kind = ?job.kind,
                    to = %job.email,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Notification delivery failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => {
                tracing::error!(
                    kind = ?job.kind,
                    to = %job.email,
                    attempt,
                    error = %e,
                    "Notification delivery failed, giving up"
                );
            }
        }
    }
    false
}
