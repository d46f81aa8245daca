//! Notifications Module
//!
//! Transactional emails for account events: registration, profile update,
//! account deletion and password change. Handlers enqueue a job and return
//! immediately; delivery happens on background workers and its failures
//! never reach the client.
//!
//! # Module Structure
//!
//! ```text
//! notifications/
//! ├── mod.rs        - Module exports
//! ├── jobs.rs       - NotificationJob and NotificationKind
//! ├── templates.rs  - Subject and body rendering
//! ├── mailer.rs     - Mailer trait and transports
//! ├── retry.rs      - Backoff policy
//! └── dispatcher.rs - Bounded queue and worker pool
//! ```

/// Queued job types
pub mod jobs;

/// Message rendering
pub mod templates;

/// Mail transports
pub mod mailer;

/// Retry backoff
pub mod retry;

/// Queue and workers
pub mod dispatcher;

pub use dispatcher::NotificationDispatcher;
pub use jobs::{NotificationJob, NotificationKind};
pub use mailer::{LogMailer, MailError, Mailer, MemoryMailer, OutboundEmail, SmtpMailer};
pub use retry::RetryPolicy;
