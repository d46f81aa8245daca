/**
 * Server Initialization
 *
 * This module assembles the running service from a validated `AppConfig`.
 *
 * # Initialization Process
 *
 * 1. Open the database and apply migrations
 * 2. Build the configured mail transport
 * 3. Start the notification workers
 * 4. Create the token service and the router
 *
 * Every step is fallible and aborts startup; nothing runs half-configured.
 */

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::TokenService;
use crate::backend::error::StartupError;
use crate::backend::notifications::{LogMailer, MailError, Mailer, NotificationDispatcher, SmtpMailer};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::config::{MailConfig, MailTransportKind};
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// Must run inside a Tokio runtime, since it spawns the notification
/// workers.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing SwApp auth service");

    let db_pool = load_database(&config.database).await?;
    let mailer = build_mailer(&config.mail)?;
    let app_state = build_state(config, db_pool, mailer);

    tracing::info!("Router configured");
    Ok(create_router(app_state))
}

/// Build the mail transport selected in configuration
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match config.transport {
        MailTransportKind::Smtp => Ok(Arc::new(SmtpMailer::new(config)?)),
        MailTransportKind::Log => {
            tracing::warn!("SMTP disabled, notification emails will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

/// Wire the shared state around an open pool and a mail transport
pub fn build_state(config: AppConfig, db_pool: SqlitePool, mailer: Arc<dyn Mailer>) -> AppState {
    let notifications = NotificationDispatcher::start(&config.notifications, mailer);
    let tokens = Arc::new(TokenService::new(&config.auth));

    AppState {
        config: Arc::new(config),
        db_pool,
        tokens,
        notifications,
    }
}
