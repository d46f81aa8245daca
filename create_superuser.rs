//! Bootstrap an administrator account.
//!
//! ```text
//! SUPERUSER_PASSWORD=... create_superuser <email> <cpf> <first_name> <last_name>
//! ```
//!
//! Reads the same configuration as the server (`SWAPP_CONFIG`, `.env`,
//! environment), applies migrations, and creates an active admin user.

use std::env;

use swapp_auth::backend::auth::credentials::hash_password;
use swapp_auth::backend::auth::users::{create_superuser, NewUser, ProfileFields};
use swapp_auth::backend::auth::validation::{validate_cpf, validate_email, NAME_MAX};
use swapp_auth::backend::server::config::load_database;
use swapp_auth::backend::BackendError;
use swapp_auth::shared::AppConfig;

const USAGE: &str = "usage: SUPERUSER_PASSWORD=<password> create_superuser <email> <cpf> <first_name> <last_name>";

fn checked_name(label: &str, value: String) -> Result<String, String> {
    let value = value.trim().to_string();
    if value.is_empty() || value.chars().count() > NAME_MAX {
        return Err(format!("{} must be 1-{} characters", label, NAME_MAX));
    }
    Ok(value)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()),
        ))
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let [email, cpf, first_name, last_name] = <[String; 4]>::try_from(args).map_err(|_| USAGE)?;

    let email = validate_email(&email).map_err(|m| format!("email: {}", m))?;
    let cpf = validate_cpf(&cpf).map_err(|m| format!("cpf: {}", m))?;
    let first_name = checked_name("first_name", first_name)?;
    let last_name = checked_name("last_name", last_name)?;
    let password = env::var("SUPERUSER_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty())
        .ok_or("SUPERUSER_PASSWORD must be set")?;

    let config = AppConfig::load()?;
    let pool = load_database(&config.database).await?;
    let password_hash = hash_password(&password, config.auth.bcrypt_cost)?;

    let result = create_superuser(
        &pool,
        NewUser {
            email,
            cpf,
            password_hash,
            first_name,
            last_name,
            profile: ProfileFields::default(),
        },
    )
    .await;

    match result {
        Ok(user) => {
            println!("Superuser {} created with id {}", user.email, user.id);
            Ok(())
        }
        Err(BackendError::Validation(errors)) => Err(format!("refused: {}", serde_json::to_string(&errors)?).into()),
        Err(e) => Err(e.into()),
    }
}
