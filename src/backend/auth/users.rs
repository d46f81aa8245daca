/**
 * User Model and Database Operations
 *
 * This module owns the `users` table: creation, lookup, partial updates,
 * password replacement and deletion. Email and CPF uniqueness is enforced
 * by the schema; a lost race against a concurrent insert surfaces here as a
 * field error rather than a 500.
 */

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Encode, QueryBuilder, Sqlite, SqlitePool, Type};

use crate::backend::error::BackendError;

pub const EMAIL_TAKEN: &str = "A user with this email already exists.";
pub const CPF_TAKEN: &str = "A user with this CPF already exists.";

/// User row
///
/// Deliberately not `Serialize`: responses go through `UserProfile`, which
/// has no password hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    /// Login identifier, unique case-insensitively
    pub email: String,
    /// Brazilian taxpayer id, 11 digits, unique
    pub cpf: String,
    /// bcrypt hash
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub contact: Option<String>,
    pub gender: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub zip_code: Option<String>,
    pub id_description: Option<String>,
    pub birth_date: Option<NaiveDate>,
    /// Raw image bytes
    pub profile_picture: Option<Vec<u8>>,
    pub is_active: bool,
    pub is_admin: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional profile attributes, already validated
///
/// `None` means "not provided": left NULL on insert and untouched on update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFields {
    pub address: Option<String>,
    pub contact: Option<String>,
    pub gender: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub neighborhood: Option<String>,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub zip_code: Option<String>,
    pub id_description: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub profile_picture: Option<Vec<u8>>,
}

/// Validated registration data
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub cpf: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub profile: ProfileFields,
}

/// Validated partial update; only `Some` fields are written
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    pub profile: ProfileFields,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Create a regular (non-admin) user
///
/// # Errors
/// * `BackendError::Validation` on `email` or `cpf` if either is already taken
/// * `BackendError::Database` for any other persistence failure
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, BackendError> {
    insert_user(pool, new_user, false).await
}

/// Create an administrator account
pub async fn create_superuser(pool: &SqlitePool, new_user: NewUser) -> Result<User, BackendError> {
    insert_user(pool, new_user, true).await
}

async fn insert_user(
    pool: &SqlitePool,
    new_user: NewUser,
    is_admin: bool,
) -> Result<User, BackendError> {
    let now = Utc::now();
    let NewUser {
        email,
        cpf,
        password_hash,
        first_name,
        last_name,
        profile,
    } = new_user;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (
            email, cpf, password_hash, first_name, last_name,
            address, contact, gender, state, city, neighborhood, street, number,
            complement, zip_code, id_description, birth_date, profile_picture,
            is_active, is_admin, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(cpf)
    .bind(password_hash)
    .bind(first_name)
    .bind(last_name)
    .bind(profile.address)
    .bind(profile.contact)
    .bind(profile.gender)
    .bind(profile.state)
    .bind(profile.city)
    .bind(profile.neighborhood)
    .bind(profile.street)
    .bind(profile.number)
    .bind(profile.complement)
    .bind(profile.zip_code)
    .bind(profile.id_description)
    .bind(profile.birth_date)
    .bind(profile.profile_picture)
    .bind(is_admin)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(map_unique_violation)?;

    tracing::info!(user_id = user.id, is_admin, "User created");
    Ok(user)
}

/// Translate a UNIQUE violation into the matching field error
fn map_unique_violation(error: sqlx::Error) -> BackendError {
    if let Some(db_error) = error.as_database_error() {
        if db_error.is_unique_violation() {
            let message = db_error.message();
            if message.contains("users.email") {
                return BackendError::field("email", EMAIL_TAKEN);
            }
            if message.contains("users.cpf") {
                return BackendError::field("cpf", CPF_TAKEN);
            }
        }
    }
    BackendError::Database(error)
}

/// Get user by id
pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Get user by email (case-insensitive)
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Whether another user already holds `email`
///
/// `except` excludes the caller's own row during updates.
pub async fn email_taken(
    pool: &SqlitePool,
    email: &str,
    except: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM users WHERE email = ? AND (? IS NULL OR id <> ?)",
    )
    .bind(email)
    .bind(except)
    .bind(except)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Whether another user already holds `cpf`
pub async fn cpf_taken(
    pool: &SqlitePool,
    cpf: &str,
    except: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM users WHERE cpf = ? AND (? IS NULL OR id <> ?)",
    )
    .bind(cpf)
    .bind(except)
    .bind(except)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

fn push_set<'a, T>(builder: &mut QueryBuilder<'a, Sqlite>, column: &str, value: Option<T>)
where
    T: 'a + Encode<'a, Sqlite> + Type<Sqlite> + Send,
{
    if let Some(value) = value {
        builder.push(", ").push(column).push(" = ").push_bind(value);
    }
}

/// Apply a partial update
///
/// Only the fields present in `patch` are written; `updated_at` is always
/// refreshed. Returns false when no row matched `user_id`.
pub async fn apply_profile_patch(
    pool: &SqlitePool,
    user_id: i64,
    patch: ProfilePatch,
) -> Result<bool, BackendError> {
    let ProfilePatch {
        first_name,
        last_name,
        email,
        cpf,
        profile,
    } = patch;

    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE users SET updated_at = ");
    builder.push_bind(Utc::now());
    push_set(&mut builder, "first_name", first_name);
    push_set(&mut builder, "last_name", last_name);
    push_set(&mut builder, "email", email);
    push_set(&mut builder, "cpf", cpf);
    push_set(&mut builder, "address", profile.address);
    push_set(&mut builder, "contact", profile.contact);
    push_set(&mut builder, "gender", profile.gender);
    push_set(&mut builder, "state", profile.state);
    push_set(&mut builder, "city", profile.city);
    push_set(&mut builder, "neighborhood", profile.neighborhood);
    push_set(&mut builder, "street", profile.street);
    push_set(&mut builder, "number", profile.number);
    push_set(&mut builder, "complement", profile.complement);
    push_set(&mut builder, "zip_code", profile.zip_code);
    push_set(&mut builder, "id_description", profile.id_description);
    push_set(&mut builder, "birth_date", profile.birth_date);
    push_set(&mut builder, "profile_picture", profile.profile_picture);
    builder.push(" WHERE id = ").push_bind(user_id);

    let result = builder
        .build()
        .execute(pool)
        .await
        .map_err(map_unique_violation)?;

    Ok(result.rows_affected() > 0)
}

/// Replace the password hash and record the authentication time
pub async fn update_password(
    pool: &SqlitePool,
    user_id: i64,
    password_hash: &str,
) -> Result<bool, sqlx::Error> {
    let now = Utc::now();
    let result = sqlx::query(
        r#"
        UPDATE users
        SET password_hash = ?, last_login = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Record a successful login
pub async fn touch_last_login(pool: &SqlitePool, user_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a user; returns false when nothing was deleted
pub async fn delete_user(pool: &SqlitePool, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
