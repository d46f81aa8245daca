/**
 * Authentication Request/Response Types
 *
 * Request bodies use `Option` for every field: a missing field must become a
 * field error in the response, not a deserialization failure.
 */

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;
use crate::backend::auth::validation::{detect_image_mime, ProfileInput};

/// Registration request
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub cpf: Option<String>,
    #[serde(flatten)]
    pub profile: ProfileInput,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub id: i64,
    pub email: String,
}

/// Login request
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub message: String,
}

/// Body of `/token/refresh` and `/logout`
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}

/// Partial profile update; absent or null fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub cpf: Option<String>,
    #[serde(flatten)]
    pub profile: ProfileInput,
}

impl ProfileUpdateRequest {
    /// Assign a field by its wire name; returns false for unknown names
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        match name {
            "first_name" => self.first_name = Some(value),
            "last_name" => self.last_name = Some(value),
            "email" => self.email = Some(value),
            "cpf" => self.cpf = Some(value),
            other => return self.profile.set_field(other, value),
        }
        true
    }
}

/// Password change request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_new_password: Option<String>,
}

/// `{"message": ...}` body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// `{"detail": ...}` body
#[derive(Debug, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

/// Public view of a user, without the password hash
#[derive(Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub cpf: String,
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
    /// `data:<mime>;base64,<bytes>`
    pub profile_picture_url: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Render stored image bytes as a data URL
pub fn picture_data_url(bytes: &[u8]) -> String {
    let mime = detect_image_mime(bytes).unwrap_or("application/octet-stream");
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            profile_picture_url: user.profile_picture.as_deref().map(picture_data_url),
            id: user.id,
            email: user.email,
            cpf: user.cpf,
            first_name: user.first_name,
            last_name: user.last_name,
            address: user.address,
            contact: user.contact,
            gender: user.gender,
            state: user.state,
            city: user.city,
            neighborhood: user.neighborhood,
            street: user.street,
            number: user.number,
            complement: user.complement,
            zip_code: user.zip_code,
            id_description: user.id_description,
            birth_date: user.birth_date,
            is_active: user.is_active,
            is_admin: user.is_admin,
            last_login: user.last_login,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
