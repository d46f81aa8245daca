/**
 * Input Validation
 *
 * Field-level validators shared by the registration and profile-update
 * handlers. Each helper records its failures in a `FieldErrors` map instead
 * of returning early, so a request is always answered with every problem it
 * has at once.
 *
 * # Rules
 *
 * - Email: syntactically valid, at most 254 characters, domain lower-cased
 * - CPF: exactly 11 ASCII digits
 * - Names: required at registration, 1-30 characters
 * - Optional profile text: non-blank when present, bounded length
 * - Birth date: `YYYY-MM-DD`, not in the future
 * - Profile picture: PNG, JPEG, GIF, WebP or BMP, sniffed from magic bytes
 */

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use validator::ValidateEmail;

use crate::backend::auth::users::ProfileFields;
use crate::shared::config::UploadConfig;
use crate::shared::error::{FieldErrors, BLANK, REQUIRED};

pub const NAME_MAX: usize = 30;
pub const EMAIL_MAX: usize = 254;

pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const INVALID_CPF: &str = "CPF must contain exactly 11 digits.";
pub const INVALID_DATE: &str = "Date has wrong format. Use YYYY-MM-DD.";
pub const FUTURE_DATE: &str = "Birth date cannot be in the future.";
pub const INVALID_IMAGE: &str =
    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.";
pub const EMPTY_IMAGE: &str = "The submitted file is empty.";

/// Optional profile attributes as they arrive on the wire
///
/// `profile_picture` carries a base64 string or a `data:` URL when the
/// request is JSON; multipart uploads bypass it with raw bytes.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProfileInput {
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
    pub birth_date: Option<String>,
    pub profile_picture: Option<String>,
}

impl ProfileInput {
    /// Assign a field by its wire name; returns false for unknown names
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "address" => &mut self.address,
            "contact" => &mut self.contact,
            "gender" => &mut self.gender,
            "state" => &mut self.state,
            "city" => &mut self.city,
            "neighborhood" => &mut self.neighborhood,
            "street" => &mut self.street,
            "number" => &mut self.number,
            "complement" => &mut self.complement,
            "zip_code" => &mut self.zip_code,
            "id_description" => &mut self.id_description,
            "birth_date" => &mut self.birth_date,
            "profile_picture" => &mut self.profile_picture,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// Trim the address and lower-case its domain part
pub fn normalize_email(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_ascii_lowercase()),
        None => trimmed.to_string(),
    }
}

/// Validate and normalize an email address
pub fn validate_email(raw: &str) -> Result<String, &'static str> {
    let email = normalize_email(raw);
    if email.len() > EMAIL_MAX || !email.validate_email() {
        return Err(INVALID_EMAIL);
    }
    Ok(email)
}

/// Validate a CPF: exactly 11 ASCII digits, surrounding whitespace ignored
pub fn validate_cpf(raw: &str) -> Result<String, &'static str> {
    let cpf = raw.trim();
    if cpf.len() == 11 && cpf.bytes().all(|b| b.is_ascii_digit()) {
        Ok(cpf.to_string())
    } else {
        Err(INVALID_CPF)
    }
}

fn too_long(max: usize) -> String {
    format!("Ensure this field has no more than {} characters.", max)
}

/// Required text field; records `REQUIRED` when absent or blank
pub fn required_text(
    field: &str,
    value: Option<String>,
    max: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => optional_text(field, Some(v), max, errors),
        _ => {
            errors.add(field, REQUIRED);
            None
        }
    }
}

/// Optional text field; present values must be non-blank and bounded
pub fn optional_text(
    field: &str,
    value: Option<String>,
    max: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, BLANK);
        return None;
    }
    if trimmed.chars().count() > max {
        errors.add(field, too_long(max));
        return None;
    }
    Some(trimmed.to_string())
}

/// Optional email field (used by partial updates)
pub fn optional_email(field: &str, value: Option<String>, errors: &mut FieldErrors) -> Option<String> {
    let value = value?;
    if value.trim().is_empty() {
        errors.add(field, BLANK);
        return None;
    }
    match validate_email(&value) {
        Ok(email) => Some(email),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

/// Optional CPF field (used by partial updates)
pub fn optional_cpf(field: &str, value: Option<String>, errors: &mut FieldErrors) -> Option<String> {
    let value = value?;
    match validate_cpf(&value) {
        Ok(cpf) => Some(cpf),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

/// Parse a `YYYY-MM-DD` birth date that is not in the future
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, &'static str> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| INVALID_DATE)?;
    if date > Utc::now().date_naive() {
        return Err(FUTURE_DATE);
    }
    Ok(date)
}

/// Identify an image by its magic bytes
pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.len() >= 14 && bytes.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}

/// Decode a base64 string or `data:<mime>;base64,<payload>` URL
pub fn decode_image_payload(raw: &str) -> Option<Vec<u8>> {
    let payload = match raw.trim().strip_prefix("data:") {
        Some(rest) => rest.split_once(";base64,")?.1,
        None => raw.trim(),
    };
    BASE64.decode(payload.as_bytes()).ok()
}

/// Check raw image bytes against the upload limits
pub fn validate_image(
    field: &str,
    bytes: Vec<u8>,
    limits: &UploadConfig,
    errors: &mut FieldErrors,
) -> Option<Vec<u8>> {
    if bytes.is_empty() {
        errors.add(field, EMPTY_IMAGE);
        return None;
    }
    if bytes.len() > limits.max_image_bytes {
        errors.add(
            field,
            format!("Image must not exceed {} bytes.", limits.max_image_bytes),
        );
        return None;
    }
    if detect_image_mime(&bytes).is_none() {
        errors.add(field, INVALID_IMAGE);
        return None;
    }
    Some(bytes)
}

/// Validate every optional profile attribute
///
/// `upload` takes precedence over a base64 `profile_picture` string.
pub fn validate_profile_input(
    input: ProfileInput,
    upload: Option<Vec<u8>>,
    limits: &UploadConfig,
    errors: &mut FieldErrors,
) -> ProfileFields {
    let birth_date = match input.birth_date {
        Some(raw) if raw.trim().is_empty() => {
            errors.add("birth_date", BLANK);
            None
        }
        Some(raw) => match parse_birth_date(&raw) {
            Ok(date) => Some(date),
            Err(message) => {
                errors.add("birth_date", message);
                None
            }
        },
        None => None,
    };

    let picture_bytes = match (upload, input.profile_picture) {
        (Some(bytes), _) => Some(bytes),
        (None, Some(encoded)) => match decode_image_payload(&encoded) {
            Some(bytes) => Some(bytes),
            None => {
                errors.add("profile_picture", INVALID_IMAGE);
                None
            }
        },
        (None, None) => None,
    };
    let profile_picture =
        picture_bytes.and_then(|bytes| validate_image("profile_picture", bytes, limits, errors));

    ProfileFields {
        address: optional_text("address", input.address, 255, errors),
        contact: optional_text("contact", input.contact, 15, errors),
        gender: optional_text("gender", input.gender, 12, errors),
        state: optional_text("state", input.state, 30, errors),
        city: optional_text("city", input.city, 50, errors),
        neighborhood: optional_text("neighborhood", input.neighborhood, 100, errors),
        street: optional_text("street", input.street, 255, errors),
        number: optional_text("number", input.number, 10, errors),
        complement: optional_text("complement", input.complement, 255, errors),
        zip_code: optional_text("zip_code", input.zip_code, 9, errors),
        id_description: optional_text("id_description", input.id_description, 255, errors),
        birth_date,
        profile_picture,
    }
}
