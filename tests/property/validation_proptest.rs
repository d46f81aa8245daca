//! Property-based tests for input validation
//!
//! Uses proptest to generate random inputs and verify properties

use proptest::prelude::*;
use swapp_auth::backend::auth::validation::{
    decode_image_payload, normalize_email, parse_birth_date, validate_cpf, validate_email,
};

proptest! {
    #[test]
    fn test_any_eleven_digits_is_a_valid_cpf(cpf in "[0-9]{11}") {
        prop_assert_eq!(validate_cpf(&cpf), Ok(cpf.clone()));
    }

    #[test]
    fn test_cpf_with_wrong_length_is_rejected(cpf in "[0-9]{0,10}|[0-9]{12,20}") {
        prop_assert!(validate_cpf(&cpf).is_err());
    }

    #[test]
    fn test_cpf_with_non_digit_is_rejected(
        prefix in "[0-9]{5}",
        bad in "[a-zA-Z.\\-/]",
        suffix in "[0-9]{5}",
    ) {
        let cpf = format!("{}{}{}", prefix, bad, suffix);
        prop_assert!(validate_cpf(&cpf).is_err());
    }

    #[test]
    fn test_normalize_email_is_idempotent(email in "\\s{0,2}[a-zA-Z0-9._]{1,20}@[a-zA-Z0-9.]{1,20}\\s{0,2}") {
        let once = normalize_email(&email);
        prop_assert_eq!(normalize_email(&once), once.clone());
        prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
    }

    #[test]
    fn test_email_domain_case_is_ignored(
        local in "[a-z]{1,10}",
        domain in "[a-z]{1,10}",
    ) {
        let lower = validate_email(&format!("{}@{}.com", local, domain));
        let upper = validate_email(&format!("{}@{}.COM", local, domain.to_uppercase()));
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn test_text_without_at_sign_is_not_an_email(text in "[^@]{0,40}") {
        prop_assert!(validate_email(&text).is_err());
    }

    #[test]
    fn test_past_dates_parse(year in 1900i32..2020, month in 1u32..=12, day in 1u32..=28) {
        let raw = format!("{:04}-{:02}-{:02}", year, month, day);
        prop_assert!(parse_birth_date(&raw).is_ok());
    }

    #[test]
    fn test_decode_never_panics(raw in ".{0,64}") {
        let _ = decode_image_payload(&raw);
    }
}
