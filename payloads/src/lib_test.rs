use super::*;

// ============================================================================
// Email validation
// ============================================================================

#[test]
fn validate_email_accepts_typical_addresses() {
    assert_eq!(validate_email("user@example.com"), Ok(()));
    assert_eq!(validate_email("first.last@example.com"), Ok(()));
    assert_eq!(validate_email("user+tag@mail.example.co"), Ok(()));
    assert_eq!(validate_email("u@my-host.example.org"), Ok(()));
}

#[test]
fn validate_email_requires_a_value() {
    assert_eq!(validate_email(""), Err(ValidationError::EmailRequired));
}

#[test]
fn validate_email_rejects_missing_at_sign() {
    assert_eq!(
        validate_email("userexample.com"),
        Err(ValidationError::EmailInvalid)
    );
}

#[test]
fn validate_email_rejects_multiple_at_signs() {
    assert_eq!(
        validate_email("user@host@example.com"),
        Err(ValidationError::EmailInvalid)
    );
}

#[test]
fn validate_email_rejects_empty_local_part() {
    assert_eq!(
        validate_email("@example.com"),
        Err(ValidationError::EmailInvalid)
    );
}

#[test]
fn validate_email_rejects_single_label_domain() {
    assert_eq!(
        validate_email("user@localhost"),
        Err(ValidationError::EmailInvalid)
    );
}

#[test]
fn validate_email_rejects_short_or_numeric_tld() {
    assert_eq!(
        validate_email("user@example.c"),
        Err(ValidationError::EmailInvalid)
    );
    assert_eq!(
        validate_email("user@example.c0m"),
        Err(ValidationError::EmailInvalid)
    );
}

#[test]
fn validate_email_rejects_whitespace_anywhere() {
    assert_eq!(
        validate_email("user name@example.com"),
        Err(ValidationError::EmailInvalid)
    );
    assert_eq!(
        validate_email(" user@example.com"),
        Err(ValidationError::EmailInvalid)
    );
    assert_eq!(
        validate_email("user@example.com\n"),
        Err(ValidationError::EmailInvalid)
    );
}

#[test]
fn validate_email_rejects_edge_hyphens_in_labels() {
    assert_eq!(
        validate_email("user@-host.example.com"),
        Err(ValidationError::EmailInvalid)
    );
    assert_eq!(
        validate_email("user@host-.example.com"),
        Err(ValidationError::EmailInvalid)
    );
    assert_eq!(validate_email("user@my-host.example.com"), Ok(()));
}

#[test]
fn validate_email_rejects_empty_domain_labels() {
    assert_eq!(
        validate_email("user@.example.com"),
        Err(ValidationError::EmailInvalid)
    );
    assert_eq!(
        validate_email("user@example..com"),
        Err(ValidationError::EmailInvalid)
    );
    assert_eq!(
        validate_email("user@example.com."),
        Err(ValidationError::EmailInvalid)
    );
}

// ============================================================================
// Password validation
// ============================================================================

#[test]
fn validate_password_requires_a_value() {
    assert_eq!(validate_password(""), Err(ValidationError::PasswordRequired));
}

#[test]
fn validate_password_accepts_boundary_lengths() {
    assert_eq!(validate_password("abc"), Ok(()));
    assert_eq!(validate_password(&"x".repeat(20)), Ok(()));
}

#[test]
fn validate_password_rejects_outside_bounds() {
    assert_eq!(
        validate_password("ab"),
        Err(ValidationError::PasswordTooShort)
    );
    assert_eq!(
        validate_password(&"x".repeat(21)),
        Err(ValidationError::PasswordTooLong)
    );
}

#[test]
fn validate_password_counts_characters_not_bytes() {
    // Three characters, six bytes.
    assert_eq!(validate_password("ééé"), Ok(()));
    // Twenty characters, forty bytes.
    assert_eq!(validate_password(&"é".repeat(20)), Ok(()));
    assert_eq!(
        validate_password(&"é".repeat(21)),
        Err(ValidationError::PasswordTooLong)
    );
}

// ============================================================================
// Credentials
// ============================================================================

#[test]
fn credentials_validate_reports_email_error_first() {
    let creds = Credentials {
        email: "not-an-email".to_owned(),
        password: "x".to_owned(),
    };
    assert_eq!(creds.validate(), Err(ValidationError::EmailInvalid));
}

#[test]
fn credentials_validate_checks_password_after_email() {
    let creds = Credentials {
        email: "user@example.com".to_owned(),
        password: "ab".to_owned(),
    };
    assert_eq!(creds.validate(), Err(ValidationError::PasswordTooShort));
}

#[test]
fn credentials_validate_passes_well_formed_input() {
    let creds = Credentials {
        email: "user@example.com".to_owned(),
        password: "correct horse".to_owned(),
    };
    assert_eq!(creds.validate(), Ok(()));
}

#[test]
fn credentials_serialize_with_wire_field_names() {
    let creds = Credentials {
        email: "user@example.com".to_owned(),
        password: "secret".to_owned(),
    };
    let json = serde_json::to_value(&creds).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({"email": "user@example.com", "password": "secret"})
    );
}

// ============================================================================
// Error surface
// ============================================================================

#[test]
fn validation_errors_map_to_their_fields() {
    assert_eq!(ValidationError::EmailRequired.field(), Field::Email);
    assert_eq!(ValidationError::EmailInvalid.field(), Field::Email);
    assert_eq!(ValidationError::PasswordRequired.field(), Field::Password);
    assert_eq!(ValidationError::PasswordTooShort.field(), Field::Password);
    assert_eq!(ValidationError::PasswordTooLong.field(), Field::Password);
}

#[test]
fn validation_error_messages_are_stable() {
    assert_eq!(ValidationError::EmailRequired.to_string(), "email is required");
    assert_eq!(
        ValidationError::EmailInvalid.to_string(),
        "email must be a valid address"
    );
    assert_eq!(
        ValidationError::PasswordRequired.to_string(),
        "password is required"
    );
    assert_eq!(
        ValidationError::PasswordTooShort.to_string(),
        "password must be at least 3 characters"
    );
    assert_eq!(
        ValidationError::PasswordTooLong.to_string(),
        "password must be at most 20 characters"
    );
}

#[test]
fn error_body_parses_the_wire_shape() {
    let body: ErrorBody =
        serde_json::from_str(r#"{"error":"invalid email or password"}"#).expect("deserialize");
    assert_eq!(body.error, "invalid email or password");
}

#[test]
fn user_body_round_trips_through_json() {
    let user = UserBody {
        id: "3e9f3d6e-5a40-4f0a-9c36-000000000001".to_owned(),
        email: "user@example.com".to_owned(),
        created_at: "2025-01-01 12:00:00".to_owned(),
    };
    let json = serde_json::to_string(&user).expect("serialize");
    let back: UserBody = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, user);
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn normalize_email_trims_and_lowercases() {
    assert_eq!(normalize_email("  User@Example.COM  "), "user@example.com");
}

#[test]
fn normalize_email_is_idempotent() {
    let once = normalize_email("User@Example.com");
    assert_eq!(normalize_email(&once), once);
}
