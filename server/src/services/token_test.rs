use super::*;

use jsonwebtoken::errors::ErrorKind;

fn test_config() -> TokenConfig {
    TokenConfig {
        secret: "unit-test-secret".to_owned(),
        issuer: "secure-downtask-auth".to_owned(),
        ttl: time::Duration::hours(24),
    }
}

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn mint_then_verify_returns_the_claims() {
    let config = test_config();
    let user_id = Uuid::new_v4();
    let session_id = Uuid::new_v4();

    let token = mint(&config, user_id, session_id).expect("mint");
    let claims = verify(&config, &token).expect("verify");

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.sid, session_id);
    assert_eq!(claims.iss, "secure-downtask-auth");
    assert_eq!(claims.aud, claims.iss);
    assert_eq!(claims.exp - claims.iat, 24 * 3600);
    assert_eq!(claims.nbf, claims.iat);
}

#[test]
fn claims_serialize_ids_as_uuid_strings() {
    let config = test_config();
    let user_id = Uuid::new_v4();
    let token = mint(&config, user_id, Uuid::new_v4()).expect("mint");
    let claims = verify(&config, &token).expect("verify");

    let json = serde_json::to_value(&claims).expect("serialize");
    assert_eq!(json["sub"], serde_json::json!(user_id.to_string()));
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn verify_rejects_wrong_secret() {
    let config = test_config();
    let token = mint(&config, Uuid::new_v4(), Uuid::new_v4()).expect("mint");

    let other = TokenConfig { secret: "some-other-secret".to_owned(), ..test_config() };
    let err = verify(&other, &token).expect_err("should fail");
    let TokenError::Invalid(inner) = err else {
        panic!("unexpected variant");
    };
    assert!(matches!(inner.kind(), ErrorKind::InvalidSignature));
}

#[test]
fn verify_rejects_expired_token() {
    let config = test_config();
    // Issued 48h ago with a 24h ttl: expired well past the default leeway.
    let issued = unix_now() - 48 * 3600;
    let token = mint_at(&config, Uuid::new_v4(), Uuid::new_v4(), issued).expect("mint");

    let err = verify(&config, &token).expect_err("should fail");
    let TokenError::Invalid(inner) = err else {
        panic!("unexpected variant");
    };
    assert!(matches!(inner.kind(), ErrorKind::ExpiredSignature));
}

#[test]
fn verify_rejects_token_from_the_future() {
    let config = test_config();
    let issued = unix_now() + 2 * 3600;
    let token = mint_at(&config, Uuid::new_v4(), Uuid::new_v4(), issued).expect("mint");

    let err = verify(&config, &token).expect_err("should fail");
    let TokenError::Invalid(inner) = err else {
        panic!("unexpected variant");
    };
    assert!(matches!(inner.kind(), ErrorKind::ImmatureSignature));
}

#[test]
fn verify_rejects_wrong_issuer() {
    let minting = TokenConfig { issuer: "someone-else".to_owned(), ..test_config() };
    let token = mint(&minting, Uuid::new_v4(), Uuid::new_v4()).expect("mint");

    let err = verify(&test_config(), &token).expect_err("should fail");
    assert!(matches!(err, TokenError::Invalid(_)));
}

#[test]
fn verify_rejects_tampered_token() {
    let config = test_config();
    let token = mint(&config, Uuid::new_v4(), Uuid::new_v4()).expect("mint");

    let mut tampered = token.clone();
    tampered.pop();
    assert!(verify(&config, &tampered).is_err());

    assert!(verify(&config, "not-a-jwt").is_err());
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn from_env_falls_back_to_development_defaults() {
    // Relies on the suite not setting the token env vars.
    let config = TokenConfig::from_env();
    assert_eq!(config.issuer, "secure-downtask-auth");
    assert_eq!(config.ttl, time::Duration::hours(24));
}
