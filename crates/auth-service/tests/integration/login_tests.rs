//! E2E tests for the login flow.
//!
//! ## Test Categories
//!
//! - **Happy path**: valid credentials produce a 201 with an issued token
//! - **Failure uniformity**: wrong password, unknown username, and inactive
//!   accounts are indistinguishable on the wire
//! - **Validation**: malformed requests are rejected before any credential
//!   work
//!
//! ## Test Naming
//!
//! Tests follow the convention: `test_<feature>_<scenario>_<expected_result>`

use auth_test_utils::assertions::TokenAssertions;
use auth_test_utils::server_harness::{
    TestAuthServer, INACTIVE_PASSWORD, INACTIVE_USERNAME, TRAINEE_PASSWORD, TRAINEE_USERNAME,
    TRAINER_PASSWORD, TRAINER_USERNAME,
};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_login_happy_path_returns_created_with_token() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server
        .login_response(TRAINEE_USERNAME, TRAINEE_PASSWORD)
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(
        body.get("ownerUserName").and_then(|v| v.as_str()),
        Some(TRAINEE_USERNAME)
    );

    let issued_at: DateTime<Utc> = body
        .get("issuedAt")
        .and_then(|v| v.as_str())
        .expect("issuedAt present")
        .parse()?;
    let expired_at: DateTime<Utc> = body
        .get("expiredAt")
        .and_then(|v| v.as_str())
        .expect("expiredAt present")
        .parse()?;
    assert_eq!((expired_at - issued_at).num_minutes(), 60);

    let token = body
        .get("token")
        .and_then(|v| v.as_str())
        .expect("token present")
        .to_string();
    token
        .assert_valid_jwt()
        .assert_for_subject(TRAINEE_USERNAME)
        .assert_expires_in_minutes(60);

    Ok(())
}

#[tokio::test]
async fn test_login_trainer_account_succeeds() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let token = server.login(TRAINER_USERNAME, TRAINER_PASSWORD).await?;
    token.assert_for_subject(TRAINER_USERNAME);
    Ok(())
}

#[tokio::test]
async fn test_login_token_grants_access_to_protected_route() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    let token = server.login(TRAINEE_USERNAME, TRAINEE_PASSWORD).await?;

    let response = server.get_me(&token).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(
        body.get("username").and_then(|v| v.as_str()),
        Some(TRAINEE_USERNAME)
    );
    Ok(())
}

#[tokio::test]
async fn test_login_wrong_password_returns_401() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server.login_response(TRAINEE_USERNAME, "Bad999").await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(
        body.pointer("/error/code").and_then(|v| v.as_str()),
        Some("INVALID_CREDENTIALS")
    );
    assert_eq!(
        body.pointer("/error/message").and_then(|v| v.as_str()),
        Some("Invalid credentials")
    );
    Ok(())
}

/// Unknown usernames and wrong passwords must produce byte-identical
/// response bodies, otherwise the endpoint leaks which usernames exist.
#[tokio::test]
async fn test_login_unknown_username_indistinguishable_from_wrong_password(
) -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let wrong_password = server.login_response(TRAINEE_USERNAME, "Bad999").await?;
    let unknown_user = server.login_response("no.such.user", "Bad999").await?;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.text().await?, unknown_user.text().await?);
    Ok(())
}

#[tokio::test]
async fn test_login_inactive_account_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server
        .login_response(INACTIVE_USERNAME, INACTIVE_PASSWORD)
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(
        body.pointer("/error/code").and_then(|v| v.as_str()),
        Some("INVALID_CREDENTIALS")
    );
    Ok(())
}

#[tokio::test]
async fn test_login_validation_rejects_bad_shapes() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    // (username, password) pairs that must fail validation with a 400.
    let cases = [
        ("a", "Abc123"),       // username too short
        ("   ", "Abc123"),     // blank username
        ("john.smith", "Ab1"), // password too short
        ("john.smith", "Abc123456789"), // password too long
        ("john.smith", "abc123"), // no uppercase
        ("john.smith", "ABC123"), // no lowercase
        ("john.smith", "Abcdef"), // no digit
    ];

    for (username, password) in cases {
        let response = server.login_response(username, password).await?;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "Expected 400 for {username:?}/{password:?}"
        );

        let body: serde_json::Value = response.json().await?;
        assert_eq!(
            body.pointer("/error/code").and_then(|v| v.as_str()),
            Some("VALIDATION_ERROR")
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_login_missing_fields_is_client_error() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/api/v1/auth/login", server.url()))
        .json(&json!({ "username": "john.smith" }))
        .send()
        .await?;

    assert!(
        response.status().is_client_error(),
        "Expected 4xx, got {}",
        response.status()
    );
    Ok(())
}

#[tokio::test]
async fn test_login_username_is_trimmed() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let response = server
        .login_response("  john.smith  ", TRAINEE_PASSWORD)
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(
        body.get("ownerUserName").and_then(|v| v.as_str()),
        Some(TRAINEE_USERNAME)
    );
    Ok(())
}
