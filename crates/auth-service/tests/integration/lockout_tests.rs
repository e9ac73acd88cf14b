//! E2E tests for brute-force lockout behavior.
//!
//! The default harness locks a username after 3 consecutive failures for
//! 5 minutes; well beyond any test runtime, so "locked" stays locked for the
//! whole test.

use auth_test_utils::server_harness::{
    TestAuthServer, TestServerOptions, TRAINEE_PASSWORD, TRAINEE_USERNAME, TRAINER_PASSWORD,
    TRAINER_USERNAME,
};
use reqwest::StatusCode;

const MAX_ATTEMPTS: u32 = 3;

async fn exhaust_attempts(server: &TestAuthServer, username: &str) -> Result<(), anyhow::Error> {
    for _ in 0..MAX_ATTEMPTS {
        let response = server.login_response(username, "Bad999").await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
    Ok(())
}

/// After the threshold is reached, even the correct password is rejected.
#[tokio::test]
async fn test_lockout_correct_password_rejected_while_locked() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    exhaust_attempts(&server, TRAINEE_USERNAME).await?;

    let response = server
        .login_response(TRAINEE_USERNAME, TRAINEE_PASSWORD)
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

/// A locked username answers exactly like a wrong password; the client must
/// not be able to tell the difference.
#[tokio::test]
async fn test_lockout_response_matches_bad_credentials() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    let bad_credentials = server.login_response(TRAINEE_USERNAME, "Bad999").await?;
    let bad_credentials_body = bad_credentials.text().await?;

    exhaust_attempts(&server, TRAINEE_USERNAME).await?;

    let locked = server
        .login_response(TRAINEE_USERNAME, TRAINEE_PASSWORD)
        .await?;
    assert_eq!(locked.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(locked.text().await?, bad_credentials_body);
    Ok(())
}

#[tokio::test]
async fn test_lockout_is_per_username() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;
    exhaust_attempts(&server, TRAINEE_USERNAME).await?;

    // A different account still logs in fine.
    let response = server
        .login_response(TRAINER_USERNAME, TRAINER_PASSWORD)
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    Ok(())
}

/// A success below the threshold wipes the counter; failures afterwards start
/// counting from zero.
#[tokio::test]
async fn test_lockout_counter_resets_on_success() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    for _ in 0..MAX_ATTEMPTS - 1 {
        let response = server.login_response(TRAINEE_USERNAME, "Bad999").await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = server
        .login_response(TRAINEE_USERNAME, TRAINEE_PASSWORD)
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    // Two more failures would have locked without the reset.
    for _ in 0..MAX_ATTEMPTS - 1 {
        let response = server.login_response(TRAINEE_USERNAME, "Bad999").await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
    let response = server
        .login_response(TRAINEE_USERNAME, TRAINEE_PASSWORD)
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn test_lockout_threshold_of_one_locks_immediately() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_with(TestServerOptions {
        max_login_attempts: 1,
        ..TestServerOptions::default()
    })
    .await?;

    let response = server.login_response(TRAINEE_USERNAME, "Bad999").await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = server
        .login_response(TRAINEE_USERNAME, TRAINEE_PASSWORD)
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

/// Requests that fail shape validation never reach credential verification
/// and must not count toward the lockout threshold.
#[tokio::test]
async fn test_lockout_validation_failures_do_not_count() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    for _ in 0..MAX_ATTEMPTS + 2 {
        let response = server.login_response(TRAINEE_USERNAME, "nope").await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = server
        .login_response(TRAINEE_USERNAME, TRAINEE_PASSWORD)
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    Ok(())
}

/// Failed logins for unknown usernames are tracked too; the tracker does not
/// reveal account existence by behaving differently.
#[tokio::test]
async fn test_lockout_applies_to_unknown_usernames() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn().await?;

    for _ in 0..MAX_ATTEMPTS + 1 {
        let response = server.login_response("no.such.user", "Bad999").await?;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
    Ok(())
}
