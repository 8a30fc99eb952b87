//! Credential acquisition against the auth service.
//!
//! One login call per credential, no retries: a failed login means nothing
//! downstream is worth running, so the error aborts the whole run.

use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity / Credential
// ---------------------------------------------------------------------------

/// A caller as known to the auth service.
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
    pub password: String,
}

/// An opaque bearer token. Immutable once acquired; no refresh or expiry
/// handling.
#[derive(Debug, Clone)]
pub struct Credential(String);

impl Credential {
    pub fn token(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

// ---------------------------------------------------------------------------
// acquire
// ---------------------------------------------------------------------------

/// Exchange an identity for a bearer credential via
/// `POST {auth_base_url}/auth/login`.
///
/// Anything but a 200 with a non-empty `token` string field is an error.
pub fn acquire(
    client: &reqwest::blocking::Client,
    auth_base_url: &str,
    identity: &Identity,
) -> Result<Credential> {
    let response = client
        .post(format!("{auth_base_url}/auth/login"))
        .json(&LoginRequest {
            username: &identity.username,
            password: &identity.password,
        })
        .send()?;

    let status = response.status().as_u16();
    let body = response.text()?;
    if status != 200 {
        return Err(HarnessError::LoginFailed { status, body });
    }

    let decoded: LoginResponse = serde_json::from_str(&body)?;
    let token = decoded
        .token
        .filter(|t| !t.is_empty())
        .ok_or(HarnessError::TokenMissing)?;

    tracing::debug!(user = %identity.username, "acquired bearer token");
    Ok(Credential(token))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn identity() -> Identity {
        Identity {
            username: "user_all".to_string(),
            password: "123".to_string(),
        }
    }

    #[test]
    fn acquire_returns_token_on_200() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/auth/login")
            .match_body(Matcher::Json(serde_json::json!({
                "username": "user_all",
                "password": "123",
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":"tok-abc"}"#)
            .create();

        let client = reqwest::blocking::Client::new();
        let credential = acquire(&client, &server.url(), &identity()).unwrap();

        assert_eq!(credential.token(), "tok-abc");
        assert_eq!(credential.bearer(), "Bearer tok-abc");
        mock.assert();
    }

    #[test]
    fn acquire_fails_on_non_200() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body("bad credentials")
            .create();

        let client = reqwest::blocking::Client::new();
        let err = acquire(&client, &server.url(), &identity()).unwrap_err();

        match err {
            HarnessError::LoginFailed { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn acquire_fails_when_token_field_absent() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body(r#"{"session":"nope"}"#)
            .create();

        let client = reqwest::blocking::Client::new();
        let err = acquire(&client, &server.url(), &identity()).unwrap_err();
        assert!(matches!(err, HarnessError::TokenMissing));
    }

    #[test]
    fn acquire_fails_when_token_empty() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body(r#"{"token":""}"#)
            .create();

        let client = reqwest::blocking::Client::new();
        let err = acquire(&client, &server.url(), &identity()).unwrap_err();
        assert!(matches!(err, HarnessError::TokenMissing));
    }

    #[test]
    fn acquire_fails_on_malformed_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/auth/login")
            .with_status(200)
            .with_body("not json")
            .create();

        let client = reqwest::blocking::Client::new();
        let err = acquire(&client, &server.url(), &identity()).unwrap_err();
        assert!(matches!(err, HarnessError::Json(_)));
    }
}
