use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use anyhow::{Context, Result};
use crate::error::PackitError;

/// Production endpoint of the packit backend.
const DEFAULT_API_URL: &str = "https://api.packit.dev/v1";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(rename = "userUid")]
    user_uid: String,
}

/// A stored package record as returned by the document store.
#[derive(Debug, Deserialize, Serialize)]
pub struct PackageRecord {
    /// The flattened project source.
    pub code: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    packages: Vec<String>,
}

/// Blocking HTTP client for the identity service and the package store.
///
/// Every method is a single round-trip with no retries; a failure surfaces
/// immediately to the invoking command. The base URL can be overridden with
/// the `PACKIT_API_URL` environment variable.
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new() -> Self {
        let base_url = std::env::var("PACKIT_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Exchanges a dashboard access token for a short-lived sign-in token.
    pub fn exchange_access_token(&self, access_token: &str) -> Result<String> {
        let url = format!("{}/auth/verify", self.base_url);
        let response = self.http.post(&url)
            .json(&json!({ "token": access_token }))
            .send()
            .context("Could not reach the authentication service")?;
        if !response.status().is_success() {
            return Err(PackitError::InvalidToken.into());
        }
        let body: TokenResponse = response.json()?;
        Ok(body.token)
    }

    /// Signs in with a sign-in token and returns the principal's `userUid`.
    pub fn sign_in(&self, session_token: &str) -> Result<String> {
        let url = format!("{}/auth/signin", self.base_url);
        let response = self.http.post(&url)
            .json(&json!({ "token": session_token }))
            .send()
            .context("Could not reach the authentication service")?;
        if !response.status().is_success() {
            return Err(PackitError::InvalidToken.into());
        }
        let body: SignInResponse = response.json()?;
        Ok(body.user_uid)
    }

    /// Creates or overwrites the record under `key` in the user's namespace.
    pub fn put_package(&self, user_uid: &str, key: &str, code: &str) -> Result<()> {
        let url = self.package_url(user_uid, key);
        let response = self.http.put(&url)
            .json(&PackageRecord { code: code.to_string() })
            .send()
            .context("Could not reach the package store")?;
        check_status(response)?;
        Ok(())
    }

    /// Fetches the record under `key`, or `None` if no such record exists.
    pub fn get_package(&self, user_uid: &str, key: &str) -> Result<Option<PackageRecord>> {
        let url = self.package_url(user_uid, key);
        let response = self.http.get(&url)
            .send()
            .context("Could not reach the package store")?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response)?;
        let record: PackageRecord = response.json()?;
        Ok(Some(record))
    }

    /// Deletes the record under `key`. The record must exist.
    pub fn delete_package(&self, user_uid: &str, key: &str) -> Result<()> {
        let url = self.package_url(user_uid, key);
        let response = self.http.delete(&url)
            .send()
            .context("Could not reach the package store")?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(PackitError::RecordNotFound.into());
        }
        check_status(response)?;
        Ok(())
    }

    /// Lists all record keys in the user's namespace, in server order.
    pub fn list_packages(&self, user_uid: &str) -> Result<Vec<String>> {
        let url = format!("{}/users/{}/packages", self.base_url, user_uid);
        let response = self.http.get(&url)
            .send()
            .context("Could not reach the package store")?;
        let response = check_status(response)?;
        let body: ListResponse = response.json()?;
        Ok(body.packages)
    }

    fn package_url(&self, user_uid: &str, key: &str) -> String {
        // '<' and '>' are percent-encoded by the URL parser on send.
        format!("{}/users/{}/packages/{}", self.base_url, user_uid, key)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

fn check_status(response: Response) -> Result<Response> {
    match response.status() {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(PackitError::PermissionDenied.into())
        }
        _ => response.error_for_status().map_err(|e| e.into()),
    }
}
