use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};
use anyhow::Result;
use crate::client::ApiClient;
use crate::error::PackitError;
use crate::util::get_auth_file;

/// The locally persisted credential record.
///
/// Written to [`crate::util::AUTH_FILE_NAME`] in the working directory by
/// `login` and removed by `logout`. Its presence is what "logged in" means;
/// the session identity itself is never persisted.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthFile {
    /// The access token obtained from the web dashboard.
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

impl AuthFile {
    pub fn new(access_token: &str) -> Self {
        AuthFile { access_token: access_token.to_string() }
    }

    /// Reads the credential record at `path`.
    ///
    /// A missing or unparseable file is a valid logged-out state, not an
    /// error, so both come back as `None`.
    pub fn load<P: AsRef<Path>>(path: P) -> Option<AuthFile> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Serializes and persists the record, overwriting any existing one.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Removes the persisted record. Callers must check [`AuthFile::exists`]
    /// first; deleting a missing record is an error.
    pub fn delete<P: AsRef<Path>>(path: P) -> Result<()> {
        fs::remove_file(path)?;
        Ok(())
    }

    /// True iff a parseable credential record is present at `path`.
    pub fn exists<P: AsRef<Path>>(path: P) -> bool {
        Self::load(path).is_some()
    }
}

/// Derives the session identity for the current invocation.
///
/// Reads the credential record from the working directory, exchanges the
/// stored access token for a sign-in token and signs in, returning the
/// stable `userUid` of the authenticated principal. Runs on every
/// authenticated command; nothing is cached between invocations.
pub fn authenticate(client: &ApiClient) -> Result<String> {
    let auth_path = get_auth_file()?;
    let auth = AuthFile::load(&auth_path)
        .ok_or(PackitError::NotAuthenticated)?;
    let session_token = client.exchange_access_token(&auth.access_token)?;
    let user_uid = client.sign_in(&session_token)?;
    Ok(user_uid)
}
