// Core data types shared across the crate.
//
// Wire names (`email`, `name`, `picture`, `dataLink`) are fixed: they appear
// in the session cookie, in the /api/auth response body, and in the page
// data consumed by the client store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Verified user identity plus the per-user dataset link resolved at login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: String,
    #[serde(rename = "dataLink", default)]
    pub data_link: Option<String>,
}

/// The session cookie payload. The cookie IS the session: there is no
/// server-side session table, so a session cannot be revoked before expiry
/// short of the client deleting the cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: Identity,
    #[serde(default)]
    pub token: Option<String>,
}

/// One row of the authorization directory spreadsheet.
///
/// `email` and `dataLink` are the columns the portal cares about; anything
/// else the spreadsheet owners add is carried along in `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryRow {
    pub email: String,
    pub data_link: String,
    pub extra: HashMap<String, String>,
}
