use fake::Dummy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

const REDACTED: &str = "<redacted>";

/// Defines organization data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Defines the payload for creating an organization.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Defines a message for the support team.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Defines the registration payload.
///
#[derive(Clone, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Defines login credentials.
///
#[derive(Clone, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Defines an authenticated session returned by login.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user: Map<String, Value>,
}

/// Defines the location of an uploaded photo.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
}

/// Successful result of an API operation: the server's human-readable
/// message plus the operation's data.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Reply<T> {
    pub message: String,
    pub data: T,
}
