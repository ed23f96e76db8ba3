mod client;
mod error;
mod resource;

pub use error::ApiError;
pub use resource::*;

use client::Client;
use log::*;
use serde::de::IgnoredAny;
use std::path::Path;

const SUPPORT: &str = "support";
const REGISTER: &str = "auth/register";
const LOGIN: &str = "auth/login";
const ORGANIZATIONS: &str = "organizations";
const PHOTO: &str = "users/photo";

/// Responsible for asynchronous interaction with the booking API including
/// transformation of response data into explicitly-defined types.
///
pub struct Api {
    client: Client,
}

impl Api {
    /// Returns a new instance for the given base URL and optional access
    /// token.
    ///
    pub fn new(base_url: &str, access_token: Option<&str>) -> Api {
        debug!("Initializing API client for {}...", base_url);
        Api {
            client: Client::new(base_url, access_token),
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.client.has_access_token()
    }

    /// Send a message to the support team.
    ///
    pub async fn submit_support_message(
        &mut self,
        request: &SupportRequest,
    ) -> Result<Reply<()>, ApiError> {
        debug!("Submitting support message from {}...", request.email);
        let envelope = self.client.post::<_, IgnoredAny>(SUPPORT, request).await?;
        Ok(Reply {
            message: envelope.message,
            data: (),
        })
    }

    /// Register a new account.
    ///
    pub async fn register(&mut self, registration: &Registration) -> Result<Reply<()>, ApiError> {
        debug!("Submitting registration for {}...", registration.email);
        let envelope = self
            .client
            .post::<_, IgnoredAny>(REGISTER, registration)
            .await?;
        Ok(Reply {
            message: envelope.message,
            data: (),
        })
    }

    /// Log in and keep the returned token for subsequent requests.
    ///
    pub async fn login(&mut self, credentials: &Credentials) -> Result<Reply<Session>, ApiError> {
        debug!("Logging in as {}...", credentials.email);
        let envelope = self.client.post::<_, Session>(LOGIN, credentials).await?;
        let session = envelope.data.ok_or_else(|| ApiError::MissingData {
            endpoint: LOGIN.to_string(),
        })?;
        self.client.set_access_token(&session.token);
        Ok(Reply {
            message: envelope.message,
            data: session,
        })
    }

    /// Returns the organizations available to the user.
    ///
    pub async fn organizations(&mut self) -> Result<Vec<Organization>, ApiError> {
        debug!("Requesting organizations...");
        let envelope = self
            .client
            .get::<Vec<Organization>>(ORGANIZATIONS)
            .await?;
        let organizations = envelope.data.unwrap_or_default();
        debug!("Retrieved {} organizations", organizations.len());
        Ok(organizations)
    }

    /// Create an organization and return it.
    ///
    pub async fn add_organization(
        &mut self,
        organization: &NewOrganization,
    ) -> Result<Reply<Organization>, ApiError> {
        debug!("Adding organization '{}'...", organization.name);
        let envelope = self
            .client
            .post::<_, Organization>(ORGANIZATIONS, organization)
            .await?;
        let data = envelope.data.ok_or_else(|| ApiError::MissingData {
            endpoint: ORGANIZATIONS.to_string(),
        })?;
        Ok(Reply {
            message: envelope.message,
            data,
        })
    }

    /// Upload the file at `path` as the user's photo.
    ///
    pub async fn upload_photo(&mut self, path: &Path) -> Result<Reply<Photo>, ApiError> {
        debug!("Uploading photo {}...", path.display());
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("photo"));
        let envelope = self
            .client
            .upload::<Photo>(PHOTO, "photo", &file_name, bytes)
            .await?;
        let data = envelope.data.ok_or_else(|| ApiError::MissingData {
            endpoint: PHOTO.to_string(),
        })?;
        Ok(Reply {
            message: envelope.message,
            data,
        })
    }
}
