//! HTTP client for API requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the booking API, handling authentication, response envelopes and
//! error bodies.

use super::error::ApiError;
use reqwest::{multipart, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Wire shape of every successful response.
///
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Wire shape of an error response.
///
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Makes requests to the API and tries to conform response data to the
/// requested type.
///
pub struct Client {
    access_token: Option<String>,
    base_url: String,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and optional access
    /// token.
    ///
    pub fn new(base_url: &str, access_token: Option<&str>) -> Self {
        Client {
            access_token: access_token.map(str::to_owned),
            base_url: base_url.trim_end_matches('/').to_owned(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Use the given token for subsequent requests.
    ///
    pub fn set_access_token(&mut self, token: &str) {
        self.access_token = Some(token.to_owned());
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Return envelope for a GET request to the endpoint.
    ///
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Envelope<T>, ApiError> {
        let response = self.request(Method::GET, endpoint).send().await?;
        read(endpoint, response).await
    }

    /// Return envelope for a POST request with a JSON body.
    ///
    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Envelope<T>, ApiError> {
        let response = self
            .request(Method::POST, endpoint)
            .json(body)
            .send()
            .await?;
        read(endpoint, response).await
    }

    /// Return envelope for a multipart POST carrying a single file.
    ///
    pub(crate) async fn upload<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        field: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Envelope<T>, ApiError> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_owned());
        let form = multipart::Form::new().part(field.to_owned(), part);
        let response = self
            .request(Method::POST, endpoint)
            .multipart(form)
            .send()
            .await?;
        read(endpoint, response).await
    }

    /// Prepare a request for the endpoint, authorized if a token is set.
    ///
    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let request_url = format!("{}/{}", &self.base_url, endpoint);
        log::debug!("{} {}", method, request_url);
        let request = self.http_client.request(method, &request_url);
        match &self.access_token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }
}

/// Check status and decode the response body.
///
async fn read<T: DeserializeOwned>(
    endpoint: &str,
    response: Response,
) -> Result<Envelope<T>, ApiError> {
    let status = response.status();
    let response_bytes = response.bytes().await?;

    if !status.is_success() {
        let message = match serde_json::from_slice::<ErrorBody>(&response_bytes) {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        };
        log::error!(
            "API request to '{}' failed with status {}: {}",
            endpoint,
            status,
            message
        );
        return Err(ApiError::Server {
            status: status.as_u16(),
            message,
        });
    }

    if response_bytes.is_empty() {
        log::warn!("Received empty response from '{}'", endpoint);
        return Ok(Envelope {
            message: String::new(),
            data: None,
        });
    }

    serde_json::from_slice::<Envelope<T>>(&response_bytes).map_err(|e| {
        log::error!(
            "Failed to deserialize response from '{}': {}. Response body: {}",
            endpoint,
            e,
            String::from_utf8_lossy(&response_bytes)
        );
        ApiError::Deserialization(e)
    })
}
