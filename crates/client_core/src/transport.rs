use std::time::Duration;

use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::{domain::ProductId, error::ApiStatus};
use tracing::debug;

use crate::{
    config::ConsoleSettings,
    error::{ClientError, Result},
    session::Credential,
};

/// HTTP plumbing shared by the session manager and the product repository.
#[derive(Debug, Clone)]
pub struct ApiTransport {
    http: Client,
    api_base: String,
    api_path: String,
}

impl ApiTransport {
    pub fn new(settings: &ConsoleSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self {
            http,
            api_base: settings.api_base.clone(),
            api_path: settings.api_path.clone(),
        })
    }

    pub fn from_parts(api_base: impl Into<String>, api_path: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_path: api_path.into().trim_matches('/').to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub(crate) fn signin_url(&self) -> String {
        format!("{}/admin/signin", self.api_base)
    }

    pub(crate) fn check_url(&self) -> String {
        format!("{}/api/user/check", self.api_base)
    }

    pub(crate) fn products_url(&self) -> String {
        format!("{}/api/{}/admin/products", self.api_base, self.api_path)
    }

    pub(crate) fn product_url(&self, id: Option<&ProductId>) -> String {
        match id {
            Some(id) => format!(
                "{}/api/{}/admin/product/{}",
                self.api_base, self.api_path, id
            ),
            None => format!("{}/api/{}/admin/product", self.api_base, self.api_path),
        }
    }

    pub(crate) fn post(&self, url: String) -> RequestBuilder {
        self.http.post(url)
    }

    pub(crate) fn authorized_get(&self, url: String, credential: &Credential) -> RequestBuilder {
        self.http
            .get(url)
            .header(AUTHORIZATION, credential.header_value())
    }

    pub(crate) fn authorized_post(&self, url: String, credential: &Credential) -> RequestBuilder {
        self.http
            .post(url)
            .header(AUTHORIZATION, credential.header_value())
    }

    pub(crate) fn authorized_put(&self, url: String, credential: &Credential) -> RequestBuilder {
        self.http
            .put(url)
            .header(AUTHORIZATION, credential.header_value())
    }

    pub(crate) fn authorized_delete(&self, url: String, credential: &Credential) -> RequestBuilder {
        self.http
            .delete(url)
            .header(AUTHORIZATION, credential.header_value())
    }

    /// Sends the request and decodes a successful body as `T`.
    ///
    /// Non-2xx answers and 2xx answers carrying `success: false` are mapped onto the
    /// error taxonomy: 401/403 become [`ClientError::Auth`], other 4xx become
    /// [`ClientError::Validation`] with the server message, everything else is
    /// a [`ClientError::Transport`].
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let raw: &[u8] = if body.is_empty() { b"{}" } else { &body };
        debug!(status = status.as_u16(), bytes = body.len(), "catalog api response");

        let envelope = serde_json::from_slice::<ApiStatus>(raw).ok();
        if !status.is_success() {
            let message = envelope
                .and_then(|e| e.message_text())
                .unwrap_or_else(|| status.to_string());
            return Err(classify_failure(status, message));
        }
        if let Some(envelope) = envelope.filter(ApiStatus::is_failure) {
            let message = envelope
                .message_text()
                .unwrap_or_else(|| "request rejected by server".to_string());
            return Err(ClientError::Validation(message));
        }

        serde_json::from_slice(raw)
            .map_err(|e| ClientError::Transport(format!("undecodable response body: {e}")))
    }
}

fn classify_failure(status: StatusCode, message: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Auth(message),
        s if s.is_client_error() => ClientError::Validation(message),
        s => ClientError::Transport(format!("{s}: {message}")),
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
