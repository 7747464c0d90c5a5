//! Cookie-session HTTP client for the word-set API.

use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::Url;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use wordcard_core::error::ApiFailure;
use wordcard_runtime::CancelToken;

use crate::envelope;
use crate::schema::Schema;

/// Errors constructing an [`ApiClient`]. Request failures are [`ApiFailure`]s.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Body of a POST request.
pub enum PostBody {
    Json(serde_json::Value),
    Form(Form),
}

impl PostBody {
    pub fn json<B: Serialize>(body: &B) -> Result<Self, ApiFailure> {
        serde_json::to_value(body).map(PostBody::Json).map_err(|e| {
            tracing::warn!("failed to encode request body: {e}");
            ApiFailure::error(envelope::REQUEST_FAILED)
        })
    }

    pub fn empty() -> Self {
        PostBody::Json(serde_json::Value::Object(Default::default()))
    }
}

/// API client. Cookies set by the server are kept for later requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;

        Ok(Self { base, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build the URL for `segments` below the base URL.
    pub fn url(&self, segments: &[&str], params: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        url
    }

    /// `GET` an endpoint and decode its payload as `T`.
    ///
    /// A cancelled `cancel` token resolves to an `AbortError` failure.
    #[instrument(skip(self, cancel), fields(base = %self.base))]
    pub async fn get_request<T: Schema>(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
        cancel: Option<&CancelToken>,
    ) -> Result<T, ApiFailure> {
        let request = self.http.get(self.url(segments, params));
        self.exchange(request, cancel).await
    }

    /// `POST` to an endpoint and decode its payload as `T`.
    #[instrument(skip(self, body, cancel), fields(base = %self.base))]
    pub async fn post_request<T: Schema>(
        &self,
        segments: &[&str],
        body: PostBody,
        cancel: Option<&CancelToken>,
    ) -> Result<T, ApiFailure> {
        let request = self.http.post(self.url(segments, &[]));
        let request = match body {
            PostBody::Json(value) => request.json(&value),
            PostBody::Form(form) => request.multipart(form),
        };
        self.exchange(request, cancel).await
    }

    async fn exchange<T: Schema>(
        &self,
        request: reqwest::RequestBuilder,
        cancel: Option<&CancelToken>,
    ) -> Result<T, ApiFailure> {
        let exchange = async {
            let response = request.send().await.map_err(network_failure)?;
            let status = response.status();
            if !status.is_success() {
                tracing::warn!(%status, "request returned an error status");
            }
            let body = response.bytes().await.map_err(network_failure)?;
            envelope::decode::<T>(status.is_success(), &body)
        };

        let result = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(ApiFailure::aborted()),
                result = exchange => result,
            },
            None => exchange.await,
        };

        if let Err(failure) = &result {
            tracing::debug!(kind = ?failure.kind, "request failed: {failure}");
        }
        result
    }
}

fn network_failure(e: reqwest::Error) -> ApiFailure {
    if e.is_timeout() {
        tracing::warn!("request timed out: {e}");
    } else {
        tracing::warn!("network error: {e}");
    }
    ApiFailure::error(envelope::REQUEST_FAILED)
}
