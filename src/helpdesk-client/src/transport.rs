// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Raw request/response types and the transport seam.
//!
//! A transport sends exactly what it is given: it never attaches tokens and
//! never retries. Both happen one layer up in [`crate::api::ApiClient`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use helpdesk_core::{ApiError, ApiResult};
use helpdesk_protocol::bearer_header;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound API call, relative to the transport's base URL.
#[derive(Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// Access token sent as `Authorization: Bearer ...`; `None` sends the
    /// request anonymously.
    pub bearer: Option<String>,
    /// Set once the request has been through a refresh-and-retry cycle.
    /// A 401 on a retried request is final.
    pub retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query.extend(query);
        self
    }

    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::decode(format!("JSON serialize failed: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Opt out of silent refresh: a 401 is returned to the caller as is.
    pub fn without_refresh(mut self) -> Self {
        self.retried = true;
        self
    }

    /// `Authorization` header value, if a bearer token is set.
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_deref().map(bearer_header)
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("authorized", &self.bearer.is_some())
            .field("retried", &self.retried)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Bytes,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Pass 2xx responses through; turn everything else into an [`ApiError`].
    pub fn into_result(self) -> ApiResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_status(self.status, self.text()))
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ApiError::decode(format!("{e} (status {})", self.status)))
    }
}

/// Sends raw requests to the backend.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> ApiResult<ApiResponse>;
}

/// HTTP transport backed by `reqwest`.
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::transport(format!("HTTP client init failed: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(header) = request.authorization() {
            builder = builder.header(reqwest::header::AUTHORIZATION, header);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            ApiError::transport(format!("{} {} failed: {e}", request.method, request.path))
        })?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            ApiError::transport(format!("reading {} response failed: {e}", request.path))
        })?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(
            join_url("http://localhost:8000/api/v1", "/auth/me/"),
            "http://localhost:8000/api/v1/auth/me/"
        );
        assert_eq!(join_url("http://h", "tickets/"), "http://h/tickets/");
    }

    #[test]
    fn transport_strips_trailing_slash_from_base() {
        let transport =
            ReqwestTransport::new("http://localhost:8000/api/v1/", Duration::from_secs(5))
                .expect("client");
        assert_eq!(transport.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(
            transport.url("/tickets/"),
            "http://localhost:8000/api/v1/tickets/"
        );
    }

    #[test]
    fn anonymous_request_has_no_authorization() {
        let request = ApiRequest::get("/tickets/");
        assert_eq!(request.authorization(), None);
        assert!(!request.retried);
    }

    #[test]
    fn bearer_becomes_authorization_header() {
        let mut request = ApiRequest::get("/tickets/");
        request.bearer = Some("A2".to_string());
        assert_eq!(request.authorization().as_deref(), Some("Bearer A2"));
        assert!(!format!("{request:?}").contains("A2"));
    }

    #[test]
    fn without_refresh_marks_request_retried() {
        assert!(ApiRequest::post("/auth/login/").without_refresh().retried);
    }

    #[test]
    fn into_result_maps_statuses() {
        assert!(ApiResponse::new(204, "").into_result().is_ok());
        assert!(ApiResponse::new(401, "expired")
            .into_result()
            .unwrap_err()
            .is_unauthorized());
        assert_eq!(
            ApiResponse::new(500, "boom").into_result().unwrap_err(),
            ApiError::Status {
                status: 500,
                body: "boom".to_string()
            }
        );
    }

    #[test]
    fn json_decode_error_is_reported() {
        let response = ApiResponse::new(200, "<html>");
        let err = response.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
