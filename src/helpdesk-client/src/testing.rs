// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! In-process fake backend for client tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{json, Value};

use helpdesk_core::{ApiError, ApiResult, MemoryTokenStore, TokenStore};
use helpdesk_protocol::paths;

use crate::api::ApiClient;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport};

/// Scripted backend.
///
/// Protected routes answer 401 unless the request carries `accepted_token`.
/// The refresh endpoint answers `refresh_reply` after `refresh_delay`.
pub(crate) struct FakeBackend {
    accepted_token: Mutex<Option<String>>,
    routes: Mutex<HashMap<String, (u16, Bytes)>>,
    refresh_reply: Mutex<(u16, Value)>,
    refresh_delay: Mutex<Duration>,
    offline: Mutex<HashSet<String>>,
    requests: Mutex<Vec<ApiRequest>>,
    refresh_calls: AtomicUsize,
}

impl FakeBackend {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            accepted_token: Mutex::new(None),
            routes: Mutex::new(HashMap::new()),
            refresh_reply: Mutex::new((401, json!({ "detail": "token not valid" }))),
            refresh_delay: Mutex::new(Duration::ZERO),
            offline: Mutex::new(HashSet::new()),
            requests: Mutex::new(Vec::new()),
            refresh_calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn accept_token(&self, token: &str) {
        *self.accepted_token.lock().unwrap() = Some(token.to_string());
    }

    pub(crate) fn route(&self, path: &str, status: u16, body: Value) {
        self.route_raw(path, status, body.to_string());
    }

    /// Answer `path` with a raw (possibly empty or non-JSON) body.
    pub(crate) fn route_raw(&self, path: &str, status: u16, body: impl Into<String>) {
        self.routes
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, Bytes::from(body.into())));
    }

    pub(crate) fn refresh_returns(&self, status: u16, body: Value) {
        *self.refresh_reply.lock().unwrap() = (status, body);
    }

    pub(crate) fn refresh_delay(&self, delay: Duration) {
        *self.refresh_delay.lock().unwrap() = delay;
    }

    /// Fail every request to `path` with a transport error.
    pub(crate) fn take_offline(&self, path: &str) {
        self.offline.lock().unwrap().insert(path.to_string());
    }

    pub(crate) fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    fn is_authorized(&self, request: &ApiRequest) -> bool {
        match self.accepted_token.lock().unwrap().as_deref() {
            None => true,
            Some(token) => request.bearer.as_deref() == Some(token),
        }
    }
}

#[async_trait]
impl HttpTransport for FakeBackend {
    async fn send(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        self.requests.lock().unwrap().push(request.clone());

        if self.offline.lock().unwrap().contains(&request.path) {
            return Err(ApiError::transport(format!("{} unreachable", request.path)));
        }

        if request.path == paths::TOKEN_REFRESH {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            let delay = *self.refresh_delay.lock().unwrap();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let (status, body) = self.refresh_reply.lock().unwrap().clone();
            return Ok(ApiResponse::json_body(status, &body));
        }

        if request.path != paths::LOGIN && !self.is_authorized(request) {
            return Ok(ApiResponse::json_body(
                401,
                &json!({ "detail": "Given token not valid for any token type" }),
            ));
        }

        let reply = self.routes.lock().unwrap().get(&request.path).cloned();
        match reply {
            Some((status, body)) => Ok(ApiResponse::new(status, body)),
            None => Ok(ApiResponse::json_body(404, &json!({ "detail": "Not found." }))),
        }
    }
}

pub(crate) fn user_json(id: &str, role: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{id}@example.com"),
        "first_name": "Test",
        "last_name": "User",
        "full_name": "Test User",
        "role": role,
        "is_active": true,
        "created_at": "2026-01-01T00:00:00Z"
    })
}

/// Client over `backend` with `tokens` preloaded.
pub(crate) fn client_with(
    backend: &Arc<FakeBackend>,
    tokens: Option<(&str, &str)>,
) -> (Arc<ApiClient>, Arc<MemoryTokenStore>) {
    let store = Arc::new(match tokens {
        Some((access, refresh)) => MemoryTokenStore::with_pair(access, refresh),
        None => MemoryTokenStore::new(),
    });
    let tokens: Arc<dyn TokenStore> = store.clone();
    let transport: Arc<dyn HttpTransport> = backend.clone();
    (Arc::new(ApiClient::new(transport, tokens)), store)
}
