// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Authenticated request pipeline with silent token refresh.
//!
//! Every call goes through [`ApiClient::execute`]:
//!
//! 1. the stored access token, if any, is attached as a bearer header;
//! 2. a 401 on a request that has not been retried yet starts (or joins) a
//!    refresh cycle; at most one refresh call is in flight at a time and
//!    requests arriving during it wait in a FIFO queue;
//! 3. once the refresh settles, the new token is handed to every waiter and
//!    each request is re-sent exactly once. A failed refresh clears the token
//!    store and is returned to the original caller and to every waiter.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use helpdesk_core::{ApiError, ApiResult, TokenStore};
use helpdesk_protocol::{paths, RefreshRequest, RefreshResponse};

use crate::transport::{ApiRequest, ApiResponse, HttpTransport};

type Waiter = oneshot::Sender<ApiResult<String>>;

/// Refresh guard and pending queue. Only touched under the mutex, never
/// across an `.await`.
#[derive(Default)]
struct RefreshState {
    refreshing: bool,
    waiters: Vec<Waiter>,
}

enum RefreshRole {
    /// This request runs the refresh.
    Leader,
    /// A refresh is already running; wait for its token.
    Waiter(oneshot::Receiver<ApiResult<String>>),
}

/// Shared request-issuing facility. Construct once and share by `Arc`.
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    tokens: Arc<dyn TokenStore>,
    refresh: Mutex<RefreshState>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            transport,
            tokens,
            refresh: Mutex::new(RefreshState::default()),
        }
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Whether a refresh cycle is currently in flight.
    pub fn is_refreshing(&self) -> bool {
        self.refresh_state().refreshing
    }

    fn refresh_state(&self) -> MutexGuard<'_, RefreshState> {
        self.refresh.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Send `request` with bearer auth and one refresh-and-retry on 401.
    ///
    /// Non-2xx responses come back as errors; a 401 only after the retry
    /// (or immediately for requests already marked retried).
    pub async fn execute(&self, mut request: ApiRequest) -> ApiResult<ApiResponse> {
        request.bearer = self.tokens.access();

        let response = self.transport.send(&request).await?;
        if response.status != 401 || request.retried {
            return response.into_result();
        }

        request.retried = true;
        debug!("{} {} returned 401, refreshing", request.method, request.path);
        let token = self.fresh_access_token().await?;
        request.bearer = Some(token);

        self.transport.send(&request).await?.into_result()
    }

    /// Obtain a new access token, either by running the refresh or by
    /// queueing behind the one already in flight.
    async fn fresh_access_token(&self) -> ApiResult<String> {
        let role = {
            let mut state = self.refresh_state();
            if state.refreshing {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                debug!("Refresh in flight, queued ({} waiting)", state.waiters.len());
                RefreshRole::Waiter(rx)
            } else {
                state.refreshing = true;
                RefreshRole::Leader
            }
        };

        match role {
            RefreshRole::Waiter(rx) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::transport("token refresh was abandoned"))),
            RefreshRole::Leader => {
                let cycle = RefreshCycle::start(&self.refresh);
                let outcome = self.refresh_access_token().await;
                if let Err(e) = &outcome {
                    warn!("Token refresh failed, clearing session: {}", e);
                    self.tokens.clear();
                }
                cycle.settle(&outcome);
                outcome
            }
        }
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Sent straight through the transport: no bearer, no 401 handling.
    async fn refresh_access_token(&self) -> ApiResult<String> {
        let Some(refresh) = self.tokens.refresh().filter(|r| !r.trim().is_empty()) else {
            return Err(ApiError::MissingRefreshToken);
        };

        let request = ApiRequest::post(paths::TOKEN_REFRESH).with_json(&RefreshRequest {
            refresh: refresh.clone(),
        })?;
        let response = self
            .transport
            .send(&request)
            .await
            .and_then(ApiResponse::into_result)
            .map_err(|e| ApiError::RefreshFailed(Box::new(e)))?;
        let body: RefreshResponse = response
            .json()
            .map_err(|e| ApiError::RefreshFailed(Box::new(e)))?;

        let pair = body.into_pair(refresh);
        self.tokens.set_pair(&pair.access, &pair.refresh);
        info!("Access token refreshed");
        Ok(pair.access)
    }

    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        self.execute(request).await?.json()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send_json(ApiRequest::get(path)).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ApiResult<T> {
        self.send_json(ApiRequest::get(path).with_query(query)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(ApiRequest::post(path).with_json(body)?).await
    }

    /// POST without a body (action endpoints such as cancel).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send_json(ApiRequest::post(path)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(ApiRequest::patch(path).with_json(body)?).await
    }

    /// DELETE; the response body is ignored.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(ApiRequest::delete(path)).await.map(|_| ())
    }
}

/// Ends a refresh cycle: clears the `refreshing` flag and drains the queue
/// in one critical section.
///
/// Dropping an unsettled cycle (the leader's future was cancelled) still
/// clears the flag; waiters then see their sender dropped.
struct RefreshCycle<'a> {
    state: &'a Mutex<RefreshState>,
    settled: bool,
}

impl<'a> RefreshCycle<'a> {
    fn start(state: &'a Mutex<RefreshState>) -> Self {
        Self {
            state,
            settled: false,
        }
    }

    fn finish(&self) -> Vec<Waiter> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.refreshing = false;
        std::mem::take(&mut state.waiters)
    }

    fn settle(mut self, outcome: &ApiResult<String>) {
        self.settled = true;
        let waiters = self.finish();
        if !waiters.is_empty() {
            debug!("Releasing {} queued request(s)", waiters.len());
        }
        for waiter in waiters {
            let _ = waiter.send(outcome.clone());
        }
    }
}

impl Drop for RefreshCycle<'_> {
    fn drop(&mut self) {
        if !self.settled {
            drop(self.finish());
        }
    }
}
