// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Session controller: who is logged in, and the login/logout lifecycle.
//!
//! State moves from uninitialized → initializing (check stored token) →
//! ready (authenticated or anonymous) and is published on a `watch` channel
//! so route guards and other consumers can follow it.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

use helpdesk_core::{ApiResult, SessionState, UserIdentity};
use helpdesk_protocol::{paths, LoginRequest, LoginResponse, LogoutRequest};

use crate::api::ApiClient;
use crate::transport::ApiRequest;

pub struct SessionController {
    api: Arc<ApiClient>,
    state_tx: watch::Sender<SessionState>,
    init_lock: Mutex<()>,
}

impl SessionController {
    pub fn new(api: Arc<ApiClient>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::default());
        Self {
            api,
            state_tx,
            init_lock: Mutex::new(()),
        }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    /// Current state snapshot.
    pub fn state(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    pub fn user(&self) -> Option<UserIdentity> {
        self.state_tx.borrow().user.clone()
    }

    fn update(&self, apply: impl FnOnce(&mut SessionState)) {
        self.state_tx.send_modify(apply);
    }

    /// Resolve the session from the stored access token, once.
    ///
    /// Concurrent callers are serialized: only the first one asks the
    /// backend, the rest return once it is done. Never fails; an invalid
    /// token ends in an anonymous session with the token store cleared.
    pub async fn initialize(&self) {
        let _guard = self.init_lock.lock().await;
        if self.state_tx.borrow().initialized {
            return;
        }

        if self.api.tokens().access().is_none() {
            debug!("No stored access token, starting anonymous");
            self.update(|s| s.initialized = true);
            return;
        }

        self.update(|s| s.loading = true);
        match self.api.get::<UserIdentity>(paths::ME).await {
            Ok(user) => {
                info!("Session restored for {}", user.email);
                self.update(|s| {
                    s.user = Some(user);
                    s.initialized = true;
                    s.loading = false;
                });
            }
            Err(e) => {
                warn!("Stored session rejected, signing out: {}", e);
                self.api.tokens().clear();
                self.update(|s| {
                    s.user = None;
                    s.initialized = true;
                    s.loading = false;
                });
            }
        }
    }

    /// Exchange credentials for a token pair and identity.
    ///
    /// On failure the current user is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<UserIdentity> {
        self.update(|s| s.loading = true);
        let result = self.request_login(email, password).await;
        match result {
            Ok(resp) => {
                let pair = resp.token_pair();
                self.api.tokens().set_pair(&pair.access, &pair.refresh);
                info!("Logged in as {} ({})", resp.user.email, resp.user.role);
                let user = resp.user;
                self.update(|s| {
                    s.user = Some(user.clone());
                    s.initialized = true;
                    s.loading = false;
                });
                Ok(user)
            }
            Err(e) => {
                self.update(|s| s.loading = false);
                Err(e)
            }
        }
    }

    async fn request_login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let request = ApiRequest::post(paths::LOGIN)
            .with_json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })?
            .without_refresh();
        self.api.send_json(request).await
    }

    /// End the session locally, telling the backend on a best-effort basis.
    pub async fn logout(&self) {
        if let Some(refresh) = self.api.tokens().refresh() {
            // An already expired or blacklisted token is expected here.
            if let Err(e) = self.revoke(refresh).await {
                debug!("Logout call failed, clearing local session anyway: {}", e);
            }
        }

        self.api.tokens().clear();
        self.update(|s| {
            s.user = None;
            s.initialized = true;
            s.loading = false;
        });
        info!("Logged out");
    }

    /// Blacklist `refresh` on the backend. The reply body (usually empty,
    /// status 205) is ignored.
    async fn revoke(&self, refresh: String) -> ApiResult<()> {
        let request = ApiRequest::post(paths::LOGOUT).with_json(&LogoutRequest { refresh })?;
        self.api.execute(request).await.map(|_| ())
    }

    /// Re-read the current identity.
    ///
    /// Unlike [`initialize`](Self::initialize), a failure is returned to the
    /// caller and the session is left as it was.
    pub async fn fetch_me(&self) -> ApiResult<UserIdentity> {
        self.update(|s| s.loading = true);
        match self.api.get::<UserIdentity>(paths::ME).await {
            Ok(user) => {
                self.update(|s| {
                    s.user = Some(user.clone());
                    s.initialized = true;
                    s.loading = false;
                });
                Ok(user)
            }
            Err(e) => {
                self.update(|s| s.loading = false);
                Err(e)
            }
        }
    }
}
