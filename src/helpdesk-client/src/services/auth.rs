// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

use helpdesk_core::ApiResult;
use helpdesk_protocol::{paths, Detail, PasswordResetRequest};

use crate::api::ApiClient;

/// Ask the backend to mail a reset link to `email`.
///
/// The reply is the same whether or not the address is known.
pub async fn request_password_reset(api: &ApiClient, email: &str) -> ApiResult<Detail> {
    let body = PasswordResetRequest {
        email: email.trim().to_string(),
    };
    api.post(paths::PASSWORD_RESET_REQUEST, &body).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{client_with, FakeBackend};
    use crate::transport::Method;

    #[tokio::test]
    async fn password_reset_posts_email_anonymously() {
        let backend = FakeBackend::new();
        backend.route(
            paths::PASSWORD_RESET_REQUEST,
            200,
            json!({ "detail": "If the address exists, instructions were sent." }),
        );
        let (api, _) = client_with(&backend, None);

        let reply = request_password_reset(&api, " ana@example.com ")
            .await
            .expect("reset");

        assert_eq!(reply.detail, "If the address exists, instructions were sent.");
        let sent = &backend.requests_to(paths::PASSWORD_RESET_REQUEST)[0];
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.bearer, None);
        assert_eq!(sent.body, Some(json!({ "email": "ana@example.com" })));
    }

    #[tokio::test]
    async fn password_reset_surfaces_validation_errors() {
        let backend = FakeBackend::new();
        backend.route(
            paths::PASSWORD_RESET_REQUEST,
            400,
            json!({ "email": ["Enter a valid email address."] }),
        );
        let (api, _) = client_with(&backend, None);

        let err = request_password_reset(&api, "not-an-email")
            .await
            .expect_err("must fail");
        assert_eq!(err.status(), Some(400));
        assert_eq!(backend.refresh_calls(), 0);
    }
}
