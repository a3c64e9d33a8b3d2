// SPDX-FileCopyrightText: 2025 Stanislaw Grams <stanislawgrams@gmail.com>
//
// SPDX-License-Identifier: BSD-2-Clause

pub mod error;
pub mod guard;
pub mod model;
pub mod session;
pub mod token_store;

pub type DynResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

pub use error::{ApiError, ApiResult};
pub use guard::{require_auth, require_role, GuardDecision};
pub use model::{TokenPair, UserIdentity, UserRole};
pub use session::SessionState;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
