//! Bearer-token guards for privileged routes.
//!
//! Two tokens are configured: the admin token guards share creation and
//! deletion, the manager token guards uploads and tree changes. The admin
//! token is accepted wherever the manager token is. An empty token leaves
//! its routes open.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use sha2::{Digest, Sha256};

use crate::web::error::ApiError;
use crate::web::handlers::AppState;

type TokenDigest = [u8; 32];

fn digest(token: &str) -> TokenDigest {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(token.as_bytes()));
    out
}

/// Configured access tokens, kept as SHA-256 digests.
#[derive(Debug, Clone, Default)]
pub struct AccessTokens {
    admin: Option<TokenDigest>,
    manager: Option<TokenDigest>,
}

impl AccessTokens {
    /// Build from plaintext tokens. Empty strings disable a guard.
    pub fn new(admin_token: &str, manager_token: &str) -> Self {
        let hash = |t: &str| (!t.is_empty()).then(|| digest(t));
        Self {
            admin: hash(admin_token),
            manager: hash(manager_token),
        }
    }

    /// No guards.
    pub fn open() -> Self {
        Self::default()
    }

    fn is_admin(&self, presented: Option<&TokenDigest>) -> bool {
        match self.admin {
            None => true,
            Some(expected) => presented == Some(&expected),
        }
    }

    fn is_manager(&self, presented: Option<&TokenDigest>) -> bool {
        match self.manager {
            None => true,
            Some(expected) => {
                presented == Some(&expected)
                    || (self.admin.is_some() && presented == self.admin.as_ref())
            }
        }
    }
}

fn bearer_digest(parts: &Parts) -> Option<TokenDigest> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| digest(token.trim()))
}

fn deny(presented: Option<&TokenDigest>) -> ApiError {
    if presented.is_none() {
        ApiError::unauthorized("Missing authorization")
    } else {
        ApiError::forbidden("Access denied")
    }
}

/// Extractor that requires the admin token.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let presented = bearer_digest(parts);
        if state.tokens.is_admin(presented.as_ref()) {
            Ok(AdminAccess)
        } else {
            Err(deny(presented.as_ref()))
        }
    }
}

/// Extractor that requires the manager (or admin) token.
#[derive(Debug, Clone, Copy)]
pub struct ManagerAccess;

#[async_trait]
impl FromRequestParts<Arc<AppState>> for ManagerAccess {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let presented = bearer_digest(parts);
        if state.tokens.is_manager(presented.as_ref()) {
            Ok(ManagerAccess)
        } else {
            Err(deny(presented.as_ref()))
        }
    }
}
