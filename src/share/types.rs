//! Share model.

use chrono::{DateTime, Utc};

/// A configured SMB share.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Share {
    /// Unique share ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// UNC-like root, e.g. `//host/share`.
    pub path: String,
    /// Login user, if any.
    pub username: Option<String>,
    /// Login password, stored as given.
    pub password: Option<String>,
    /// Connect automatically at startup.
    pub auto_connect: bool,
    /// Whether a session is currently open.
    pub is_connected: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShare {
    pub name: String,
    pub path: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub auto_connect: bool,
}

impl NewShare {
    /// Create a new share with the required fields.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            username: None,
            password: None,
            auto_connect: false,
        }
    }

    /// Set the login credentials.
    pub fn with_credentials(
        mut self,
        username: Option<String>,
        password: Option<String>,
    ) -> Self {
        self.username = username;
        self.password = password;
        self
    }

    /// Set the auto-connect flag.
    pub fn with_auto_connect(mut self, auto_connect: bool) -> Self {
        self.auto_connect = auto_connect;
        self
    }
}

/// Result of a connect or disconnect request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub share_id: i64,
    pub is_connected: bool,
    /// Failure reason when a connect attempt did not succeed.
    pub error: Option<String>,
}

impl ConnectionStatus {
    pub fn connected(share_id: i64) -> Self {
        Self {
            share_id,
            is_connected: true,
            error: None,
        }
    }

    pub fn disconnected(share_id: i64) -> Self {
        Self {
            share_id,
            is_connected: false,
            error: None,
        }
    }

    pub fn failed(share_id: i64, error: impl Into<String>) -> Self {
        Self {
            share_id,
            is_connected: false,
            error: Some(error.into()),
        }
    }
}
