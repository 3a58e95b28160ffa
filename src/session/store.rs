//! Session store.
//!
//! Sessions are created on login, looked up on every authenticated request, and destroyed
//! on logout or when they expire. The store is owned by the application state rather
//! than living in a global.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::{AdminConfig, SessionConfig};
use crate::error::{EngineError, EngineResult};
use crate::store::Registry;

use super::credentials::{Credentials, verify_password};

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Bearer token identifying the session.
    pub token: Uuid,
    /// The login name.
    pub username: String,
    /// Whether the session may manage master data.
    pub is_admin: bool,
    /// The approver the session acts for; `None` for the administrator.
    pub approver_emp_id: Option<String>,
    /// When the session was created.
    pub issued_at: DateTime<Utc>,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Returns true if the session has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Requires an administrator session.
    pub fn require_admin(&self) -> EngineResult<()> {
        if self.is_admin {
            Ok(())
        } else {
            Err(EngineError::Forbidden {
                message: "Admin privileges required!".to_string(),
            })
        }
    }

    /// Returns the approver scope of the session; `None` means unrestricted.
    pub fn approver_scope(&self) -> Option<&str> {
        if self.is_admin {
            None
        } else {
            self.approver_emp_id.as_deref()
        }
    }
}

/// Holds the live sessions.
#[derive(Debug)]
pub struct SessionStore {
    admin: AdminConfig,
    ttl: Duration,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    /// Creates an empty store for the configured administrator and session lifetime.
    pub fn new(admin: AdminConfig, config: &SessionConfig) -> Self {
        Self {
            admin,
            ttl: Duration::minutes(config.ttl_minutes),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Authenticates `credentials` and opens a new session.
    ///
    /// The configured administrator gets an admin session; an approver logging in with
    /// their employee ID gets a session scoped to their own employees.
    pub fn login(
        &self,
        credentials: &Credentials,
        registry: &Registry,
        now: DateTime<Utc>,
    ) -> EngineResult<Session> {
        let (is_admin, approver_emp_id) = if credentials.username == self.admin.username {
            if !verify_password(&credentials.password, &self.admin.password_hash) {
                return Err(EngineError::InvalidCredentials);
            }
            (true, None)
        } else {
            let approver = registry
                .approver(&credentials.username)
                .map_err(|_| EngineError::InvalidCredentials)?;
            if !verify_password(&credentials.password, &approver.password_hash) {
                return Err(EngineError::InvalidCredentials);
            }
            (false, Some(approver.emp_id))
        };

        let session = Session {
            token: Uuid::new_v4(),
            username: credentials.username.clone(),
            is_admin,
            approver_emp_id,
            issued_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions.write().insert(session.token, session.clone());
        info!(username = %session.username, is_admin, "Session opened");

        Ok(session)
    }

    /// Resolves a bearer token to its session.
    pub fn authenticate(&self, token: Option<&str>, now: DateTime<Utc>) -> EngineResult<Session> {
        let token = token.ok_or_else(|| EngineError::Unauthorized {
            message: "Token is missing!".to_string(),
        })?;
        let token = Uuid::parse_str(token).map_err(|_| EngineError::Unauthorized {
            message: "Token is invalid!".to_string(),
        })?;

        let session = self
            .sessions
            .read()
            .get(&token)
            .cloned()
            .ok_or_else(|| EngineError::Unauthorized {
                message: "Token is invalid!".to_string(),
            })?;

        if session.is_expired(now) {
            self.sessions.write().remove(&token);
            debug!(username = %session.username, "Session expired");
            return Err(EngineError::SessionExpired);
        }

        Ok(session)
    }

    /// Destroys a session. Returns false if it did not exist.
    pub fn logout(&self, token: Uuid) -> bool {
        let removed = self.sessions.write().remove(&token);
        if let Some(session) = &removed {
            info!(username = %session.username, "Session closed");
        }
        removed.is_some()
    }

    /// Removes every session that has expired at `now`; returns how many were removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        before - sessions.len()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns true if there are no live sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
