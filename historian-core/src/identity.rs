//! Caller identity and the per-request execution context.
//!
//! The historian never authenticates anyone itself. An upstream gateway
//! validates the caller and forwards the result as headers; this module
//! turns those headers into a [`CallerIdentity`] and carries it, together
//! with the request deadline, through the query path.

use std::time::Duration;

use http::HeaderMap;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ORG_ID_HEADER: &str = "x-org-id";
pub const USER_LOGIN_HEADER: &str = "x-user-login";
pub const USER_ROLES_HEADER: &str = "x-user-roles";

/// Authenticated caller. `org_id` is the tenant every query is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub org_id: i64,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl CallerIdentity {
    pub fn new(org_id: i64, user_id: impl Into<String>) -> Self {
        Self {
            org_id,
            user_id: user_id.into(),
            login: None,
            roles: Vec::new(),
        }
    }

    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = Some(login.into());
        self
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Reads the identity forwarded by the gateway.
    ///
    /// Returns `None` when the user or org header is missing, not valid
    /// UTF-8, or when the org id is not a signed 64-bit integer.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
        };

        let user_id = header(USER_ID_HEADER)?;
        let org_id = header(ORG_ID_HEADER)?.parse::<i64>().ok()?;

        let mut identity = CallerIdentity::new(org_id, user_id);
        if let Some(login) = header(USER_LOGIN_HEADER) {
            identity = identity.with_login(login);
        }
        if let Some(roles) = header(USER_ROLES_HEADER) {
            identity = identity.with_roles(roles.split_whitespace());
        }

        Some(identity)
    }
}

/// Execution context of a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    caller: Option<CallerIdentity>,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context with no caller attached.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_caller(caller: CallerIdentity) -> Self {
        Self {
            caller: Some(caller),
            deadline: None,
        }
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            caller: CallerIdentity::from_headers(headers),
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn caller(&self) -> Option<&CallerIdentity> {
        self.caller.as_ref()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
