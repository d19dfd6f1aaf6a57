//! Remote user directory client.
//!
//! Every call is fire-once: no retries, no timeout beyond the transport
//! default, no idempotency key. Non-success statuses map to the
//! operation-specific `ApiError` variant; transport failures (including
//! undecodable bodies) map to `ApiError::Transport`.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use thiserror::Error;

use crate::config::Config;
use crate::models::{
    ErrorBody, ListUsersResponse, LoginRequest, LoginResponse, Page, UpdatedUser, UserUpdate,
};
use crate::session::Session;

pub const USER_AGENT: &str = concat!("userhive/", env!("CARGO_PKG_VERSION"));

/// Header carrying the optional API key.
const API_KEY_HEADER: &str = "x-api-key";

/// The directory operation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    ListUsers,
    UpdateUser,
    DeleteUser,
}

impl Operation {
    fn context(self) -> &'static str {
        match self {
            Operation::Login => "during login",
            Operation::ListUsers => "while fetching users",
            Operation::UpdateUser => "while updating user",
            Operation::DeleteUser => "while deleting user",
        }
    }
}

/// Errors returned by the directory client.
///
/// The `Display` output of every variant is the message shown to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad credentials or any other non-success login response.
    #[error("{message}")]
    Auth { status: StatusCode, message: String },

    /// Non-success response to a page listing.
    #[error("{message}")]
    Fetch { status: StatusCode, message: String },

    /// Non-success response to an update.
    #[error("{message}")]
    Update { status: StatusCode, message: String },

    /// Non-success response to a delete.
    #[error("{message}")]
    Delete { status: StatusCode, message: String },

    /// The server answered a page request with fewer pages than asked for.
    #[error("Page {page} is out of range (1-{total_pages})")]
    PageOutOfRange { page: u32, total_pages: u32 },

    /// The request never produced a usable response.
    #[error("An error occurred {}", .operation.context())]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Returns the HTTP status for status-level failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Auth { status, .. }
            | ApiError::Fetch { status, .. }
            | ApiError::Update { status, .. }
            | ApiError::Delete { status, .. } => Some(*status),
            ApiError::PageOutOfRange { .. } | ApiError::Transport { .. } => None,
        }
    }

    fn transport(operation: Operation) -> impl FnOnce(reqwest::Error) -> Self {
        move |source| ApiError::Transport { operation, source }
    }
}

/// HTTP client for the user directory.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base_url: String,
    http: reqwest::Client,
}

impl DirectoryClient {
    /// Creates a client for `base_url` (no trailing slash required).
    ///
    /// # Errors
    /// Returns an error if the API key is not a valid header value or the
    /// HTTP client cannot be constructed.
    pub fn new(base_url: &str, api_key: Option<&str>) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(key)
                .map_err(|e| anyhow::anyhow!("Invalid API key header value: {e}"))?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Creates a client from the resolved configuration.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let base_url = config.resolved_base_url()?;
        Self::new(&base_url, config.api_key())
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Authenticates and returns a new session.
    ///
    /// # Errors
    /// `ApiError::Auth` with the server's message (or "Login failed") on a
    /// non-success status; `ApiError::Transport` otherwise.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let op = Operation::Login;
        tracing::debug!(%email, "login request");

        let response = self
            .http
            .post(self.endpoint("/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(ApiError::transport(op))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_message(response, "Login failed").await;
            tracing::info!(%status, %message, "login rejected");
            return Err(ApiError::Auth { status, message });
        }

        let body: LoginResponse = response.json().await.map_err(ApiError::transport(op))?;
        let session = Session::new(body.token);
        tracing::info!(token = %session.masked_token(), "login succeeded");
        Ok(session)
    }

    /// Fetches one page of users.
    ///
    /// # Errors
    /// `ApiError::Fetch` on a non-success status, `ApiError::PageOutOfRange`
    /// when `page` is past the last page, `ApiError::Transport` otherwise.
    pub async fn list_users(&self, page: u32) -> Result<Page, ApiError> {
        let op = Operation::ListUsers;
        tracing::debug!(page, "list users request");

        let response = self
            .http
            .get(self.endpoint("/users"))
            .query(&[("page", page)])
            .send()
            .await
            .map_err(ApiError::transport(op))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(%status, page, "list users failed");
            return Err(ApiError::Fetch {
                status,
                message: "Failed to fetch users".to_string(),
            });
        }

        let body: ListUsersResponse = response.json().await.map_err(ApiError::transport(op))?;
        let total_pages = body.total_pages.max(1);
        if page > total_pages {
            tracing::warn!(page, total_pages, "requested page is out of range");
            return Err(ApiError::PageOutOfRange { page, total_pages });
        }
        Ok(Page {
            items: body.data,
            page: body.page.unwrap_or(page).clamp(1, total_pages),
            total_pages,
        })
    }

    /// Sends a full update of a user's editable fields.
    ///
    /// # Errors
    /// `ApiError::Update` with the server's message (or "Failed to update user")
    /// on a non-success status; `ApiError::Transport` otherwise.
    pub async fn update_user(&self, id: u64, update: &UserUpdate) -> Result<UpdatedUser, ApiError> {
        let op = Operation::UpdateUser;
        tracing::debug!(id, "update user request");

        let response = self
            .http
            .put(self.endpoint(&format!("/users/{id}")))
            .json(update)
            .send()
            .await
            .map_err(ApiError::transport(op))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_message(response, "Failed to update user").await;
            tracing::warn!(%status, id, %message, "update user failed");
            return Err(ApiError::Update { status, message });
        }

        let echo: UpdatedUser = response.json().await.map_err(ApiError::transport(op))?;
        tracing::info!(id, updated_at = ?echo.updated_at, "user updated");
        Ok(echo)
    }

    /// Deletes a user.
    ///
    /// # Errors
    /// `ApiError::Delete` on a non-success status; `ApiError::Transport` otherwise.
    pub async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
        let op = Operation::DeleteUser;
        tracing::debug!(id, "delete user request");

        let response = self
            .http
            .delete(self.endpoint(&format!("/users/{id}")))
            .send()
            .await
            .map_err(ApiError::transport(op))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(%status, id, "delete user failed");
            return Err(ApiError::Delete {
                status,
                message: "Failed to delete user".to_string(),
            });
        }

        tracing::info!(id, "user deleted");
        Ok(())
    }
}

/// Extracts `{"error": "..."}` from a failed response, or returns `fallback`.
async fn error_message(response: Response, fallback: &str) -> String {
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
