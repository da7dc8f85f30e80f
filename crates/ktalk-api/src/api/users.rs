// Users facade
//
// Lookup, search, bulk upsert, blocking, and avatar management for space
// members. Search endpoints cap `top` at 1000 on the client side.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use super::{DEFAULT_TOP, no_body};
use crate::error::Error;
use crate::query::Query;
use crate::transport::Transport;

/// Upper bound the server accepts for `top` on user listings.
const MAX_TOP: u32 = 1000;

/// Maximum number of records accepted by one bulk upsert call.
pub const MAX_USERS_PER_REQUEST: usize = 30;

/// Options for `GET users/scan`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserScan {
    pub top: u32,
    pub offset: Option<String>,
    pub role: Option<String>,
    pub include_disabled: bool,
}

impl Default for UserScan {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            offset: None,
            role: None,
            include_disabled: false,
        }
    }
}

/// Options for `GET users`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFilter {
    pub top: u32,
    pub skip: u32,
    /// Free-text search over names, logins, and emails.
    pub query: Option<String>,
    /// Exact email matches; sent as repeated `email[]` parameters.
    pub emails: Vec<String>,
    pub role: Option<String>,
    pub include_disabled: bool,
    pub fill_in_meeting_status: bool,
}

impl Default for UserFilter {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            skip: 0,
            query: None,
            emails: Vec::new(),
            role: None,
            include_disabled: false,
            fill_in_meeting_status: false,
        }
    }
}

/// Space member operations.
#[derive(Debug, Clone)]
pub struct Users {
    transport: Arc<Transport>,
}

impl Users {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `GET users/{key}`
    pub async fn get_by_key(&self, user_key: &str) -> Result<Value, Error> {
        self.transport
            .get(&format!("users/{user_key}"), &Query::new())
            .await
    }

    /// Page through every user with a continuation token.
    ///
    /// `GET users/scan`
    pub async fn scan(&self, opts: &UserScan) -> Result<Value, Error> {
        let query = Query::new()
            .set("top", opts.top.min(MAX_TOP).to_string())
            .flag("includeDisabled", opts.include_disabled)
            .set_opt("offset", opts.offset.as_deref())
            .set_opt("role", opts.role.as_deref());

        self.transport.get("users/scan", &query).await
    }

    /// Filtered search.
    ///
    /// `GET users`
    pub async fn list(&self, filter: &UserFilter) -> Result<Value, Error> {
        let query = Query::new()
            .set("top", filter.top.min(MAX_TOP).to_string())
            .set("skip", filter.skip.to_string())
            .flag("includeDisabled", filter.include_disabled)
            .flag("fillInMeetingStatus", filter.fill_in_meeting_status)
            .set_opt("query", filter.query.as_deref())
            .set_opt("role", filter.role.as_deref())
            .extend("email", &filter.emails);

        self.transport.get("users", &query).await
    }

    /// Users together with their current meeting status.
    pub async fn list_with_statuses(&self, top: u32, skip: u32) -> Result<Value, Error> {
        let query = Query::new()
            .set("top", top.min(MAX_TOP).to_string())
            .set("skip", skip.to_string())
            .flag("fillInMeetingStatus", true);

        self.transport.get("users", &query).await
    }

    /// Search by email, including meeting status.
    pub async fn get_by_email(&self, email: &str) -> Result<Value, Error> {
        let query = Query::new()
            .set("query", email)
            .flag("fillInMeetingStatus", true);

        self.transport.get("users", &query).await
    }

    /// Block (`disabled = true`) or restore an account.
    ///
    /// `PUT users/{key}/permissions`
    pub async fn set_permissions(&self, user_key: &str, disabled: bool) -> Result<Value, Error> {
        debug!(user_key, disabled, "updating user permissions");
        self.transport
            .put(
                &format!("users/{user_key}/permissions"),
                &json!({ "disabled": disabled }),
                &Query::new(),
            )
            .await
    }

    /// Create, update, or restore up to [`MAX_USERS_PER_REQUEST`] users.
    ///
    /// `POST users` with the records as a JSON array. Larger batches fail
    /// with [`Error::Validation`] before any request is sent.
    pub async fn create_or_update<T: Serialize + Sync>(
        &self,
        users: &[T],
    ) -> Result<Value, Error> {
        if users.len() > MAX_USERS_PER_REQUEST {
            return Err(Error::Validation {
                message: format!(
                    "too many users in one request: {} (maximum {MAX_USERS_PER_REQUEST})",
                    users.len()
                ),
            });
        }

        debug!(count = users.len(), "upserting users");
        self.transport.post("users", users, &Query::new()).await
    }

    /// Refresh the avatar from the calendar service.
    ///
    /// `POST users/{key}/avatar/sync`
    pub async fn sync_avatar(&self, user_key: &str) -> Result<Value, Error> {
        self.transport
            .post(
                &format!("users/{user_key}/avatar/sync"),
                &no_body(),
                &Query::new(),
            )
            .await
    }

    /// `DELETE users/{key}`
    pub async fn delete(&self, user_key: &str) -> Result<Value, Error> {
        debug!(user_key, "deleting user");
        self.transport
            .delete(&format!("users/{user_key}"), &Query::new())
            .await
    }

    /// Users holding a role.
    ///
    /// `GET Users/scan?role=...`
    pub async fn list_by_role(&self, role_id: &str) -> Result<Value, Error> {
        let query = Query::new().set("role", role_id);
        self.transport.get("Users/scan", &query).await
    }

    /// `DELETE users/{key}/avatar`
    pub async fn delete_avatar(&self, user_key: &str) -> Result<Value, Error> {
        self.transport
            .delete(&format!("users/{user_key}/avatar"), &Query::new())
            .await
    }
}
