// Roles facade
//
// Role definitions, the default role, user-role assignment, and the
// permission catalog. User-role endpoints live under `Users/` (capital U).

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::Error;
use crate::query::Query;
use crate::transport::Transport;

/// Body of `POST roles` / `PUT roles/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub permissions: Vec<String>,
}

impl RoleDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Role and permission operations.
#[derive(Debug, Clone)]
pub struct Roles {
    transport: Arc<Transport>,
}

impl Roles {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `GET roles`
    pub async fn list(&self) -> Result<Value, Error> {
        self.transport.get("roles", &Query::new()).await
    }

    /// `GET roles/{id}`, with `includeUsersCount=true` only when asked.
    pub async fn get(&self, role_id: &str, include_users_count: bool) -> Result<Value, Error> {
        let mut query = Query::new();
        if include_users_count {
            query = query.flag("includeUsersCount", true);
        }
        self.transport
            .get(&format!("roles/{role_id}"), &query)
            .await
    }

    /// `POST roles`
    pub async fn create(&self, draft: &RoleDraft) -> Result<Value, Error> {
        debug!(title = %draft.title, "creating role");
        self.transport.post("roles", draft, &Query::new()).await
    }

    /// `PUT roles/{id}`
    pub async fn update(&self, role_id: &str, draft: &RoleDraft) -> Result<Value, Error> {
        self.transport
            .put(&format!("roles/{role_id}"), draft, &Query::new())
            .await
    }

    /// `GET Users/{key}/roles`
    pub async fn user_roles(&self, user_key: &str) -> Result<Value, Error> {
        self.transport
            .get(&format!("Users/{user_key}/roles"), &Query::new())
            .await
    }

    /// Grant and revoke roles in one call.
    ///
    /// `POST Users/{key}/roles`
    pub async fn manage_user_roles(
        &self,
        user_key: &str,
        added: &[String],
        removed: &[String],
    ) -> Result<Value, Error> {
        debug!(
            user_key,
            added = added.len(),
            removed = removed.len(),
            "updating user roles"
        );
        self.transport
            .post(
                &format!("Users/{user_key}/roles"),
                &json!({
                    "addedRoleIds": added,
                    "removedRoleIds": removed,
                }),
                &Query::new(),
            )
            .await
    }

    /// `DELETE roles/{id}`
    pub async fn delete(&self, role_id: &str) -> Result<Value, Error> {
        self.transport
            .delete(&format!("roles/{role_id}"), &Query::new())
            .await
    }

    /// `GET roles/default`
    pub async fn default_role(&self) -> Result<Value, Error> {
        self.transport.get("roles/default", &Query::new()).await
    }

    /// `POST roles/default`
    pub async fn update_default(&self, permissions: &[String]) -> Result<Value, Error> {
        self.transport
            .post(
                "roles/default",
                &json!({ "permissions": permissions }),
                &Query::new(),
            )
            .await
    }

    /// Every permission a role can grant.
    pub async fn permissions(&self) -> Result<Value, Error> {
        self.transport.get("permissions", &Query::new()).await
    }
}
