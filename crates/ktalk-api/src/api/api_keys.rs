// API keys facade
//
// Space API keys: listing, issuing with an optional expiry, rotation of
// name/permissions, and revocation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::query::Query;
use crate::transport::Transport;

/// Body of `POST apikeys` / `PUT apikeys/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyDraft {
    pub name: String,
    pub permissions: Vec<String>,
    #[serde(
        with = "crate::time::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<DateTime<Utc>>,
}

impl ApiKeyDraft {
    pub fn new(name: impl Into<String>, permissions: Vec<String>) -> Self {
        Self {
            name: name.into(),
            permissions,
            expiration_date: None,
        }
    }

    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.expiration_date = Some(at);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiKeys {
    transport: Arc<Transport>,
}

impl ApiKeys {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `GET apikeys`
    pub async fn list(&self) -> Result<Value, Error> {
        self.transport.get("apikeys", &Query::new()).await
    }

    /// `GET apikeys/{id}`
    pub async fn get(&self, key_id: &str) -> Result<Value, Error> {
        self.transport
            .get(&format!("apikeys/{key_id}"), &Query::new())
            .await
    }

    /// `POST apikeys`
    pub async fn create(&self, draft: &ApiKeyDraft) -> Result<Value, Error> {
        debug!(name = %draft.name, "issuing API key");
        self.transport.post("apikeys", draft, &Query::new()).await
    }

    /// `PUT apikeys/{id}`
    pub async fn update(&self, key_id: &str, draft: &ApiKeyDraft) -> Result<Value, Error> {
        self.transport
            .put(&format!("apikeys/{key_id}"), draft, &Query::new())
            .await
    }

    /// `DELETE apikeys/{id}`
    pub async fn delete(&self, key_id: &str) -> Result<Value, Error> {
        debug!(key_id, "revoking API key");
        self.transport
            .delete(&format!("apikeys/{key_id}"), &Query::new())
            .await
    }
}
