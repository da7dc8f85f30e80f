// Calendars facade
//
// Connected calendars that feed meetings and avatars. Plain CRUD.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::Page;
use crate::error::Error;
use crate::query::Query;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct Calendars {
    transport: Arc<Transport>,
}

impl Calendars {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `GET calendars`
    pub async fn list(&self, page: &Page) -> Result<Value, Error> {
        self.transport.get("calendars", &page.to_query()).await
    }

    /// `GET calendars/{id}`
    pub async fn get(&self, calendar_id: &str) -> Result<Value, Error> {
        self.transport
            .get(&format!("calendars/{calendar_id}"), &Query::new())
            .await
    }

    /// `POST calendars`
    pub async fn create(&self, calendar: &(impl Serialize + Sync)) -> Result<Value, Error> {
        self.transport.post("calendars", calendar, &Query::new()).await
    }

    /// `PUT calendars/{id}`
    pub async fn update(
        &self,
        calendar_id: &str,
        update: &(impl Serialize + Sync),
    ) -> Result<Value, Error> {
        self.transport
            .put(&format!("calendars/{calendar_id}"), update, &Query::new())
            .await
    }

    /// `DELETE calendars/{id}`
    pub async fn delete(&self, calendar_id: &str) -> Result<Value, Error> {
        debug!(calendar_id, "deleting calendar");
        self.transport
            .delete(&format!("calendars/{calendar_id}"), &Query::new())
            .await
    }
}
