// Meetings facade: scheduled meetings, plain CRUD.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::Page;
use crate::error::Error;
use crate::query::Query;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct Meetings {
    transport: Arc<Transport>,
}

impl Meetings {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `GET meetings`
    pub async fn list(&self, page: &Page) -> Result<Value, Error> {
        self.transport.get("meetings", &page.to_query()).await
    }

    /// `GET meetings/{id}`
    pub async fn get(&self, meeting_id: &str) -> Result<Value, Error> {
        self.transport
            .get(&format!("meetings/{meeting_id}"), &Query::new())
            .await
    }

    /// `POST meetings`
    pub async fn create(&self, meeting: &(impl Serialize + Sync)) -> Result<Value, Error> {
        self.transport.post("meetings", meeting, &Query::new()).await
    }

    /// `PUT meetings/{id}`
    pub async fn update(
        &self,
        meeting_id: &str,
        update: &(impl Serialize + Sync),
    ) -> Result<Value, Error> {
        self.transport
            .put(&format!("meetings/{meeting_id}"), update, &Query::new())
            .await
    }

    /// `DELETE meetings/{id}`
    pub async fn delete(&self, meeting_id: &str) -> Result<Value, Error> {
        self.transport
            .delete(&format!("meetings/{meeting_id}"), &Query::new())
            .await
    }
}
