// Recordings facade
//
// Stored conference recordings: listing by time window, lookup,
// deletion, and signed download links.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::{Page, Period};
use crate::error::Error;
use crate::query::Query;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct Recordings {
    transport: Arc<Transport>,
}

impl Recordings {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `GET recordings?top=..&offset=..&startTime=..&endTime=..`
    pub async fn list(&self, page: &Page, period: &Period) -> Result<Value, Error> {
        let query = period.apply(page.to_query(), "startTime", "endTime");
        self.transport.get("recordings", &query).await
    }

    /// `GET recordings/{id}`
    pub async fn get(&self, recording_id: &str) -> Result<Value, Error> {
        self.transport
            .get(&format!("recordings/{recording_id}"), &Query::new())
            .await
    }

    /// `DELETE recordings/{id}`
    pub async fn delete(&self, recording_id: &str) -> Result<Value, Error> {
        debug!(recording_id, "deleting recording");
        self.transport
            .delete(&format!("recordings/{recording_id}"), &Query::new())
            .await
    }

    /// `GET recordings/{id}/downloadLink`
    pub async fn download_link(&self, recording_id: &str) -> Result<Value, Error> {
        self.transport
            .get(
                &format!("recordings/{recording_id}/downloadLink"),
                &Query::new(),
            )
            .await
    }
}
