// Reports facade
//
// Asynchronously generated reports. `create` queues one; poll `get` and
// fetch the file through `download_link` once ready.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{Page, Period};
use crate::error::Error;
use crate::query::Query;
use crate::transport::Transport;

#[derive(Serialize)]
struct ReportRequest<'a, P: ?Sized> {
    #[serde(rename = "type")]
    report_type: &'a str,
    parameters: &'a P,
}

#[derive(Debug, Clone)]
pub struct Reports {
    transport: Arc<Transport>,
}

impl Reports {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `GET reports`
    pub async fn list(&self, page: &Page, period: &Period) -> Result<Value, Error> {
        let query = period.apply(page.to_query(), "startTime", "endTime");
        self.transport.get("reports", &query).await
    }

    /// `GET reports/{id}`
    pub async fn get(&self, report_id: &str) -> Result<Value, Error> {
        self.transport
            .get(&format!("reports/{report_id}"), &Query::new())
            .await
    }

    /// Queue a report of `report_type`.
    ///
    /// `POST reports` with `{"type": .., "parameters": ..}`
    pub async fn create(
        &self,
        report_type: &str,
        parameters: &(impl Serialize + Sync),
    ) -> Result<Value, Error> {
        debug!(report_type, "requesting report");
        let request = ReportRequest {
            report_type,
            parameters,
        };
        self.transport.post("reports", &request, &Query::new()).await
    }

    /// `DELETE reports/{id}`
    pub async fn delete(&self, report_id: &str) -> Result<Value, Error> {
        self.transport
            .delete(&format!("reports/{report_id}"), &Query::new())
            .await
    }

    /// `GET reports/{id}/downloadLink`
    pub async fn download_link(&self, report_id: &str) -> Result<Value, Error> {
        self.transport
            .get(&format!("reports/{report_id}/downloadLink"), &Query::new())
            .await
    }
}
