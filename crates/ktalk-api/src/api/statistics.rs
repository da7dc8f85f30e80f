// Statistics facade
//
// Space-wide counters. Read-only and loosely typed: the field set depends
// on the tariff, so responses stay `serde_json::Value`.

use std::sync::Arc;

use serde_json::Value;

use super::Period;
use crate::error::Error;
use crate::query::Query;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct Statistics {
    transport: Arc<Transport>,
}

impl Statistics {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Running conferences and users online.
    ///
    /// `GET Domain/stats/online`
    pub async fn online(&self) -> Result<Value, Error> {
        self.transport.get("Domain/stats/online", &Query::new()).await
    }

    /// `GET domain/statisticsTotal`
    pub async fn registered_users(&self) -> Result<Value, Error> {
        self.transport
            .get("domain/statisticsTotal", &Query::new())
            .await
    }

    /// `GET domain/statistics?start=..&end=..`
    pub async fn active_users(&self, period: &Period) -> Result<Value, Error> {
        let query = period.apply(Query::new(), "start", "end");
        self.transport.get("domain/statistics", &query).await
    }

    /// `GET Domain/stats/conferences?fromDate=..&toDate=..`
    pub async fn conferences(&self, period: &Period) -> Result<Value, Error> {
        let query = period.apply(Query::new(), "fromDate", "toDate");
        self.transport.get("Domain/stats/conferences", &query).await
    }

    /// Conferences joined by kiosks over the period.
    ///
    /// `GET Domain/stats/kiosks?start=..&end=..`
    pub async fn kiosks(&self, period: &Period) -> Result<Value, Error> {
        let query = period.apply(Query::new(), "start", "end");
        self.transport.get("Domain/stats/kiosks", &query).await
    }

    pub async fn kiosks_online(&self) -> Result<Value, Error> {
        self.transport
            .get("Domain/stats/kiosks/online", &Query::new())
            .await
    }

    pub async fn active_recordings(&self) -> Result<Value, Error> {
        self.transport
            .get("Domain/stats/recordings/online", &Query::new())
            .await
    }

    /// Cloud storage used by recordings.
    pub async fn recordings_total_size(&self) -> Result<Value, Error> {
        self.transport
            .get("domain/stats/recordings/totalSize", &Query::new())
            .await
    }

    pub async fn streams_online(&self) -> Result<Value, Error> {
        self.transport
            .get("Domain/stats/streams/online", &Query::new())
            .await
    }

    pub async fn tariff_expiration_date(&self) -> Result<Value, Error> {
        self.transport
            .get("domain/stats/tariffExpirationDate", &Query::new())
            .await
    }
}
