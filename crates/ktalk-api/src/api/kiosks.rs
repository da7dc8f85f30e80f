// Kiosks facade
//
// Meeting-room hardware registered in the space.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::Page;
use crate::error::Error;
use crate::query::Query;
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct Kiosks {
    transport: Arc<Transport>,
}

impl Kiosks {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `GET kiosks`
    pub async fn list(&self, page: &Page) -> Result<Value, Error> {
        self.transport.get("kiosks", &page.to_query()).await
    }

    /// `GET kiosks/{id}`
    pub async fn get(&self, kiosk_id: &str) -> Result<Value, Error> {
        self.transport
            .get(&format!("kiosks/{kiosk_id}"), &Query::new())
            .await
    }

    /// `POST kiosks`
    pub async fn create(&self, kiosk: &(impl Serialize + Sync)) -> Result<Value, Error> {
        self.transport.post("kiosks", kiosk, &Query::new()).await
    }

    /// `PUT kiosks/{id}`
    pub async fn update(
        &self,
        kiosk_id: &str,
        update: &(impl Serialize + Sync),
    ) -> Result<Value, Error> {
        self.transport
            .put(&format!("kiosks/{kiosk_id}"), update, &Query::new())
            .await
    }

    /// `DELETE kiosks/{id}`
    pub async fn delete(&self, kiosk_id: &str) -> Result<Value, Error> {
        debug!(kiosk_id, "deleting kiosk");
        self.transport
            .delete(&format!("kiosks/{kiosk_id}"), &Query::new())
            .await
    }
}
