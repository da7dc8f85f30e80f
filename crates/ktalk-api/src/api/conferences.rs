// Conferences facade
//
// Past and running conferences: listing with participant filters,
// CRUD, lifecycle, participants, and recording control.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::{DEFAULT_TOP, Participants, no_body};
use crate::error::Error;
use crate::query::Query;
use crate::transport::Transport;

/// Options for `GET conferences`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceFilter {
    pub top: u32,
    pub offset: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub participant_email: Option<String>,
    pub participant_login: Option<String>,
    pub participant_display_name: Option<String>,
}

impl Default for ConferenceFilter {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            offset: None,
            start_time: None,
            end_time: None,
            title: None,
            participant_email: None,
            participant_login: None,
            participant_display_name: None,
        }
    }
}

impl ConferenceFilter {
    fn to_query(&self) -> Query {
        Query::new()
            .set("top", self.top.to_string())
            .set_opt("offset", self.offset.as_deref())
            .time_opt("startTime", self.start_time.as_ref())
            .time_opt("endTime", self.end_time.as_ref())
            .set_opt("title", self.title.as_deref())
            .set_opt("participantEmail", self.participant_email.as_deref())
            .set_opt("participantLogin", self.participant_login.as_deref())
            .set_opt(
                "participantDisplayName",
                self.participant_display_name.as_deref(),
            )
    }
}

/// Conference operations.
#[derive(Debug, Clone)]
pub struct Conferences {
    transport: Arc<Transport>,
}

impl Conferences {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `GET conferences`
    pub async fn list(&self, filter: &ConferenceFilter) -> Result<Value, Error> {
        self.transport.get("conferences", &filter.to_query()).await
    }

    /// `GET conferences/{id}`
    pub async fn get(&self, conference_id: &str) -> Result<Value, Error> {
        self.transport
            .get(&format!("conferences/{conference_id}"), &Query::new())
            .await
    }

    /// `POST conferences`
    pub async fn create(&self, conference: &(impl Serialize + Sync)) -> Result<Value, Error> {
        self.transport
            .post("conferences", conference, &Query::new())
            .await
    }

    /// `PUT conferences/{id}`
    pub async fn update(
        &self,
        conference_id: &str,
        update: &(impl Serialize + Sync),
    ) -> Result<Value, Error> {
        self.transport
            .put(&format!("conferences/{conference_id}"), update, &Query::new())
            .await
    }

    /// `DELETE conferences/{id}`
    pub async fn delete(&self, conference_id: &str) -> Result<Value, Error> {
        debug!(conference_id, "deleting conference");
        self.transport
            .delete(&format!("conferences/{conference_id}"), &Query::new())
            .await
    }

    pub async fn start(&self, conference_id: &str) -> Result<Value, Error> {
        self.command(conference_id, "start").await
    }

    pub async fn stop(&self, conference_id: &str) -> Result<Value, Error> {
        self.command(conference_id, "stop").await
    }

    // ── Participants ─────────────────────────────────────────────────

    pub async fn participants(&self, conference_id: &str) -> Result<Value, Error> {
        self.transport
            .get(
                &format!("conferences/{conference_id}/participants"),
                &Query::new(),
            )
            .await
    }

    pub async fn add_participants<T: Serialize + Sync>(
        &self,
        conference_id: &str,
        participants: &[T],
    ) -> Result<Value, Error> {
        self.transport
            .post(
                &format!("conferences/{conference_id}/participants"),
                &Participants { participants },
                &Query::new(),
            )
            .await
    }

    pub async fn update_participant(
        &self,
        conference_id: &str,
        user_id: &str,
        update: &(impl Serialize + Sync),
    ) -> Result<Value, Error> {
        self.transport
            .put(
                &format!("conferences/{conference_id}/participants/{user_id}"),
                update,
                &Query::new(),
            )
            .await
    }

    pub async fn remove_participant(
        &self,
        conference_id: &str,
        user_id: &str,
    ) -> Result<Value, Error> {
        self.transport
            .delete(
                &format!("conferences/{conference_id}/participants/{user_id}"),
                &Query::new(),
            )
            .await
    }

    // ── Recordings ───────────────────────────────────────────────────

    pub async fn recordings(&self, conference_id: &str) -> Result<Value, Error> {
        self.transport
            .get(
                &format!("conferences/{conference_id}/recordings"),
                &Query::new(),
            )
            .await
    }

    pub async fn start_recording(&self, conference_id: &str) -> Result<Value, Error> {
        self.command(conference_id, "recordings/start").await
    }

    pub async fn stop_recording(&self, conference_id: &str) -> Result<Value, Error> {
        self.command(conference_id, "recordings/stop").await
    }

    /// `POST conferences/{id}/joinLink`
    pub async fn join_link(
        &self,
        conference_id: &str,
        options: &(impl Serialize + Sync),
    ) -> Result<Value, Error> {
        self.transport
            .post(
                &format!("conferences/{conference_id}/joinLink"),
                options,
                &Query::new(),
            )
            .await
    }

    /// Body-less `POST conferences/{id}/{action}`.
    async fn command(&self, conference_id: &str, action: &str) -> Result<Value, Error> {
        debug!(conference_id, action, "conference command");
        self.transport
            .post(
                &format!("conferences/{conference_id}/{action}"),
                &no_body(),
                &Query::new(),
            )
            .await
    }
}
