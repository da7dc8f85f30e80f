// Rooms facade
//
// Persistent rooms addressed by key: settings, moderators, PIN lock,
// call notifications, participants, and lifecycle commands.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use super::{DEFAULT_TOP, Participants, no_body};
use crate::error::Error;
use crate::query::Query;
use crate::transport::Transport;

/// How a media track is handled for participants joining the room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaPolicy {
    #[default]
    None,
    Muted,
    Disabled,
}

/// Body of `PUT rooms/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSettings {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub moderator_keys: Vec<String>,
    #[serde(
        with = "crate::time::timestamp::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub anonymous_access_expiration_date: Option<DateTime<Utc>>,
    pub enable_session_halls: bool,
    pub enable_lobby: bool,
    pub audio_policy: MediaPolicy,
    pub video_policy: MediaPolicy,
    pub screen_share_policy: MediaPolicy,
    pub max_video_quality: u32,
}

impl RoomSettings {
    /// Settings with every optional field at its default.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            moderator_keys: Vec::new(),
            anonymous_access_expiration_date: None,
            enable_session_halls: false,
            enable_lobby: false,
            audio_policy: MediaPolicy::None,
            video_policy: MediaPolicy::None,
            screen_share_policy: MediaPolicy::None,
            max_video_quality: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Options for `GET rooms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomFilter {
    pub top: u32,
    pub offset: Option<String>,
    pub title: Option<String>,
}

impl Default for RoomFilter {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            offset: None,
            title: None,
        }
    }
}

/// Room operations.
#[derive(Debug, Clone)]
pub struct Rooms {
    transport: Arc<Transport>,
}

impl Rooms {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// `GET rooms/{name}`
    pub async fn get(&self, room_name: &str) -> Result<Value, Error> {
        self.transport
            .get(&format!("rooms/{room_name}"), &Query::new())
            .await
    }

    /// Same endpoint as [`get`](Self::get), addressed by room ID.
    pub async fn get_by_id(&self, room_id: &str) -> Result<Value, Error> {
        self.get(room_id).await
    }

    /// Create the room or replace its settings.
    ///
    /// `PUT rooms/{name}`
    pub async fn create_or_update(
        &self,
        room_name: &str,
        settings: &RoomSettings,
    ) -> Result<Value, Error> {
        debug!(room_name, title = %settings.title, "upserting room");
        self.transport
            .put(&format!("rooms/{room_name}"), settings, &Query::new())
            .await
    }

    /// `POST rooms/{name}/moderators/{user}`
    pub async fn add_moderator(&self, room_name: &str, user_ref: &str) -> Result<Value, Error> {
        self.transport
            .post(
                &format!("rooms/{room_name}/moderators/{user_ref}"),
                &no_body(),
                &Query::new(),
            )
            .await
    }

    /// `DELETE rooms/{name}/moderators/{user}`
    pub async fn remove_moderator(&self, room_name: &str, user_ref: &str) -> Result<Value, Error> {
        self.transport
            .delete(
                &format!("rooms/{room_name}/moderators/{user_ref}"),
                &Query::new(),
            )
            .await
    }

    /// Set a 4-6 digit PIN, or clear it with `None`.
    ///
    /// `POST rooms/{name}/lock`
    pub async fn set_pin_code(
        &self,
        room_name: &str,
        pin_code: Option<&str>,
    ) -> Result<Value, Error> {
        debug!(room_name, locked = pin_code.is_some(), "updating room PIN");
        self.transport
            .post(
                &format!("rooms/{room_name}/lock"),
                &json!({ "pinCode": pin_code.unwrap_or_default() }),
                &Query::new(),
            )
            .await
    }

    /// Ring `callees` on behalf of `caller_user_key`.
    ///
    /// `POST rooms/{name}/notifyCall`
    pub async fn notify_call(
        &self,
        room_name: &str,
        room_title: &str,
        caller_user_key: &str,
        callees: &[Value],
    ) -> Result<Value, Error> {
        debug!(room_name, callees = callees.len(), "notifying call");
        self.transport
            .post(
                &format!("rooms/{room_name}/notifyCall"),
                &json!({
                    "roomTitle": room_title,
                    "callerUserKey": caller_user_key,
                    "callees": callees,
                }),
                &Query::new(),
            )
            .await
    }

    /// Cancel ringing for `callees`, or for everyone when `None`.
    ///
    /// `POST rooms/{name}/cancelCall`
    pub async fn cancel_call(
        &self,
        room_name: &str,
        callees: Option<&[Value]>,
    ) -> Result<Value, Error> {
        let body = match callees {
            Some(callees) => json!({ "callees": callees }),
            None => no_body(),
        };
        self.transport
            .post(&format!("rooms/{room_name}/cancelCall"), &body, &Query::new())
            .await
    }

    /// Force-end the running conference for all participants.
    ///
    /// `POST Rooms/{name}/endconference`
    pub async fn end_conference(&self, room_name: &str) -> Result<Value, Error> {
        debug!(room_name, "ending conference");
        self.transport
            .post(
                &format!("Rooms/{room_name}/endconference"),
                &no_body(),
                &Query::new(),
            )
            .await
    }

    /// `GET rooms`
    pub async fn list(&self, filter: &RoomFilter) -> Result<Value, Error> {
        let query = Query::new()
            .set("top", filter.top.to_string())
            .set_opt("offset", filter.offset.as_deref())
            .set_opt("title", filter.title.as_deref());

        self.transport.get("rooms", &query).await
    }

    /// `POST rooms`
    pub async fn create(&self, room: &(impl Serialize + Sync)) -> Result<Value, Error> {
        self.transport.post("rooms", room, &Query::new()).await
    }

    /// `PUT rooms/{id}`
    pub async fn update(
        &self,
        room_id: &str,
        update: &(impl Serialize + Sync),
    ) -> Result<Value, Error> {
        self.transport
            .put(&format!("rooms/{room_id}"), update, &Query::new())
            .await
    }

    /// `DELETE rooms/{id}`
    pub async fn delete(&self, room_id: &str) -> Result<Value, Error> {
        debug!(room_id, "deleting room");
        self.transport
            .delete(&format!("rooms/{room_id}"), &Query::new())
            .await
    }

    // ── Participants ─────────────────────────────────────────────────

    pub async fn participants(&self, room_id: &str) -> Result<Value, Error> {
        self.transport
            .get(&format!("rooms/{room_id}/participants"), &Query::new())
            .await
    }

    pub async fn add_participants<T: Serialize + Sync>(
        &self,
        room_id: &str,
        participants: &[T],
    ) -> Result<Value, Error> {
        self.transport
            .post(
                &format!("rooms/{room_id}/participants"),
                &Participants { participants },
                &Query::new(),
            )
            .await
    }

    pub async fn update_participant(
        &self,
        room_id: &str,
        user_id: &str,
        update: &(impl Serialize + Sync),
    ) -> Result<Value, Error> {
        self.transport
            .put(
                &format!("rooms/{room_id}/participants/{user_id}"),
                update,
                &Query::new(),
            )
            .await
    }

    pub async fn remove_participant(&self, room_id: &str, user_id: &str) -> Result<Value, Error> {
        self.transport
            .delete(
                &format!("rooms/{room_id}/participants/{user_id}"),
                &Query::new(),
            )
            .await
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// `POST rooms/{id}/start`
    pub async fn start(&self, room_id: &str) -> Result<Value, Error> {
        self.transport
            .post(&format!("rooms/{room_id}/start"), &no_body(), &Query::new())
            .await
    }

    /// `POST rooms/{id}/stop`
    pub async fn stop(&self, room_id: &str) -> Result<Value, Error> {
        self.transport
            .post(&format!("rooms/{room_id}/stop"), &no_body(), &Query::new())
            .await
    }

    /// `POST rooms/{id}/joinLink`
    pub async fn join_link(
        &self,
        room_id: &str,
        options: &(impl Serialize + Sync),
    ) -> Result<Value, Error> {
        self.transport
            .post(&format!("rooms/{room_id}/joinLink"), options, &Query::new())
            .await
    }
}
