// Resource facades
//
// Each facade is a thin struct around the shared `Transport`: it formats a
// path, query, and body, then forwards exactly one request. Path casing is
// kept per endpoint (`Users/...`, `Rooms/...`, `Domain/...`) because the
// server routes them that way.

pub mod api_keys;
pub mod calendars;
pub mod conferences;
pub mod kiosks;
pub mod meetings;
pub mod recordings;
pub mod reports;
pub mod roles;
pub mod rooms;
pub mod statistics;
pub mod users;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::query::Query;

pub use api_keys::{ApiKeyDraft, ApiKeys};
pub use calendars::Calendars;
pub use conferences::{ConferenceFilter, Conferences};
pub use kiosks::Kiosks;
pub use meetings::Meetings;
pub use recordings::Recordings;
pub use reports::Reports;
pub use roles::{RoleDraft, Roles};
pub use rooms::{MediaPolicy, RoomFilter, RoomSettings, Rooms};
pub use statistics::Statistics;
pub use users::{MAX_USERS_PER_REQUEST, UserFilter, UserScan, Users};

/// Page size used when the caller does not pick one.
pub const DEFAULT_TOP: u32 = 100;

/// Offset-token pagination shared by most list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Maximum number of items to return.
    pub top: u32,
    /// Continuation token from the previous page.
    pub offset: Option<String>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            offset: None,
        }
    }
}

impl Page {
    pub fn top(top: u32) -> Self {
        Self { top, offset: None }
    }

    pub fn with_offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    pub(crate) fn to_query(&self) -> Query {
        Query::new()
            .set("top", self.top.to_string())
            .set_opt("offset", self.offset.as_deref())
    }
}

/// Optional time window for filtered listings and statistics.
///
/// Each endpoint names the bounds differently (`start`/`end`,
/// `startTime`/`endTime`, `fromDate`/`toDate`); the facade picks the keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Period {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl Period {
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub(crate) fn apply(&self, query: Query, from_key: &str, to_key: &str) -> Query {
        query
            .time_opt(from_key, self.from.as_ref())
            .time_opt(to_key, self.to.as_ref())
    }
}

/// `{"participants": [...]}` wrapper used by rooms and conferences.
#[derive(Serialize)]
pub(crate) struct Participants<'a, T> {
    pub participants: &'a [T],
}

/// Body sent with POST calls that carry no data: an empty JSON array.
pub(crate) fn no_body() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}
