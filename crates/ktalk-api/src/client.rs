// Facade container
//
// Builds the transport once and binds every resource facade to it.

use std::sync::Arc;

use secrecy::SecretString;
use url::Url;

use crate::api::{
    ApiKeys, Calendars, Conferences, Kiosks, Meetings, Recordings, Reports, Roles, Rooms,
    Statistics, Users,
};
use crate::error::Error;
use crate::transport::{Transport, TransportConfig};

/// Entry point for the Kontur Talk API.
///
/// Construction performs no network I/O. Clones share the same pooled
/// connection set.
///
/// ```no_run
/// # async fn demo() -> Result<(), ktalk_api::Error> {
/// use ktalk_api::{SecretString, TalkClient, api::RoomSettings};
///
/// let client = TalkClient::new("acme", &SecretString::from("api-key"))?;
/// let online = client.statistics().online().await?;
/// client
///     .rooms()
///     .create_or_update("standup", &RoomSettings::new("Daily standup"))
///     .await?;
/// # let _ = online;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TalkClient {
    transport: Arc<Transport>,
    users: Users,
    roles: Roles,
    rooms: Rooms,
    conferences: Conferences,
    statistics: Statistics,
    meetings: Meetings,
    calendars: Calendars,
    recordings: Recordings,
    kiosks: Kiosks,
    api_keys: ApiKeys,
    reports: Reports,
}

impl TalkClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Client for `https://{tenant}.ktalk.ru/api` with default transport settings.
    pub fn new(tenant: &str, api_key: &SecretString) -> Result<Self, Error> {
        Self::with_config(tenant, api_key, &TransportConfig::default())
    }

    pub fn with_config(
        tenant: &str,
        api_key: &SecretString,
        config: &TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self::from_transport(Transport::new(tenant, api_key, config)?))
    }

    /// Client for an explicit API root (self-hosted installs, test servers).
    pub fn with_base_url(
        base_url: &str,
        api_key: &SecretString,
        config: &TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self::from_transport(Transport::with_base_url(
            base_url, api_key, config,
        )?))
    }

    pub fn from_transport(transport: Transport) -> Self {
        let transport = Arc::new(transport);
        Self {
            users: Users::new(Arc::clone(&transport)),
            roles: Roles::new(Arc::clone(&transport)),
            rooms: Rooms::new(Arc::clone(&transport)),
            conferences: Conferences::new(Arc::clone(&transport)),
            statistics: Statistics::new(Arc::clone(&transport)),
            meetings: Meetings::new(Arc::clone(&transport)),
            calendars: Calendars::new(Arc::clone(&transport)),
            recordings: Recordings::new(Arc::clone(&transport)),
            kiosks: Kiosks::new(Arc::clone(&transport)),
            api_keys: ApiKeys::new(Arc::clone(&transport)),
            reports: Reports::new(Arc::clone(&transport)),
            transport,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    /// Shared transport, for endpoints no facade covers yet.
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    pub fn users(&self) -> &Users {
        &self.users
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    pub fn rooms(&self) -> &Rooms {
        &self.rooms
    }

    pub fn conferences(&self) -> &Conferences {
        &self.conferences
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn meetings(&self) -> &Meetings {
        &self.meetings
    }

    pub fn calendars(&self) -> &Calendars {
        &self.calendars
    }

    pub fn recordings(&self) -> &Recordings {
        &self.recordings
    }

    pub fn kiosks(&self) -> &Kiosks {
        &self.kiosks
    }

    pub fn api_keys(&self) -> &ApiKeys {
        &self.api_keys
    }

    pub fn reports(&self) -> &Reports {
        &self.reports
    }
}
