// ktalk-api: Async Rust client for the Kontur Talk REST API

pub mod api;
pub mod client;
pub mod error;
pub mod query;
pub mod time;
pub mod transport;

pub use client::TalkClient;
pub use error::Error;
pub use query::{Query, QueryValue};
pub use secrecy::SecretString;
pub use time::format_timestamp;
pub use transport::{Transport, TransportConfig};
