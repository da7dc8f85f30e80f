// Query-string assembly for facade methods.
//
// Keeps insertion order so the wire query is stable, and renders
// list-valued parameters with bracketed repeated keys (`email[]=a&email[]=b`),
// which is what the server's form binder expects.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::time::format_timestamp;

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

/// Ordered query parameters for one request.
///
/// Built fluently by facades; options left unset are never inserted, so
/// no `null` or placeholder ever reaches the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: IndexMap<String, QueryValue>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar parameter, replacing any previous value for `key`.
    pub fn set(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params
            .insert(key.to_owned(), QueryValue::One(value.into()));
        self
    }

    /// Set `key` only when `value` is present.
    pub fn set_opt<V: Into<String>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    /// Boolean flags travel as the literal strings `"true"` / `"false"`.
    pub fn flag(self, key: &str, value: bool) -> Self {
        self.set(key, if value { "true" } else { "false" })
    }

    /// Set a timestamp in the API's millisecond UTC format.
    pub fn time_opt(self, key: &str, value: Option<&DateTime<Utc>>) -> Self {
        self.set_opt(key, value.map(format_timestamp))
    }

    /// Append one item to a list-valued parameter.
    pub fn push(mut self, key: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        let slot = self
            .params
            .entry(key.to_owned())
            .or_insert_with(|| QueryValue::Many(Vec::new()));
        match slot {
            QueryValue::Many(items) => items.push(value),
            QueryValue::One(_) => *slot = QueryValue::Many(vec![value]),
        }
        self
    }

    /// Append every item of `values` to a list-valued parameter.
    pub fn extend<I, V>(self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        values.into_iter().fold(self, |q, v| q.push(key, v))
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Flatten into `(key, value)` pairs ready for `RequestBuilder::query`.
    ///
    /// List values expand to one `key[]` pair per item; an empty list
    /// produces nothing.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.params.len());
        for (key, value) in &self.params {
            match value {
                QueryValue::One(v) => pairs.push((key.clone(), v.clone())),
                QueryValue::Many(items) => {
                    let bracketed = format!("{key}[]");
                    pairs.extend(items.iter().map(|v| (bracketed.clone(), v.clone())));
                }
            }
        }
        pairs
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let params = iter
            .into_iter()
            .map(|(k, v)| (k.into(), QueryValue::One(v.into())))
            .collect();
        Self { params }
    }
}
