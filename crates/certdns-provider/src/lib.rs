//! Record-management contract shared by every provider.
//!
//! A provider implements any of the four capabilities below; the core crate
//! only deals with [`RecordManager`], which bundles all of them.
//!
//! Cancellation is the caller's business: dropping the future returned by an
//! operation aborts the in-flight HTTP call. Work the remote side already
//! finished is not undone.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// One manageable entry of a zone.
///
/// Providers decide which fields they actually read; certificate providers
/// for instance carry PEM text or a remote certificate id in `value`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub rtype: String,
    pub name: String,
    pub value: String,
    pub ttl: Duration,
}

impl Record {
    /// Record carrying nothing but `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }
}

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("{method}: request failed: {source}")]
    Transport {
        method: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method}: unexpected status {status}: {body}")]
    Status {
        method: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("{method}: api error: {}", render(.error))]
    Api { method: &'static str, error: Value },
    #[error("{method}: failed to decode response: {source}")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0} is not implemented by this provider")]
    Unimplemented(&'static str),
}

// strings without the JSON quotes, anything else as compact JSON
fn render(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
pub trait RecordGetter: Send + Sync {
    async fn get_records(&self, zone: &str) -> Result<Vec<Record>, ProviderError>;
}

#[async_trait]
pub trait RecordAppender: Send + Sync {
    /// Adds `records` to the zone and returns the ones that were added.
    async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, ProviderError>;
}

#[async_trait]
pub trait RecordSetter: Send + Sync {
    /// Updates matching records or creates them; returns what was written.
    async fn set_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, ProviderError>;
}

#[async_trait]
pub trait RecordDeleter: Send + Sync {
    /// Removes `records` from the zone and returns the ones that were removed.
    async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, ProviderError>;
}

/// A provider supporting the full capability set.
pub trait RecordManager: RecordGetter + RecordAppender + RecordSetter + RecordDeleter {
    fn name(&self) -> &'static str;
}
