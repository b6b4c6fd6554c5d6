//! Qrator certificate provider
//!
//! * Drives the Qrator client API (`POST {api_base}/request/client/1`, JSON-RPC
//!   style envelopes) through the generic record contract.
//! * `append_records` uploads a certificate: `records[0].value` is the
//!   certificate PEM, `records[1].value` its private key.
//! * `delete_records` removes certificates by id, one call per record, id in
//!   `value`. The first failure aborts the batch; nothing is rolled back.
//! * Listing and in-place updates have no Qrator endpoint and fail with
//!   [`ProviderError::Unimplemented`].
//! * Auth via the static `X-Qrator-Auth` token header.

pub mod config;
pub mod rpc;

use async_trait::async_trait;
use certdns_provider::{
    ProviderError, Record, RecordAppender, RecordDeleter, RecordGetter, RecordManager,
    RecordSetter,
};
use once_cell::sync::OnceCell;
use reqwest::{
    Client, Response, StatusCode,
    header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT},
};
use rpc::{RpcRequest, RpcResponse};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

pub use config::{DEFAULT_API_BASE, QratorConfig, REQUEST_PATH};

/// Header carrying the API token.
pub const AUTH_HEADER: &str = "x-qrator-auth";

const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/*──────── provider struct ────────*/

pub struct QratorProvider {
    config: QratorConfig,
    client: OnceCell<Client>,
}

impl QratorProvider {
    pub fn new(mut config: QratorConfig) -> Self {
        config.ensure_defaults();
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &QratorConfig {
        &self.config
    }

    /// Shared HTTP client, built on first use and never replaced.
    pub fn ensure_client(&self) -> Result<&Client, ProviderError> {
        self.client.get_or_try_init(|| {
            if self.config.api_token.is_empty() {
                return Err(ProviderError::Config("api_token is empty".into()));
            }
            let mut auth = HeaderValue::from_str(&self.config.api_token).map_err(|_| {
                ProviderError::Config("api_token is not a valid header value".into())
            })?;
            auth.set_sensitive(true);

            let mut hdr = HeaderMap::new();
            hdr.insert(AUTH_HEADER, auth);
            hdr.insert(USER_AGENT, HeaderValue::from_static("certdns (+github)"));
            hdr.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

            Client::builder()
                .timeout(CLIENT_TIMEOUT)
                .default_headers(hdr)
                .build()
                .map_err(|e| ProviderError::Config(format!("http client: {e}")))
        })
    }

    /*──────── tiny RPC wrapper ────────*/

    async fn call(&self, req: RpcRequest) -> Result<Value, ProviderError> {
        let client = self.ensure_client()?;
        let method = req.method;
        let url = self.config.endpoint();
        debug!("Qrator {method} -> {url}");

        let resp = client
            .post(url)
            .json(&req)
            .send()
            .await
            .map_err(|source| ProviderError::Transport { method, source })?;
        Self::check(method, resp).await
    }

    async fn check(method: &'static str, resp: Response) -> Result<Value, ProviderError> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|source| ProviderError::Transport { method, source })?;
        if status != StatusCode::OK {
            return Err(ProviderError::Status {
                method,
                status,
                body,
            });
        }
        let envelope: RpcResponse = serde_json::from_str(&body)
            .map_err(|source| ProviderError::Decode { method, source })?;
        envelope.into_result(method)
    }
}

/*──────── record capabilities ────────*/

#[async_trait]
impl RecordGetter for QratorProvider {
    async fn get_records(&self, _zone: &str) -> Result<Vec<Record>, ProviderError> {
        Err(ProviderError::Unimplemented("get_records"))
    }
}

#[async_trait]
impl RecordAppender for QratorProvider {
    async fn append_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, ProviderError> {
        let [cert, key, rest @ ..] = records else {
            return Err(ProviderError::Validation(format!(
                "need at least 2 records (certificate, private key), got {}",
                records.len()
            )));
        };
        if !rest.is_empty() {
            warn!("Qrator upload ignores {} extra record(s)", rest.len());
        }

        let result = self
            .call(RpcRequest::upload(&cert.value, &key.value))
            .await?;
        info!("Qrator uploaded certificate for zone `{zone}`: {result}");
        Ok(records.to_vec())
    }
}

#[async_trait]
impl RecordSetter for QratorProvider {
    async fn set_records(
        &self,
        _zone: &str,
        _records: &[Record],
    ) -> Result<Vec<Record>, ProviderError> {
        Err(ProviderError::Unimplemented("set_records"))
    }
}

#[async_trait]
impl RecordDeleter for QratorProvider {
    async fn delete_records(
        &self,
        zone: &str,
        records: &[Record],
    ) -> Result<Vec<Record>, ProviderError> {
        if let Some(pos) = records.iter().position(|r| r.value.is_empty()) {
            return Err(ProviderError::Validation(format!(
                "record #{pos}: certificate id (value) required for deletion"
            )));
        }

        let mut deleted = Vec::with_capacity(records.len());
        for rec in records {
            if let Err(e) = self.call(RpcRequest::remove(&rec.value)).await {
                if !deleted.is_empty() {
                    warn!(
                        "Qrator delete aborted in zone `{zone}` after removing {} of {} certificate(s): {e}",
                        deleted.len(),
                        records.len()
                    );
                }
                return Err(e);
            }
            debug!("Qrator removed certificate id={}", rec.value);
            deleted.push(rec.clone());
        }
        info!(
            "Qrator removed {} certificate(s) in zone `{zone}`",
            deleted.len()
        );
        Ok(deleted)
    }
}

impl RecordManager for QratorProvider {
    fn name(&self) -> &'static str {
        "Qrator"
    }
}
