//! `{method, params, id}` / `{result, error, id}` envelopes of the client API.

use certdns_provider::ProviderError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const METHOD_UPLOAD: &str = "certrequest_upload";
pub const METHOD_REMOVE: &str = "certificate_remove";

/// The API does not multiplex calls, every request goes out with this id.
pub const RPC_ID: u64 = 1;

#[derive(Debug, Serialize)]
pub struct RpcRequest {
    pub method: &'static str,
    pub params: Vec<Value>,
    pub id: u64,
}

impl RpcRequest {
    pub fn new(method: &'static str, params: Vec<Value>) -> Self {
        Self {
            method,
            params,
            id: RPC_ID,
        }
    }

    pub fn upload(cert_pem: &str, key_pem: &str) -> Self {
        Self::new(
            METHOD_UPLOAD,
            vec![Value::from(cert_pem), Value::from(key_pem)],
        )
    }

    pub fn remove(cert_id: &str) -> Self {
        Self::new(METHOD_REMOVE, vec![Value::from(cert_id)])
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub id: Option<i64>,
}

impl RpcResponse {
    /// `result` on success; a non-null `error` becomes [`ProviderError::Api`].
    pub fn into_result(self, method: &'static str) -> Result<Value, ProviderError> {
        match self.error {
            Some(error) if !error.is_null() => Err(ProviderError::Api { method, error }),
            _ => Ok(self.result),
        }
    }
}
