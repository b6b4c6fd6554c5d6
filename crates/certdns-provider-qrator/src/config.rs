//! Credentials and endpoint of one Qrator account.

use serde::Deserialize;
use std::fmt;

/// Production API root, used when `api_base` is left empty.
pub const DEFAULT_API_BASE: &str = "https://api.qrator.net";

/// Path of the client RPC endpoint, appended to `api_base`.
pub const REQUEST_PATH: &str = "/request/client/1";

#[derive(Clone, Default, Deserialize)]
pub struct QratorConfig {
    #[serde(default)]
    pub api_token: String,
    #[serde(default)]
    pub api_base: String,
}

impl QratorConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            api_base: String::new(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Fills `api_base` with [`DEFAULT_API_BASE`] when empty. Idempotent.
    pub fn ensure_defaults(&mut self) {
        if self.api_base.is_empty() {
            self.api_base = DEFAULT_API_BASE.to_owned();
        }
    }

    /// Full URL every RPC call is posted to.
    pub fn endpoint(&self) -> String {
        format!("{}{REQUEST_PATH}", self.api_base.trim_end_matches('/'))
    }
}

// the token never ends up in logs
impl fmt::Debug for QratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QratorConfig")
            .field("api_token", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl fmt::Display for QratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "qrator({})", self.api_base)
    }
}
