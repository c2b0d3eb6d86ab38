use crate::error::ToolboardError;
use axum_extra::extract::cookie::Key;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::net::{IpAddr, Ipv4Addr};
use tracing::warn;

/// Basic (core) configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BasicConfig {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// TOML: `basic.listen_addr`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// TOML: `basic.listen_port`. Default: `5000`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Log level for tracing subscriber initialization (e.g., "error", "warn", "info", "debug", "trace").
    /// TOML: `basic.loglevel`. Default: `info`.
    #[serde(default)]
    pub loglevel: String,

    /// Master key for the encrypted notice cookie. At least 64 bytes when set.
    /// TOML: `basic.secret_key`, env: `TOOLBOARD_BASIC__SECRET_KEY`.
    /// Empty means a random key per process (notices do not survive restarts).
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub secret_key: String,

    /// Drop the `Secure` attribute from cookies (plain-HTTP deployments).
    /// TOML: `basic.insecure_cookie`. Default: `false`.
    /// While `false`, browsers only return the notice cookie over HTTPS or to
    /// `localhost`; a plain-HTTP client on any other host never sees notices.
    #[serde(default)]
    pub insecure_cookie: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            loglevel: "info".to_string(),
            secret_key: "".to_string(),
            insecure_cookie: false,
        }
    }
}

impl BasicConfig {
    /// Whether cookies carry the `Secure` attribute.
    pub fn secure_cookie(&self) -> bool {
        !self.insecure_cookie
    }

    /// Resolves the cookie encryption key from `secret_key`.
    pub fn cookie_key(&self) -> Result<Key, ToolboardError> {
        if self.secret_key.is_empty() {
            warn!("basic.secret_key is not set; using a random cookie key for this process");
            return Ok(Key::generate());
        }
        Key::try_from(self.secret_key.as_bytes()).map_err(|_| {
            ToolboardError::CookieKey(format!(
                "basic.secret_key must be at least 64 bytes, got {}",
                self.secret_key.len()
            ))
        })
    }
}

fn deserialize_string_lax<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom(
            "expected a string or a number for basic.secret_key",
        )),
    }
}

/// Default IP address for the HTTP server listen address.
fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_listen_port() -> u16 {
    5000
}
