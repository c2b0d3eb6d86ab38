//! One-shot notices carried from a redirect to the next rendered page.
//!
//! Pending notices live in an encrypted cookie scoped to the client. Reading
//! them with [`NoticeMailbox::take`] clears the cookie, so each notice is shown
//! exactly once. A cookie that no longer decrypts, for example after the
//! secret key rotated, is cleared the same way.

use crate::server::router::ToolboardState;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
    response::{IntoResponseParts, ResponseParts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, Key, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use time::Duration;
use tracing::warn;

pub const NOTICE_COOKIE: &str = "toolboard_notices";

/// Upper bound on queued notices; the oldest are dropped first.
pub const MAX_PENDING_NOTICES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeCategory {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub category: NoticeCategory,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            category: NoticeCategory::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: NoticeCategory::Success,
            message: message.into(),
        }
    }
}

/// Extractor and response part wrapping the notice cookie.
pub struct NoticeMailbox {
    jar: PrivateCookieJar,
    // Unencrypted view of the same headers, used to clear a cookie the key
    // cannot open.
    raw: CookieJar,
    secure: bool,
}

impl NoticeMailbox {
    pub fn from_headers(headers: &HeaderMap, key: Key, secure: bool) -> Self {
        Self {
            jar: PrivateCookieJar::from_headers(headers, key),
            raw: CookieJar::from_headers(headers),
            secure,
        }
    }

    /// Queues `notice` for the next page render.
    pub fn push(self, notice: Notice) -> Self {
        let mut pending = read_pending(&self.jar);
        pending.push(notice);
        if pending.len() > MAX_PENDING_NOTICES {
            pending.drain(..pending.len() - MAX_PENDING_NOTICES);
        }

        let value = match serde_json::to_string(&pending) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to encode notices; dropping them");
                return self;
            }
        };

        let jar = self.jar.add(build_cookie(value, self.secure));
        Self {
            jar,
            raw: CookieJar::new(),
            ..self
        }
    }

    /// Drains all pending notices and clears the cookie.
    pub fn take(self) -> (Self, Vec<Notice>) {
        if self.jar.get(NOTICE_COOKIE).is_some() {
            let pending = read_pending(&self.jar);
            let jar = self.jar.remove(Cookie::build(NOTICE_COOKIE).path("/"));
            return (Self { jar, ..self }, pending);
        }
        if self.raw.get(NOTICE_COOKIE).is_some() {
            warn!("Clearing notice cookie that failed to decrypt");
            let raw = self.raw.remove(Cookie::build(NOTICE_COOKIE).path("/"));
            return (Self { raw, ..self }, Vec::new());
        }
        (self, Vec::new())
    }
}

fn read_pending(jar: &PrivateCookieJar) -> Vec<Notice> {
    let Some(cookie) = jar.get(NOTICE_COOKIE) else {
        return Vec::new();
    };
    serde_json::from_str(cookie.value()).unwrap_or_else(|e| {
        warn!(error = %e, "Discarding undecodable notice cookie");
        Vec::new()
    })
}

fn build_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((NOTICE_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(5))
        .build()
}

impl FromRequestParts<ToolboardState> for NoticeMailbox {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ToolboardState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(
            &parts.headers,
            state.cookie_key.clone(),
            !state.insecure_cookie,
        ))
    }
}

impl IntoResponseParts for NoticeMailbox {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        let res = self.raw.into_response_parts(res)?;
        self.jar.into_response_parts(res)
    }
}
