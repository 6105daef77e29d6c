use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Name of the session cookie the host's auth proxy issues.
pub const TOKEN_COOKIE: &str = "hit_token";

/// Source tag for checks short-circuited by missing credentials.
pub const SOURCE_UNAUTHENTICATED: &str = "unauthenticated";
/// Source tag for checks that failed to reach the authority at all.
pub const SOURCE_UNREACHABLE: &str = "auth_unreachable";

/// Outcome of a single action check against the remote authority.
///
/// `source` records *why* the result was what it was. It carries no
/// authorization weight; it exists so operators can tell an explicit
/// denial apart from an infrastructure failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCheckResult {
    pub granted: bool,
    pub source: Option<String>,
}

impl ActionCheckResult {
    pub fn granted(source: Option<String>) -> Self {
        Self {
            granted: true,
            source,
        }
    }

    pub fn denied(source: impl Into<String>) -> Self {
        Self {
            granted: false,
            source: Some(source.into()),
        }
    }

    /// True when the denial came from absent credentials rather than an
    /// explicit authority decision. Callers map this to a 401-class
    /// outcome instead of a 403.
    pub fn is_unauthenticated(&self) -> bool {
        !self.granted && self.source.as_deref() == Some(SOURCE_UNAUTHENTICATED)
    }
}

/// Raw credential material lifted off an inbound request.
///
/// The oracle client works from this rather than a parsed identity: it
/// forwards the bearer token and the raw cookie header to the authority
/// and lets the authority decide what they mean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerCredentials {
    /// Token taken from the `Authorization: Bearer` header, if any.
    pub bearer_token: Option<String>,
    /// The request's raw `Cookie` header, if any.
    pub cookie_header: Option<String>,
}

impl CallerCredentials {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Locate a discrete token: the `hit_token` cookie wins over the
    /// `Authorization` header. Returns `None` when neither holds one,
    /// even if a raw cookie header is present.
    pub fn token(&self) -> Option<&str> {
        if let Some(token) = self.cookie_value(TOKEN_COOKIE) {
            return Some(token);
        }
        self.bearer_token.as_deref()
    }

    /// Look up a single cookie's value inside the raw cookie header.
    pub fn cookie_value(&self, name: &str) -> Option<&str> {
        let header = self.cookie_header.as_deref()?;
        for part in header.split(';') {
            let Some((k, v)) = part.trim().split_once('=') else {
                continue;
            };
            if k == name && !v.is_empty() {
                return Some(v);
            }
        }
        None
    }

    /// True when there is nothing to forward at all: no token and no
    /// cookie header. Checks for anonymous callers are short-circuited
    /// locally without a network call.
    pub fn is_anonymous(&self) -> bool {
        self.token().is_none() && self.cookie_header.is_none()
    }
}

/// The remote permission authority, seen as a boolean oracle keyed by
/// action string.
///
/// Implementations must be infallible at the type level: network and
/// protocol failures are folded into a denial with a diagnostic
/// `source` tag, never surfaced as errors. The check is read-only and
/// idempotent.
#[async_trait]
pub trait ActionOracle: Send + Sync {
    async fn check_action(
        &self,
        credentials: &CallerCredentials,
        action_key: &str,
    ) -> ActionCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_cookie_wins_over_bearer() {
        let creds = CallerCredentials {
            bearer_token: Some("bearer-tok".to_string()),
            cookie_header: Some("a=1; hit_token=cookie-tok; b=2".to_string()),
        };
        assert_eq!(creds.token(), Some("cookie-tok"));
    }

    #[test]
    fn test_bearer_fallback() {
        let creds = CallerCredentials {
            bearer_token: Some("bearer-tok".to_string()),
            cookie_header: Some("a=1".to_string()),
        };
        assert_eq!(creds.token(), Some("bearer-tok"));
    }

    #[test]
    fn test_anonymous() {
        assert!(CallerCredentials::anonymous().is_anonymous());

        // A raw cookie header without a discrete token is still
        // forwardable credential material.
        let creds = CallerCredentials {
            bearer_token: None,
            cookie_header: Some("session=abc".to_string()),
        };
        assert!(!creds.is_anonymous());
        assert_eq!(creds.token(), None);
    }

    #[test]
    fn test_empty_cookie_value_ignored() {
        let creds = CallerCredentials {
            bearer_token: None,
            cookie_header: Some("hit_token=".to_string()),
        };
        assert_eq!(creds.token(), None);
    }
}
