use common::authz::{
    ActionCheckResult, ActionOracle, CallerCredentials, SOURCE_UNAUTHENTICATED, SOURCE_UNREACHABLE,
};

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

/// Path under the auth proxy base where single-action checks live.
const CHECK_PATH: [&str; 6] = ["api", "proxy", "auth", "permissions", "actions", "check"];

/// Action oracle backed by the host application's auth proxy.
///
/// One HTTP GET per check, keyed by the action string. Anonymous
/// callers are denied locally without touching the network. Every
/// failure mode collapses to a denial carrying a diagnostic source tag.
#[derive(Debug)]
pub struct ProxyActionOracle {
    client: reqwest::Client,
    /// Pre-built check endpoint; the action key is appended per call.
    check_base: Url,
    debug: bool,
}

impl ProxyActionOracle {
    pub fn new(base_url: &Url, debug: bool) -> Result<Self, OracleSetupError> {
        let mut check_base = base_url.clone();
        check_base
            .path_segments_mut()
            .map_err(|_| OracleSetupError::CannotBeABase(base_url.clone()))?
            .pop_if_empty()
            .extend(CHECK_PATH);
        Ok(Self {
            client: reqwest::Client::new(),
            check_base,
            debug,
        })
    }

    /// Endpoint for a single action key. Segment push percent-encodes
    /// the key, so dots and slashes in keys cannot change the route.
    fn check_url(&self, action_key: &str) -> Url {
        let mut url = self.check_base.clone();
        // Infallible: the base was validated as segmentable in `new`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(action_key);
        }
        url
    }
}

#[async_trait]
impl ActionOracle for ProxyActionOracle {
    async fn check_action(
        &self,
        credentials: &CallerCredentials,
        action_key: &str,
    ) -> ActionCheckResult {
        if credentials.is_anonymous() {
            tracing::warn!(action = action_key, "action check without credentials");
            return ActionCheckResult::denied(SOURCE_UNAUTHENTICATED);
        }

        let mut request = self.client.get(self.check_url(action_key));
        if let Some(token) = credentials.token() {
            request = request.bearer_auth(token);
        }
        if let Some(cookie) = credentials.cookie_header.as_deref() {
            request = request.header(http::header::COOKIE, cookie);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(action = action_key, %err, "auth proxy unreachable");
                return ActionCheckResult::denied(SOURCE_UNREACHABLE);
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                action = action_key,
                status = status.as_u16(),
                "auth proxy rejected action check"
            );
            return ActionCheckResult::denied(format!("auth_status_{}", status.as_u16()));
        }

        let body: CheckResponseBody = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(action = action_key, %err, "unparseable action check body");
                CheckResponseBody::default()
            }
        };

        let result = ActionCheckResult {
            granted: body.has_permission.unwrap_or(false),
            source: body.source,
        };
        if self.debug {
            tracing::info!(
                action = action_key,
                granted = result.granted,
                source = result.source.as_deref(),
                "action check"
            );
        }
        result
    }
}

/// Wire shape of the proxy's answer. Both the snake_case and camelCase
/// spellings of the grant flag occur in the wild.
#[derive(Debug, Default, Deserialize)]
struct CheckResponseBody {
    #[serde(default, alias = "hasPermission")]
    has_permission: Option<bool>,
    #[serde(default)]
    source: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum OracleSetupError {
    #[error("auth base URL cannot hold path segments: {0}")]
    CannotBeABase(Url),
}
