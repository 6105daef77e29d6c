use axum::response::{IntoResponse, Response};
use axum::Json;
use common::authz::{
    resolve_scope_mode, ActionCheckResult, ActionOracle, CallerCredentials, ScopeEntity,
    ScopeMode, ScopeVerb,
};
use http::StatusCode;

/// A failed guard, ready to become a response. Missing credentials map
/// to 401, an explicit denial to 403; both name the action so callers
/// can see what was asked of the authority.
#[derive(Debug, thiserror::Error)]
#[error("not authorized for {action}")]
pub struct AuthzDenied {
    action: String,
    unauthenticated: bool,
}

impl AuthzDenied {
    pub fn is_unauthenticated(&self) -> bool {
        self.unauthenticated
    }
}

impl IntoResponse for AuthzDenied {
    fn into_response(self) -> Response {
        let (status, message) = if self.unauthenticated {
            (StatusCode::UNAUTHORIZED, "Unauthorized")
        } else {
            (StatusCode::FORBIDDEN, "Not authorized")
        };
        (
            status,
            Json(serde_json::json!({"error": message, "action": self.action})),
        )
            .into_response()
    }
}

/// Require a single action grant. Handlers call this for operations
/// gated on one key rather than a scope ladder.
pub async fn require_action<O: ActionOracle + ?Sized>(
    oracle: &O,
    credentials: &CallerCredentials,
    action_key: &str,
) -> Result<ActionCheckResult, AuthzDenied> {
    let result = oracle.check_action(credentials, action_key).await;
    if result.granted {
        return Ok(result);
    }
    Err(AuthzDenied {
        action: action_key.to_string(),
        unauthenticated: result.is_unauthenticated(),
    })
}

/// Resolve the caller's scope mode for a verb, and deny outright when
/// it comes back `none`. The granted mode still narrows what the
/// handler may return; this guard only rules out the no-access case.
pub async fn require_scope<O: ActionOracle + ?Sized>(
    oracle: &O,
    credentials: &CallerCredentials,
    verb: ScopeVerb,
    entity: Option<ScopeEntity>,
) -> Result<ScopeMode, AuthzDenied> {
    let mode = resolve_scope_mode(oracle, credentials, verb, entity).await;
    if mode != ScopeMode::None {
        return Ok(mode);
    }
    Err(AuthzDenied {
        action: format!("{verb} scope"),
        unauthenticated: credentials.is_anonymous(),
    })
}
