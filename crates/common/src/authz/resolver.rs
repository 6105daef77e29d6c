use super::oracle::{ActionOracle, CallerCredentials};
use super::scope::{candidate_keys, ScopeEntity, ScopeMode, ScopeVerb};

/// Resolve the caller's effective scope mode for a verb, optionally
/// narrowed to an entity type.
///
/// The candidate keys from [`candidate_keys`] are probed sequentially
/// and the first granted key's mode is returned. The candidate order
/// (entity tier before global tier, modes ascending within a tier) is a
/// correctness requirement: a caller granted both `own` and `any` must
/// resolve to `own`. Sequential evaluation with early exit also keeps
/// the oracle traffic minimal; a resolution never issues more than 8
/// checks.
///
/// When nothing is granted on any key the resolver falls back to
/// [`ScopeMode::Own`], the safe default.
///
/// No caching: every call re-resolves from the oracle.
pub async fn resolve_scope_mode<O: ActionOracle + ?Sized>(
    oracle: &O,
    credentials: &CallerCredentials,
    verb: ScopeVerb,
    entity: Option<ScopeEntity>,
) -> ScopeMode {
    for (mode, key) in candidate_keys(verb, entity) {
        let result = oracle.check_action(credentials, &key).await;
        if result.granted {
            tracing::debug!(%key, %mode, source = ?result.source, "scope mode resolved");
            return mode;
        }
    }

    tracing::debug!(%verb, ?entity, "no scope grant found, falling back to own");
    ScopeMode::Own
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::authz::ActionCheckResult;

    /// Oracle scripted with an allow-list of granted keys; records
    /// every key it was asked about.
    struct ScriptedOracle {
        granted: Vec<&'static str>,
        asked: Mutex<Vec<String>>,
    }

    impl ScriptedOracle {
        fn granting(granted: Vec<&'static str>) -> Self {
            Self {
                granted,
                asked: Mutex::new(Vec::new()),
            }
        }

        fn asked(&self) -> Vec<String> {
            self.asked.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ActionOracle for ScriptedOracle {
        async fn check_action(
            &self,
            _credentials: &CallerCredentials,
            action_key: &str,
        ) -> ActionCheckResult {
            self.asked.lock().unwrap().push(action_key.to_string());
            if self.granted.contains(&action_key) {
                ActionCheckResult::granted(Some("role:test".to_string()))
            } else {
                ActionCheckResult::denied("denied")
            }
        }
    }

    #[tokio::test]
    async fn test_first_granted_mode_wins() {
        // Both own and any granted at the entity tier: own is checked
        // first and must win.
        let oracle = ScriptedOracle::granting(vec![
            "form-core.forms.read.scope.own",
            "form-core.forms.read.scope.any",
        ]);
        let mode = resolve_scope_mode(
            &oracle,
            &CallerCredentials::anonymous(),
            ScopeVerb::Read,
            Some(ScopeEntity::Forms),
        )
        .await;
        assert_eq!(mode, ScopeMode::Own);

        // Short-circuited after the grant: none, then own.
        assert_eq!(oracle.asked().len(), 2);
    }

    #[tokio::test]
    async fn test_entity_tier_scanned_before_global() {
        // The sole grant is at the global tier; the entity tier must be
        // exhausted first.
        let oracle = ScriptedOracle::granting(vec!["form-core.write.scope.ldd"]);
        let mode = resolve_scope_mode(
            &oracle,
            &CallerCredentials::anonymous(),
            ScopeVerb::Write,
            Some(ScopeEntity::Entries),
        )
        .await;
        assert_eq!(mode, ScopeMode::Ldd);

        let asked = oracle.asked();
        assert_eq!(asked.len(), 7);
        assert!(asked[..4]
            .iter()
            .all(|k| k.starts_with("form-core.entries.write.scope.")));
        assert_eq!(asked[4], "form-core.write.scope.none");
    }

    #[tokio::test]
    async fn test_fallback_to_own_and_probe_budget() {
        let oracle = ScriptedOracle::granting(vec![]);
        let mode = resolve_scope_mode(
            &oracle,
            &CallerCredentials::anonymous(),
            ScopeVerb::Delete,
            Some(ScopeEntity::Forms),
        )
        .await;
        assert_eq!(mode, ScopeMode::Own);
        // Worst case is exactly 8 probes, never more.
        assert_eq!(oracle.asked().len(), 8);
    }

    #[tokio::test]
    async fn test_none_grant_denies() {
        let oracle = ScriptedOracle::granting(vec![
            "form-core.forms.read.scope.none",
            "form-core.forms.read.scope.any",
        ]);
        let mode = resolve_scope_mode(
            &oracle,
            &CallerCredentials::anonymous(),
            ScopeVerb::Read,
            Some(ScopeEntity::Forms),
        )
        .await;
        assert_eq!(mode, ScopeMode::None);
        assert_eq!(oracle.asked().len(), 1);
    }

    #[tokio::test]
    async fn test_no_entity_probes_global_only() {
        let oracle = ScriptedOracle::granting(vec![]);
        resolve_scope_mode(
            &oracle,
            &CallerCredentials::anonymous(),
            ScopeVerb::Read,
            None,
        )
        .await;
        assert_eq!(oracle.asked().len(), 4);
    }
}
