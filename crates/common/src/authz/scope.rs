use serde::{Deserialize, Serialize};

/// The breadth of a caller's access for one verb/entity pair.
///
/// Modes are ordered by restrictiveness: `None < Own < Ldd < Any`.
/// Ordering matters: when the authority grants several modes at once,
/// the most restrictive one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeMode {
    /// Denies all access to the verb/entity pair.
    None,
    /// Restricts access to resources the caller owns.
    Own,
    /// Intermediate organizational tier. Broader than `Own`, narrower
    /// than `Any`; its exact boundary is owned by the host application.
    Ldd,
    /// Unrestricted access.
    Any,
}

impl ScopeMode {
    /// All modes in ascending restrictiveness order. The resolver probes
    /// the oracle in exactly this order so the first grant is the most
    /// restrictive one.
    pub const ASCENDING: [ScopeMode; 4] =
        [ScopeMode::None, ScopeMode::Own, ScopeMode::Ldd, ScopeMode::Any];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeMode::None => "none",
            ScopeMode::Own => "own",
            ScopeMode::Ldd => "ldd",
            ScopeMode::Any => "any",
        }
    }
}

impl std::fmt::Display for ScopeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The verb dimension of an action key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeVerb {
    Read,
    Write,
    Delete,
}

impl ScopeVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeVerb::Read => "read",
            ScopeVerb::Write => "write",
            ScopeVerb::Delete => "delete",
        }
    }
}

impl std::fmt::Display for ScopeVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The entity dimension of an action key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeEntity {
    Forms,
    Entries,
}

impl ScopeEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeEntity::Forms => "forms",
            ScopeEntity::Entries => "entries",
        }
    }
}

impl std::fmt::Display for ScopeEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action key namespace prefix shared by every key this pack checks.
pub const ACTION_NAMESPACE: &str = "form-core";

/// Build the ordered candidate list of `(mode, action key)` pairs for a
/// resolution.
///
/// Keys follow the grammar `form-core.<entity>.<verb>.scope.<mode>` for
/// the entity-specific tier and `form-core.<verb>.scope.<mode>` for the
/// global tier. The entity tier is scanned completely before the global
/// tier; within a tier, modes ascend in restrictiveness. When no entity
/// is supplied only the global tier is produced, so a resolution probes
/// at most 8 keys.
pub fn candidate_keys(verb: ScopeVerb, entity: Option<ScopeEntity>) -> Vec<(ScopeMode, String)> {
    let global_prefix = format!("{ACTION_NAMESPACE}.{verb}.scope");

    let mut prefixes = Vec::with_capacity(2);
    if let Some(entity) = entity {
        prefixes.push(format!("{ACTION_NAMESPACE}.{entity}.{verb}.scope"));
    }
    prefixes.push(global_prefix);

    prefixes
        .iter()
        .flat_map(|prefix| {
            ScopeMode::ASCENDING
                .iter()
                .map(move |mode| (*mode, format!("{prefix}.{mode}")))
        })
        .collect()
}
