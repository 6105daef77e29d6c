use serde::{Deserialize, Serialize};

/// A parsed caller identity, produced per-request by the host's
/// identity extraction and never persisted here.
///
/// `groups` must arrive pre-resolved: this pack compares ACL principal
/// ids against the set as given and never expands group membership
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// Stable subject id (the token's `sub` claim).
    pub subject_id: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

impl CallerIdentity {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            roles: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_groups(mut self, groups: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the caller holds the admin role.
    ///
    /// Both the `admin` and `Admin` literals are accepted, as two exact
    /// string matches rather than a case-fold. The host policy issues
    /// both spellings; folding other casings in would widen access.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == "admin" || r == "Admin")
    }

    /// Every id an ACL entry's `principal_id` may match for this
    /// caller: the subject id, each role, and each pre-resolved group.
    pub fn principal_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.subject_id.as_str())
            .chain(self.roles.iter().map(String::as_str))
            .chain(self.groups.iter().map(String::as_str))
    }
}
