use serde::{Deserialize, Serialize};

/// The closed set of capabilities grantable through an ACL entry.
///
/// Stored on the wire as upper-case strings (`"READ"`, `"MANAGE_ACL"`,
/// ...) in an array that is treated as a set: duplicates are
/// meaningless and order is irrelevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    Read,
    Write,
    Delete,
    ManageAcl,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::Read => write!(f, "READ"),
            Permission::Write => write!(f, "WRITE"),
            Permission::Delete => write!(f, "DELETE"),
            Permission::ManageAcl => write!(f, "MANAGE_ACL"),
        }
    }
}

/// The kind of principal an ACL entry grants to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalType {
    User,
    Group,
    Role,
}

impl std::fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrincipalType::User => write!(f, "user"),
            PrincipalType::Group => write!(f, "group"),
            PrincipalType::Role => write!(f, "role"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&Permission::ManageAcl).unwrap(),
            "\"MANAGE_ACL\""
        );
        let parsed: Permission = serde_json::from_str("\"READ\"").unwrap();
        assert_eq!(parsed, Permission::Read);
    }

    #[test]
    fn test_principal_type_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&PrincipalType::User).unwrap(),
            "\"user\""
        );
    }
}
