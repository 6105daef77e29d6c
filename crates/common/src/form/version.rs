use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Lifecycle state of one form version.
///
/// `Draft -> Published -> Archived`. Publishing archives the previously
/// published version (it is never deleted) and mints a new published
/// version from the draft; unpublishing archives the published version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Draft,
    Published,
    Archived,
}

impl std::fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionStatus::Draft => write!(f, "draft"),
            VersionStatus::Published => write!(f, "published"),
            VersionStatus::Archived => write!(f, "archived"),
        }
    }
}

/// One numbered version of a form's field layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormVersion {
    pub id: Uuid,
    pub form_id: Uuid,
    pub version: u32,
    pub status: VersionStatus,
    /// Entry-list display configuration carried along on publish.
    pub list_config: Option<serde_json::Value>,
    pub created_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl FormVersion {
    pub fn draft(form_id: Uuid, version: u32, created_by: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            form_id,
            version,
            status: VersionStatus::Draft,
            list_config: None,
            created_by: created_by.into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }
}

/// A field definition attached to one form version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub id: Uuid,
    pub form_id: Uuid,
    pub version_id: Uuid,
    /// Key the field's value is stored under in entry data.
    pub key: String,
    pub label: String,
    /// Widget/value type, opaque to this core.
    pub field_type: String,
    pub order: u32,
    pub hidden: bool,
    pub required: bool,
    pub config: Option<serde_json::Value>,
    pub default_value: Option<serde_json::Value>,
}

impl FormField {
    /// Re-attach field data to a different version, minting a new id.
    /// Used when publishing copies the draft's fields.
    pub fn copy_to_version(&self, version_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            version_id,
            ..self.clone()
        }
    }
}
