use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Who may see a form's entries once it is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Non-owners never see the form's entries; even the owner's entry
    /// listing is limited to entries they created.
    Private,
    /// Project-wide: any caller who can access the published form can
    /// work with its entries.
    Project,
}

/// A form definition record.
///
/// Authorization only cares about `owner_id`, `is_published`, and
/// `visibility`; the rest is descriptive metadata. Field definitions
/// live on versions ([`FormVersion`](super::FormVersion)), not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Subject id of the creator. Ownership is not reassignable.
    pub owner_id: String,
    /// False while drafting and after unpublish. While false, ACL
    /// entries on the form are inert.
    pub is_published: bool,
    pub visibility: Visibility,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Form {
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            owner_id: owner_id.into(),
            is_published: false,
            visibility: Visibility::Project,
            created_at: now,
            updated_at: now,
        }
    }
}
