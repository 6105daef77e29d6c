use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

/// A submitted entry: one row of user data against a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEntry {
    pub id: Uuid,
    pub form_id: Uuid,
    pub created_by: String,
    /// Field values keyed by field key.
    pub data: Value,
    /// Denormalized text for substring search, recomputed on every
    /// write. See [`compute_search_text`].
    pub search_text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl FormEntry {
    pub fn new(form_id: Uuid, created_by: impl Into<String>, data: Value) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            form_id,
            created_by: created_by.into(),
            search_text: compute_search_text(&data),
            data,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Flatten entry data into one searchable string.
///
/// Strings are taken verbatim, numbers and booleans are stringified,
/// and objects contribute their string `label` field (reference fields
/// store `{ formId, entryId, label }`). Arrays and nulls are skipped.
pub fn compute_search_text(data: &Value) -> String {
    let Some(map) = data.as_object() else {
        return String::new();
    };

    let mut parts: Vec<String> = Vec::new();
    for value in map.values() {
        match value {
            Value::String(s) => parts.push(s.clone()),
            Value::Number(n) => parts.push(n.to_string()),
            Value::Bool(b) => parts.push(b.to_string()),
            Value::Object(obj) => {
                if let Some(Value::String(label)) = obj.get("label") {
                    parts.push(label.clone());
                }
            }
            _ => {}
        }
    }
    parts.join(" ")
}
