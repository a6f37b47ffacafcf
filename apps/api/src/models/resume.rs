use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored resume. `owner` is the caller identity that created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: Uuid,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body shared by create and update. Both fields may be omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ResumeFields {
    /// Reads a raw request body. An empty body means no fields were sent.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(ResumeFields::default());
        }
        serde_json::from_slice(body)
    }
}

/// Values to insert for a new resume.
#[derive(Debug, Clone)]
pub struct NewResume {
    pub owner: String,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NewResume {
    /// Create keeps the submitted values as-is, empty strings included.
    pub fn new(owner: &str, fields: ResumeFields) -> Self {
        NewResume {
            owner: owner.to_string(),
            title: fields.title,
            content: fields.content,
        }
    }
}

/// The set of fields an update will overwrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ResumePatch {
    /// Only non-empty values count as present; empty strings leave the field untouched.
    pub fn from_fields(fields: ResumeFields) -> Self {
        ResumePatch {
            title: fields.title.filter(|t| !t.is_empty()),
            content: fields.content.filter(|c| !c.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

impl Resume {
    /// Returns a copy with every present patch field written over the existing value.
    /// `PgResumeStore::update` expresses the same rule with `COALESCE`.
    #[cfg(test)]
    pub fn apply(&self, patch: &ResumePatch, now: DateTime<Utc>) -> Resume {
        Resume {
            title: patch.title.clone().or_else(|| self.title.clone()),
            content: patch.content.clone().or_else(|| self.content.clone()),
            updated_at: now,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Resume {
        let created = Utc::now();
        Resume {
            id: Uuid::new_v4(),
            owner: "user-a".to_string(),
            title: Some("Engineer CV".to_string()),
            content: Some("Y".to_string()),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_apply_overwrites_only_present_fields() {
        let existing = sample();
        let patch = ResumePatch {
            title: Some("X".to_string()),
            content: None,
        };
        let updated = existing.apply(&patch, Utc::now());
        assert_eq!(updated.title.as_deref(), Some("X"));
        assert_eq!(updated.content.as_deref(), Some("Y"));
        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.owner, existing.owner);
        assert_eq!(updated.created_at, existing.created_at);
    }

    #[test]
    fn test_empty_strings_are_not_part_of_patch() {
        let patch = ResumePatch::from_fields(ResumeFields {
            title: Some(String::new()),
            content: Some("v2".to_string()),
        });
        assert_eq!(patch.title, None);
        assert_eq!(patch.content.as_deref(), Some("v2"));
    }

    #[test]
    fn test_patch_from_empty_body_is_empty() {
        let fields: ResumeFields = serde_json::from_value(json!({})).unwrap();
        assert!(ResumePatch::from_fields(fields).is_empty());

        let fields: ResumeFields =
            serde_json::from_value(json!({ "title": null, "content": "" })).unwrap();
        assert!(ResumePatch::from_fields(fields).is_empty());
    }

    #[test]
    fn test_from_body_treats_empty_body_as_no_fields() {
        let fields = ResumeFields::from_body(b"").unwrap();
        assert!(fields.title.is_none() && fields.content.is_none());

        let fields = ResumeFields::from_body(b" \n").unwrap();
        assert!(fields.title.is_none() && fields.content.is_none());

        let fields = ResumeFields::from_body(br#"{"title":"CV"}"#).unwrap();
        assert_eq!(fields.title.as_deref(), Some("CV"));
    }

    #[test]
    fn test_from_body_rejects_wrong_types() {
        assert!(ResumeFields::from_body(br#"{"title":5}"#).is_err());
        assert!(ResumeFields::from_body(b"{not json").is_err());
    }

    #[test]
    fn test_create_keeps_empty_strings() {
        let new = NewResume::new(
            "user-a",
            ResumeFields {
                title: Some(String::new()),
                content: None,
            },
        );
        assert_eq!(new.title.as_deref(), Some(""));
        assert_eq!(new.content, None);
        assert_eq!(new.owner, "user-a");
    }

    #[test]
    fn test_serializes_camel_case_and_omits_absent_fields() {
        let mut resume = sample();
        resume.content = None;
        let value = serde_json::to_value(&resume).unwrap();
        assert_eq!(value["owner"], "user-a");
        assert_eq!(value["title"], "Engineer CV");
        assert!(value.get("content").is_none());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}
