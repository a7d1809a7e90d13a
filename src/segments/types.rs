//! Types for customer segments

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rule set of a segment
///
/// Rules are evaluated by the backend; the client only carries them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentRules {
    /// How conditions combine, e.g. `AND`
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub logic: String,

    /// Individual conditions
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub conditions: Vec<Value>,
}

/// Who created a segment
///
/// The backend either populates the creator or leaves a bare user ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentCreator {
    /// Populated creator
    Profile {
        #[serde(rename = "displayName", default, deserialize_with = "crate::de::null_as_default")]
        display_name: String,
        #[serde(default, deserialize_with = "crate::de::null_as_default")]
        email: String,
    },

    /// Unpopulated user ID
    Id(String),
}

impl SegmentCreator {
    /// Text suitable for display
    pub fn label(&self) -> &str {
        match self {
            SegmentCreator::Profile { display_name, email } if display_name.is_empty() => email.as_str(),
            SegmentCreator::Profile { display_name, .. } => display_name.as_str(),
            SegmentCreator::Id(id) => id.as_str(),
        }
    }
}

/// A customer segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Backend record ID
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// Segment name
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub name: String,

    /// Rule set
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub rules: SegmentRules,

    /// Audience size when the segment was last evaluated
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub audience_size_snapshot: u64,

    /// Creation timestamp
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Creator
    #[serde(rename = "createdBy", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<SegmentCreator>,
}

/// Body of `POST /segments/create`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSegment {
    /// Segment name
    pub name: String,

    /// Rules as produced by the backend's parser
    pub rules: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn creator_profile_or_id() {
        let segment: Segment = serde_json::from_value(json!({
            "_id": "s1",
            "name": "Big spenders",
            "rules": { "logic": "AND", "conditions": [{ "field": "total_spend", "op": ">", "value": 1000 }] },
            "audience_size_snapshot": 42,
            "createdAt": "2025-05-01T00:00:00Z",
            "createdBy": { "displayName": "Ada", "email": "ada@example.com" }
        }))
        .unwrap();
        assert_eq!(segment.created_by.as_ref().map(|c| c.label()), Some("Ada"));
        assert_eq!(segment.rules.conditions.len(), 1);

        let segment: Segment = serde_json::from_value(json!({
            "_id": "s2",
            "name": "Lapsed",
            "createdBy": "665f"
        }))
        .unwrap();
        assert_eq!(segment.created_by.as_ref().map(|c| c.label()), Some("665f"));
        assert_eq!(segment.audience_size_snapshot, 0);
        assert_eq!(segment.rules, SegmentRules::default());
    }
}
