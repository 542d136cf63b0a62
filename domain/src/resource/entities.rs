//! Resource entity
//!
//! Resources come from an external service whose records are not guaranteed
//! to be well-formed. Every field decodes leniently: missing, null or
//! wrong-typed values degrade to empty ones instead of failing the record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A service-directory entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub service_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub eligibility: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub partners: Vec<String>,
    #[serde(default)]
    pub direction: Direction,
}

impl Resource {
    pub fn new(service_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            service_type: service_type.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_partners(mut self, partners: &[&str]) -> Self {
        self.partners = partners.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_eligibility(mut self, eligibility: impl Into<String>) -> Self {
        self.eligibility = eligibility.into();
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

/// Associated direction: either a single text or an ordered list of steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Direction {
    Text(String),
    Steps(Vec<String>),
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Text(String::new())
    }
}

impl Direction {
    /// Display lines (one per step)
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Direction::Text(text) if text.is_empty() => Vec::new(),
            Direction::Text(text) => vec![text.as_str()],
            Direction::Steps(steps) => steps.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => Direction::Text(text),
            Value::Array(items) => Direction::Steps(strings_of(items)),
            _ => Direction::default(),
        })
    }
}

/// Decode a fetched payload.
///
/// Returns `None` when the payload is not a JSON array. Elements that are not
/// objects are skipped; the second tuple field counts them.
pub fn decode_collection(payload: Value) -> Option<(Vec<Resource>, usize)> {
    let Value::Array(items) = payload else {
        return None;
    };
    let total = items.len();
    let resources: Vec<Resource> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    let skipped = total - resources.len();
    Some((resources, skipped))
}

fn strings_of(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_string_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => strings_of(items),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_well_formed() {
        let resource: Resource = serde_json::from_value(json!({
            "id": 7,
            "service_type": "Therapy Services",
            "description": "desc",
            "eligibility": "Ages 0-21",
            "partners": ["MHP", "CWS"],
            "direction": ["Call intake", "Schedule assessment"]
        }))
        .unwrap();
        assert_eq!(resource.id.as_deref(), Some("7"));
        assert_eq!(resource.partners, vec!["MHP", "CWS"]);
        assert_eq!(
            resource.direction.lines(),
            vec!["Call intake", "Schedule assessment"]
        );
    }

    #[test]
    fn test_malformed_fields_degrade() {
        let resource: Resource = serde_json::from_value(json!({
            "service_type": null,
            "partners": "MHP",
            "direction": 3
        }))
        .unwrap();
        assert_eq!(resource.service_type, "");
        assert_eq!(resource.description, "");
        assert!(resource.partners.is_empty());
        assert!(resource.direction.is_empty());
        assert_eq!(resource.id, None);
    }

    #[test]
    fn test_non_string_partners_are_dropped() {
        let resource: Resource = serde_json::from_value(json!({
            "partners": ["BH", 4, null, "Probation"]
        }))
        .unwrap();
        assert_eq!(resource.partners, vec!["BH", "Probation"]);
    }

    #[test]
    fn test_direction_text() {
        let resource: Resource =
            serde_json::from_value(json!({ "direction": "Refer through CWS" })).unwrap();
        assert_eq!(resource.direction.lines(), vec!["Refer through CWS"]);
    }

    #[test]
    fn test_decode_collection_skips_non_objects() {
        let (resources, skipped) = decode_collection(json!([
            { "service_type": "A" },
            "garbage",
            { "service_type": "B" }
        ]))
        .unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(skipped, 1);
        assert_eq!(resources[1].service_type, "B");
    }

    #[test]
    fn test_decode_collection_rejects_non_array() {
        assert!(decode_collection(json!({ "data": [] })).is_none());
    }
}
