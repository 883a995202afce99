use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A candidate completion: the text shown and matched, plus an opaque payload
/// handed back untouched when the user picks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub value: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Suggestion {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            data: None,
        }
    }

    pub fn with_data(value: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            data: Some(data.into()),
        }
    }

    /// Case-insensitive equality against a query.
    pub fn matches_exactly(&self, query: &str) -> bool {
        self.value.to_lowercase() == query.to_lowercase()
    }
}

impl From<&str> for Suggestion {
    fn from(value: &str) -> Self {
        Suggestion::new(value)
    }
}

impl From<String> for Suggestion {
    fn from(value: String) -> Self {
        Suggestion::new(value)
    }
}

/// Extract suggestions from a `{"suggestions": [...]}` payload.
///
/// Entries may be plain strings or `{value, data}` objects. Returns None when
/// the payload is malformed anywhere, so a caller never sees a partial list.
pub fn parse_payload(payload: &Value) -> Option<Vec<Suggestion>> {
    let items = payload.get("suggestions")?.as_array()?;
    let mut suggestions = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => suggestions.push(Suggestion::new(s.as_str())),
            Value::Object(map) => {
                let value = map.get("value")?.as_str()?;
                let data = map.get("data").filter(|d| !d.is_null()).cloned();
                suggestions.push(Suggestion {
                    value: value.to_string(),
                    data,
                });
            }
            _ => return None,
        }
    }
    Some(suggestions)
}
