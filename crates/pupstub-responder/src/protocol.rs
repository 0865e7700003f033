//! JSON messages exchanged with the puppeteer add-on

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request from the add-on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Identifier of the calling add-on instance
    pub client_id: String,
    /// Per-session request counter
    pub sequence: u64,
    /// Everything else the add-on sent; display only
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Request {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

/// Reply to the add-on
///
/// Starts out holding only the correlation fields of its request; operator
/// fields are added as plain strings and may replace them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Response(Map<String, Value>);

impl Response {
    /// A reply carrying `client_id` and `sequence` from `request`
    pub fn for_request(request: &Request) -> Self {
        let mut fields = Map::new();
        fields.insert("client_id".into(), Value::String(request.client_id.clone()));
        fields.insert("sequence".into(), Value::from(request.sequence));
        Self(fields)
    }

    /// Insert or overwrite a field with a raw string value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Value::String(value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
