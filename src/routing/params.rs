//! Per-request parameter containers.
//!
//! Path parameters come from matching a template; query parameters and
//! body fields are read through typed accessors that return `Option`
//! instead of failing on absent keys.

use serde::Serialize;
use serde_json::Value;

/// A converted path parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Str(String),
}

impl ParamValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            ParamValue::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v),
            ParamValue::Int(_) => None,
        }
    }
}

/// Parameters extracted from the path, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    entries: Vec<(String, ParamValue)>,
}

impl PathParams {
    pub(crate) fn insert(&mut self, name: String, value: ParamValue) {
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ParamValue::as_int)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// Decoded query string.
///
/// Repeated keys keep every pair, but [`QueryParams::get`] returns the
/// first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parse a raw query string (without the leading `?`).
    pub fn parse(raw: &str) -> Self {
        let pairs = url::form_urlencoded::parse(raw.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Request body viewed as a flat set of named fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Form(QueryParams),
    Json(serde_json::Map<String, Value>),
}

impl RequestBody {
    /// Interpret raw bytes according to the request's content type.
    ///
    /// JSON bodies must be objects; anything that fails to parse is treated
    /// as an empty body.
    pub fn from_bytes(content_type: Option<&str>, bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return RequestBody::Empty;
        }

        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match mime.as_deref() {
            Some("application/json") => match serde_json::from_slice::<Value>(bytes) {
                Ok(Value::Object(map)) => RequestBody::Json(map),
                _ => RequestBody::Empty,
            },
            Some("application/x-www-form-urlencoded") => match std::str::from_utf8(bytes) {
                Ok(text) => RequestBody::Form(QueryParams::parse(text)),
                Err(_) => RequestBody::Empty,
            },
            _ => RequestBody::Empty,
        }
    }

    /// Look up a field. Non-string JSON values come back as their JSON text.
    pub fn field(&self, key: &str) -> Option<String> {
        match self {
            RequestBody::Empty => None,
            RequestBody::Form(form) => form.get(key).map(str::to_string),
            RequestBody::Json(map) => match map.get(key)? {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            },
        }
    }
}
