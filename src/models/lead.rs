use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A quiz submission posted by the website.
///
/// Only `name` and `email` are checked. Every other field is read
/// leniently: `null` or a wrong type falls back to the empty value rather
/// than rejecting the submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadSubmission {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(deserialize_with = "lenient::text")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub marketing_consent: bool,
    #[serde(deserialize_with = "lenient::object_or_default")]
    pub result: QuizResult,
    #[serde(deserialize_with = "lenient::object_or_default")]
    pub answers: Map<String, Value>,
    #[serde(deserialize_with = "lenient::text")]
    pub source: String,
    #[serde(deserialize_with = "lenient::text")]
    pub site: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuizResult {
    #[serde(deserialize_with = "lenient::text")]
    pub family: String,
    #[serde(deserialize_with = "lenient::text")]
    pub depth: String,
    #[serde(deserialize_with = "lenient::text")]
    pub rinse: String,
    #[serde(deserialize_with = "lenient::text_list")]
    pub tips: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<Value>,
    /// Keys the quiz adds later still reach the internal notification.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Field deserializers that coerce instead of failing.
mod lenient {
    use serde::de::{DeserializeOwned, Error};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn text_value(value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(text) => text,
            other => other.to_string(),
        }
    }

    /// Strings as-is, other scalars in their JSON spelling, `null` as empty.
    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Value::deserialize(deserializer).map(text_value)
    }

    /// Truthiness: `null`, `false`, `0` and `""` are false, anything else true.
    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => false,
            Value::Bool(flag) => flag,
            Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
            Value::String(text) => !text.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        })
    }

    /// An array with every element rendered as text; anything else is empty.
    pub fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items.into_iter().map(text_value).collect(),
            _ => Vec::new(),
        })
    }

    /// Objects decode into `T`; any other value gives `T::default()`.
    pub fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        match Value::deserialize(deserializer)? {
            value @ Value::Object(_) => serde_json::from_value(value).map_err(D::Error::custom),
            _ => Ok(T::default()),
        }
    }
}

impl LeadSubmission {
    /// Parses a request body. An empty body is treated as `{}`.
    pub fn from_body(body: &str) -> Result<Self> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(body)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(ApiError::validation("Missing name or email"));
        }
        Ok(())
    }
}
