use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Rejected form input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),
    #[error("'{value}' is not a valid {field} value")]
    UnknownValue { field: &'static str, value: String },
    #[error("model '{model}' is not offered for brand '{brand}'")]
    ModelNotInBrand { brand: String, model: String },
}

/// Error payload returned by the prediction service on a non-success status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

/// One entry of a request-validation `detail` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(default)]
    pub loc: Vec<Value>,
    pub msg: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl ErrorBody {
    /// Human-readable message carried by `detail`, if any. A plain string is
    /// used as is; a list of validation issues is joined with `"; "`.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Array(items) => {
                let messages: Vec<String> = items
                    .iter()
                    .filter_map(|item| {
                        serde_json::from_value::<ValidationIssue>(item.clone()).ok()
                    })
                    .map(|issue| issue.describe())
                    .collect();
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("; "))
                }
            }
            _ => None,
        }
    }
}

impl ValidationIssue {
    fn describe(&self) -> String {
        // loc is e.g. ["body", "an_fabricatie"]; the last segment names the field.
        match self.loc.last() {
            Some(Value::String(field)) => format!("{field}: {}", self.msg),
            _ => self.msg.clone(),
        }
    }
}
