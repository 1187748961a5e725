//! Value types for message entries
//!
//! Entry values form a closed tag set: primitives, nested structured data,
//! and diagnostic error traces. Rendering dispatches on the tag instead of
//! runtime type sniffing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic trace captured from an error value
///
/// Holds the error message plus its source chain, so a message entry can
/// carry a full error description without keeping the error itself alive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorTrace {
    message: String,
    causes: Vec<String>,
}

impl ErrorTrace {
    /// Create a trace from a bare message with no cause chain
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            causes: Vec::new(),
        }
    }

    /// Capture an error together with its `source()` chain
    pub fn capture(error: &dyn std::error::Error) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            message: error.to_string(),
            causes,
        }
    }

    /// The top-level error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.message)?;
        for cause in &self.causes {
            write!(f, "\n    caused by: {}", cause)?;
        }
        Ok(())
    }
}

/// Value type for message entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Error(ErrorTrace),
    Map(serde_json::Value),
    Null,
}

impl fmt::Display for FieldValue {
    /// Positional coercion: the raw text a value contributes to a column
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Error(trace) => write!(f, "{}", trace),
            FieldValue::Map(value) => {
                let rendered = serde_json::to_string(value)
                    .unwrap_or_else(|_| value.to_string());
                write!(f, "{}", rendered)
            }
            FieldValue::Null => Ok(()),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Error(trace) => serde_json::Value::String(trace.to_string()),
            FieldValue::Map(value) => value.clone(),
            FieldValue::Null => serde_json::Value::Null,
        }
    }

    /// Render for the trailing key=value section
    ///
    /// JSON-style for data values (strings come out quoted), full diagnostic
    /// trace text for error values. Falls back to the positional coercion
    /// instead of failing on unserializable input.
    #[must_use]
    pub fn render_json(&self) -> String {
        match self {
            FieldValue::Error(trace) => trace.to_string(),
            other => serde_json::to_string(&other.to_json_value())
                .unwrap_or_else(|_| other.to_string()),
        }
    }

    /// True for the null value
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        FieldValue::Map(value)
    }
}

impl From<ErrorTrace> for FieldValue {
    fn from(trace: ErrorTrace) -> Self {
        FieldValue::Error(trace)
    }
}
