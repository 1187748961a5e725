//! Positional format configuration
//!
//! A `FormatConfig` describes the columnar layout of rendered messages: which
//! keys print positionally, in what order, at what width, and how the
//! remaining key=value pairs are separated. Configs are normalized once and
//! then treated as immutable; the registry swaps whole configs atomically.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use super::error::{MessageError, Result};

/// Key reserved for the quasi-unique message identifier
pub const MUID_KEY: &str = "muid";

/// Key reserved for the run-unique message identifier
pub const RMUID_KEY: &str = "rmuid";

/// Default width for a positional field with no explicit width
pub const DEFAULT_FIELD_WIDTH: usize = 10;

/// Minimum width for the muid column, wide enough for "muid" + 6 digits
pub const MIN_MUID_WIDTH: usize = 12;

const DEFAULT_POSITIONAL_SEPARATOR: &str = "\t";
const DEFAULT_OTHER_SEPARATOR: &str = " ";

/// A positional field descriptor as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    #[serde(default)]
    pub width: Option<usize>,
}

impl FieldSpec {
    /// Descriptor with the default width
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            width: None,
        }
    }

    /// Descriptor with an explicit width
    pub fn with_width(key: impl Into<String>, width: usize) -> Self {
        Self {
            key: key.into(),
            width: Some(width),
        }
    }
}

/// Raw input to `set_format`; every option beyond `fields` may be omitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub elastic_width: Option<bool>,
    #[serde(default)]
    pub positional_separator: Option<String>,
    #[serde(default)]
    pub other_separator: Option<String>,
}

impl FormatOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional field with the default width
    #[must_use]
    pub fn field(mut self, key: impl Into<String>) -> Self {
        self.fields.push(FieldSpec::new(key));
        self
    }

    /// Append a positional field with an explicit width
    #[must_use]
    pub fn field_width(mut self, key: impl Into<String>, width: usize) -> Self {
        self.fields.push(FieldSpec::with_width(key, width));
        self
    }

    /// Select the alignment algorithm
    #[must_use]
    pub fn elastic(mut self, elastic: bool) -> Self {
        self.elastic_width = Some(elastic);
        self
    }

    /// Set the separator between positional fields (non-elastic mode)
    #[must_use]
    pub fn positional_separator(mut self, separator: impl Into<String>) -> Self {
        self.positional_separator = Some(separator.into());
        self
    }

    /// Set the separator between trailing key=value pairs
    #[must_use]
    pub fn other_separator(mut self, separator: impl Into<String>) -> Self {
        self.other_separator = Some(separator.into());
        self
    }
}

/// A normalized positional field: key plus resolved column width
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatField {
    pub key: String,
    pub width: usize,
}

/// Normalized, immutable-per-generation formatting configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    fields: Vec<FormatField>,
    field_keys: HashSet<String>,
    elastic_width: bool,
    positional_separator: String,
    other_separator: String,
}

impl FormatConfig {
    /// Validate and normalize raw options into a config
    ///
    /// Width rules: the `muid` field is raised to at least
    /// [`MIN_MUID_WIDTH`]; any other unset width becomes
    /// [`DEFAULT_FIELD_WIDTH`]. Elastic mode defaults to on, separators to
    /// tab and space.
    pub fn from_options(options: FormatOptions) -> Result<Self> {
        let mut fields = Vec::with_capacity(options.fields.len());
        let mut field_keys = HashSet::with_capacity(options.fields.len());
        for spec in options.fields {
            if spec.key.is_empty() {
                return Err(MessageError::config("field key must not be empty"));
            }
            let width = if spec.key == MUID_KEY {
                spec.width.unwrap_or(0).max(MIN_MUID_WIDTH)
            } else {
                spec.width.unwrap_or(DEFAULT_FIELD_WIDTH)
            };
            field_keys.insert(spec.key.clone());
            fields.push(FormatField {
                key: spec.key,
                width,
            });
        }

        Ok(Self {
            fields,
            field_keys,
            elastic_width: options.elastic_width.unwrap_or(true),
            positional_separator: options
                .positional_separator
                .unwrap_or_else(|| DEFAULT_POSITIONAL_SEPARATOR.to_string()),
            other_separator: options
                .other_separator
                .unwrap_or_else(|| DEFAULT_OTHER_SEPARATOR.to_string()),
        })
    }

    /// Positional fields in print order
    pub fn fields(&self) -> &[FormatField] {
        &self.fields
    }

    /// Whether `key` is a declared positional field
    pub fn is_positional(&self, key: &str) -> bool {
        self.field_keys.contains(key)
    }

    pub fn elastic_width(&self) -> bool {
        self.elastic_width
    }

    pub fn positional_separator(&self) -> &str {
        &self.positional_separator
    }

    pub fn other_separator(&self) -> &str {
        &self.other_separator
    }

    /// Wrap in an Arc for sharing through the registry
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for FormatConfig {
    /// Process-start layout: muid(12), where(15), what(23), elastic on
    fn default() -> Self {
        let fields = vec![
            FormatField {
                key: MUID_KEY.to_string(),
                width: MIN_MUID_WIDTH,
            },
            FormatField {
                key: "where".to_string(),
                width: 15,
            },
            FormatField {
                key: "what".to_string(),
                width: 23,
            },
        ];
        let field_keys = fields.iter().map(|f| f.key.clone()).collect();
        Self {
            fields,
            field_keys,
            elastic_width: true,
            positional_separator: DEFAULT_POSITIONAL_SEPARATOR.to_string(),
            other_separator: DEFAULT_OTHER_SEPARATOR.to_string(),
        }
    }
}
