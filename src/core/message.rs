//! Ordered logging context
//!
//! A [`Message`] keeps key-value pairs in insertion order, renders them as a
//! single log line (positional columns first, then trailing key=value pairs),
//! and clones cheaply so a context can travel down a call stack. Keys
//! starting with `_` are context-only: retrievable and cloned, never
//! rendered.

use std::fmt;

use super::error::{MessageError, Result};
use super::field_value::FieldValue;
use super::format::{FormatConfig, MUID_KEY, RMUID_KEY};
use super::{muid, registry};

/// Ordered key-value logging context
///
/// Insertion order is preserved; setting an existing key overwrites the value
/// in place without moving the entry. Construction consults the process
/// registry and assigns `muid`/`rmuid` identifiers when the current format
/// declares those columns.
///
/// # Example
///
/// ```
/// use msgctx::prelude::*;
///
/// let mut ctx = Message::new();
/// ctx.set("where", "handle_request").set("what", "start");
/// let line = ctx.to_string();
/// assert!(line.contains("handle_request"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    entries: Vec<(String, FieldValue)>,
}

impl Default for Message {
    /// Empty message with no identifier assignment
    ///
    /// Unlike [`Message::new`], this never consults the process format, so
    /// no `muid`/`rmuid` entry is added. Use it when the registry must stay
    /// out of the picture, e.g. deterministic rendering tests.
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl Message {
    /// Empty message, identifiers assigned per the current format
    #[must_use]
    pub fn new() -> Self {
        let mut message = Self {
            entries: Vec::new(),
        };
        message.assign_identifiers();
        message
    }

    /// Build from an ordered sequence of entries
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, FieldValue)>,
    {
        let mut message = Self {
            entries: Vec::new(),
        };
        for (key, value) in entries {
            message.set(key, value);
        }
        message.assign_identifiers();
        message
    }

    /// Build from a flat key/value list: `[k1, v1, k2, v2, ...]`
    ///
    /// Keys are the positional coercion of the even-position values. Fails
    /// if the list has an odd number of items.
    pub fn from_values(values: &[FieldValue]) -> Result<Self> {
        let mut message = Self {
            entries: Vec::new(),
        };
        message.apply_pairs(values)?;
        message.assign_identifiers();
        Ok(message)
    }

    fn assign_identifiers(&mut self) {
        if registry::use_muid() && self.get(MUID_KEY).is_none() {
            self.set(MUID_KEY, muid::next_muid());
        }
        if registry::use_rmuid() && self.get(RMUID_KEY).is_none() {
            self.set(RMUID_KEY, muid::next_rmuid());
        }
    }

    fn apply_pairs(&mut self, values: &[FieldValue]) -> Result<()> {
        if values.len() % 2 != 0 {
            return Err(MessageError::argument_count(values.len()));
        }
        for pair in values.chunks_exact(2) {
            self.set(pair[0].to_string(), pair[1].clone());
        }
        Ok(())
    }

    /// Set one key; an existing key keeps its position
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Set multiple keys from a flat key/value list, chaining
    ///
    /// An empty list is a no-op; an odd-length list fails and leaves the
    /// message unchanged.
    pub fn setm(&mut self, values: &[FieldValue]) -> Result<&mut Self> {
        self.apply_pairs(values)?;
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Independent copy plus extra pairs from a flat key/value list
    ///
    /// The copy owns its own entry table; later mutation of either side
    /// never shows through the other. Goes through construction, so a
    /// missing identifier is assigned when the current format asks for one.
    pub fn clone_with(&self, values: &[FieldValue]) -> Result<Self> {
        let mut clone = Self::from_entries(self.entries.iter().cloned());
        clone.apply_pairs(values)?;
        Ok(clone)
    }

    /// Render against an explicit config
    ///
    /// Positional columns first (aligned per the config), then trailing
    /// key=value pairs, skipping `_`-prefixed keys, the identifier keys,
    /// declared positional keys, and null values. Never fails.
    #[must_use]
    pub fn render(&self, config: &FormatConfig) -> String {
        let mut out = String::new();
        let fields = config.fields();

        // Carry-over padding owed to earlier short columns
        let mut free = 0usize;
        for (index, field) in fields.iter().enumerate() {
            let value = match self.get(&field.key) {
                Some(value) if !value.is_null() => value.to_string(),
                _ => String::new(),
            };
            if config.elastic_width() {
                let len = value.chars().count();
                if len < field.width {
                    out.push_str(&" ".repeat(free));
                    free = field.width - len;
                } else {
                    // Overflow (or exact fit) eats the carry, one space min
                    if index > 0 {
                        let pad = (free + field.width).saturating_sub(len).max(1);
                        out.push_str(&" ".repeat(pad));
                    }
                    free = 0;
                }
                out.push_str(&value);
            } else {
                out.push_str(&value);
                out.push_str(config.positional_separator());
            }
        }

        if !fields.is_empty() && config.elastic_width() {
            if free > 0 {
                out.push_str(&" ".repeat(free));
            } else {
                out.push_str(config.other_separator());
            }
        }

        let mut separator = "";
        for (key, value) in &self.entries {
            if key.starts_with('_')
                || key == MUID_KEY
                || key == RMUID_KEY
                || config.is_positional(key)
                || value.is_null()
            {
                continue;
            }
            out.push_str(separator);
            out.push_str(key);
            out.push('=');
            out.push_str(&value.render_json());
            separator = config.other_separator();
        }

        out
    }
}

impl fmt::Display for Message {
    /// Renders against the format current at call time, not at construction
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(&registry::current()))
    }
}

impl FromIterator<(String, FieldValue)> for Message {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::FormatOptions;
    use crate::core::registry::TEST_LOCK;
    use serde_json::json;

    fn fv(value: impl Into<FieldValue>) -> FieldValue {
        value.into()
    }

    fn elastic_ab() -> FormatConfig {
        FormatConfig::from_options(
            FormatOptions::new().field_width("a", 3).field_width("b", 3),
        )
        .unwrap()
    }

    #[test]
    fn test_set_keeps_position_on_overwrite() {
        let mut m = Message::default();
        m.set("a", 1).set("b", 2).set("a", 3);

        let keys: Vec<_> = m.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(m.get("a"), Some(&FieldValue::Int(3)));
    }

    #[test]
    fn test_setm_odd_count_fails_and_leaves_unchanged() {
        let mut m = Message::default();
        m.set("a", 1);

        let err = m.setm(&[fv("b"), fv(2), fv("c")]).unwrap_err();
        assert!(matches!(
            err,
            MessageError::InvalidArgumentCount { count: 3 }
        ));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_setm_empty_is_noop() {
        let mut m = Message::default();
        m.setm(&[]).unwrap();
        assert!(m.is_empty());
    }

    #[test]
    fn test_from_values_duplicate_keeps_first_position() {
        let m =
            Message::from_values(&[fv("a"), fv(1), fv("b"), fv(2), fv("a"), fv(9)]).unwrap();
        let keys: Vec<_> = m
            .iter()
            .filter(|(k, _)| !k.starts_with("muid") && !k.starts_with("rmuid"))
            .map(|(k, _)| k.to_string())
            .collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(m.get("a"), Some(&FieldValue::Int(9)));
    }

    #[test]
    fn test_elastic_alignment() {
        let config = elastic_ab();
        let mut m =
            Message::from_values(&[fv("a"), fv(1), fv("b"), fv("123"), fv("c"), fv(0)])
                .unwrap();

        assert_eq!(m.render(&config), "1  123 c=0");

        m.set("b", "1234");
        assert_eq!(m.render(&config), "1 1234 c=0");
    }

    #[test]
    fn test_non_elastic_alignment() {
        let config = FormatConfig::from_options(
            FormatOptions::new()
                .field_width("a", 3)
                .field_width("b", 3)
                .elastic(false),
        )
        .unwrap();
        let m = Message::from_values(&[
            fv("a"),
            fv(1),
            fv("b"),
            fv("123"),
            fv("c"),
            fv(0),
            fv("d"),
            fv(1),
        ])
        .unwrap();

        assert_eq!(m.render(&config), "1\t123\tc=0 d=1");
    }

    #[test]
    fn test_underscore_keys_hidden_but_retrievable() {
        let config = elastic_ab();
        let m = Message::from_values(&[
            fv("a"),
            fv(1),
            fv("b"),
            fv(json!({"bar": "foo"})),
            fv("c"),
            fv(json!({"cat": "meow"})),
            fv("_p"),
            fv(3.14),
        ])
        .unwrap();

        let rendered = m.render(&config);
        assert!(!rendered.contains("_p"));
        assert!(!rendered.contains("3.14"));
        assert_eq!(m.get("_p"), Some(&FieldValue::Float(3.14)));
        assert!(rendered.contains(r#"c={"cat":"meow"}"#));
    }

    #[test]
    fn test_null_values_skipped_in_trailing() {
        let config = elastic_ab();
        let m = Message::from_values(&[fv("c"), FieldValue::Null, fv("d"), fv(1)]).unwrap();
        let rendered = m.render(&config);
        assert!(!rendered.contains("c="));
        assert!(rendered.contains("d=1"));
    }

    #[test]
    fn test_error_value_renders_trace() {
        let config = elastic_ab();
        let m = Message::from_values(&[
            fv("result"),
            fv(crate::core::ErrorTrace::new("sample error")),
        ])
        .unwrap();

        assert!(m.render(&config).contains("result=Error: sample error"));
    }

    #[test]
    fn test_missing_positional_renders_empty_column() {
        let config = elastic_ab();
        let m = Message::from_values(&[fv("b"), fv("x")]).unwrap();
        // a column renders as three pad spaces before b's value
        assert_eq!(m.render(&config), "   x  ");
    }

    #[test]
    fn test_clone_independence() {
        let _guard = TEST_LOCK.lock();
        registry::set_format(FormatOptions::new().field_width("where", 10)).unwrap();

        let mut m1 = Message::from_values(&[fv("a"), fv(1)]).unwrap();
        let mut m2 = m1.clone_with(&[]).unwrap();

        assert_eq!(m2.get("a"), Some(&FieldValue::Int(1)));
        m1.set("a", 2);
        assert_eq!(m2.get("a"), Some(&FieldValue::Int(1)));
        m2.set("a", 3);
        assert_eq!(m1.get("a"), Some(&FieldValue::Int(2)));

        m1.set("b", 4);
        assert_eq!(m2.get("b"), None);
        m2.set("c", 5);
        assert_eq!(m1.get("c"), None);

        let m3 = m1.clone_with(&[fv("d"), fv(5), fv("e"), fv(6)]).unwrap();
        assert_eq!(m1.get("d"), None);
        assert_eq!(m3.get("d"), Some(&FieldValue::Int(5)));
        assert_eq!(m1.get("e"), None);
        assert_eq!(m3.get("e"), Some(&FieldValue::Int(6)));

        registry::reset_default();
    }

    #[test]
    fn test_clone_with_odd_count_fails() {
        let m = Message::default();
        assert!(matches!(
            m.clone_with(&[fv("a")]),
            Err(MessageError::InvalidArgumentCount { count: 1 })
        ));
    }

    #[test]
    fn test_muid_assignment_and_pattern() {
        let _guard = TEST_LOCK.lock();
        registry::set_format(
            FormatOptions::new()
                .field("muid")
                .field_width("a", 3)
                .field_width("b", 15),
        )
        .unwrap();

        let m = Message::from_values(&[fv("a"), fv(1), fv("b"), fv(json!({"bar": "foo"}))])
            .unwrap();
        let rendered = m.to_string();

        assert!(rendered.starts_with("muid"));
        let digits: String = rendered["muid".len()..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        assert!(!digits.is_empty());

        // Positional-only: never repeated in the trailing section
        assert_eq!(rendered.matches("muid").count(), 1);

        registry::reset_default();
    }

    #[test]
    fn test_default_skips_identifier_assignment() {
        let _guard = TEST_LOCK.lock();
        registry::set_format(FormatOptions::new().field("muid").field("rmuid")).unwrap();

        let bare = Message::default();
        assert!(bare.is_empty());
        assert!(!bare.contains_key("muid"));
        assert!(!bare.contains_key("rmuid"));

        let constructed = Message::new();
        assert!(constructed.contains_key("muid"));
        assert!(constructed.contains_key("rmuid"));

        registry::reset_default();
    }

    #[test]
    fn test_existing_muid_not_replaced() {
        let _guard = TEST_LOCK.lock();
        registry::set_format(FormatOptions::new().field("muid")).unwrap();

        let m = Message::from_values(&[fv("muid"), fv("muid000042")]).unwrap();
        assert_eq!(
            m.get("muid"),
            Some(&FieldValue::String("muid000042".to_string()))
        );

        registry::reset_default();
    }

    #[test]
    fn test_display_uses_format_current_at_call_time() {
        let _guard = TEST_LOCK.lock();

        registry::set_format(FormatOptions::new().field_width("a", 3)).unwrap();
        let m = Message::from_values(&[fv("a"), fv("x")]).unwrap();
        assert_eq!(m.to_string(), "x  ");

        registry::set_format(FormatOptions::new().field_width("a", 5)).unwrap();
        assert_eq!(m.to_string(), "x    ");

        registry::reset_default();
    }
}
