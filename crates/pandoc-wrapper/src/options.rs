//! Ordered pandoc command-line options.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::formats;

/// Option key holding the input format.
pub const FROM: &str = "from";
/// Option key holding the output format.
pub const TO: &str = "to";

/// Ordered mapping of long option names (without leading dashes) to an
/// optional value. A `None` value renders as a bare `--key` flag.
///
/// Re-inserting a key replaces its value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionOptions {
    entries: IndexMap<String, Option<String>>,
}

impl ConversionOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the `{from, to}` pair used by a plain conversion.
    pub fn conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new().with(FROM, from).with(TO, to)
    }

    /// Builder: add `--key=value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    /// Builder: add a bare `--key` flag.
    pub fn flag(mut self, key: impl Into<String>) -> Self {
        self.insert(key, None);
        self
    }

    /// Insert or replace an option, returning the previous entry if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: Option<String>,
    ) -> Option<Option<String>> {
        self.entries.insert(key.into(), value)
    }

    /// Look up an option. `Some(None)` means the key is present as a flag.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(|v| v.as_deref())
    }

    /// The value of `key`, if present and not a bare flag.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).flatten()
    }

    /// Whether the key is present, as a flag or with a value.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The requested input format.
    pub fn from_format(&self) -> Option<&str> {
        self.value(FROM)
    }

    /// The requested output format.
    pub fn to_format(&self) -> Option<&str> {
        self.value(TO)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the options as pandoc arguments, in insertion order.
    ///
    /// When `to` names a binary format, `-o <output_path>` is emitted right
    /// before the `--to` argument. The trailing input path is not included.
    pub fn command_arguments(&self, output_path: &Path) -> Vec<String> {
        let mut args = Vec::with_capacity(self.entries.len() + 2);

        for (key, value) in self.iter() {
            if key == TO && value.is_some_and(formats::is_binary_output_format) {
                args.push("-o".to_string());
                args.push(output_path.to_string_lossy().to_string());
            }

            match value {
                None => args.push(format!("--{key}")),
                Some(v) => args.push(format!("--{key}={v}")),
            }
        }

        args
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for ConversionOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let mut options = Self::new();
        for (key, value) in iter {
            options.insert(key, value.map(Into::into));
        }
        options
    }
}
