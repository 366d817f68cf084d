//! Declared output schema for structured responses.
//!
//! A schema maps field names to declared type names. Only the key set is
//! checked against responses; type names are carried for prompting.
//!
//! ```rust
//! use swchat::Schema;
//!
//! let schema = Schema::new()
//!     .field("name", "str")
//!     .field("age", "int")
//!     .field("title", "str");
//!
//! assert_eq!(schema.len(), 3);
//! assert_eq!(schema.to_json(), r#"{"name":"str","age":"int","title":"str"}"#);
//! ```

use std::collections::BTreeSet;

use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<(String, String)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing the declared type in place if the name exists.
    pub fn field(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        let name = name.into();
        let type_name = type_name.into();

        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing_type)) => *existing_type = type_name,
            None => self.fields.push((name, type_name)),
        }

        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, type_name)| (name.as_str(), type_name.as_str()))
    }

    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, type_name)| type_name.as_str())
    }

    pub fn key_set(&self) -> BTreeSet<String> {
        self.fields.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Compact JSON object in declaration order.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl<K, V> FromIterator<(K, V)> for Schema
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Schema::new(), |schema, (name, type_name)| {
                schema.field(name, type_name)
            })
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, type_name) in &self.fields {
            map.serialize_entry(name, type_name)?;
        }
        map.end()
    }
}
