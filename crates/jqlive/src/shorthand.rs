//! Shorthand aliases and filter expansion.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, CoreResult};

/// Root selector of the filter engine's query language.
pub const ROOT_SELECTOR: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shorthand {
    pub name: String,
    pub expression: String,
}

/// Ordered shorthand name to expression mapping with unique names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorthandTable {
    entries: Vec<Shorthand>,
}

impl ShorthandTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_entries<I>(entries: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = Shorthand>,
    {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry.name, entry.expression)?;
        }
        Ok(table)
    }

    /// Appends a shorthand. Names must be unique.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        expression: impl Into<String>,
    ) -> CoreResult<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(CoreError::InvalidConfig(format!(
                "duplicate shorthand: {name}"
            )));
        }
        self.entries.push(Shorthand {
            name,
            expression: expression.into(),
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.expression.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Shorthand> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ShorthandTable {
    fn default() -> Self {
        let entries = [
            ("keys", "keys[]"),
            ("length", "length"),
            ("type", "type"),
            ("paths", "[paths | map(tostring) | join(\".\")]"),
            ("entries", "to_entries"),
        ];
        Self {
            entries: entries
                .into_iter()
                .map(|(name, expression)| Shorthand {
                    name: name.to_string(),
                    expression: expression.to_string(),
                })
                .collect(),
        }
    }
}

impl Serialize for ShorthandTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ShorthandTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<Shorthand>::deserialize(deserializer)?;
        ShorthandTable::from_entries(entries).map_err(serde::de::Error::custom)
    }
}

/// Turns user input into a full filter expression.
///
/// A shorthand name wins over every other reading of the input, even when the
/// input would also be a valid filter on its own.
pub fn expand(input: &str, table: &ShorthandTable) -> String {
    if let Some(expression) = table.get(input) {
        return expression.to_string();
    }
    if input.starts_with(ROOT_SELECTOR) {
        return input.to_string();
    }
    format!("{ROOT_SELECTOR}{input}")
}
