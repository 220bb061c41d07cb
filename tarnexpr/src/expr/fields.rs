use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Attempt to insert a field name that is already present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate field name `{name}`")]
pub struct DuplicateField {
    pub name: String,
}

/// Insertion-ordered mapping from unique field names to values.
///
/// Backs record values, record types, and union types. Order is the order
/// fields were inserted in; duplicate names are rejected at insertion, so a
/// constructed map is always well-formed. Lookup is linear — field lists in
/// configuration records are small.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> FieldMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a field, failing if the name is already taken.
    pub fn insert(&mut self, name: impl Into<String>, value: V) -> Result<(), DuplicateField> {
        let name = name.into();
        if self.contains(&name) {
            return Err(DuplicateField { name });
        }
        self.entries.push((name, value));
        Ok(())
    }

    /// Build a map from an entry sequence, preserving its order.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, V)>,
    ) -> Result<Self, DuplicateField> {
        let mut map = Self::new();
        for (name, value) in entries {
            map.insert(name, value)?;
        }
        Ok(map)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for FieldMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let mut map = FieldMap::new();
        map.insert("zeta", 1).unwrap();
        map.insert("alpha", 2).unwrap();
        map.insert("mu", 3).unwrap();
        let names: Vec<_> = map.names().collect();
        assert_eq!(names, ["zeta", "alpha", "mu"]);
        assert_eq!(map.get("alpha"), Some(&2));
        assert_eq!(map.get("nu"), None);
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut map = FieldMap::new();
        map.insert("a", 1).unwrap();
        assert_eq!(
            map.insert("a", 2),
            Err(DuplicateField {
                name: "a".to_owned()
            })
        );
        // The failed insert leaves the map untouched.
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&1));
    }
}
