//! Dictionary enums - sealed name -> value catalogues

use serde_json::Value;

use keel_core::{KeelResult, Report};

use crate::error::CatalogueError;

/// Sealed mapping of variant names to host values
#[derive(Clone, Debug, PartialEq)]
pub struct EnumDict {
    name: String,
    entries: Vec<(String, Value)>,
}

impl EnumDict {
    pub fn builder(name: impl Into<String>) -> EnumDictBuilder {
        EnumDictBuilder {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// First key whose value equals `value`
    pub fn key_of(&self, value: &Value) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| v == value)
            .map(|(k, _)| k.as_str())
    }

    /// Value for `key`, or a `NOT_CONTAINED` report
    pub fn contains(&self, key: &str) -> KeelResult<&Value> {
        self.get(key).ok_or_else(|| {
            Report::from(CatalogueError::NotContained {
                catalogue: self.name.clone(),
                variant: key.to_string(),
            })
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Declaration phase of an [`EnumDict`]
#[derive(Clone, Debug)]
#[must_use]
pub struct EnumDictBuilder {
    name: String,
    entries: Vec<(String, Value)>,
}

impl EnumDictBuilder {
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Seal the catalogue
    pub fn build(self) -> Result<EnumDict, CatalogueError> {
        if self.entries.is_empty() {
            return Err(CatalogueError::Empty(self.name));
        }
        for (idx, (key, _)) in self.entries.iter().enumerate() {
            if self.entries[..idx].iter().any(|(k, _)| k == key) {
                return Err(CatalogueError::DuplicateVariant {
                    catalogue: self.name.clone(),
                    variant: key.clone(),
                });
            }
        }
        Ok(EnumDict {
            name: self.name,
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NOT_CONTAINED;
    use serde_json::json;

    fn elements() -> EnumDict {
        EnumDict::builder("Element")
            .entry("Fire", 1)
            .entry("Ice", 2)
            .entry("Volt", json!({"chain": 3}))
            .build()
            .unwrap()
    }

    #[test]
    fn test_lookup_both_ways() {
        let dict = elements();
        assert_eq!(dict.get("Ice"), Some(&json!(2)));
        assert_eq!(dict.key_of(&json!(1)), Some("Fire"));
        assert_eq!(dict.key_of(&json!({"chain": 3})), Some("Volt"));
        assert_eq!(dict.key_of(&json!(9)), None);
    }

    #[test]
    fn test_contains() {
        let dict = elements();
        assert_eq!(dict.contains("Fire").unwrap(), &json!(1));
        assert_eq!(dict.contains("Wind").unwrap_err().kind(), NOT_CONTAINED);
    }

    #[test]
    fn test_declaration_order_kept() {
        let dict = elements();
        let keys: Vec<_> = dict.keys().collect();
        assert_eq!(keys, vec!["Fire", "Ice", "Volt"]);
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let dup = EnumDict::builder("Element").entry("Fire", 1).entry("Fire", 2).build();
        assert!(matches!(dup, Err(CatalogueError::DuplicateVariant { .. })));
        assert!(EnumDict::builder("Element").build().is_err());
    }
}
