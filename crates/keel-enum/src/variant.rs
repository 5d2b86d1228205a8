//! Enum structs - sealed catalogues of variants with field schemas
//!
//! A catalogue is declared once through [`EnumStructBuilder`] and sealed by
//! [`EnumStructBuilder::build`]. After that the set of variants and their
//! schemas cannot change.
//!
//! ```rust
//! use keel_enum::EnumStruct;
//! use serde_json::json;
//!
//! let moves = EnumStruct::builder("Move")
//!     .variant("Punch", json!({"damage": 5, "frames": {"startup": 3, "active": 2}}))
//!     .variant("Block", json!({}))
//!     .build()
//!     .unwrap();
//!
//! let heavy = moves.variant("Punch", json!({"frames": {"startup": 9}})).unwrap();
//! assert_eq!(heavy.get("damage"), Some(&json!(5)));
//! assert_eq!(heavy.get("frames"), Some(&json!({"startup": 9, "active": 2})));
//! assert!(moves.contains(&heavy).is_ok());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use keel_core::{HostError, KeelResult, Report};

use crate::error::CatalogueError;

/// Field name -> default value
pub type Schema = Map<String, Value>;

/// Instance of a variant: its tag plus field values
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnumVariant {
    tag: String,
    fields: Schema,
}

impl EnumVariant {
    /// Instance built outside a catalogue, e.g. decoded from save data.
    /// Validate it with [`EnumStruct::contains`].
    pub fn new(tag: impl Into<String>, fields: Schema) -> Self {
        EnumVariant {
            tag: tag.into(),
            fields,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    pub fn fields(&self) -> &Schema {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn into_fields(self) -> Schema {
        self.fields
    }
}

#[derive(Clone, Debug)]
struct VariantDecl {
    name: String,
    schema: Schema,
}

/// Sealed variant catalogue
#[derive(Clone, Debug)]
pub struct EnumStruct {
    name: String,
    variants: Vec<VariantDecl>,
}

impl EnumStruct {
    pub fn builder(name: impl Into<String>) -> EnumStructBuilder {
        EnumStructBuilder {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Variant names in declaration order
    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.name.as_str())
    }

    pub fn schema(&self, variant: &str) -> Option<&Schema> {
        self.find(variant).map(|decl| &decl.schema)
    }

    /// Instantiate a variant: schema defaults deep-merged with `overrides`.
    /// `overrides` must be a dictionary or null.
    pub fn variant(&self, name: &str, overrides: Value) -> KeelResult<EnumVariant> {
        let decl = self.find(name).ok_or_else(|| self.not_contained(name))?;

        let mut fields = decl.schema.clone();
        match overrides {
            Value::Object(overrides) => deep_merge(&mut fields, overrides),
            Value::Null => {}
            other => {
                return Err(Report::builder(HostError::InvalidParameter)
                    .msg("variant overrides must be a dictionary")
                    .info("variant", name)
                    .cause_value(other)
                    .build())
            }
        }

        Ok(EnumVariant {
            tag: decl.name.clone(),
            fields,
        })
    }

    /// Validate an instance against the catalogue, returning it unchanged
    pub fn contains<'a>(&self, instance: &'a EnumVariant) -> KeelResult<&'a EnumVariant> {
        let decl = self
            .find(&instance.tag)
            .ok_or_else(|| self.not_contained(&instance.tag))?;

        let missing: Vec<String> = decl
            .schema
            .keys()
            .filter(|field| !instance.fields.contains_key(field.as_str()))
            .cloned()
            .collect();

        if !missing.is_empty() {
            return Err(CatalogueError::MissingFields {
                catalogue: self.name.clone(),
                variant: decl.name.clone(),
                missing,
            }
            .into());
        }
        Ok(instance)
    }

    fn find(&self, name: &str) -> Option<&VariantDecl> {
        self.variants.iter().find(|decl| decl.name == name)
    }

    fn not_contained(&self, name: &str) -> Report {
        CatalogueError::NotContained {
            catalogue: self.name.clone(),
            variant: name.to_string(),
        }
        .into()
    }
}

/// Declaration phase of an [`EnumStruct`]
#[derive(Clone, Debug)]
#[must_use]
pub struct EnumStructBuilder {
    name: String,
    variants: Vec<(String, Value)>,
}

impl EnumStructBuilder {
    /// Declare a variant. `schema` must be a dictionary of field defaults.
    pub fn variant(mut self, name: impl Into<String>, schema: Value) -> Self {
        self.variants.push((name.into(), schema));
        self
    }

    /// Declare a variant without fields
    pub fn unit(self, name: impl Into<String>) -> Self {
        self.variant(name, Value::Object(Schema::new()))
    }

    /// Seal the catalogue
    pub fn build(self) -> Result<EnumStruct, CatalogueError> {
        if self.variants.is_empty() {
            return Err(CatalogueError::Empty(self.name));
        }

        let mut variants: Vec<VariantDecl> = Vec::with_capacity(self.variants.len());
        for (variant, schema) in self.variants {
            if variants.iter().any(|decl| decl.name == variant) {
                return Err(CatalogueError::DuplicateVariant {
                    catalogue: self.name,
                    variant,
                });
            }
            let schema = match schema {
                Value::Object(schema) => schema,
                _ => {
                    return Err(CatalogueError::InvalidSchema {
                        catalogue: self.name,
                        variant,
                    })
                }
            };
            variants.push(VariantDecl {
                name: variant,
                schema,
            });
        }

        Ok(EnumStruct {
            name: self.name,
            variants,
        })
    }
}

/// Merge `overrides` into `base`. Nested dictionaries merge recursively;
/// any other value replaces the base entry.
pub fn deep_merge(base: &mut Map<String, Value>, overrides: Map<String, Value>) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(inner)), Value::Object(nested)) => deep_merge(inner, nested),
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
