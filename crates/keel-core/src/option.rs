//! Option extensions
//!
//! `Option<T>` itself is the presence/absence container. This module adds the
//! host-facing pieces: loud unwrapping, the tagged dictionary form, and
//! bounds-safe lookups.
//!
//! Dictionary form: exactly one of
//! - `{"Some": <value>}`
//! - `{"None": <any>}`

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::kind::{ErrorKind, HostError};
use crate::report::Report;
use crate::KeelResult;

pub const SOME_KEY: &str = "Some";
pub const NONE_KEY: &str = "None";

/// Malformed dictionary form
#[derive(Error, Debug)]
pub enum DictFormError {
    #[error("expected a dictionary, got {0}")]
    NotADictionary(&'static str),

    #[error("both `Some` and `None` tags present")]
    BothTags,

    #[error("neither `Some` nor `None` tag present")]
    NoTag,

    #[error("unexpected keys: {0:?}")]
    ExtraKeys(Vec<String>),

    #[error("payload does not match the target type: {0}")]
    Payload(#[from] serde_json::Error),
}

impl DictFormError {
    /// Short machine-readable tag for the failure
    pub fn reason(&self) -> &'static str {
        match self {
            DictFormError::NotADictionary(_) => "not_a_dictionary",
            DictFormError::BothTags => "both_tags",
            DictFormError::NoTag => "no_tag",
            DictFormError::ExtraKeys(_) => "extra_keys",
            DictFormError::Payload(_) => "payload",
        }
    }
}

impl From<DictFormError> for Report {
    fn from(err: DictFormError) -> Self {
        let builder = Report::builder(HostError::InvalidData)
            .msg(err.to_string())
            .info("reason", err.reason());
        match err {
            DictFormError::NotADictionary(found) => builder.info("found", found),
            DictFormError::ExtraKeys(keys) => builder.info("keys", keys),
            _ => builder,
        }
        .build()
    }
}

pub trait OptionExt<T> {
    /// Unwrap, terminating with a warning on `None`. Prototype use only.
    fn fatal_unwrap(self) -> T;

    /// Encode as the tagged dictionary form
    fn to_dict(&self) -> KeelResult<Value>
    where
        T: Serialize;

    /// Convert absence into a report of the given kind
    fn ok_or_report(self, kind: impl Into<ErrorKind>) -> KeelResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    #[track_caller]
    fn fatal_unwrap(self) -> T {
        match self {
            Some(value) => value,
            None => {
                tracing::warn!("fatal_unwrap on None; handle absence with unwrap_or or a match");
                panic!("called `fatal_unwrap` on a `None` value")
            }
        }
    }

    fn to_dict(&self) -> KeelResult<Value>
    where
        T: Serialize,
    {
        let mut map = Map::with_capacity(1);
        match self {
            Some(value) => {
                let encoded = serde_json::to_value(value).map_err(DictFormError::Payload)?;
                map.insert(SOME_KEY.to_string(), encoded);
            }
            None => {
                map.insert(NONE_KEY.to_string(), Value::Bool(true));
            }
        }
        Ok(Value::Object(map))
    }

    fn ok_or_report(self, kind: impl Into<ErrorKind>) -> KeelResult<T> {
        self.ok_or_else(|| Report::new(kind))
    }
}

/// Decode the tagged dictionary form
pub fn from_dict<T: DeserializeOwned>(value: &Value) -> KeelResult<Option<T>> {
    let map = value
        .as_object()
        .ok_or_else(|| DictFormError::NotADictionary(value_type_name(value)))?;

    let has_some = map.contains_key(SOME_KEY);
    let has_none = map.contains_key(NONE_KEY);
    match (has_some, has_none) {
        (true, true) => return Err(DictFormError::BothTags.into()),
        (false, false) => return Err(DictFormError::NoTag.into()),
        _ => {}
    }

    let extra: Vec<String> = map
        .keys()
        .filter(|k| k.as_str() != SOME_KEY && k.as_str() != NONE_KEY)
        .cloned()
        .collect();
    if !extra.is_empty() {
        return Err(DictFormError::ExtraKeys(extra).into());
    }

    match map.get(SOME_KEY) {
        Some(payload) => {
            let decoded = T::deserialize(payload).map_err(DictFormError::Payload)?;
            Ok(Some(decoded))
        }
        None => Ok(None),
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "dictionary",
    }
}

/// Bounds-safe indexing; negative indices count from the end
pub fn arr_get<T>(seq: &[T], idx: isize) -> Option<&T> {
    let resolved = if idx < 0 {
        idx.checked_add(seq.len() as isize)?
    } else {
        idx
    };
    usize::try_from(resolved).ok().and_then(|i| seq.get(i))
}

/// Map-like containers that can be probed without panicking
pub trait Lookup<Q: ?Sized, V> {
    fn lookup(&self, key: &Q) -> Option<&V>;
}

impl<Q, K, V, S> Lookup<Q, V> for HashMap<K, V, S>
where
    K: Borrow<Q> + Hash + Eq,
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

impl<Q, K, V> Lookup<Q, V> for BTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    fn lookup(&self, key: &Q) -> Option<&V> {
        self.get(key)
    }
}

impl Lookup<str, Value> for Map<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl Lookup<str, Value> for Value {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

/// Missing-key-safe lookup
pub fn dict_get<'a, M, Q, V>(map: &'a M, key: &Q) -> Option<&'a V>
where
    M: Lookup<Q, V> + ?Sized,
    Q: ?Sized,
{
    map.lookup(key)
}
