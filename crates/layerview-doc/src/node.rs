//! Navigation over parsed document trees.
//!
//! [`DocNode`] is what a value tree has to provide for
//! [`Document`](crate::Document) to expose it as a
//! [`Source`](layerview::Source). It is implemented here for
//! `yaml_rust2::Yaml` and `serde_json::Value`.

use layerview::{NodeKind, Segment};
use std::fmt;
use yaml_rust2::Yaml;

/// One node of a parsed document.
pub trait DocNode: fmt::Debug + Send + Sync + 'static {
    /// Kind of this node. [`NodeKind::Undefined`] marks placeholders that do
    /// not count as values (such as unresolved YAML aliases).
    fn kind(&self) -> NodeKind;

    /// Child addressed by `segment`: a map field or a sequence position.
    fn child(&self, segment: &Segment) -> Option<&Self>;

    /// Field names in document order, if this is a map.
    fn keys(&self) -> Option<Vec<String>>;

    /// Number of elements or fields, if this is a sequence or map.
    fn len(&self) -> Option<usize>;

    fn as_bool(&self) -> Option<bool>;

    fn as_int(&self) -> Option<i64>;

    fn as_float(&self) -> Option<f64>;

    fn as_string(&self) -> Option<String>;
}

/// Textual form of a YAML map key, for keys that have one.
fn yaml_key(key: &Yaml) -> Option<String> {
    match key {
        Yaml::String(s) | Yaml::Real(s) => Some(s.clone()),
        Yaml::Integer(i) => Some(i.to_string()),
        Yaml::Boolean(b) => Some(b.to_string()),
        Yaml::Null => Some("null".to_string()),
        _ => None,
    }
}

impl DocNode for Yaml {
    fn kind(&self) -> NodeKind {
        match self {
            Yaml::Null => NodeKind::Null,
            Yaml::Boolean(_) => NodeKind::Bool,
            Yaml::Integer(_) => NodeKind::Int,
            Yaml::Real(_) => NodeKind::Float,
            Yaml::String(_) => NodeKind::String,
            Yaml::Array(_) => NodeKind::Sequence,
            Yaml::Hash(_) => NodeKind::Map,
            Yaml::Alias(_) | Yaml::BadValue => NodeKind::Undefined,
        }
    }

    fn child(&self, segment: &Segment) -> Option<&Self> {
        match self {
            Yaml::Array(items) => items.get(segment.as_index()?),
            Yaml::Hash(hash) => {
                let key = segment.as_key();
                hash.get(&Yaml::String(key.to_string())).or_else(|| {
                    // Non-string keys (`1: x`, `true: y`) match on their rendering.
                    hash.iter()
                        .find(|(k, _)| !matches!(k, Yaml::String(_)) && yaml_key(k).as_deref() == Some(&*key))
                        .map(|(_, v)| v)
                })
            }
            _ => None,
        }
    }

    fn keys(&self) -> Option<Vec<String>> {
        match self {
            Yaml::Hash(hash) => Some(hash.keys().filter_map(yaml_key).collect()),
            _ => None,
        }
    }

    fn len(&self) -> Option<usize> {
        match self {
            Yaml::Array(items) => Some(items.len()),
            Yaml::Hash(hash) => Some(hash.len()),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        Yaml::as_bool(self)
    }

    fn as_int(&self) -> Option<i64> {
        Yaml::as_i64(self)
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            Yaml::Real(_) => Yaml::as_f64(self),
            _ => None,
        }
    }

    fn as_string(&self) -> Option<String> {
        Yaml::as_str(self).map(str::to_string)
    }
}

impl DocNode for serde_json::Value {
    fn kind(&self) -> NodeKind {
        use serde_json::Value;
        match self {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Bool,
            Value::Number(n) if n.is_i64() => NodeKind::Int,
            Value::Number(_) => NodeKind::Float,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Sequence,
            Value::Object(_) => NodeKind::Map,
        }
    }

    fn child(&self, segment: &Segment) -> Option<&Self> {
        use serde_json::Value;
        match self {
            Value::Array(items) => items.get(segment.as_index()?),
            Value::Object(map) => map.get(segment.as_key().as_ref()),
            _ => None,
        }
    }

    fn keys(&self) -> Option<Vec<String>> {
        self.as_object().map(|map| map.keys().cloned().collect())
    }

    fn len(&self) -> Option<usize> {
        use serde_json::Value;
        match self {
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        serde_json::Value::as_bool(self)
    }

    fn as_int(&self) -> Option<i64> {
        serde_json::Value::as_i64(self)
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            serde_json::Value::Number(n) if !n.is_i64() => n.as_f64(),
            _ => None,
        }
    }

    fn as_string(&self) -> Option<String> {
        self.as_str().map(str::to_string)
    }
}
