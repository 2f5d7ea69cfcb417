//! Merge settings as configuration.
//!
//! [`MergeSettings`] is the serde-facing form of the two multi-source
//! toggles, so they can sit in whatever configuration file an application
//! already reads. Fields that are left out keep their defaults.

use crate::mutation::Mutation;
use serde::{Deserialize, Serialize};

fn enabled() -> bool {
    true
}

/// Precedence and container-merge policy for multi-sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSettings {
    /// Earlier sources win scalar lookups (default: true).
    #[serde(default = "enabled")]
    pub first: bool,

    /// Sequences concatenate and maps union across sources (default: true).
    #[serde(default = "enabled")]
    pub combine: bool,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            first: true,
            combine: true,
        }
    }
}

impl MergeSettings {
    /// The mutation that applies these settings to every multi-source in a
    /// tree: precedence first, then merge policy.
    pub fn mutation(&self) -> Mutation {
        Mutation::set_first(self.first).then(Mutation::set_combine(self.combine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multi::MultiSource;
    use crate::testing::{leaf, map, s};
    use crate::{Source, SourceRef, path};
    use std::sync::Arc;

    #[test]
    fn test_defaults() {
        let settings = MergeSettings::default();
        assert!(settings.first);
        assert!(settings.combine);
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: MergeSettings = serde_json::from_str(r#"{"first": false}"#).unwrap();
        assert_eq!(
            settings,
            MergeSettings {
                first: false,
                combine: true
            }
        );
        let empty: MergeSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, MergeSettings::default());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&MergeSettings::default()).unwrap();
        insta::assert_snapshot!(json, @r#"{"first":true,"combine":true}"#);
    }

    #[test]
    fn test_mutation_applies_both() {
        let a = leaf(map(vec![("m", map(vec![("x", s("a"))]))]));
        let b = leaf(map(vec![("m", map(vec![("y", s("b"))]))]));
        let merged: SourceRef = Arc::new(MultiSource::new(vec![a, b]));

        let settings = MergeSettings {
            first: false,
            combine: false,
        };
        let configured = settings.mutation().apply(merged);
        assert_eq!(
            configured.as_multi_source().unwrap().settings(),
            settings
        );
        assert_eq!(configured.keys(&path!["m"]), Ok(vec!["y".to_string()]));
    }

    #[test]
    fn test_with_settings() {
        let m = MultiSource::new(vec![leaf(s("a")), leaf(s("b"))]);
        let settings = MergeSettings {
            first: false,
            combine: true,
        };
        let configured = m.with_settings(settings);
        assert_eq!(configured.get_string(&[]), Ok("b".to_string()));
        assert_eq!(m.get_string(&[]), Ok("a".to_string()));
    }
}
