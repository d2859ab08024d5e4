//! Ordered configuration accumulators

use std::collections::BTreeMap;

/// "Set `key` to exactly `values`", recorded in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multimap {
    pub key: String,
    pub values: Vec<String>,
}

impl Multimap {
    pub fn new<K, I, V>(key: K, values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// A single `(key, value)` entry that never overrides earlier entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Apply overrides in order; the last entry for a key wins and other keys are kept.
pub fn apply_overrides(target: &mut BTreeMap<String, Vec<String>>, overrides: &[Multimap]) {
    for entry in overrides {
        target.insert(entry.key.clone(), entry.values.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_override_for_a_key_wins() {
        let mut target = BTreeMap::new();
        target.insert("keep".to_string(), vec!["1".to_string()]);

        apply_overrides(
            &mut target,
            &[
                Multimap::new("a", ["x", "y"]),
                Multimap::new("b", ["z"]),
                Multimap::new("a", ["w"]),
            ],
        );

        assert_eq!(target["a"], vec!["w"]);
        assert_eq!(target["b"], vec!["z"]);
        assert_eq!(target["keep"], vec!["1"]);
    }

    #[test]
    fn empty_values_are_retained_as_an_override() {
        let mut target = BTreeMap::new();
        apply_overrides(
            &mut target,
            &[Multimap::new("a", ["x"]), Multimap::new("a", Vec::<String>::new())],
        );
        assert!(target["a"].is_empty());
    }
}
