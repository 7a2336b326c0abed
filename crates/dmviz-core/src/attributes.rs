//! The flat attribute map built from a dump, and its read-only accessors.
//!
//! An [`AttributeMap`] maps a full dotted path such as
//! `Device.Firewall.Chain.1.Name` to its unquoted string value. It is the
//! single source of truth for a run: instance lists, alias lookups and
//! reference graphs are derived views recomputed on demand.
//!
//! # Overview
//!
//! - [`AttributeMap::get`] - attribute lookup under an instance path, tolerating a doubled separator
//! - [`AttributeMap::find_instance_by_alias`] - `Object.[Alias=='X']` lookup by linear scan
//! - [`AttributeMap::list_instance_ids`] - sorted distinct instance ids of an object type
//!
//! # Example
//!
//! ```
//! # use dmviz_core::attributes::AttributeMap;
//! let map: AttributeMap = [
//!     ("Device.Firewall.Level.2.Alias", "Medium"),
//!     ("Device.Firewall.Level.2..Name", "medium"),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(map.get("Device.Firewall.Level.2", "Name"), Some("medium"));
//! let level = map.find_instance_by_alias("Device.Firewall.Level", "Medium");
//! assert_eq!(level.unwrap().as_str(), "Device.Firewall.Level.2");
//! ```

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::path::{InstancePath, SEPARATOR, parse_instance_id};

/// Name of the per-instance alias attribute.
pub const ALIAS: &str = "Alias";

/// Mapping from full dotted path to string value.
///
/// Keys iterate in first-insertion order. Re-inserting an existing key
/// replaces its value but keeps its position, so "first match" scans are
/// defined by the order keys first appeared in the dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: IndexMap<String, String>,
}

impl AttributeMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an assignment, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the value stored under an exact key.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns `true` if an exact key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no assignments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Looks up `attr` under `instance`.
    ///
    /// Candidates are tried in order: `instance.attr`, then `instance..attr`.
    /// A trailing separator on `instance` is ignored. Absence is not an error.
    pub fn get(&self, instance: impl AsRef<str>, attr: &str) -> Option<&str> {
        let instance = instance.as_ref().trim_end_matches(SEPARATOR);
        candidate_keys(instance, attr)
            .iter()
            .find_map(|key| self.value(key))
    }

    /// Same as [`get`](Self::get) but treats an empty or whitespace-only value as absent.
    pub fn get_non_empty(&self, instance: impl AsRef<str>, attr: &str) -> Option<&str> {
        self.get(instance, attr).filter(|value| !value.trim().is_empty())
    }

    /// Finds the first instance of `type_prefix` whose `Alias` equals `alias`.
    ///
    /// Scans every key shaped `type_prefix.N.Alias` (or `type_prefix.N..Alias`)
    /// in map order and compares trimmed values for exact equality. Aliases
    /// are not required to be unique; the first match wins.
    pub fn find_instance_by_alias(&self, type_prefix: &str, alias: &str) -> Option<InstancePath> {
        let type_prefix = type_prefix.trim_end_matches(SEPARATOR);
        let alias = alias.trim();

        self.iter().find_map(|(key, value)| {
            let (id, rest) = split_instance_key(key, type_prefix)?;
            let is_alias_key = rest == ALIAS || rest.strip_prefix(SEPARATOR) == Some(ALIAS);
            (is_alias_key && value.trim() == alias).then(|| InstancePath::new(type_prefix).instance(id))
        })
    }

    /// Returns the sorted distinct ids `N` of keys shaped `type_prefix.N.<anything>`.
    pub fn list_instance_ids(&self, type_prefix: &str) -> BTreeSet<u32> {
        let type_prefix = type_prefix.trim_end_matches(SEPARATOR);
        self.entries
            .keys()
            .filter_map(|key| split_instance_key(key, type_prefix).map(|(id, _)| id))
            .collect()
    }

    /// Returns the instance paths of `type_prefix` in ascending id order.
    pub fn instances(&self, type_prefix: &str) -> Vec<InstancePath> {
        let base = InstancePath::new(type_prefix);
        self.list_instance_ids(type_prefix)
            .into_iter()
            .map(|id| base.instance(id))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for AttributeMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Ordered lookup candidates for an attribute under an instance path.
fn candidate_keys(instance: &str, attr: &str) -> [String; 2] {
    [
        format!("{instance}{SEPARATOR}{attr}"),
        format!("{instance}{SEPARATOR}{SEPARATOR}{attr}"),
    ]
}

/// Splits `type_prefix.N.rest` into `(N, rest)`. `rest` must be non-empty.
fn split_instance_key<'k>(key: &'k str, type_prefix: &str) -> Option<(u32, &'k str)> {
    let tail = key.strip_prefix(type_prefix)?.strip_prefix(SEPARATOR)?;
    let (id, rest) = tail.split_once(SEPARATOR)?;
    if rest.is_empty() {
        return None;
    }
    parse_instance_id(id).map(|id| (id, rest))
}
