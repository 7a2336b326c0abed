//! Dotted instance paths.
//!
//! Every object in a dump is addressed by a dotted path rooted at [`ROOT`],
//! for example `Device.Firewall.Chain.3`. Instances are never materialized as
//! standalone structures; an [`InstancePath`] is only the prefix used to query
//! the [`AttributeMap`](crate::attributes::AttributeMap) for `prefix.Attr`.

use std::{borrow::Borrow, fmt};

/// Root token every assignment key and absolute reference starts with.
pub const ROOT: &str = "Device";

/// Path separator between segments.
pub const SEPARATOR: char = '.';

/// A dotted path naming an object or object instance.
///
/// The stored path never carries a trailing separator, so
/// `Device.IP.Interface.2.` and `Device.IP.Interface.2` are the same path.
///
/// # Examples
///
/// ```
/// # use dmviz_core::path::InstancePath;
/// let chains = InstancePath::new("Device.Firewall.Chain");
/// let chain = chains.instance(3);
///
/// assert_eq!(chain.as_str(), "Device.Firewall.Chain.3");
/// assert_eq!(chain.short(), "Firewall.Chain.3");
/// assert_eq!(chain.split_instance(), Some(("Device.Firewall.Chain", 3)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstancePath(String);

impl InstancePath {
    /// Creates a path, dropping surrounding whitespace and trailing separators.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(path.as_ref().trim().trim_end_matches(SEPARATOR).to_string())
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path of a named child object.
    pub fn child(&self, segment: &str) -> Self {
        Self::new(format!("{}{SEPARATOR}{segment}", self.0))
    }

    /// Returns the path of the numbered instance `id` below this object.
    pub fn instance(&self, id: u32) -> Self {
        Self(format!("{}{SEPARATOR}{id}", self.0))
    }

    /// Returns the path without its leading `Device.` root, for display.
    pub fn short(&self) -> &str {
        self.0
            .strip_prefix(ROOT)
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
            .unwrap_or(&self.0)
    }

    /// Splits an instance path into its object type prefix and numeric id.
    ///
    /// Returns `None` when the last segment is not a positive integer.
    pub fn split_instance(&self) -> Option<(&str, u32)> {
        let (prefix, last) = self.0.rsplit_once(SEPARATOR)?;
        parse_instance_id(last).map(|id| (prefix, id))
    }

    /// Returns `true` if the path starts with the [`ROOT`] token.
    pub fn is_rooted(&self) -> bool {
        is_rooted(&self.0)
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for InstancePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for InstancePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InstancePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for InstancePath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// Parses a positive decimal instance id.
///
/// Only plain ASCII digits are accepted; `0`, signs and whitespace are rejected.
pub fn parse_instance_id(segment: &str) -> Option<u32> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse::<u32>().ok().filter(|id| *id > 0)
}

/// Returns `true` if `text` is `Device` followed by a separator.
pub fn is_rooted(text: &str) -> bool {
    text.strip_prefix(ROOT)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_separator() {
        let path = InstancePath::new(" Device.IP.Interface.2. ");
        assert_eq!(path.as_str(), "Device.IP.Interface.2");
    }

    #[test]
    fn test_child_and_instance() {
        let firewall = InstancePath::new("Device.Firewall");
        let rule = firewall.child("Chain").instance(1).child("Rule").instance(4);
        assert_eq!(rule.as_str(), "Device.Firewall.Chain.1.Rule.4");
    }

    #[test]
    fn test_short_strips_root_only() {
        assert_eq!(InstancePath::new("Device.Logical.Interface.1").short(), "Logical.Interface.1");
        assert_eq!(InstancePath::new("DeviceInfo.X").short(), "DeviceInfo.X");
        assert_eq!(InstancePath::new("Other.Path").short(), "Other.Path");
    }

    #[test]
    fn test_split_instance() {
        let path = InstancePath::new("Device.Firewall.Level.2");
        assert_eq!(path.split_instance(), Some(("Device.Firewall.Level", 2)));
        assert_eq!(InstancePath::new("Device.Firewall").split_instance(), None);
        assert_eq!(InstancePath::new("Device.Firewall.Level.0").split_instance(), None);
    }

    #[test]
    fn test_parse_instance_id() {
        assert_eq!(parse_instance_id("12"), Some(12));
        assert_eq!(parse_instance_id("0"), None);
        assert_eq!(parse_instance_id("-1"), None);
        assert_eq!(parse_instance_id("+3"), None);
        assert_eq!(parse_instance_id(""), None);
        assert_eq!(parse_instance_id("1a"), None);
    }

    #[test]
    fn test_is_rooted() {
        assert!(is_rooted("Device.IP"));
        assert!(!is_rooted("Device"));
        assert!(!is_rooted("DeviceInfo.IP"));
        assert!(!is_rooted("WAN2LAN_medium"));
    }
}
