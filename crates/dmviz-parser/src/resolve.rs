//! Reference resolution and recursive reference walks.
//!
//! References are resolved against an [`AttributeMap`] on demand. Nothing is
//! cached: every walk keeps its own visited set and drops it when finished.
//!
//! # Walks
//!
//! - [`walk`] follows a single-valued reference attribute (for example a
//!   chain's jump target) and yields instance paths lazily. When exhausted,
//!   [`Walk::outcome`] tells whether it reached a terminal instance, looped
//!   back to an instance it already visited, or hit an unresolvable token.
//! - [`walk_tree`] follows every token of a list-valued attribute such as
//!   `LowerLayers`, depth first. Cycles are detected per branch and emitted as
//!   [`TreeEntry::Cycle`] leaves. Every instance is expanded at most once per
//!   walk; later occurrences are [`TreeEntry::Shared`] leaves.
//!   [`walk_tree_with`] does the same with a custom [`Successors`] rule.

use std::collections::HashSet;

use log::debug;

use dmviz_core::{attributes::AttributeMap, path::InstancePath};

use crate::reference::{Reference, split_references};

/// Resolves one reference token to an instance path.
///
/// Absolute paths resolve to themselves. Ids and aliases are resolved
/// relative to `type_prefix`; with an empty prefix they do not resolve.
/// `Type.[Alias=='V']` predicates use their own type path.
pub fn resolve_reference(map: &AttributeMap, token: &str, type_prefix: &str) -> Option<InstancePath> {
    match Reference::parse(token)? {
        Reference::Path(path) => Some(InstancePath::new(path)),
        Reference::Predicate { type_path, alias } => map.find_instance_by_alias(type_path, alias),
        Reference::Id(id) if !type_prefix.is_empty() => Some(InstancePath::new(type_prefix).instance(id)),
        Reference::Alias(alias) if !type_prefix.is_empty() => {
            map.find_instance_by_alias(type_prefix, alias)
        }
        Reference::Id(_) | Reference::Alias(_) => None,
    }
}

/// The result of resolving one token of a reference list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The token names this instance.
    Resolved(InstancePath),
    /// The token names no instance; rendered with an unresolved marker.
    Unresolved(&'a str),
}

impl Resolution<'_> {
    /// Returns the resolved path, if any.
    pub fn path(&self) -> Option<&InstancePath> {
        match self {
            Self::Resolved(path) => Some(path),
            Self::Unresolved(_) => None,
        }
    }
}

/// Splits a raw reference list and resolves every token in order.
pub fn resolve_all<'a>(map: &AttributeMap, raw: &'a str, type_prefix: &str) -> Vec<Resolution<'a>> {
    split_references(raw)
        .into_iter()
        .map(|token| match resolve_reference(map, token, type_prefix) {
            Some(path) => Resolution::Resolved(path),
            None => Resolution::Unresolved(token),
        })
        .collect()
}

/// How a [`Walk`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    /// The last instance has no (or an empty) reference attribute.
    Terminal,
    /// The walk reached this already-visited instance again.
    Cycle(InstancePath),
    /// The last instance references this token, which resolves to nothing.
    Unresolved(String),
}

/// Lazy walk along a single-valued reference attribute.
///
/// Created by [`walk`]. Only the first token of a list-valued attribute is
/// followed. Each instance path is yielded at most once, so the walk always
/// terminates.
#[derive(Debug)]
pub struct Walk<'a> {
    map: &'a AttributeMap,
    attr: &'a str,
    type_prefix: &'a str,
    next: Option<InstancePath>,
    visited: HashSet<InstancePath>,
    outcome: Option<WalkOutcome>,
}

/// Starts a walk at `start` following `attr`, resolving ids and aliases against `type_prefix`.
///
/// # Examples
///
/// ```
/// # use dmviz_parser::{parse_str, resolve::walk, WalkOutcome};
/// let map = parse_str(
///     "Device.Firewall.Chain.1.Alias=a\n\
///      Device.Firewall.Chain.1.Jump=b\n\
///      Device.Firewall.Chain.2.Alias=b\n\
///      Device.Firewall.Chain.2.Jump=a\n",
/// );
/// let mut steps = walk(&map, "Device.Firewall.Chain.1".into(), "Jump", "Device.Firewall.Chain");
/// let visited: Vec<String> = steps.by_ref().map(|p| p.to_string()).collect();
///
/// assert_eq!(visited, ["Device.Firewall.Chain.1", "Device.Firewall.Chain.2"]);
/// assert_eq!(
///     steps.outcome(),
///     Some(&WalkOutcome::Cycle("Device.Firewall.Chain.1".into()))
/// );
/// ```
pub fn walk<'a>(
    map: &'a AttributeMap,
    start: InstancePath,
    attr: &'a str,
    type_prefix: &'a str,
) -> Walk<'a> {
    Walk {
        map,
        attr,
        type_prefix,
        next: Some(start),
        visited: HashSet::new(),
        outcome: None,
    }
}

impl Walk<'_> {
    /// Returns how the walk ended, or `None` while it is still in progress.
    pub fn outcome(&self) -> Option<&WalkOutcome> {
        self.outcome.as_ref()
    }

    /// Drains the walk, returning every visited path and the outcome.
    pub fn finish(mut self) -> (Vec<InstancePath>, WalkOutcome) {
        let steps: Vec<InstancePath> = self.by_ref().collect();
        (steps, self.outcome.unwrap_or(WalkOutcome::Terminal))
    }
}

impl Iterator for Walk<'_> {
    type Item = InstancePath;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if !self.visited.insert(current.clone()) {
            debug!(path = current.as_str(), attr = self.attr; "Reference cycle detected");
            self.outcome = Some(WalkOutcome::Cycle(current));
            return None;
        }

        let map = self.map;
        let token = map
            .get(&current, self.attr)
            .and_then(|raw| split_references(raw).into_iter().next());
        match token {
            None => self.outcome = Some(WalkOutcome::Terminal),
            Some(token) => match resolve_reference(map, token, self.type_prefix) {
                Some(next) => self.next = Some(next),
                None => self.outcome = Some(WalkOutcome::Unresolved(token.to_string())),
            },
        }
        Some(current)
    }
}

/// A node emitted by [`TreeWalk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEntry {
    /// An instance; its references follow as children at `depth + 1`.
    Instance(InstancePath),
    /// An instance already on the current branch; not expanded again.
    Cycle(InstancePath),
    /// An instance already expanded on another branch of this walk.
    Shared(InstancePath),
    /// A token that resolves to no instance.
    Unresolved(String),
}

impl From<Resolution<'_>> for TreeEntry {
    fn from(resolution: Resolution<'_>) -> Self {
        match resolution {
            Resolution::Resolved(path) => Self::Instance(path),
            Resolution::Unresolved(token) => Self::Unresolved(token.to_string()),
        }
    }
}

/// A [`TreeEntry`] with its distance from the walk's start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub depth: usize,
    pub entry: TreeEntry,
}

/// Produces the children of an instance during a [`TreeWalk`].
pub trait Successors {
    /// Returns the entries reachable from `path`, in display order.
    fn successors(&self, map: &AttributeMap, path: &InstancePath) -> Vec<TreeEntry>;
}

/// Follows every token of one list-valued reference attribute.
#[derive(Debug, Clone, Copy)]
pub struct FollowAttribute<'a> {
    attr: &'a str,
    type_prefix: &'a str,
}

impl<'a> FollowAttribute<'a> {
    pub fn new(attr: &'a str, type_prefix: &'a str) -> Self {
        Self { attr, type_prefix }
    }
}

impl Successors for FollowAttribute<'_> {
    fn successors(&self, map: &AttributeMap, path: &InstancePath) -> Vec<TreeEntry> {
        map.get(path, self.attr)
            .map(|raw| {
                resolve_all(map, raw, self.type_prefix)
                    .into_iter()
                    .map(TreeEntry::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Lazy depth-first walk over references.
///
/// Created by [`walk_tree`] or [`walk_tree_with`]. Nodes are emitted in
/// pre-order; children keep the order returned by the [`Successors`]. Each
/// instance is expanded at most once, so the number of nodes is bounded by
/// the number of references between distinct instances.
#[derive(Debug)]
pub struct TreeWalk<'a, S = FollowAttribute<'a>> {
    map: &'a AttributeMap,
    successors: S,
    stack: Vec<TreeNode>,
    branch: Vec<InstancePath>,
    expanded: HashSet<InstancePath>,
}

/// Starts a depth-first walk at `start` following every token of `attr`.
pub fn walk_tree<'a>(
    map: &'a AttributeMap,
    start: InstancePath,
    attr: &'a str,
    type_prefix: &'a str,
) -> TreeWalk<'a> {
    walk_tree_with(map, start, FollowAttribute::new(attr, type_prefix))
}

/// Starts a depth-first walk at `start` expanding instances with `successors`.
pub fn walk_tree_with<S: Successors>(map: &AttributeMap, start: InstancePath, successors: S) -> TreeWalk<'_, S> {
    TreeWalk {
        map,
        successors,
        stack: vec![TreeNode {
            depth: 0,
            entry: TreeEntry::Instance(start),
        }],
        branch: Vec::new(),
        expanded: HashSet::new(),
    }
}

impl<S: Successors> Iterator for TreeWalk<'_, S> {
    type Item = TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let TreeNode { depth, entry } = self.stack.pop()?;
        self.branch.truncate(depth);

        let path = match entry {
            TreeEntry::Instance(path) => path,
            leaf => return Some(TreeNode { depth, entry: leaf }),
        };
        if self.branch.contains(&path) {
            debug!(path = path.as_str(), depth; "Reference cycle detected");
            return Some(TreeNode {
                depth,
                entry: TreeEntry::Cycle(path),
            });
        }
        if !self.expanded.insert(path.clone()) {
            return Some(TreeNode {
                depth,
                entry: TreeEntry::Shared(path),
            });
        }

        let children = self.successors.successors(self.map, &path);
        self.stack
            .extend(children.into_iter().rev().map(|entry| TreeNode { depth: depth + 1, entry }));
        self.branch.push(path.clone());

        Some(TreeNode {
            depth,
            entry: TreeEntry::Instance(path),
        })
    }
}
