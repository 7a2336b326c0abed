//! Parser and reference resolver for flat TR-181 dumps.
//!
//! The pipeline has two stages:
//!
//! 1. [`line`] turns raw `Device.Path.Attr=value` lines into an
//!    [`AttributeMap`](dmviz_core::attributes::AttributeMap), silently skipping
//!    anything that is not an assignment.
//! 2. [`resolve`] maps reference values (ids, aliases, absolute paths and
//!    `Type.[Alias=='X']` predicates, tokenized by [`reference`]) to instance
//!    paths and follows chains of references with cycle detection.
//!
//! # Example
//!
//! ```
//! use dmviz_parser::{parse_str, resolve::resolve_reference};
//!
//! let map = parse_str(r#"
//! Device.Firewall.Chain.1.Alias="WAN2LAN_medium"
//! Device.Firewall.Level.2.Chain="WAN2LAN_medium,"
//! "#);
//!
//! let chain = resolve_reference(&map, "WAN2LAN_medium", "Device.Firewall.Chain");
//! assert_eq!(chain.unwrap().as_str(), "Device.Firewall.Chain.1");
//! ```

pub mod line;
pub mod reference;
pub mod resolve;

pub use line::{DumpParser, ParseStats, parse_reader, parse_str};
pub use reference::{Reference, split_references};
pub use resolve::{FollowAttribute, Resolution, Successors, TreeEntry, TreeNode, TreeWalk, Walk, WalkOutcome};
