//! dmviz Core Types and Definitions
//!
//! This crate provides the foundational types shared by every dmviz
//! visualizer. It includes:
//!
//! - **Paths**: Dotted instance paths such as `Device.Firewall.Chain.3` ([`path::InstancePath`])
//! - **Attributes**: The flat attribute map built from a dump and its read-only accessors ([`attributes::AttributeMap`])
//! - **Draw**: Width-adaptive text rendering primitives ([`draw`] module)

pub mod attributes;
pub mod draw;
pub mod path;
