//! Sequence producers for the structviz choreography engine.
//!
//! Each module is one algorithm family: a logical structure snapshot, a
//! tagged enumeration of the operations the platform teaches against it,
//! and a producer implementing the shared
//! [`SequenceProducer`](structviz_choreo_core::SequenceProducer) capability.
//! Producers are pure and deterministic: the same snapshot and operation
//! always yield the identical sequence, so a timeline can be re-derived
//! byte-for-byte after a seek or a replay.

pub mod bst;
pub mod list;
pub mod snippets;
pub mod timing;

pub use bst::{BstNode, BstOperation, BstProducer, BstSnapshot, TraversalOrder};
pub use list::{ListOperation, ListProducer, ListSnapshot};
