pub mod dom_utils;
pub mod head;
pub mod traverse;
pub mod vnode;

mod types;

pub use crate::types::{Id, Node, NodeId};
pub use crate::vnode::{Props, VNode, map_elements};
