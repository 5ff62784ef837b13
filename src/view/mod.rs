//! Rendering-target abstraction and the in-memory reference backend

mod memory;
mod tree;

pub use memory::MemoryViewTree;
pub use tree::{
    ChangeStream, ElementBounds, RevealPosition, ViewChange, ViewElement, ViewTree, Viewport,
};
