//! # Stack Locator
//!
//! Finds the one screen the user is actually looking at by descending from
//! the window root through containers:
//!
//! ```text
//! window root
//!   └─ Stack ──► presented modal, else top entry
//!   └─ Tabs  ──► selected child
//!   └─ any   ──► presented modal
//!   └─ leaf  ──► visible
//! ```
//!
//! Pure read. The answer can be stale by the time a caller acts on it.

use log::error;

use crate::core::hierarchy::{Hierarchy, NodeKind, ScreenNode};
use crate::core::screen::ScreenId;

/// Which way the descent goes from one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    StackContainer(ScreenId),
    TabContainer(ScreenId),
    ModalLayer(ScreenId),
    LeafScreen,
}

/// The descent rule for a single node.
pub fn descent(node: &ScreenNode) -> Descent {
    match &node.kind {
        NodeKind::Stack(stack) => Descent::StackContainer(node.presented.unwrap_or(stack.top())),
        NodeKind::Tabs { children, selected } => {
            match selected.and_then(|index| children.get(index)) {
                Some(child) => Descent::TabContainer(*child),
                None => node
                    .presented
                    .map_or(Descent::LeafScreen, Descent::ModalLayer),
            }
        }
        NodeKind::Leaf => node
            .presented
            .map_or(Descent::LeafScreen, Descent::ModalLayer),
    }
}

/// The screen currently visible to the user, if anything is on display.
pub fn find_visible_screen(hierarchy: &Hierarchy) -> Option<ScreenId> {
    let mut current = hierarchy.root()?;
    // The tree is acyclic, so no path is longer than the node count
    for _ in 0..=hierarchy.len() {
        let node = hierarchy.get(current)?;
        match descent(node) {
            Descent::StackContainer(next) | Descent::TabContainer(next) | Descent::ModalLayer(next) => {
                current = next;
            }
            Descent::LeafScreen => return Some(current),
        }
    }
    error!("container descent did not terminate, hierarchy is cyclic");
    None
}
