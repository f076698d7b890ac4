//! # Container Hierarchy
//!
//! The window's tree of screens, stored in an arena keyed by `ScreenId`.
//!
//! ```text
//! Hierarchy
//! ├── root: Option<ScreenId>          // the window's root screen
//! └── nodes: HashMap<ScreenId, ScreenNode>
//!
//! ScreenNode
//! ├── kind: NodeKind                  // Leaf | Stack | Tabs
//! ├── parent: Option<ScreenId>        // containing stack or tab set
//! ├── presenter: Option<ScreenId>     // set when this node is a modal
//! └── presented: Option<ScreenId>     // modal layered above this node
//! ```
//!
//! Reads are public. Mutations are crate-private and only happen through
//! `core::action::update`, which runs on the router's UI queue.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::core::screen::{Content, PropertyBag, Screen, ScreenId};

/// Push history of one stacked-navigation container. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    entries: Vec<ScreenId>,
}

impl NavigationStack {
    fn new(root: ScreenId) -> Self {
        Self {
            entries: vec![root],
        }
    }

    pub fn entries(&self) -> &[ScreenId] {
        &self.entries
    }

    pub fn root(&self) -> ScreenId {
        self.entries[0]
    }

    pub fn top(&self) -> ScreenId {
        self.entries[self.entries.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, id: ScreenId) -> bool {
        self.entries.contains(&id)
    }

    pub fn position(&self, id: ScreenId) -> Option<usize> {
        self.entries.iter().position(|entry| *entry == id)
    }

    fn push(&mut self, id: ScreenId) {
        self.entries.push(id);
    }

    /// Remove everything strictly above `target`. Returns the removed suffix.
    fn truncate_above(&mut self, target: ScreenId) -> Vec<ScreenId> {
        match self.position(target) {
            Some(index) => self.entries.split_off(index + 1),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Stack(NavigationStack),
    Tabs {
        children: Vec<ScreenId>,
        selected: Option<usize>,
    },
}

/// A screen installed in the hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenNode {
    pub id: ScreenId,
    pub type_name: String,
    pub anchor: bool,
    pub properties: PropertyBag,
    /// Set when pushed: tab/bottom-bar chrome stays hidden while on top.
    pub hides_bottom_bar: bool,
    /// Set when presented modally.
    pub full_screen: bool,
    pub kind: NodeKind,
    pub parent: Option<ScreenId>,
    pub presenter: Option<ScreenId>,
    pub presented: Option<ScreenId>,
}

impl ScreenNode {
    pub fn stack(&self) -> Option<&NavigationStack> {
        match &self.kind {
            NodeKind::Stack(stack) => Some(stack),
            _ => None,
        }
    }
}

/// How a node sits relative to its parent, for outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Root,
    StackEntry,
    Tab { selected: bool },
    Presented,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    root: Option<ScreenId>,
    nodes: HashMap<ScreenId, ScreenNode>,
}

impl Hierarchy {
    /// An empty window (nothing launched yet).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(screen: Screen) -> Self {
        let mut hierarchy = Self::new();
        hierarchy.set_root(screen);
        hierarchy
    }

    pub fn root(&self) -> Option<ScreenId> {
        self.root
    }

    pub fn get(&self, id: ScreenId) -> Option<&ScreenNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: ScreenId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// First id in `screen`'s tree that is already installed here, or that
    /// appears twice within the tree itself. Installing such a screen would
    /// alias an existing node.
    pub fn conflicting_id(&self, screen: &Screen) -> Option<ScreenId> {
        let mut seen = HashSet::new();
        let mut pending = vec![screen];
        while let Some(next) = pending.pop() {
            let id = next.id();
            if self.contains(id) || !seen.insert(id) {
                return Some(id);
            }
            match next.content() {
                Content::Leaf => {}
                Content::Navigation(entries) => pending.extend(entries),
                Content::Tabs { children, .. } => pending.extend(children),
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn type_name(&self, id: ScreenId) -> Option<&str> {
        self.get(id).map(|node| node.type_name.as_str())
    }

    pub fn stack(&self, id: ScreenId) -> Option<&NavigationStack> {
        self.get(id).and_then(ScreenNode::stack)
    }

    /// Type names of a stack's entries, root first.
    pub fn stack_names(&self, stack_id: ScreenId) -> Vec<&str> {
        self.stack(stack_id)
            .map(|stack| {
                stack
                    .entries()
                    .iter()
                    .filter_map(|id| self.type_name(*id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Nearest stacked-navigation container holding `id`, walking parent links.
    ///
    /// Presented screens have no parent, so a modal outside any stack has none.
    pub fn containing_stack(&self, id: ScreenId) -> Option<ScreenId> {
        let mut current = self.get(id)?.parent;
        while let Some(parent_id) = current {
            let parent = self.get(parent_id)?;
            if matches!(parent.kind, NodeKind::Stack(_)) {
                return Some(parent_id);
            }
            current = parent.parent;
        }
        None
    }

    /// Nearest modally-presented node at or above `id`.
    pub fn modal_layer(&self, id: ScreenId) -> Option<ScreenId> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id)?;
            if node.presenter.is_some() {
                return Some(node_id);
            }
            current = node.parent;
        }
        None
    }

    /// Depth-first outline: (depth, node, relation), presented layers last.
    pub fn outline(&self) -> Vec<(usize, &ScreenNode, Relation)> {
        let mut lines = Vec::new();
        if let Some(root) = self.root {
            self.collect_outline(root, 0, Relation::Root, &mut lines);
        }
        lines
    }

    fn collect_outline<'a>(
        &'a self,
        id: ScreenId,
        depth: usize,
        relation: Relation,
        lines: &mut Vec<(usize, &'a ScreenNode, Relation)>,
    ) {
        let Some(node) = self.get(id) else {
            return;
        };
        lines.push((depth, node, relation));
        match &node.kind {
            NodeKind::Leaf => {}
            NodeKind::Stack(stack) => {
                for entry in stack.entries() {
                    self.collect_outline(*entry, depth + 1, Relation::StackEntry, lines);
                }
            }
            NodeKind::Tabs { children, selected } => {
                for (index, child) in children.iter().enumerate() {
                    let relation = Relation::Tab {
                        selected: *selected == Some(index),
                    };
                    self.collect_outline(*child, depth + 1, relation, lines);
                }
            }
        }
        if let Some(presented) = node.presented {
            self.collect_outline(presented, depth + 1, Relation::Presented, lines);
        }
    }

    // ------------------------------------------------------------------------
    // Mutations (UI queue only)
    // ------------------------------------------------------------------------

    /// Replace the window's root. Every previous node is discarded.
    pub(crate) fn set_root(&mut self, screen: Screen) -> ScreenId {
        self.nodes.clear();
        let id = self.insert(screen, None);
        self.root = Some(id);
        id
    }

    /// Move `screen` (and its children) into the arena.
    fn insert(&mut self, screen: Screen, parent: Option<ScreenId>) -> ScreenId {
        let (id, type_name, anchor, properties, content) = screen.into_parts();
        let kind = match content {
            Content::Leaf => NodeKind::Leaf,
            Content::Navigation(entries) => {
                let mut ids = entries.into_iter().map(|entry| self.insert(entry, Some(id)));
                match ids.next() {
                    Some(root) => {
                        let mut stack = NavigationStack::new(root);
                        ids.for_each(|entry| stack.push(entry));
                        NodeKind::Stack(stack)
                    }
                    None => {
                        warn!("{type_name} has no root screen, installing as a leaf");
                        NodeKind::Leaf
                    }
                }
            }
            Content::Tabs { children, selected } => NodeKind::Tabs {
                children: children
                    .into_iter()
                    .map(|child| self.insert(child, Some(id)))
                    .collect(),
                selected,
            },
        };
        self.nodes.insert(
            id,
            ScreenNode {
                id,
                type_name,
                anchor,
                properties,
                hides_bottom_bar: false,
                full_screen: false,
                kind,
                parent,
                presenter: None,
                presented: None,
            },
        );
        id
    }

    /// Remove a node, its children and anything it presents.
    fn remove_subtree(&mut self, id: ScreenId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        match node.kind {
            NodeKind::Leaf => {}
            NodeKind::Stack(stack) => {
                for entry in stack.entries {
                    self.remove_subtree(entry);
                }
            }
            NodeKind::Tabs { children, .. } => {
                for child in children {
                    self.remove_subtree(child);
                }
            }
        }
        if let Some(presented) = node.presented {
            self.remove_subtree(presented);
        }
    }

    pub(crate) fn push(&mut self, stack_id: ScreenId, screen: Screen) -> Option<ScreenId> {
        if self.stack(stack_id).is_none() {
            return None;
        }
        let id = self.insert(screen, Some(stack_id));
        if let Some(node) = self.nodes.get_mut(&id) {
            node.hides_bottom_bar = true;
        }
        if let Some(NodeKind::Stack(stack)) = self.nodes.get_mut(&stack_id).map(|n| &mut n.kind) {
            stack.push(id);
        }
        Some(id)
    }

    /// Layer `screen` above `presenter`. Refuses if something is already there.
    pub(crate) fn present(&mut self, presenter: ScreenId, screen: Screen) -> Option<ScreenId> {
        match self.get(presenter) {
            None => return None,
            Some(node) if node.presented.is_some() => {
                warn!("{} is already presenting, refusing", node.type_name);
                return None;
            }
            Some(_) => {}
        }
        let id = self.insert(screen, None);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.presenter = Some(presenter);
            node.full_screen = true;
        }
        if let Some(node) = self.nodes.get_mut(&presenter) {
            node.presented = Some(id);
        }
        Some(id)
    }

    /// Tear down the modal layer `modal` and everything it presents.
    pub(crate) fn dismiss(&mut self, modal: ScreenId) -> bool {
        let Some(presenter) = self.get(modal).and_then(|node| node.presenter) else {
            return false;
        };
        if let Some(node) = self.nodes.get_mut(&presenter) {
            node.presented = None;
        }
        self.remove_subtree(modal);
        true
    }

    /// Pop everything strictly above `target` in `stack_id`. Returns the count removed.
    pub(crate) fn pop_to(&mut self, stack_id: ScreenId, target: ScreenId) -> usize {
        let removed = match self.nodes.get_mut(&stack_id).map(|n| &mut n.kind) {
            Some(NodeKind::Stack(stack)) => stack.truncate_above(target),
            _ => return 0,
        };
        let count = removed.len();
        for id in removed {
            // Popped entries take their own modals with them
            self.remove_subtree(id);
        }
        debug!("popped {count} screen(s) off {stack_id}");
        count
    }

    pub(crate) fn select_tab(&mut self, tabs_id: ScreenId, index: usize) -> bool {
        match self.nodes.get_mut(&tabs_id).map(|n| &mut n.kind) {
            Some(NodeKind::Tabs { children, selected }) if index < children.len() => {
                *selected = Some(index);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn set_anchor(&mut self, id: ScreenId, anchor: bool) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.anchor = anchor;
                true
            }
            None => false,
        }
    }

    pub(crate) fn node_mut(&mut self, id: ScreenId) -> Option<&mut ScreenNode> {
        self.nodes.get_mut(&id)
    }
}
