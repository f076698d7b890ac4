//! # Pop Resolution
//!
//! Picks which stack entry a pop returns to.
//!
//! | Mode        | Selection                                      |
//! |-------------|------------------------------------------------|
//! | `Previous`  | entry directly below the top                   |
//! | `Root`      | first entry                                    |
//! | `Anchor`    | topmost entry with the anchor flag set         |
//! | `Named(n)`  | topmost entry whose type name is `n`           |
//!
//! Anything that finds no entry falls back to the root, so a pop on an
//! existing stack always has somewhere to land.

use serde::{Deserialize, Serialize};

use crate::core::hierarchy::ScreenNode;
use crate::core::screen::ScreenId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopMode {
    #[default]
    Previous,
    Root,
    Anchor,
    Named(String),
}

impl PopMode {
    /// A non-empty `name` always wins over the mode.
    pub fn with_name(self, name: &str) -> Self {
        if name.is_empty() {
            self
        } else {
            PopMode::Named(name.to_string())
        }
    }
}

/// Where a pop is headed: a resolution mode or an explicit screen handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopTarget {
    Mode(PopMode),
    Screen(ScreenId),
}

impl Default for PopTarget {
    fn default() -> Self {
        PopTarget::Mode(PopMode::Previous)
    }
}

impl From<PopMode> for PopTarget {
    fn from(mode: PopMode) -> Self {
        PopTarget::Mode(mode)
    }
}

impl From<ScreenId> for PopTarget {
    fn from(id: ScreenId) -> Self {
        PopTarget::Screen(id)
    }
}

/// What resolution needs to know about a stack entry.
pub trait StackEntry {
    fn is_anchor(&self) -> bool;
    fn type_name(&self) -> &str;
}

impl StackEntry for ScreenNode {
    fn is_anchor(&self) -> bool {
        self.anchor
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl<T: StackEntry + ?Sized> StackEntry for &T {
    fn is_anchor(&self) -> bool {
        (**self).is_anchor()
    }

    fn type_name(&self) -> &str {
        (**self).type_name()
    }
}

/// Index selected by `mode`, or `None` when the mode finds no target.
pub fn select<E: StackEntry>(mode: &PopMode, entries: &[E]) -> Option<usize> {
    match mode {
        PopMode::Previous => entries.len().checked_sub(2),
        PopMode::Root => (!entries.is_empty()).then_some(0),
        PopMode::Anchor => entries.iter().rposition(StackEntry::is_anchor),
        PopMode::Named(name) => entries.iter().rposition(|entry| entry.type_name() == name.as_str()),
    }
}

/// Index to pop to, falling back to the root. `None` only for an empty stack.
pub fn resolve<E: StackEntry>(mode: &PopMode, entries: &[E]) -> Option<usize> {
    if entries.is_empty() {
        return None;
    }
    Some(select(mode, entries).unwrap_or(0))
}

/// Index of an explicit handle, by identity, falling back to the root.
pub fn resolve_handle(handle: ScreenId, entries: &[ScreenId]) -> Option<usize> {
    if entries.is_empty() {
        return None;
    }
    Some(entries.iter().position(|id| *id == handle).unwrap_or(0))
}
