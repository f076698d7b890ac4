//! # Screens
//!
//! A `Screen` is one navigable unit of UI as far as the router cares:
//! an identity, a declared type name, a property bag and an anchor flag.
//! Containers (navigation stacks, tab sets) are screens too. They carry
//! their children until the screen is installed into a `Hierarchy`.
//!
//! ```text
//! Screen
//! ├── id: ScreenId           // identity, minted at construction
//! ├── type_name: String      // used by Named pop resolution
//! ├── anchor: bool           // used by Anchor pop resolution
//! ├── properties: PropertyBag
//! └── content: Content       // Leaf | Navigation | Tabs
//! ```

use std::collections::BTreeMap;
use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Key/value pairs handed to `open`/`pop` and applied to a screen's bag.
pub type Properties = serde_json::Map<String, Value>;

/// Opaque screen identity. Two screens of the same type never share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScreenId(Uuid);

impl ScreenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ScreenId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First block is enough to tell screens apart in logs
        let full = self.0.simple().to_string();
        write!(f, "{}", &full[..8])
    }
}

/// Declared properties of a screen.
///
/// Only keys declared up front (via `Screen::with_property`) accept values.
/// Anything else is logged and dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyBag {
    values: BTreeMap<String, Value>,
}

impl PropertyBag {
    pub fn declare(&mut self, key: impl Into<String>, initial: Value) {
        self.values.insert(key.into(), initial);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn is_declared(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Apply `properties` to declared keys. Returns how many were applied.
    ///
    /// `owner` is only used for the diagnostic on undeclared keys.
    pub fn apply(&mut self, owner: &str, properties: &Properties) -> usize {
        let mut applied = 0;
        for (key, value) in properties {
            match self.values.get_mut(key) {
                Some(slot) => {
                    *slot = value.clone();
                    applied += 1;
                }
                None => warn!("{owner} has no property `{key}`, ignoring"),
            }
        }
        applied
    }
}

/// What a screen holds before it is installed into a hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Leaf,
    /// Push history, index 0 = root. Never empty.
    Navigation(Vec<Screen>),
    Tabs {
        children: Vec<Screen>,
        selected: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    id: ScreenId,
    type_name: String,
    anchor: bool,
    properties: PropertyBag,
    content: Content,
}

impl Screen {
    /// A plain leaf screen.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            id: ScreenId::new(),
            type_name: type_name.into(),
            anchor: false,
            properties: PropertyBag::default(),
            content: Content::Leaf,
        }
    }

    /// A stacked-navigation container whose stack starts at `root`.
    pub fn navigation(type_name: impl Into<String>, root: Screen) -> Self {
        Self {
            content: Content::Navigation(vec![root]),
            ..Self::new(type_name)
        }
    }

    /// A tabbed container. `selected` is clamped to `None` if out of range.
    pub fn tabs(type_name: impl Into<String>, children: Vec<Screen>, selected: usize) -> Self {
        let selected = (selected < children.len()).then_some(selected);
        Self {
            content: Content::Tabs { children, selected },
            ..Self::new(type_name)
        }
    }

    /// Push `screen` onto this container's initial stack.
    ///
    /// Only meaningful for navigation containers; other screens log and drop it.
    pub fn with_pushed(mut self, screen: Screen) -> Self {
        match &mut self.content {
            Content::Navigation(entries) => entries.push(screen),
            _ => warn!(
                "{} is not a navigation container, dropping {}",
                self.type_name, screen.type_name
            ),
        }
        self
    }

    /// Declare a property with its initial value.
    pub fn with_property(mut self, key: impl Into<String>, initial: impl Into<Value>) -> Self {
        self.properties.declare(key, initial.into());
        self
    }

    pub fn with_anchor(mut self, anchor: bool) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn id(&self) -> ScreenId {
        self.id
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_anchor(&self) -> bool {
        self.anchor
    }

    pub fn set_anchor(&mut self, anchor: bool) {
        self.anchor = anchor;
    }

    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut PropertyBag {
        &mut self.properties
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub(crate) fn into_parts(self) -> (ScreenId, String, bool, PropertyBag, Content) {
        (
            self.id,
            self.type_name,
            self.anchor,
            self.properties,
            self.content,
        )
    }
}
