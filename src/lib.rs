//! Wayfinder library exports

pub mod core;
pub mod router;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::{Hierarchy, PopMode, PopTarget, Properties, Screen, ScreenId};
pub use crate::router::{Completion, NavOptions, NavigationRouter};
