//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;

use crate::core::hierarchy::Hierarchy;
use crate::core::screen::{Properties, Screen, ScreenId};
use crate::router::Completion;

/// A navigation container named "Nav" whose stack holds `names`, root first.
pub fn nav_of(names: &[&str]) -> Screen {
    let mut names = names.iter();
    let root = Screen::new(names.next().copied().unwrap_or("Root"));
    names.fold(Screen::navigation("Nav", root), |nav, name| {
        nav.with_pushed(Screen::new(*name))
    })
}

/// Stack [A, B(anchor), C, D] as the window root. Returns the container id.
pub fn anchored_abcd() -> (Hierarchy, ScreenId) {
    let nav = Screen::navigation("Nav", Screen::new("A"))
        .with_pushed(Screen::new("B").with_anchor(true))
        .with_pushed(Screen::new("C"))
        .with_pushed(Screen::new("D"));
    let nav_id = nav.id();
    (Hierarchy::with_root(nav), nav_id)
}

pub fn stack_ids(hierarchy: &Hierarchy, stack_id: ScreenId) -> Vec<ScreenId> {
    hierarchy
        .stack(stack_id)
        .map(|stack| stack.entries().to_vec())
        .unwrap_or_default()
}

pub fn props(pairs: &[(&str, Value)]) -> Properties {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// A completion that counts how often it ran.
pub fn counting_completion() -> (Completion, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let probe = Arc::clone(&count);
    let completion: Completion = Box::new(move || {
        probe.fetch_add(1, Ordering::SeqCst);
    });
    (completion, count)
}
