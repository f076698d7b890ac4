//! # Core Navigation Logic
//!
//! This module contains Wayfinder's navigation model.
//! It knows nothing about threads, terminals or any specific UI toolkit.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Hierarchy (screens)  │
//!                    │  • Action (requests)    │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No waiting.    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │   Router   │                          │    TUI     │
//!     │ (UI queue) │ ◄──── open / pop ─────── │  Explorer  │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`screen`]: `Screen`, `ScreenId`, property bags
//! - [`hierarchy`]: the window's container tree
//! - [`locator`]: finds the visible screen
//! - [`resolve`]: pop-target resolution modes
//! - [`action`]: the `Action` enum and `update()`
//! - [`factory`]: name-based screen construction
//! - [`config`], [`app`]: settings and app identity

pub mod action;
pub mod app;
pub mod config;
pub mod factory;
pub mod hierarchy;
pub mod locator;
pub mod resolve;
pub mod screen;

// Re-export commonly used types for convenience
pub use hierarchy::Hierarchy;
pub use resolve::{PopMode, PopTarget};
pub use screen::{Properties, Screen, ScreenId};
