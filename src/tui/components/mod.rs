//! # TUI Components
//!
//! Both components are stateless and props-based: they receive a snapshot
//! of the hierarchy (or plain strings) and render it. Nothing here calls
//! the router.
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (Top status line)
//! └── hierarchy_view.rs  (Container tree + visible stack panes)
//! ```

pub mod hierarchy_view;
mod title_bar;

pub use hierarchy_view::HierarchyView;
pub use title_bar::TitleBar;
