//! # TUI Explorer
//!
//! A ratatui front end for poking at the router by hand. Each key maps to
//! one router call; the screen redraws from the router's latest snapshot.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Completion Reporting
//!
//! Completions run on the router's UI thread, not this one. Each completion
//! sends a status line back over a `std::sync::mpsc` channel, which the
//! event loop drains before every draw.

mod component;
mod components;
pub mod event;
mod ui;

use std::io;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use log::{debug, info};
use serde_json::json;

use crate::core::app::AppContext;
use crate::core::config::ResolvedConfig;
use crate::core::factory::{BundleScope, ScreenRegistry, ScreenRequest};
use crate::core::hierarchy::{Hierarchy, NodeKind};
use crate::core::resolve::PopMode;
use crate::core::screen::{Properties, Screen};
use crate::router::{Completion, NavOptions, NavigationRouter, TimedTransitions};
use crate::tui::event::{TuiEvent, poll_event_timeout};

/// Screen the `n` key pops back to by name.
pub const CHECKPOINT: &str = "Checkpoint";

/// Explorer presentation state (not part of the router)
pub struct TuiState {
    pub status_message: String,
    pub animated: bool,
    /// Number of screens opened so far, stamped into each new screen.
    pub opened: u64,
}

impl TuiState {
    pub fn new(animated: bool) -> Self {
        Self {
            status_message: String::from("Welcome to Wayfinder!"),
            animated,
            opened: 0,
        }
    }

    fn options(&self) -> NavOptions {
        NavOptions::default().animated(self.animated)
    }
}

/// Two tabs, each a navigation stack, like a typical phone app.
pub fn demo_hierarchy() -> Hierarchy {
    let feed = Screen::navigation("FeedNav", Screen::new("Feed").with_property("refresh", false));
    let profile = Screen::navigation("ProfileNav", Screen::new("Profile"));
    Hierarchy::with_root(Screen::tabs("MainTabs", vec![feed, profile], 0))
}

/// Constructors the `p` key opens by name.
pub fn demo_registry(scope: &BundleScope) -> ScreenRegistry {
    let mut registry = ScreenRegistry::new();
    registry.register("Detail", || Screen::new("Detail").with_property("sequence", 0));
    registry.register_in(scope, CHECKPOINT, || {
        Screen::new(CHECKPOINT)
            .with_property("sequence", 0)
            .with_anchor(true)
    });
    registry
}

fn report(tx: &mpsc::Sender<String>, message: String) -> Option<Completion> {
    let tx = tx.clone();
    Some(Box::new(move || {
        let _ = tx.send(format!("settled: {message}"));
    }))
}

/// Translate one input event into router calls. Returns false to quit.
pub fn dispatch(
    event: TuiEvent,
    router: &NavigationRouter,
    registry: &ScreenRegistry,
    scope: &BundleScope,
    tui: &mut TuiState,
    tx: &mpsc::Sender<String>,
) -> bool {
    let options = tui.options();
    match event {
        TuiEvent::Quit => return false,
        TuiEvent::Resize => {}
        TuiEvent::Push | TuiEvent::PushAnchored => {
            tui.opened += 1;
            let name = if event == TuiEvent::Push { "Detail" } else { CHECKPOINT };
            let mut properties = Properties::new();
            properties.insert("sequence".to_string(), json!(tui.opened));
            let request = ScreenRequest::new(name, scope);
            let opened = router.open_named(
                registry,
                &request,
                properties,
                options,
                report(tx, format!("push {name} #{}", tui.opened)),
            );
            if opened.is_none() {
                tui.status_message = format!("nothing registered as {name}");
            }
        }
        TuiEvent::Present => {
            tui.opened += 1;
            let sheet = Screen::navigation("SheetNav", Screen::new("Compose"));
            router.open(sheet, Properties::new(), options.modal(), report(tx, "present Compose".into()));
        }
        TuiEvent::PopPrevious => router.pop(PopMode::Previous, Properties::new(), options, report(tx, "back".into())),
        TuiEvent::PopRoot => router.pop(PopMode::Root, Properties::new(), options, report(tx, "pop to root".into())),
        TuiEvent::PopAnchor => router.pop(PopMode::Anchor, Properties::new(), options, report(tx, "pop to anchor".into())),
        TuiEvent::PopNamed => router.pop_named(
            CHECKPOINT,
            PopMode::Previous,
            Properties::new(),
            options,
            report(tx, format!("pop to {CHECKPOINT}")),
        ),
        TuiEvent::Dismiss => router.pop(
            PopMode::Previous,
            Properties::new(),
            options.modal(),
            report(tx, "dismiss".into()),
        ),
        TuiEvent::NextTab => {
            let snapshot = router.snapshot();
            if let Some(root) = snapshot.root().and_then(|id| snapshot.get(id)) {
                if let NodeKind::Tabs { children, selected } = &root.kind {
                    if !children.is_empty() {
                        let next = selected.map_or(0, |index| (index + 1) % children.len());
                        router.select_tab(root.id, next);
                        tui.status_message = format!("tab {next}");
                    }
                }
            }
        }
        TuiEvent::ToggleAnchor => {
            if let Some(visible) = router.find_visible_screen() {
                let anchor = !router.is_anchor(visible).unwrap_or(false);
                router.set_anchor(visible, anchor);
                tui.status_message = format!("anchor {visible} = {anchor}");
            }
        }
        TuiEvent::ToggleAnimated => {
            tui.animated = !tui.animated;
            tui.status_message = if tui.animated { "animated".into() } else { "instant".into() };
        }
    }
    true
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let app = AppContext::from_config(&config);
    let driver = Arc::new(TimedTransitions::new(config.transition));
    let router = NavigationRouter::start(demo_hierarchy(), driver)?;
    let scope = BundleScope::main();
    let registry = demo_registry(&scope);
    let mut tui = TuiState::new(config.animated);

    // Channel for completion reports from the router's UI thread
    let (tx, rx) = mpsc::channel();

    info!("Explorer starting ({}), scope {scope}", app.label());
    let mut terminal = ratatui::init();

    let result = (|| -> io::Result<()> {
        loop {
            while let Ok(message) = rx.try_recv() {
                tui.status_message = message;
            }

            let snapshot = router.snapshot();
            terminal.draw(|f| ui::draw_ui(f, &app, &snapshot, &tui))?;

            let Some(event) = poll_event_timeout(Duration::from_millis(100))? else {
                continue;
            };
            debug!("Explorer event: {event:?}");
            if !dispatch(event, &router, &registry, &scope, &mut tui, &tx) {
                return Ok(());
            }
        }
    })();

    ratatui::restore();
    info!("Explorer exiting");
    result
}
