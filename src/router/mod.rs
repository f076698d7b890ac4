//! # Navigation Router
//!
//! The public face of the crate. Callers `open` and `pop`; the router turns
//! each call into a `core::action::Action` and queues it on a single
//! UI-affinity thread.
//!
//! ```text
//!  caller thread(s)                 wayfinder-ui thread
//!  ───────────────                  ────────────────────
//!  open / pop  ──► mpsc (unbounded) ──► update(hierarchy, action)
//!                                         │ publish snapshot (watch)
//!                                         │ driver.settle(transition)
//!                                         └► on_complete()
//!  find_visible_screen ◄── snapshot ◄─────┘
//! ```
//!
//! - Calls return immediately and run in call order.
//! - A task waits for its transition before the next task starts, so a second
//!   call sees the hierarchy as the first one left it.
//! - Completions fire exactly once, on the UI thread, never inline. A request
//!   that turns out to be a no-op drops its completion.
//! - Snapshot reads are advisory: the UI thread may already be ahead.

pub mod transition;

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::{mpsc, oneshot, watch};

use crate::core::action::{Action, Effect, update};
use crate::core::factory::{ScreenFactory, ScreenRequest};
use crate::core::hierarchy::Hierarchy;
use crate::core::locator;
use crate::core::resolve::{PopMode, PopTarget};
use crate::core::screen::{Properties, Screen, ScreenId};

pub use transition::{ImmediateTransitions, TimedTransitions, TransitionDriver};

/// Name of the thread every hierarchy mutation runs on.
pub const UI_THREAD_NAME: &str = "wayfinder-ui";

/// Runs once on the UI thread after a transition settles.
///
/// A panicking completion is caught and logged; the queue keeps running.
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavOptions {
    pub animated: bool,
    pub as_modal: bool,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            animated: true,
            as_modal: false,
        }
    }
}

impl NavOptions {
    pub fn modal(mut self) -> Self {
        self.as_modal = true;
        self
    }

    pub fn instant(mut self) -> Self {
        self.animated = false;
        self
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }
}

enum Task {
    Run {
        action: Action,
        animated: bool,
        on_complete: Option<Completion>,
    },
    Barrier(oneshot::Sender<()>),
}

#[derive(Clone)]
pub struct NavigationRouter {
    tasks: mpsc::UnboundedSender<Task>,
    snapshot: watch::Receiver<Arc<Hierarchy>>,
}

impl NavigationRouter {
    /// Spawn the UI thread and hand it `hierarchy`.
    ///
    /// The thread exits once every clone of the router is dropped.
    pub fn start(hierarchy: Hierarchy, driver: Arc<dyn TransitionDriver>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (tasks, queue) = mpsc::unbounded_channel();
        let (publisher, snapshot) = watch::channel(Arc::new(hierarchy.clone()));

        info!("starting router with {} transitions", driver.name());
        std::thread::Builder::new()
            .name(UI_THREAD_NAME.to_string())
            .spawn(move || runtime.block_on(run_ui_queue(hierarchy, queue, publisher, driver)))?;

        Ok(Self { tasks, snapshot })
    }

    /// Push `screen` onto the visible stack, or present it when `options.as_modal`.
    ///
    /// `None` is reported and ignored; `on_complete` is not called.
    pub fn open(
        &self,
        screen: impl Into<Option<Screen>>,
        properties: Properties,
        options: NavOptions,
        on_complete: Option<Completion>,
    ) {
        let Some(screen) = screen.into() else {
            warn!("open: no screen to open");
            return;
        };
        self.schedule(
            Action::Open {
                screen,
                properties,
                as_modal: options.as_modal,
            },
            options.animated,
            on_complete,
        );
    }

    /// Build a screen through `factory` and open it.
    ///
    /// Returns the new screen's id, or `None` if the factory had nothing.
    pub fn open_named(
        &self,
        factory: &dyn ScreenFactory,
        request: &ScreenRequest<'_>,
        properties: Properties,
        options: NavOptions,
        on_complete: Option<Completion>,
    ) -> Option<ScreenId> {
        let screen = factory.create_screen(request.name, request.template, request.scope);
        if screen.is_none() {
            warn!("open_named: nothing registered for {request}");
        }
        let id = screen.as_ref().map(Screen::id);
        self.open(screen, properties, options, on_complete);
        id
    }

    /// Pop to a resolution mode or an explicit screen, or dismiss when `options.as_modal`.
    pub fn pop(
        &self,
        target: impl Into<PopTarget>,
        properties: Properties,
        options: NavOptions,
        on_complete: Option<Completion>,
    ) {
        self.schedule(
            Action::Pop {
                target: target.into(),
                properties,
                as_modal: options.as_modal,
            },
            options.animated,
            on_complete,
        );
    }

    /// Like `pop`, but a non-empty `name` forces named resolution.
    pub fn pop_named(
        &self,
        name: &str,
        mode: PopMode,
        properties: Properties,
        options: NavOptions,
        on_complete: Option<Completion>,
    ) {
        self.pop(mode.with_name(name), properties, options, on_complete);
    }

    pub fn set_anchor(&self, screen: ScreenId, anchor: bool) {
        self.schedule(Action::SetAnchor { screen, anchor }, false, None);
    }

    pub fn select_tab(&self, tabs: ScreenId, index: usize) {
        self.schedule(Action::SelectTab { tabs, index }, false, None);
    }

    /// Install a new window root. Handles into the old tree go stale.
    pub fn replace_root(&self, screen: Screen) {
        self.schedule(Action::ReplaceRoot(screen), false, None);
    }

    /// Resolves once everything queued before this call has run.
    pub async fn flush(&self) {
        let (done, wait) = oneshot::channel();
        if self.tasks.send(Task::Barrier(done)).is_ok() {
            let _ = wait.await;
        }
    }

    /// Visible screen in the latest published snapshot.
    pub fn find_visible_screen(&self) -> Option<ScreenId> {
        locator::find_visible_screen(&self.snapshot.borrow())
    }

    pub fn is_anchor(&self, screen: ScreenId) -> Option<bool> {
        self.snapshot.borrow().get(screen).map(|node| node.anchor)
    }

    pub fn snapshot(&self) -> Arc<Hierarchy> {
        Arc::clone(&self.snapshot.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Hierarchy>> {
        self.snapshot.clone()
    }

    fn schedule(&self, action: Action, animated: bool, on_complete: Option<Completion>) {
        let task = Task::Run {
            action,
            animated,
            on_complete,
        };
        if let Err(mpsc::error::SendError(Task::Run { action, .. })) = self.tasks.send(task) {
            warn!("UI queue is gone, dropping {action}");
        }
    }
}

async fn run_ui_queue(
    hierarchy: Hierarchy,
    mut queue: mpsc::UnboundedReceiver<Task>,
    publisher: watch::Sender<Arc<Hierarchy>>,
    driver: Arc<dyn TransitionDriver>,
) {
    let mut current = Arc::new(hierarchy);
    while let Some(task) = queue.recv().await {
        let (action, animated, on_complete) = match task {
            Task::Barrier(done) => {
                let _ = done.send(());
                continue;
            }
            Task::Run {
                action,
                animated,
                on_complete,
            } => (action, animated, on_complete),
        };

        debug!("UI queue: {action}");
        let effect = update(Arc::make_mut(&mut current), action);
        publisher.send_replace(Arc::clone(&current));

        match effect {
            Effect::None => {
                if on_complete.is_some() {
                    debug!("request was a no-op, completion dropped");
                }
            }
            Effect::Transition(transition) => {
                driver.settle(&transition, animated).await;
                debug!("settled {transition:?}");
                if let Some(on_complete) = on_complete {
                    if panic::catch_unwind(AssertUnwindSafe(on_complete)).is_err() {
                        error!("completion for {transition:?} panicked");
                    }
                }
            }
        }
    }
    debug!("UI queue closed");
}
