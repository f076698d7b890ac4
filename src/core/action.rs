//! # Actions
//!
//! Every navigation request becomes an `Action`.
//! `open` a screen? That's `Action::Open`. Go back? That's `Action::Pop`.
//!
//! The `update()` function takes the hierarchy and an action, mutates the
//! hierarchy and returns the `Effect` the router has to carry out next.
//! No I/O and no waiting here. Transitions and completions happen in the
//! router's UI queue.
//!
//! ```text
//! Hierarchy + Action  →  update()  →  Hierarchy' + Effect
//! ```
//!
//! A no-op request returns `Effect::None`, and the router never calls the
//! completion for it.

use std::fmt;

use log::{debug, info, warn};

use crate::core::hierarchy::{Hierarchy, ScreenNode};
use crate::core::locator::find_visible_screen;
use crate::core::resolve::{PopTarget, resolve, resolve_handle};
use crate::core::screen::{Properties, Screen, ScreenId};

pub enum Action {
    Open {
        screen: Screen,
        properties: Properties,
        as_modal: bool,
    },
    Pop {
        target: PopTarget,
        properties: Properties,
        as_modal: bool,
    },
    SetAnchor {
        screen: ScreenId,
        anchor: bool,
    },
    SelectTab {
        tabs: ScreenId,
        index: usize,
    },
    ReplaceRoot(Screen),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Open {
                screen, as_modal, ..
            } => {
                let verb = if *as_modal { "present" } else { "push" };
                write!(f, "{verb} {}", screen.type_name())
            }
            Action::Pop {
                as_modal: true, ..
            } => write!(f, "dismiss"),
            Action::Pop { target, .. } => write!(f, "pop to {target:?}"),
            Action::SetAnchor { screen, anchor } => write!(f, "anchor {screen} = {anchor}"),
            Action::SelectTab { tabs, index } => write!(f, "select tab {index} of {tabs}"),
            Action::ReplaceRoot(screen) => write!(f, "replace root with {}", screen.type_name()),
        }
    }
}

/// A change the transition driver has to play out before completion fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Push { screen: ScreenId },
    Present { screen: ScreenId },
    PopTo { target: ScreenId, removed: usize },
    Dismiss { screen: ScreenId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Transition(Transition),
}

pub fn update(hierarchy: &mut Hierarchy, action: Action) -> Effect {
    match action {
        Action::Open {
            screen,
            properties,
            as_modal,
        } => open(hierarchy, screen, &properties, as_modal),
        Action::Pop { as_modal: true, .. } => dismiss(hierarchy),
        Action::Pop {
            target, properties, ..
        } => pop(hierarchy, &target, &properties),
        Action::SetAnchor { screen, anchor } => {
            if !hierarchy.set_anchor(screen, anchor) {
                debug!("set_anchor: {screen} is no longer installed");
            }
            Effect::None
        }
        Action::SelectTab { tabs, index } => {
            if !hierarchy.select_tab(tabs, index) {
                warn!("select_tab: {tabs} has no tab {index}");
            }
            Effect::None
        }
        Action::ReplaceRoot(screen) => {
            if let Some(clash) = Hierarchy::new().conflicting_id(&screen) {
                warn!("replace_root: {clash} appears twice in {}, ignoring", screen.type_name());
                return Effect::None;
            }
            info!("installing {} as window root", screen.type_name());
            hierarchy.set_root(screen);
            Effect::None
        }
    }
}

fn open(hierarchy: &mut Hierarchy, mut screen: Screen, properties: &Properties, as_modal: bool) -> Effect {
    let name = screen.type_name().to_string();
    let Some(visible) = find_visible_screen(hierarchy) else {
        warn!("open {name}: no visible screen");
        return Effect::None;
    };

    if let Some(clash) = hierarchy.conflicting_id(&screen) {
        warn!("open {name}: screen {clash} is already installed, ignoring");
        return Effect::None;
    }

    // Properties land before the screen is installed, so never after display
    screen.properties_mut().apply(&name, properties);

    if as_modal {
        return match hierarchy.present(visible, screen) {
            Some(id) => {
                debug!("presented {name} ({id}) over {visible}");
                Effect::Transition(Transition::Present { screen: id })
            }
            None => Effect::None,
        };
    }

    let Some(stack_id) = hierarchy.containing_stack(visible) else {
        warn!("open {name}: visible screen {visible} is not in a navigation stack");
        return Effect::None;
    };
    match hierarchy.push(stack_id, screen) {
        Some(id) => {
            debug!("pushed {name} ({id}) onto {stack_id}");
            Effect::Transition(Transition::Push { screen: id })
        }
        None => Effect::None,
    }
}

fn pop(hierarchy: &mut Hierarchy, target: &PopTarget, properties: &Properties) -> Effect {
    let Some(visible) = find_visible_screen(hierarchy) else {
        debug!("pop: no visible screen");
        return Effect::None;
    };
    let Some(stack_id) = hierarchy.containing_stack(visible) else {
        debug!("pop: visible screen {visible} is not in a navigation stack");
        return Effect::None;
    };
    let Some(target_id) = resolve_target(hierarchy, stack_id, target) else {
        return Effect::None;
    };

    if let Some(node) = hierarchy.node_mut(target_id) {
        node.properties.apply(&node.type_name, properties);
    }
    let removed = hierarchy.pop_to(stack_id, target_id);
    Effect::Transition(Transition::PopTo {
        target: target_id,
        removed,
    })
}

fn resolve_target(hierarchy: &Hierarchy, stack_id: ScreenId, target: &PopTarget) -> Option<ScreenId> {
    let stack = hierarchy.stack(stack_id)?;
    match target {
        PopTarget::Mode(mode) => {
            let nodes: Vec<&ScreenNode> = stack
                .entries()
                .iter()
                .filter_map(|id| hierarchy.get(*id))
                .collect();
            resolve(mode, &nodes).map(|index| nodes[index].id)
        }
        PopTarget::Screen(handle) => {
            if !stack.contains(*handle) {
                warn!("pop: {handle} is not in the active stack, falling back to root");
            }
            resolve_handle(*handle, stack.entries()).map(|index| stack.entries()[index])
        }
    }
}

fn dismiss(hierarchy: &mut Hierarchy) -> Effect {
    let Some(visible) = find_visible_screen(hierarchy) else {
        debug!("dismiss: no visible screen");
        return Effect::None;
    };
    let Some(modal) = hierarchy.modal_layer(visible) else {
        debug!("dismiss: nothing is presented");
        return Effect::None;
    };
    if hierarchy.dismiss(modal) {
        Effect::Transition(Transition::Dismiss { screen: modal })
    } else {
        Effect::None
    }
}
