use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::join_all;
use serde_json::json;
use wayfinder::core::factory::{BundleScope, ScreenRegistry, ScreenRequest};
use wayfinder::router::ImmediateTransitions;
use wayfinder::{Completion, Hierarchy, NavOptions, NavigationRouter, PopMode, Properties, Screen, ScreenId};

// ============================================================================
// Helper Functions
// ============================================================================

/// Starts a router over a single stack [A, B(anchor), C, D]
fn start_anchored() -> (NavigationRouter, ScreenId) {
    let nav = Screen::navigation("Nav", Screen::new("A"))
        .with_pushed(Screen::new("B").with_anchor(true).with_property("selection", json!(null)))
        .with_pushed(Screen::new("C"))
        .with_pushed(Screen::new("D"));
    let nav_id = nav.id();
    let router = NavigationRouter::start(Hierarchy::with_root(nav), Arc::new(ImmediateTransitions))
        .expect("router should start");
    (router, nav_id)
}

fn names(router: &NavigationRouter, nav_id: ScreenId) -> Vec<String> {
    router
        .snapshot()
        .stack_names(nav_id)
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn visible_name(router: &NavigationRouter) -> Option<String> {
    let snapshot = router.snapshot();
    router
        .find_visible_screen()
        .and_then(|id| snapshot.type_name(id).map(str::to_string))
}

fn counter() -> (Completion, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&count);
    let completion: Completion = Box::new(move || {
        handle.fetch_add(1, Ordering::SeqCst);
    });
    (completion, count)
}

fn properties(pairs: &[(&str, serde_json::Value)]) -> Properties {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

// ============================================================================
// Pop Resolution
// ============================================================================

#[tokio::test]
async fn test_pop_anchor_lands_on_nearest_anchor() {
    let (router, nav_id) = start_anchored();

    router.pop(PopMode::Anchor, Properties::new(), NavOptions::default(), None);
    router.flush().await;

    assert_eq!(names(&router, nav_id), ["A", "B"]);
    assert_eq!(visible_name(&router).as_deref(), Some("B"));
}

#[tokio::test]
async fn test_pop_root_and_previous() {
    let (router, nav_id) = start_anchored();

    router.pop(PopMode::Previous, Properties::new(), NavOptions::default(), None);
    router.flush().await;
    assert_eq!(names(&router, nav_id), ["A", "B", "C"]);

    router.pop(PopMode::Root, Properties::new(), NavOptions::default(), None);
    router.flush().await;
    assert_eq!(names(&router, nav_id), ["A"]);
}

#[tokio::test]
async fn test_pop_named_picks_closest_match() {
    let nav = Screen::navigation("Nav", Screen::new("List"))
        .with_pushed(Screen::new("Detail"))
        .with_pushed(Screen::new("List"))
        .with_pushed(Screen::new("Detail"));
    let nav_id = nav.id();
    let router = NavigationRouter::start(Hierarchy::with_root(nav), Arc::new(ImmediateTransitions)).unwrap();

    router.pop_named("List", PopMode::Root, Properties::new(), NavOptions::default(), None);
    router.flush().await;

    assert_eq!(names(&router, nav_id), ["List", "Detail", "List"]);
}

#[tokio::test]
async fn test_pop_named_missing_falls_back_to_root() {
    let (router, nav_id) = start_anchored();

    router.pop_named("Nowhere", PopMode::Previous, Properties::new(), NavOptions::default(), None);
    router.flush().await;

    assert_eq!(names(&router, nav_id), ["A"]);
}

#[tokio::test]
async fn test_pop_delivers_declared_properties_only() {
    let (router, nav_id) = start_anchored();
    let anchor = router.snapshot().stack(nav_id).unwrap().entries()[1];

    router.pop(
        PopMode::Anchor,
        properties(&[("selection", json!("blue")), ("undeclared", json!(1))]),
        NavOptions::default(),
        None,
    );
    router.flush().await;

    let snapshot = router.snapshot();
    let node = snapshot.get(anchor).unwrap();
    assert_eq!(node.properties.get("selection"), Some(&json!("blue")));
    assert_eq!(node.properties.get("undeclared"), None);
}

// ============================================================================
// Open / Pop Round Trips
// ============================================================================

#[tokio::test]
async fn test_open_then_previous_round_trips() {
    let (router, nav_id) = start_anchored();

    router.open(Screen::new("E"), Properties::new(), NavOptions::default(), None);
    router.pop(PopMode::Previous, Properties::new(), NavOptions::default(), None);
    router.flush().await;

    assert_eq!(names(&router, nav_id), ["A", "B", "C", "D"]);
    assert_eq!(visible_name(&router).as_deref(), Some("D"));
}

#[tokio::test]
async fn test_modal_present_and_dismiss() {
    let (router, nav_id) = start_anchored();

    let sheet = Screen::navigation("SheetNav", Screen::new("Compose"));
    router.open(sheet, Properties::new(), NavOptions::default().modal(), None);
    router.flush().await;
    assert_eq!(visible_name(&router).as_deref(), Some("Compose"));

    // Pushes go to the presented stack, not the one underneath
    router.open(Screen::new("Attach"), Properties::new(), NavOptions::default(), None);
    router.flush().await;
    assert_eq!(visible_name(&router).as_deref(), Some("Attach"));
    assert_eq!(names(&router, nav_id), ["A", "B", "C", "D"]);

    router.pop(PopMode::Previous, Properties::new(), NavOptions::default().modal(), None);
    router.flush().await;
    assert_eq!(visible_name(&router).as_deref(), Some("D"));
}

// ============================================================================
// Completions
// ============================================================================

#[tokio::test]
async fn test_each_completion_fires_exactly_once() {
    let (router, _) = start_anchored();
    let (open_done, opened) = counter();
    let (pop_done, popped) = counter();

    router.open(Screen::new("E"), Properties::new(), NavOptions::default(), Some(open_done));
    router.pop(PopMode::Root, Properties::new(), NavOptions::default(), Some(pop_done));
    router.flush().await;
    router.flush().await;

    assert_eq!(opened.load(Ordering::SeqCst), 1);
    assert_eq!(popped.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_dismiss_without_modal_never_completes() {
    let (router, nav_id) = start_anchored();
    let (done, count) = counter();

    router.pop(PopMode::Previous, Properties::new(), NavOptions::default().modal(), Some(done));
    router.flush().await;

    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(names(&router, nav_id), ["A", "B", "C", "D"]);
}

#[tokio::test]
async fn test_reopening_same_screen_keeps_window_usable() {
    let (router, nav_id) = start_anchored();
    let detail = Screen::new("Detail");
    let (first, first_count) = counter();
    let (second, second_count) = counter();

    router.open(detail.clone(), Properties::new(), NavOptions::default(), Some(first));
    router.open(detail, Properties::new(), NavOptions::default(), Some(second));
    router.flush().await;
    assert_eq!(names(&router, nav_id), ["A", "B", "C", "D", "Detail"]);
    assert_eq!(first_count.load(Ordering::SeqCst), 1);
    assert_eq!(second_count.load(Ordering::SeqCst), 0);

    router.pop(PopMode::Previous, Properties::new(), NavOptions::default(), None);
    router.open(Screen::new("E"), Properties::new(), NavOptions::default(), None);
    router.flush().await;

    assert_eq!(names(&router, nav_id), ["A", "B", "C", "D", "E"]);
    assert_eq!(visible_name(&router).as_deref(), Some("E"));
}

// ============================================================================
// Handles and Root Replacement
// ============================================================================

#[tokio::test]
async fn test_pop_to_handle() {
    let (router, nav_id) = start_anchored();
    let c = router.snapshot().stack(nav_id).unwrap().entries()[2];

    router.pop(c, Properties::new(), NavOptions::default(), None);
    router.flush().await;

    assert_eq!(names(&router, nav_id), ["A", "B", "C"]);
}

#[tokio::test]
async fn test_stale_handle_after_replace_root_pops_to_root() {
    let (router, nav_id) = start_anchored();
    let stale = router.snapshot().stack(nav_id).unwrap().entries()[3];

    let fresh = Screen::navigation("Fresh", Screen::new("X"))
        .with_pushed(Screen::new("Y"))
        .with_pushed(Screen::new("Z"));
    let fresh_id = fresh.id();
    router.replace_root(fresh);
    router.pop(stale, Properties::new(), NavOptions::default(), None);
    router.flush().await;

    let snapshot = router.snapshot();
    assert!(!snapshot.contains(stale));
    assert_eq!(names(&router, fresh_id), ["X"]);
}

// ============================================================================
// Named Construction
// ============================================================================

#[tokio::test]
async fn test_open_named_through_registry() {
    let (router, nav_id) = start_anchored();
    let scope = BundleScope::named("shop");
    let mut registry = ScreenRegistry::new();
    registry.register("Cart", || Screen::new("Cart"));
    registry.register_in(&scope, "Cart", || Screen::new("ShopCart"));

    let id = router.open_named(
        &registry,
        &ScreenRequest::new("Cart", &scope),
        Properties::new(),
        NavOptions::default(),
        None,
    );
    router.flush().await;

    assert_eq!(router.find_visible_screen(), id);
    assert_eq!(names(&router, nav_id), ["A", "B", "C", "D", "ShopCart"]);
}

#[tokio::test]
async fn test_open_named_unknown_is_ignored() {
    let (router, nav_id) = start_anchored();
    let registry = ScreenRegistry::new();
    let scope = BundleScope::named("shop");
    let (done, count) = counter();

    let id = router.open_named(
        &registry,
        &ScreenRequest::new("Missing", &scope),
        Properties::new(),
        NavOptions::default(),
        Some(done),
    );
    router.flush().await;

    assert_eq!(id, None);
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(names(&router, nav_id), ["A", "B", "C", "D"]);
}

// ============================================================================
// Concurrent Callers
// ============================================================================

#[tokio::test]
async fn test_concurrent_callers_all_land() {
    let (router, nav_id) = start_anchored();
    let count = Arc::new(AtomicUsize::new(0));

    let callers = (0..8).map(|n| {
        let router = router.clone();
        let count = Arc::clone(&count);
        tokio::spawn(async move {
            let completion: Completion = Box::new(move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
            router.open(
                Screen::new(format!("S{n}")),
                Properties::new(),
                NavOptions::default().instant(),
                Some(completion),
            );
            router.flush().await;
        })
    });
    for result in join_all(callers).await {
        result.expect("caller task panicked");
    }

    assert_eq!(names(&router, nav_id).len(), 12);
    assert_eq!(count.load(Ordering::SeqCst), 8);
}
