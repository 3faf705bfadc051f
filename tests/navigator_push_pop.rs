mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::*;
use pagestack::animation::{AnimationOptions, AnimatorRegistry, TransitionAnimator};
use pagestack::navigator::{EventKind, Navigator, TransitionOptions};
use pagestack::page::Visibility;
use pagestack::platform::Platform;
use pagestack::NavigatorError;

#[tokio::test]
async fn test_first_push_shows_without_animator() {
    let animator = Arc::new(RecordingAnimator::default());
    let navigator = navigator_with(animator.clone());

    let home = navigator.push_page("home", TransitionOptions::new()).await.unwrap();

    assert_eq!(home.name(), Some("home"));
    assert_eq!(home.visibility(), Visibility::Shown);
    assert!(!home.back_button_visible());
    assert!(animator.calls().is_empty());
    assert_eq!(navigator.get_current_page().unwrap(), home);
}

#[tokio::test]
async fn test_push_runs_animator_and_swaps_visibility() {
    let animator = Arc::new(RecordingAnimator::default());
    let navigator = navigator_with(animator.clone());

    let home = navigator.push_page("home", TransitionOptions::new()).await.unwrap();
    let settings = navigator
        .push_page("settings", TransitionOptions::new())
        .await
        .unwrap();

    assert_eq!(
        animator.calls(),
        vec![AnimatorCall {
            direction: "push",
            enter: "settings".to_string(),
            leave: "home".to_string(),
        }]
    );
    assert_eq!(home.visibility(), Visibility::Hidden);
    assert_eq!(settings.visibility(), Visibility::Shown);
    assert_eq!(back_buttons(&navigator), vec![false, true]);
    assert!(!navigator.is_running());
}

#[tokio::test]
async fn test_push_then_pop_restores_stack() {
    let navigator = navigator_with_pages(&["home", "settings"]).await;
    let top_before = navigator.get_current_page().unwrap();
    let len_before = navigator.len();

    navigator.push_page("profile", TransitionOptions::new()).await.unwrap();
    let revealed = navigator.pop_page(TransitionOptions::new()).await.unwrap();

    assert_eq!(navigator.len(), len_before);
    assert_eq!(revealed, top_before);
    assert_eq!(navigator.get_current_page().unwrap(), top_before);
    assert!(revealed.is_shown());
}

#[tokio::test]
async fn test_pop_destroys_leaving_page() {
    let navigator = navigator_with_pages(&["home", "settings"]).await;
    let settings = navigator.get_current_page().unwrap();

    navigator.pop_page(TransitionOptions::new()).await.unwrap();

    assert!(settings.is_destroyed());
    assert!(!settings.is_shown());
    assert_eq!(names(&navigator), vec!["home"]);
    assert_eq!(back_buttons(&navigator), vec![false]);
}

#[tokio::test]
async fn test_pop_single_page_is_empty_stack() {
    let navigator = navigator_with_pages(&["home"]).await;
    let home = navigator.get_current_page().unwrap();

    let err = navigator.pop_page(TransitionOptions::new()).await.unwrap_err();

    assert_eq!(err, NavigatorError::EmptyStack);
    assert_eq!(navigator.len(), 1);
    assert_eq!(navigator.get_current_page().unwrap(), home);
    assert!(!navigator.is_running());

    let empty = common::navigator();
    let err = empty.pop_page(TransitionOptions::new()).await.unwrap_err();
    assert_eq!(err.kind(), "empty_stack");
}

#[tokio::test]
async fn test_get_current_page_on_empty_stack() {
    let navigator = navigator();
    assert_eq!(
        navigator.get_current_page().unwrap_err(),
        NavigatorError::EmptyStack
    );
}

#[tokio::test]
async fn test_push_and_pop_events() {
    let navigator = navigator_with_pages(&["home"]).await;
    let log = EventLog::attach(&navigator);

    navigator.push_page("settings", TransitionOptions::new()).await.unwrap();
    assert_eq!(
        log.entries(),
        vec![
            "prepush:home",
            "hide:home",
            "show:settings",
            "postpush:settings<-home",
        ]
    );

    log.clear();
    navigator.pop_page(TransitionOptions::new()).await.unwrap();
    assert_eq!(
        log.entries(),
        vec![
            "prepop:settings",
            "show:home",
            "hide:settings",
            "destroy:settings",
            "postpop:home<-settings",
        ]
    );
}

#[tokio::test]
async fn test_first_push_postpush_has_no_leave_page() {
    let navigator = navigator();
    let log = EventLog::attach(&navigator);

    navigator.push_page("home", TransitionOptions::new()).await.unwrap();

    assert_eq!(log.of(EventKind::PrePush), vec!["prepush:-"]);
    assert_eq!(log.of(EventKind::PostPush), vec!["postpush:home<--"]);
}

#[tokio::test]
async fn test_prepop_carries_enter_and_leave() {
    let navigator = navigator_with_pages(&["home", "settings"]).await;
    let seen = Arc::new(parking_lot::Mutex::new(None));

    let s = Arc::clone(&seen);
    navigator.on(EventKind::PrePop, move |event| {
        let pre = event.pre().unwrap();
        let enter = pre.enter_page.as_ref().and_then(|p| p.name().map(str::to_string));
        let leave = pre.leave_page.as_ref().and_then(|p| p.name().map(str::to_string));
        *s.lock() = Some((enter, leave));
    });

    navigator.pop_page(TransitionOptions::new()).await.unwrap();
    assert_eq!(
        *seen.lock(),
        Some((Some("home".to_string()), Some("settings".to_string())))
    );
}

#[tokio::test]
async fn test_on_transition_end_runs_after_post_event() {
    let navigator = navigator_with_pages(&["home"]).await;
    let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

    let o = Arc::clone(&order);
    navigator.on(EventKind::PostPush, move |_| o.lock().push("postpush"));
    let o = Arc::clone(&order);
    navigator
        .push_page(
            "settings",
            TransitionOptions::new().on_transition_end(move || o.lock().push("callback")),
        )
        .await
        .unwrap();

    assert_eq!(*order.lock(), vec!["postpush", "callback"]);
}

#[tokio::test]
async fn test_empty_reference_rejected_before_events() {
    let navigator = navigator_with_pages(&["home"]).await;
    let log = EventLog::attach(&navigator);

    let err = navigator.push_page("  ", TransitionOptions::new()).await.unwrap_err();

    assert!(err.is_argument_error());
    assert!(log.entries().is_empty());
    assert_eq!(navigator.len(), 1);
}

#[tokio::test]
async fn test_unknown_animation_rejected_before_events() {
    let navigator = navigator_with_pages(&["home", "settings"]).await;
    let log = EventLog::attach(&navigator);

    let err = navigator
        .push_page("profile", TransitionOptions::new().animation("wobble"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        NavigatorError::UnknownAnimation {
            name: "wobble".to_string()
        }
    );

    let err = navigator
        .pop_page(TransitionOptions::new().animation("wobble"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "unknown_animation");

    assert!(log.entries().is_empty());
    assert_eq!(names(&navigator), vec!["home", "settings"]);
    assert!(!navigator.is_running());
}

#[tokio::test]
async fn test_missing_and_structural_content() {
    let navigator = navigator_with_pages(&["home"]).await;

    let err = navigator
        .push_page("nowhere", TransitionOptions::new())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        NavigatorError::ContentNotFound {
            reference: "nowhere".to_string()
        }
    );

    let err = navigator
        .push_page("broken", TransitionOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "structural");

    assert_eq!(names(&navigator), vec!["home"]);
    assert!(!navigator.is_running());

    // The gate was released; the navigator is still usable.
    navigator.push_page("settings", TransitionOptions::new()).await.unwrap();
    assert_eq!(names(&navigator), vec!["home", "settings"]);
}

#[tokio::test]
async fn test_inline_content_push() {
    let navigator = navigator_with_pages(&["home"]).await;

    let page = navigator
        .push_page("", TransitionOptions::new().markup("<page>Inline</page>"))
        .await
        .unwrap();

    assert_eq!(page.name(), None);
    assert_eq!(page.content().markup(), "<page>Inline</page>");
    assert_eq!(names(&navigator), vec!["home", "<inline>"]);
}

#[tokio::test]
async fn test_pop_reuses_push_animation() {
    let fancy = Arc::new(RecordingAnimator::default());
    let registry = AnimatorRegistry::with_defaults();
    let f = Arc::clone(&fancy);
    registry
        .register("fancy", move |_: &AnimationOptions| -> Arc<dyn TransitionAnimator> {
            f.clone()
        })
        .unwrap();
    let navigator = Navigator::builder()
        .registry(registry)
        .platform(Platform::Ios)
        .default_animation("none")
        .resolver(templates())
        .build();

    push_all(&navigator, &["home"]).await;
    navigator
        .push_page("settings", TransitionOptions::new().animation("fancy"))
        .await
        .unwrap();
    navigator.pop_page(TransitionOptions::new()).await.unwrap();

    let directions: Vec<_> = fancy.calls().iter().map(|c| c.direction).collect();
    assert_eq!(directions, vec!["push", "pop"]);

    // A call-level animation wins over the recorded one.
    navigator
        .push_page("settings", TransitionOptions::new().animation("fancy"))
        .await
        .unwrap();
    navigator
        .pop_page(TransitionOptions::new().animation("none"))
        .await
        .unwrap();
    assert_eq!(fancy.calls().len(), 3);
}

#[tokio::test]
async fn test_explicit_animator_bypasses_registry() {
    let navigator = navigator_with_pages(&["home"]).await;
    let animator = Arc::new(RecordingAnimator::default());

    navigator
        .push_page(
            "settings",
            TransitionOptions::new().animator(animator.clone()),
        )
        .await
        .unwrap();

    assert_eq!(animator.calls().len(), 1);
}

#[tokio::test]
async fn test_default_options_apply_to_every_call() {
    let animator = Arc::new(RecordingAnimator::default());
    let navigator = navigator_with_pages(&["home"]).await;
    let ends = Arc::new(AtomicUsize::new(0));

    let e = Arc::clone(&ends);
    navigator.set_default_options(
        TransitionOptions::new()
            .animator(animator.clone())
            .on_transition_end(move || {
                e.fetch_add(1, Ordering::SeqCst);
            }),
    );

    navigator.push_page("settings", TransitionOptions::new()).await.unwrap();
    navigator.pop_page(TransitionOptions::new()).await.unwrap();

    assert_eq!(animator.calls().len(), 2);
    assert_eq!(ends.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_off_stops_delivery() {
    let navigator = navigator_with_pages(&["home"]).await;
    let count = Arc::new(AtomicUsize::new(0));

    let c = Arc::clone(&count);
    let id = navigator.on(EventKind::PostPush, move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    navigator.push_page("settings", TransitionOptions::new()).await.unwrap();
    assert!(navigator.off(id));
    navigator.push_page("profile", TransitionOptions::new()).await.unwrap();

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(navigator.listener_count(), 0);
}

#[tokio::test]
async fn test_listener_may_query_navigator() {
    let navigator = navigator_with_pages(&["home"]).await;
    let depth = Arc::new(AtomicUsize::new(0));

    let d = Arc::clone(&depth);
    navigator.on(EventKind::PostPush, move |event| {
        let post = event.post().unwrap();
        d.store(post.navigator.len(), Ordering::SeqCst);
    });
    navigator.push_page("settings", TransitionOptions::new()).await.unwrap();

    assert_eq!(depth.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_destroy_clears_stack() {
    let navigator = navigator_with_pages(&["home", "settings"]).await;
    let pages = navigator.pages();
    let log = EventLog::attach(&navigator);

    navigator.destroy();

    assert!(navigator.is_empty());
    assert!(pages.iter().all(|p| p.is_destroyed()));
    assert_eq!(log.of(EventKind::Destroy).len(), 2);
}
