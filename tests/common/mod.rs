//! Shared test utilities and mock animators.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use pagestack::animation::{AnimationOptions, AnimatorRegistry, TransitionAnimator, TransitionDone};
use pagestack::navigator::{EventKind, Navigator, NavigatorBuilder, NavigatorEvent};
use pagestack::page::{Page, TemplateResolver};
use pagestack::platform::Platform;

/// Templates every test navigator can resolve.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("home", "<page id=\"home\">Home</page>"),
    ("settings", "<page id=\"settings\">Settings</page>"),
    ("profile", "<page id=\"profile\">Profile</page>"),
    ("about", "<page id=\"about\">About</page>"),
    ("detail", "<page id=\"detail\">Detail</page>"),
    ("broken", "<div>Not a page</div>"),
];

pub fn templates() -> TemplateResolver {
    TemplateResolver::from_templates(TEMPLATES.iter().copied())
}

/// Builder with an isolated registry, fixed platform and instant transitions.
pub fn builder() -> NavigatorBuilder {
    Navigator::builder()
        .registry(AnimatorRegistry::with_defaults())
        .platform(Platform::Ios)
        .default_animation("none")
        .resolver(templates())
}

pub fn navigator() -> Navigator {
    builder().build()
}

/// Navigator whose default animation is `animator`, registered as "manual".
pub fn navigator_with<A>(animator: Arc<A>) -> Navigator
where
    A: TransitionAnimator + 'static,
{
    let registry = AnimatorRegistry::with_defaults();
    registry
        .register("manual", move |_: &AnimationOptions| -> Arc<dyn TransitionAnimator> {
            animator.clone()
        })
        .unwrap();
    Navigator::builder()
        .registry(registry)
        .platform(Platform::Ios)
        .default_animation("manual")
        .resolver(templates())
        .build()
}

/// Navigator preloaded with `names`, bottom first, without animation.
pub async fn navigator_with_pages(names: &[&str]) -> Navigator {
    let navigator = navigator();
    push_all(&navigator, names).await;
    navigator
}

pub async fn push_all(navigator: &Navigator, names: &[&str]) {
    for name in names {
        navigator
            .push_page(name, Default::default())
            .await
            .unwrap_or_else(|e| panic!("push {} failed: {}", name, e));
    }
}

/// Page names, bottom first; inline pages show as "<inline>".
pub fn names(navigator: &Navigator) -> Vec<String> {
    navigator
        .pages()
        .iter()
        .map(|page| page.name().unwrap_or("<inline>").to_string())
        .collect()
}

pub fn back_buttons(navigator: &Navigator) -> Vec<bool> {
    navigator
        .pages()
        .iter()
        .map(Page::back_button_visible)
        .collect()
}

/// One recorded animator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimatorCall {
    pub direction: &'static str,
    pub enter: String,
    pub leave: String,
}

fn call(direction: &'static str, enter: &Page, leave: &Page) -> AnimatorCall {
    AnimatorCall {
        direction,
        enter: enter.name().unwrap_or("<inline>").to_string(),
        leave: leave.name().unwrap_or("<inline>").to_string(),
    }
}

/// Completes every transition immediately and records it.
#[derive(Default)]
pub struct RecordingAnimator {
    calls: Mutex<Vec<AnimatorCall>>,
}

impl RecordingAnimator {
    pub fn calls(&self) -> Vec<AnimatorCall> {
        self.calls.lock().clone()
    }
}

impl TransitionAnimator for RecordingAnimator {
    fn push(&self, enter: &Page, leave: &Page, done: TransitionDone) {
        self.calls.lock().push(call("push", enter, leave));
        done.complete();
    }

    fn pop(&self, enter: &Page, leave: &Page, done: TransitionDone) {
        self.calls.lock().push(call("pop", enter, leave));
        done.complete();
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Holds transitions open until the test completes them.
#[derive(Default)]
pub struct ManualAnimator {
    calls: Mutex<Vec<AnimatorCall>>,
    pending: Mutex<Vec<TransitionDone>>,
}

impl ManualAnimator {
    pub fn calls(&self) -> Vec<AnimatorCall> {
        self.calls.lock().clone()
    }

    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Complete the oldest pending transition; false if none is pending.
    pub fn complete_next(&self) -> bool {
        let done = {
            let mut pending = self.pending.lock();
            if pending.is_empty() {
                return false;
            }
            pending.remove(0)
        };
        done.complete();
        true
    }

    /// Drop the oldest pending handle without completing it.
    pub fn abandon_next(&self) -> bool {
        let mut pending = self.pending.lock();
        if pending.is_empty() {
            return false;
        }
        drop(pending.remove(0));
        true
    }
}

impl TransitionAnimator for ManualAnimator {
    fn push(&self, enter: &Page, leave: &Page, done: TransitionDone) {
        self.calls.lock().push(call("push", enter, leave));
        self.pending.lock().push(done);
    }

    fn pop(&self, enter: &Page, leave: &Page, done: TransitionDone) {
        self.calls.lock().push(call("pop", enter, leave));
        self.pending.lock().push(done);
    }

    fn name(&self) -> &str {
        "manual"
    }
}

/// Wait until `animator` has a pending transition, yielding to other tasks.
pub async fn wait_for_pending(animator: &ManualAnimator, count: usize) {
    for _ in 0..1000 {
        if animator.pending() >= count {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("animator never reached {} pending transition(s)", count);
}

/// Yield until the navigator has no operation in flight.
pub async fn wait_until_idle(navigator: &Navigator) {
    for _ in 0..1000 {
        if !navigator.is_running() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("navigator never became idle");
}

/// Records `"<event>:<page>"` strings for every event kind.
#[derive(Clone, Default)]
pub struct EventLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub fn attach(navigator: &Navigator) -> Self {
        let log = Self::default();
        for kind in [
            EventKind::PrePush,
            EventKind::PostPush,
            EventKind::PrePop,
            EventKind::PostPop,
            EventKind::Show,
            EventKind::Hide,
            EventKind::Destroy,
        ] {
            let entries = Arc::clone(&log.entries);
            navigator.on(kind, move |event: &NavigatorEvent| {
                entries.lock().push(describe(event));
            });
        }
        log
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Entries of one event kind only.
    pub fn of(&self, kind: EventKind) -> Vec<String> {
        let prefix = format!("{}:", kind.as_str());
        self.entries()
            .into_iter()
            .filter(|entry| entry.starts_with(&prefix))
            .collect()
    }
}

fn label(page: Option<&Page>) -> String {
    match page {
        Some(page) => page.name().unwrap_or("<inline>").to_string(),
        None => "-".to_string(),
    }
}

fn describe(event: &NavigatorEvent) -> String {
    let kind = event.kind().as_str();
    if let Some(pre) = event.pre() {
        return format!("{}:{}", kind, label(pre.current_page.as_ref()));
    }
    if let Some(post) = event.post() {
        return format!(
            "{}:{}<-{}",
            kind,
            label(Some(&post.enter_page)),
            label(post.leave_page.as_ref())
        );
    }
    format!("{}:{}", kind, label(event.page()))
}

pub const SHORT: Duration = Duration::from_millis(50);
