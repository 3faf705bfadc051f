//! Per-call transition options and page selectors.

use std::sync::Arc;

use crate::animation::{AnimationOptions, AnimatorRequest, TransitionAnimator};
use crate::page::PageContent;

/// Callback run once a transition has finished.
pub type TransitionCallback = Arc<dyn Fn() + Send + Sync>;

/// Options accepted by every navigation operation.
///
/// A navigator holds a set of default options; per-call options are laid
/// over them field by field and the call always wins.
#[derive(Clone, Default)]
pub struct TransitionOptions {
    /// Registered animation name ("slide", "fade-md", "none", ...).
    pub animation: Option<String>,
    /// Pre-built animator; takes precedence over `animation`.
    pub animator: Option<Arc<dyn TransitionAnimator>>,
    pub animation_options: Option<AnimationOptions>,
    /// Pop only: rebuild the page below the top before revealing it.
    pub refresh: Option<bool>,
    pub on_transition_end: Option<TransitionCallback>,
    /// Reject with `Canceled` instead of `AlreadyRunning` when another
    /// operation is in flight.
    pub cancel_if_running: Option<bool>,
    /// Inline content used instead of resolving the content reference.
    pub content: Option<PageContent>,
    /// The page is already in the stack; skip content resolution.
    pub(crate) linked: bool,
}

impl TransitionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animation(mut self, name: impl Into<String>) -> Self {
        self.animation = Some(name.into());
        self
    }

    pub fn animator(mut self, animator: Arc<dyn TransitionAnimator>) -> Self {
        self.animator = Some(animator);
        self
    }

    pub fn animation_options(mut self, options: AnimationOptions) -> Self {
        self.animation_options = Some(options);
        self
    }

    /// Parse and set animation options from a relaxed literal string.
    /// Malformed input is logged and ignored.
    pub fn animation_options_str(mut self, raw: &str) -> Self {
        let parsed = AnimationOptions::parse_or_default(raw);
        if !parsed.is_empty() {
            self.animation_options = Some(parsed);
        }
        self
    }

    pub fn refresh(mut self, refresh: bool) -> Self {
        self.refresh = Some(refresh);
        self
    }

    pub fn on_transition_end<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_transition_end = Some(Arc::new(callback));
        self
    }

    pub fn cancel_if_running(mut self, cancel: bool) -> Self {
        self.cancel_if_running = Some(cancel);
        self
    }

    pub fn content(mut self, content: PageContent) -> Self {
        self.content = Some(content);
        self
    }

    /// Inline markup, shorthand for `content(PageContent::new(markup))`.
    pub fn markup(self, markup: impl Into<String>) -> Self {
        self.content(PageContent::new(markup))
    }

    pub fn wants_refresh(&self) -> bool {
        self.refresh.unwrap_or(false)
    }

    pub fn wants_cancel_if_running(&self) -> bool {
        self.cancel_if_running.unwrap_or(false)
    }

    /// Lay `self` over `defaults`; every field set on `self` wins.
    pub fn merged_over(self, defaults: &TransitionOptions) -> TransitionOptions {
        TransitionOptions {
            animation: self.animation.or_else(|| defaults.animation.clone()),
            animator: self.animator.or_else(|| defaults.animator.clone()),
            animation_options: match (self.animation_options, &defaults.animation_options) {
                (Some(call), Some(base)) => Some(call.merged_over(base)),
                (Some(call), None) => Some(call),
                (None, base) => base.clone(),
            },
            refresh: self.refresh.or(defaults.refresh),
            on_transition_end: self
                .on_transition_end
                .or_else(|| defaults.on_transition_end.clone()),
            cancel_if_running: self.cancel_if_running.or(defaults.cancel_if_running),
            content: self.content.or_else(|| defaults.content.clone()),
            linked: self.linked,
        }
    }

    pub(crate) fn animator_request(&self) -> AnimatorRequest<'_> {
        AnimatorRequest {
            animator: self.animator.as_ref(),
            animation: self.animation.as_deref(),
            options: self.animation_options.as_ref(),
        }
    }
}

impl std::fmt::Debug for TransitionOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionOptions")
            .field("animation", &self.animation)
            .field("animator", &self.animator.as_ref().map(|a| a.name().to_string()))
            .field("animation_options", &self.animation_options)
            .field("refresh", &self.refresh)
            .field("on_transition_end", &self.on_transition_end.is_some())
            .field("cancel_if_running", &self.cancel_if_running)
            .field("content", &self.content.is_some())
            .finish()
    }
}

/// Target of [`Navigator::bring_page_top`](super::Navigator::bring_page_top).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelector {
    /// Content reference; the most recent page with this name.
    Name(String),
    /// Stack index; negative values count from the top.
    Index(isize),
}

impl From<&str> for PageSelector {
    fn from(name: &str) -> Self {
        PageSelector::Name(name.to_string())
    }
}

impl From<String> for PageSelector {
    fn from(name: String) -> Self {
        PageSelector::Name(name)
    }
}

impl From<isize> for PageSelector {
    fn from(index: isize) -> Self {
        PageSelector::Index(index)
    }
}

impl From<i32> for PageSelector {
    fn from(index: i32) -> Self {
        PageSelector::Index(index as isize)
    }
}

impl From<usize> for PageSelector {
    fn from(index: usize) -> Self {
        PageSelector::Index(index as isize)
    }
}
