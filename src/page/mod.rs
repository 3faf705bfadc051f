//! Pages and the page stack.
//!
//! A [`Page`] is a cheap-to-clone handle; clones refer to the same page and
//! compare equal. Only the navigator mutates page state.

mod content;
mod stack;

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::animation::AnimationOptions;

pub use content::{ContentResolver, DefaultPageFactory, PageFactory, TemplateResolver};
pub use stack::PageStack;

/// Whether a page is the visible one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Shown,
}

/// Resolved page content, opaque to the navigator apart from its root tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    markup: String,
}

impl PageContent {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Tag name of the root element, lowercased (`"page"` for `<page id="a">`).
    pub fn root_tag(&self) -> Option<String> {
        let rest = self.markup.trim_start().strip_prefix('<')?;
        let tag: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if tag.is_empty() {
            None
        } else {
            Some(tag.to_ascii_lowercase())
        }
    }
}

/// Snapshot of a page's mutable state.
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub visibility: Visibility,
    pub back_button_visible: bool,
    pub destroyed: bool,
    /// Animation the page was pushed with; reused when it is popped.
    pub animation: Option<String>,
    pub animation_options: AnimationOptions,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            visibility: Visibility::Hidden,
            back_button_visible: false,
            destroyed: false,
            animation: None,
            animation_options: AnimationOptions::default(),
        }
    }
}

struct PageInner {
    id: Uuid,
    name: Option<String>,
    content: PageContent,
    state: Mutex<PageState>,
}

/// A navigable view held in a [`PageStack`].
#[derive(Clone)]
pub struct Page {
    inner: Arc<PageInner>,
}

impl Page {
    /// Create a hidden page. `name` is the content reference it was resolved
    /// from; inline pages have none.
    pub fn new(name: Option<String>, content: PageContent) -> Self {
        Self {
            inner: Arc::new(PageInner {
                id: Uuid::new_v4(),
                name,
                content,
                state: Mutex::new(PageState::default()),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub fn content(&self) -> &PageContent {
        &self.inner.content
    }

    pub fn state(&self) -> PageState {
        self.inner.state.lock().clone()
    }

    pub fn visibility(&self) -> Visibility {
        self.inner.state.lock().visibility
    }

    pub fn is_shown(&self) -> bool {
        self.visibility() == Visibility::Shown
    }

    pub fn back_button_visible(&self) -> bool {
        self.inner.state.lock().back_button_visible
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.state.lock().destroyed
    }

    pub fn animation(&self) -> Option<String> {
        self.inner.state.lock().animation.clone()
    }

    pub fn animation_options(&self) -> AnimationOptions {
        self.inner.state.lock().animation_options.clone()
    }

    /// Returns true if the visibility actually changed.
    pub(crate) fn set_visibility(&self, visibility: Visibility) -> bool {
        let mut state = self.inner.state.lock();
        let changed = state.visibility != visibility;
        state.visibility = visibility;
        changed
    }

    pub(crate) fn set_back_button_visible(&self, visible: bool) {
        self.inner.state.lock().back_button_visible = visible;
    }

    pub(crate) fn record_transition(&self, animation: Option<String>, options: AnimationOptions) {
        let mut state = self.inner.state.lock();
        state.animation = animation;
        state.animation_options = options;
    }

    /// Returns false if the page was already destroyed.
    pub(crate) fn mark_destroyed(&self) -> bool {
        let mut state = self.inner.state.lock();
        if state.destroyed {
            return false;
        }
        state.destroyed = true;
        state.visibility = Visibility::Hidden;
        state.back_button_visible = false;
        true
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Page {}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Page")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("visibility", &state.visibility)
            .field("back_button_visible", &state.back_button_visible)
            .finish_non_exhaustive()
    }
}
