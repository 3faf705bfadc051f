//! Device back-button routing and the per-page back control.
//!
//! Handlers form a chain, newest first. The newest handler sees a press
//! first and may forward it to the handler registered before it with
//! [`BackButtonEvent::call_parent_handler`]; forwarding past the oldest
//! handler reaches the root fallback (typically "exit the app").

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::animation::AnimationOptions;
use crate::error::Result;
use crate::navigator::{Navigator, TransitionOptions};
use crate::page::Page;

/// A handler in the back-button chain.
pub type BackButtonHandler = Arc<dyn Fn(&mut BackButtonEvent) + Send + Sync>;

type Fallback = Arc<dyn Fn() + Send + Sync>;

/// One back press travelling down the handler chain.
pub struct BackButtonEvent {
    chain: Vec<BackButtonHandler>,
    position: usize,
    fallback: Option<Fallback>,
    reached_root: bool,
}

impl BackButtonEvent {
    /// Forward the press to the next older handler, or to the root fallback.
    pub fn call_parent_handler(&mut self) {
        self.position += 1;
        match self.chain.get(self.position).cloned() {
            Some(handler) => handler(self),
            None => self.fall_back(),
        }
    }

    fn fall_back(&mut self) {
        self.reached_root = true;
        if let Some(fallback) = &self.fallback {
            fallback();
        }
    }

    /// True once the press went past every registered handler.
    pub fn reached_root(&self) -> bool {
        self.reached_root
    }
}

impl std::fmt::Debug for BackButtonEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackButtonEvent")
            .field("chain", &self.chain.len())
            .field("position", &self.position)
            .field("reached_root", &self.reached_root)
            .finish()
    }
}

#[derive(Default)]
struct DispatcherInner {
    handlers: Vec<(u64, BackButtonHandler)>,
    next_id: u64,
    fallback: Option<Fallback>,
}

/// Ordered set of back-button handlers.
#[derive(Clone, Default)]
pub struct BackButtonDispatcher {
    inner: Arc<Mutex<DispatcherInner>>,
}

impl BackButtonDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher whose chain ends in `fallback`.
    pub fn with_fallback<F>(fallback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let dispatcher = Self::new();
        dispatcher.inner.lock().fallback = Some(Arc::new(fallback));
        dispatcher
    }

    /// Add `handler` as the newest link of the chain.
    ///
    /// The handler stays registered until the returned registration is
    /// dropped or unregistered.
    pub fn register<F>(&self, handler: F) -> BackButtonRegistration
    where
        F: Fn(&mut BackButtonEvent) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.handlers.push((id, Arc::new(handler)));
        BackButtonRegistration {
            id,
            dispatcher: Arc::downgrade(&self.inner),
        }
    }

    pub fn handler_count(&self) -> usize {
        self.inner.lock().handlers.len()
    }

    /// Deliver one back press.
    ///
    /// Returns true if a handler consumed it, false if it reached the root.
    pub fn dispatch(&self) -> bool {
        let (chain, fallback) = {
            let inner = self.inner.lock();
            let chain: Vec<BackButtonHandler> = inner
                .handlers
                .iter()
                .rev()
                .map(|(_, handler)| Arc::clone(handler))
                .collect();
            (chain, inner.fallback.clone())
        };

        tracing::debug!(handlers = chain.len(), "Dispatching back button");
        let mut event = BackButtonEvent {
            chain,
            position: 0,
            fallback,
            reached_root: false,
        };
        match event.chain.first().cloned() {
            Some(handler) => handler(&mut event),
            None => event.fall_back(),
        }
        !event.reached_root
    }
}

/// Keeps a handler in the chain; dropping it removes the handler.
pub struct BackButtonRegistration {
    id: u64,
    dispatcher: Weak<Mutex<DispatcherInner>>,
}

impl BackButtonRegistration {
    pub fn unregister(self) {
        drop(self);
    }
}

impl Drop for BackButtonRegistration {
    fn drop(&mut self) {
        if let Some(inner) = self.dispatcher.upgrade() {
            inner.lock().handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Back control shown on pages above the bottom of the stack.
#[derive(Debug, Clone, Default)]
pub struct BackButton {
    pub animation: Option<String>,
    /// Relaxed options literal, e.g. `{duration: 0.2, timing: 'ease-in'}`.
    pub animation_options: Option<String>,
    pub refresh: bool,
}

impl BackButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options used when the control is pressed. A malformed options string
    /// is logged and ignored.
    pub fn transition_options(&self) -> TransitionOptions {
        let mut options = TransitionOptions::new().refresh(self.refresh);
        if let Some(animation) = &self.animation {
            options = options.animation(animation.clone());
        }
        if let Some(raw) = &self.animation_options {
            let parsed = AnimationOptions::parse_or_default(raw);
            if !parsed.is_empty() {
                options = options.animation_options(parsed);
            }
        }
        options
    }

    pub fn is_visible_on(&self, page: &Page) -> bool {
        page.back_button_visible()
    }

    /// Pop `navigator` with this control's options.
    ///
    /// Resolves to `None` when there is no page to go back to.
    pub async fn press(&self, navigator: &Navigator) -> Result<Option<Page>> {
        if navigator.len() <= 1 {
            tracing::debug!("Back control pressed on bottom page, ignoring");
            return Ok(None);
        }
        navigator.pop_page(self.transition_options()).await.map(Some)
    }
}
