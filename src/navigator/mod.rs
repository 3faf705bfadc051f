//! Page-stack navigation controller.
//!
//! Every mutating operation follows the same pipeline:
//!
//! ```text
//! validate → claim running flag → pre-event (cancellable) → resolve content
//!          → mutate stack → animate → post-event → release → resolve future
//! ```
//!
//! The running flag makes each navigator single-flight: a second mutation
//! started while one is in flight is rejected, never queued. Independent
//! navigators do not share the flag.
//!
//! Once the flag is claimed the rest of the pipeline runs on a spawned task.
//! Dropping the returned future (a `timeout`, a `select!` branch, an aborted
//! task) detaches the caller but the operation still settles: the stack is
//! left at rest and the post-event fires.

mod events;
mod gate;
mod options;

use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::animation::{
    AnimationOptions, AnimatorFactory, AnimatorRegistry, AnimatorRequest, TransitionDone,
    TransitionFinished, TransitionOutcome,
};
use crate::back_button::{BackButtonDispatcher, BackButtonEvent, BackButtonRegistration};
use crate::config::{Config, NavigatorConfig};
use crate::error::{NavigatorError, Result};
use crate::page::{
    ContentResolver, DefaultPageFactory, Page, PageContent, PageFactory, PageStack,
    TemplateResolver, Visibility,
};
use crate::platform::{Platform, PlatformProvider};

pub use events::{EventKind, NavigatorEvent, PageEvent, PostEvent, PreEvent};
pub use gate::{Listener, ListenerId};
pub use options::{PageSelector, TransitionCallback, TransitionOptions};

use gate::{EventGate, RunningGuard};

/// Cleanup performed once a push transition has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterPush {
    Nothing,
    /// Remove the page that was on top before the push (replace).
    RemoveLeaving,
    /// Remove every page below the new top (reset).
    RemoveAllBelow,
}

struct Shared {
    id: Uuid,
    stack: Mutex<PageStack>,
    gate: EventGate,
    factory: AnimatorFactory,
    resolver: Arc<dyn ContentResolver>,
    page_factory: Arc<dyn PageFactory>,
    platform: Arc<dyn PlatformProvider>,
    default_options: RwLock<TransitionOptions>,
    initial_page: Option<String>,
    transition_timeout: Option<Duration>,
    back_button: Mutex<Option<BackButtonRegistration>>,
}

/// Navigation controller owning one page stack.
///
/// Cloning is cheap; clones drive the same stack.
#[derive(Clone)]
pub struct Navigator {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("id", &self.shared.id)
            .field("len", &self.len())
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Navigator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Navigator {
    pub fn builder() -> NavigatorBuilder {
        NavigatorBuilder::new()
    }

    pub fn id(&self) -> Uuid {
        self.shared.id
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Snapshot of the pages, bottom first.
    pub fn pages(&self) -> Vec<Page> {
        self.shared.stack.lock().to_vec()
    }

    pub fn len(&self) -> usize {
        self.shared.stack.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.stack.lock().is_empty()
    }

    /// The top page.
    ///
    /// # Errors
    /// `EmptyStack` if there are no pages.
    pub fn get_current_page(&self) -> Result<Page> {
        self.shared.stack.lock().top().cloned()
    }

    /// Number of registered event listeners.
    pub fn listener_count(&self) -> usize {
        self.shared.gate.listener_count()
    }

    /// True while a mutating operation is in flight.
    pub fn is_running(&self) -> bool {
        self.shared.gate.is_running()
    }

    pub fn platform(&self) -> Platform {
        self.shared.platform.platform()
    }

    pub fn animator_factory(&self) -> &AnimatorFactory {
        &self.shared.factory
    }

    // ------------------------------------------------------------------
    // Events and defaults
    // ------------------------------------------------------------------

    /// Subscribe to an event kind.
    pub fn on<F>(&self, kind: EventKind, handler: F) -> ListenerId
    where
        F: Fn(&NavigatorEvent) + Send + Sync + 'static,
    {
        self.shared.gate.on(kind, Arc::new(handler))
    }

    /// Unsubscribe; returns false if the listener was not registered.
    pub fn off(&self, id: ListenerId) -> bool {
        self.shared.gate.off(id)
    }

    /// Replace the navigator-level options every call is merged over.
    pub fn set_default_options(&self, options: TransitionOptions) {
        *self.shared.default_options.write() = options;
    }

    pub fn default_options(&self) -> TransitionOptions {
        self.shared.default_options.read().clone()
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Push the page resolved from `content_ref` on top of the stack.
    ///
    /// Resolves to the new top page. When the stack was empty the page is
    /// shown immediately without running an animator.
    pub async fn push_page(&self, content_ref: &str, options: TransitionOptions) -> Result<Page> {
        let options = self.prepare(options);
        self.push_with(content_ref, options, AfterPush::Nothing).await
    }

    /// Pop the top page, revealing the one below.
    ///
    /// # Errors
    /// `EmptyStack` if fewer than two pages are present; `RefreshUnsupported`
    /// if `refresh` is requested and the page below the top is inline.
    pub async fn pop_page(&self, options: TransitionOptions) -> Result<Page> {
        let call_animation = options.animation.clone();
        let options = self.prepare(options);
        self.shared.factory.validate(&options.animator_request())?;

        let guard = self.shared.gate.try_begin(
            "popPage",
            EventKind::PrePop,
            options.wants_cancel_if_running(),
        )?;

        let navigator = self.clone();
        run_to_completion("popPage", async move {
            navigator.pop_claimed(guard, options, call_animation).await
        })
        .await
    }

    /// Insert a page at `index` without changing the visible page.
    ///
    /// Negative indices count from the top. An index at or past the top
    /// delegates to [`push_page`](Self::push_page). Resolves to the inserted
    /// page.
    pub async fn insert_page(
        &self,
        index: isize,
        content_ref: &str,
        options: TransitionOptions,
    ) -> Result<Page> {
        let options = self.prepare(options);
        let name = content_name(content_ref, &options)?;
        self.shared.factory.validate(&options.animator_request())?;

        let guard = self.shared.gate.try_begin(
            "insertPage",
            EventKind::PrePush,
            options.wants_cancel_if_running(),
        )?;

        let position = {
            let stack = self.shared.stack.lock();
            let normalized = stack.normalize_index(index);
            (normalized < stack.len()).then_some(normalized)
        };
        let Some(position) = position else {
            drop(guard);
            return self.push_with(content_ref, options, AfterPush::Nothing).await;
        };

        let page = self.build_page(content_ref, name, &options).await?;
        page.record_transition(options.animation.clone(), self.animation_options_for(&options));
        {
            let mut stack = self.shared.stack.lock();
            stack.insert_at(position, page.clone())?;
            stack.sync_back_buttons();
        }

        drop(guard);
        if let Some(callback) = &options.on_transition_end {
            callback();
        }

        tracing::info!(
            navigator = %self.shared.id,
            page = ?page.name(),
            index = position,
            depth = self.len(),
            "Inserted page"
        );
        Ok(page)
    }

    /// Push a page, then remove the page it covered.
    pub async fn replace_page(&self, content_ref: &str, options: TransitionOptions) -> Result<Page> {
        let options = self.prepare(options);
        self.push_with(content_ref, options, AfterPush::RemoveLeaving).await
    }

    /// Push a page, then remove every other page.
    ///
    /// The animation defaults to `"none"`. An empty `content_ref` without
    /// inline content falls back to the configured initial page.
    pub async fn reset_to_page(&self, content_ref: &str, options: TransitionOptions) -> Result<Page> {
        let mut options = self.prepare(options);
        if options.animation.is_none() && options.animator.is_none() {
            options.animation = Some("none".to_string());
        }

        let content_ref = if content_ref.trim().is_empty() && options.content.is_none() {
            self.shared.initial_page.as_deref().unwrap_or(content_ref)
        } else {
            content_ref
        };

        self.push_with(content_ref, options, AfterPush::RemoveAllBelow).await
    }

    /// Move an existing page to the top, running the push animation.
    ///
    /// A name that is not in the stack falls back to
    /// [`push_page`](Self::push_page). A page already on top resolves
    /// immediately without events or animation.
    ///
    /// # Errors
    /// `Index` if a numeric selector is out of range.
    pub async fn bring_page_top(
        &self,
        selector: impl Into<PageSelector>,
        options: TransitionOptions,
    ) -> Result<Page> {
        let selector = selector.into();
        let mut options = self.prepare(options);

        let found = {
            let stack = self.shared.stack.lock();
            let index = match &selector {
                PageSelector::Name(name) => {
                    if name.trim().is_empty() {
                        return Err(NavigatorError::Validation(
                            "page name must not be empty".to_string(),
                        ));
                    }
                    stack.last_index_of(name)
                }
                PageSelector::Index(index) => {
                    let normalized = stack.normalize_index(*index);
                    if normalized >= stack.len() {
                        return Err(NavigatorError::Index {
                            index: *index,
                            len: stack.len(),
                        });
                    }
                    Some(normalized)
                }
            };
            match index {
                Some(index) => Some((stack.at(index as isize)?.clone(), index + 1 == stack.len())),
                None => None,
            }
        };

        let (page, on_top) = match found {
            Some(found) => found,
            None => {
                let name = match &selector {
                    PageSelector::Name(name) => name.clone(),
                    PageSelector::Index(index) => {
                        return Err(NavigatorError::Index {
                            index: *index,
                            len: self.len(),
                        })
                    }
                };
                tracing::debug!(page = %name, "Page not in stack, pushing instead");
                return self.push_with(&name, options, AfterPush::Nothing).await;
            }
        };

        if on_top {
            return Ok(page);
        }

        self.shared.factory.validate(&options.animator_request())?;
        let guard = self.shared.gate.try_begin(
            "bringPageTop",
            EventKind::PrePush,
            options.wants_cancel_if_running(),
        )?;

        options.linked = true;
        let navigator = self.clone();
        run_to_completion("bringPageTop", async move {
            if navigator.emit_pre_push() {
                drop(guard);
                return Err(NavigatorError::Canceled { event: "prepush" });
            }
            navigator.run_push(guard, page, options, AfterPush::Nothing).await
        })
        .await
    }

    /// Push the configured initial page if the stack is empty.
    ///
    /// Resolves to `None` when there is nothing to do.
    pub async fn load_initial_page(&self) -> Result<Option<Page>> {
        if !self.is_empty() {
            self.shared.stack.lock().sync_back_buttons();
            return Ok(None);
        }
        let Some(initial) = self.shared.initial_page.clone() else {
            return Ok(None);
        };
        self.push_page(&initial, TransitionOptions::new().animation("none"))
            .await
            .map(Some)
    }

    /// Destroy every page and detach from the back-button chain.
    pub fn destroy(&self) {
        self.detach_back_button();
        let pages = self.shared.stack.lock().clear();
        for page in pages.iter().rev() {
            self.destroy_page(page);
        }
        tracing::debug!(navigator = %self.shared.id, destroyed = pages.len(), "Navigator destroyed");
    }

    // ------------------------------------------------------------------
    // Back button
    // ------------------------------------------------------------------

    /// Register this navigator as the newest handler in `dispatcher`.
    ///
    /// Replaces any previous registration of this navigator.
    pub fn attach_back_button(&self, dispatcher: &BackButtonDispatcher) {
        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        let registration = dispatcher.register(move |event: &mut BackButtonEvent| {
            match weak.upgrade() {
                Some(shared) => Navigator { shared }.on_device_back_button(event),
                None => event.call_parent_handler(),
            }
        });
        *self.shared.back_button.lock() = Some(registration);
    }

    pub fn detach_back_button(&self) {
        if let Some(registration) = self.shared.back_button.lock().take() {
            registration.unregister();
        }
    }

    /// Handle a device back press: pop if there is a page to return to,
    /// otherwise forward to the enclosing handler.
    pub fn on_device_back_button(&self, event: &mut BackButtonEvent) {
        if self.len() <= 1 {
            event.call_parent_handler();
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let navigator = self.clone();
                handle.spawn(async move {
                    if let Err(err) = navigator.pop_page(TransitionOptions::default()).await {
                        tracing::debug!(error = %err, "Back button pop rejected");
                    }
                });
            }
            Err(_) => {
                tracing::warn!("No async runtime available, ignoring back button");
            }
        }
    }

    // ------------------------------------------------------------------
    // Pipeline
    // ------------------------------------------------------------------

    fn prepare(&self, options: TransitionOptions) -> TransitionOptions {
        options.merged_over(&self.shared.default_options.read())
    }

    fn animation_options_for(&self, options: &TransitionOptions) -> AnimationOptions {
        let base = self.shared.factory.base_options();
        match &options.animation_options {
            Some(call) => call.merged_over(base),
            None => base.clone(),
        }
    }

    fn emit_pre_push(&self) -> bool {
        let current = self.shared.stack.lock().top().ok().cloned();
        let pre = PreEvent::new(self.clone(), current);
        self.shared.gate.emit_pre(NavigatorEvent::PrePush(pre))
    }

    async fn push_with(
        &self,
        content_ref: &str,
        options: TransitionOptions,
        after: AfterPush,
    ) -> Result<Page> {
        let name = content_name(content_ref, &options)?.map(str::to_string);
        self.shared.factory.validate(&options.animator_request())?;

        let guard = self.shared.gate.try_begin(
            "pushPage",
            EventKind::PrePush,
            options.wants_cancel_if_running(),
        )?;

        let navigator = self.clone();
        let content_ref = content_ref.to_string();
        run_to_completion("pushPage", async move {
            if navigator.emit_pre_push() {
                drop(guard);
                return Err(NavigatorError::Canceled { event: "prepush" });
            }
            let page = navigator
                .build_page(&content_ref, name.as_deref(), &options)
                .await?;
            navigator.run_push(guard, page, options, after).await
        })
        .await
    }

    async fn build_page(
        &self,
        content_ref: &str,
        name: Option<&str>,
        options: &TransitionOptions,
    ) -> Result<Page> {
        let content = match &options.content {
            Some(content) => content.clone(),
            None => self.shared.resolver.resolve(content_ref).await?,
        };
        self.shared.page_factory.create(name, content)
    }

    async fn run_push(
        &self,
        guard: RunningGuard,
        page: Page,
        options: TransitionOptions,
        after: AfterPush,
    ) -> Result<Page> {
        let resolved = self
            .shared
            .factory
            .resolve(options.animator_request(), self.platform())?;
        page.record_transition(options.animation.clone(), self.animation_options_for(&options));

        let leave = {
            let mut stack = self.shared.stack.lock();
            let leave = stack.top().ok().cloned();
            if options.linked {
                let index = stack.position(&page).ok_or_else(|| {
                    NavigatorError::Validation("page is no longer in the stack".to_string())
                })?;
                stack.move_to_top(index)?;
            } else {
                stack.append(page.clone());
            }
            stack.sync_back_buttons();
            leave
        };
        let enter = page;

        if let Some(leave) = &leave {
            tracing::debug!(
                navigator = %self.shared.id,
                animator = %resolved.name,
                enter = ?enter.name(),
                leave = ?leave.name(),
                linked = options.linked,
                "Pushing page"
            );
            let (done, finished) = TransitionDone::channel();
            resolved.animator.push(&enter, leave, done);
            self.await_transition(finished, "push").await;
            self.set_visibility(leave, Visibility::Hidden);
        }
        self.set_visibility(&enter, Visibility::Shown);

        let removed = {
            let mut stack = self.shared.stack.lock();
            let removed = match (after, &leave) {
                (AfterPush::RemoveLeaving, Some(leave)) => stack
                    .position(leave)
                    .and_then(|index| stack.remove_at(index).ok())
                    .into_iter()
                    .collect(),
                (AfterPush::RemoveAllBelow, _) => stack.drain_below_top(),
                _ => Vec::new(),
            };
            stack.sync_back_buttons();
            removed
        };
        for page in removed.iter().rev() {
            self.destroy_page(page);
        }

        drop(guard);
        self.shared.gate.emit(&NavigatorEvent::PostPush(PostEvent {
            navigator: self.clone(),
            enter_page: enter.clone(),
            leave_page: leave,
        }));
        if let Some(callback) = &options.on_transition_end {
            callback();
        }

        tracing::info!(
            navigator = %self.shared.id,
            top = ?enter.name(),
            depth = self.len(),
            removed = removed.len(),
            "Pushed page"
        );
        Ok(enter)
    }

    async fn pop_claimed(
        &self,
        guard: RunningGuard,
        options: TransitionOptions,
        call_animation: Option<String>,
    ) -> Result<Page> {
        let below_top = {
            let stack = self.shared.stack.lock();
            if stack.len() <= 1 {
                return Err(NavigatorError::EmptyStack);
            }
            stack.at(stack.len() as isize - 2)?.clone()
        };

        if options.wants_refresh() {
            let Some(name) = below_top.name().map(str::to_string) else {
                return Err(NavigatorError::RefreshUnsupported);
            };
            self.refresh_page(&below_top, &name).await?;
        }

        let (enter, leave, enter_index) = {
            let stack = self.shared.stack.lock();
            let len = stack.len();
            (
                stack.at(len as isize - 2)?.clone(),
                stack.top()?.clone(),
                len - 2,
            )
        };

        let pre = PreEvent::new(self.clone(), Some(leave.clone()))
            .with_pages(enter.clone(), leave.clone());
        if self.shared.gate.emit_pre(NavigatorEvent::PrePop(pre)) {
            return Err(NavigatorError::Canceled { event: "prepop" });
        }

        // The leaving page's own push animation is reused unless the call
        // names one.
        let leave_animation = leave.animation();
        let animation_options = match &options.animation_options {
            Some(call) => call.merged_over(&leave.animation_options()),
            None => leave.animation_options(),
        };
        let request = AnimatorRequest {
            animator: options.animator.as_ref(),
            animation: call_animation
                .as_deref()
                .or(leave_animation.as_deref())
                .or(options.animation.as_deref()),
            options: Some(&animation_options),
        };
        let resolved = self.shared.factory.resolve(request, self.platform())?;

        enter.set_back_button_visible(enter_index > 0);
        tracing::debug!(
            navigator = %self.shared.id,
            animator = %resolved.name,
            enter = ?enter.name(),
            leave = ?leave.name(),
            "Popping page"
        );

        let (done, finished) = TransitionDone::channel();
        resolved.animator.pop(&enter, &leave, done);
        self.await_transition(finished, "pop").await;

        self.set_visibility(&enter, Visibility::Shown);
        self.set_visibility(&leave, Visibility::Hidden);
        {
            let mut stack = self.shared.stack.lock();
            if let Some(index) = stack.position(&leave) {
                stack.remove_at(index)?;
            }
            stack.sync_back_buttons();
        }
        self.destroy_page(&leave);

        drop(guard);
        self.shared.gate.emit(&NavigatorEvent::PostPop(PostEvent {
            navigator: self.clone(),
            enter_page: enter.clone(),
            leave_page: Some(leave.clone()),
        }));
        if let Some(callback) = &options.on_transition_end {
            callback();
        }

        tracing::info!(
            navigator = %self.shared.id,
            top = ?enter.name(),
            depth = self.len(),
            "Popped page"
        );
        Ok(enter)
    }

    /// Rebuild `stale` from its content reference, keeping its position.
    async fn refresh_page(&self, stale: &Page, name: &str) -> Result<()> {
        let content = self.shared.resolver.resolve(name).await?;
        let fresh = self.shared.page_factory.create(Some(name), content)?;
        fresh.record_transition(stale.animation(), stale.animation_options());

        {
            let mut stack = self.shared.stack.lock();
            let index = stack.position(stale).ok_or_else(|| {
                NavigatorError::Validation("page is no longer in the stack".to_string())
            })?;
            stack.replace_at(index, fresh)?;
            stack.sync_back_buttons();
        }
        self.destroy_page(stale);

        tracing::debug!(navigator = %self.shared.id, page = name, "Refreshed page");
        Ok(())
    }

    async fn await_transition(&self, finished: TransitionFinished, direction: &'static str) {
        match finished.wait(self.shared.transition_timeout).await {
            TransitionOutcome::Completed => {}
            TransitionOutcome::Abandoned => {
                tracing::warn!(
                    navigator = %self.shared.id,
                    direction,
                    "Animator dropped its completion handle, finishing transition"
                );
            }
            TransitionOutcome::TimedOut => {
                tracing::warn!(
                    navigator = %self.shared.id,
                    direction,
                    timeout_ms = self
                        .shared
                        .transition_timeout
                        .map(|t| t.as_millis() as u64)
                        .unwrap_or(0),
                    "Transition did not complete in time, finishing it"
                );
            }
        }
    }

    fn set_visibility(&self, page: &Page, visibility: Visibility) {
        if !page.set_visibility(visibility) {
            return;
        }
        let event = PageEvent {
            navigator: self.clone(),
            page: page.clone(),
        };
        match visibility {
            Visibility::Shown => self.shared.gate.emit(&NavigatorEvent::Show(event)),
            Visibility::Hidden => self.shared.gate.emit(&NavigatorEvent::Hide(event)),
        }
    }

    fn destroy_page(&self, page: &Page) {
        if page.is_shown() {
            self.set_visibility(page, Visibility::Hidden);
        }
        if page.mark_destroyed() {
            self.shared.gate.emit(&NavigatorEvent::Destroy(PageEvent {
                navigator: self.clone(),
                page: page.clone(),
            }));
        }
    }
}

/// Drive a claimed operation to the end on the runtime.
///
/// The caller only awaits the outcome; dropping that await does not stop the
/// operation. Without a runtime the work runs inline.
async fn run_to_completion<F>(operation: &'static str, work: F) -> Result<Page>
where
    F: Future<Output = Result<Page>> + Send + 'static,
{
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        return work.await;
    };
    match handle.spawn(work).await {
        Ok(result) => result,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(_) => {
            tracing::warn!(operation, "Runtime shut down before the operation settled");
            Err(NavigatorError::Interrupted { operation })
        }
    }
}

/// Name a new page gets from its content reference; inline pages may be
/// anonymous.
fn content_name<'a>(content_ref: &'a str, options: &TransitionOptions) -> Result<Option<&'a str>> {
    if !content_ref.trim().is_empty() {
        return Ok(Some(content_ref));
    }
    if options.content.is_some() {
        return Ok(None);
    }
    Err(NavigatorError::Validation(
        "content reference must not be empty without inline content".to_string(),
    ))
}

/// Builder for [`Navigator`].
pub struct NavigatorBuilder {
    config: NavigatorConfig,
    registry: Option<AnimatorRegistry>,
    resolver: Option<Arc<dyn ContentResolver>>,
    page_factory: Option<Arc<dyn PageFactory>>,
    platform: Option<Arc<dyn PlatformProvider>>,
    default_options: TransitionOptions,
}

impl Default for NavigatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigatorBuilder {
    pub fn new() -> Self {
        Self {
            config: NavigatorConfig::default(),
            registry: None,
            resolver: None,
            page_factory: None,
            platform: None,
            default_options: TransitionOptions::default(),
        }
    }

    /// Builder preloaded with the navigator section and templates of `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .config(config.navigator.clone())
            .resolver(TemplateResolver::from_templates(config.templates.clone()))
    }

    pub fn config(mut self, config: NavigatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(mut self, registry: AnimatorRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn resolver(mut self, resolver: impl ContentResolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    pub fn page_factory(mut self, factory: impl PageFactory + 'static) -> Self {
        self.page_factory = Some(Arc::new(factory));
        self
    }

    pub fn platform(mut self, platform: impl PlatformProvider + 'static) -> Self {
        self.platform = Some(Arc::new(platform));
        self
    }

    pub fn default_animation(mut self, name: impl Into<String>) -> Self {
        self.config.default_animation = Some(name.into());
        self
    }

    pub fn initial_page(mut self, name: impl Into<String>) -> Self {
        self.config.initial_page = Some(name.into());
        self
    }

    pub fn transition_timeout(mut self, timeout: Duration) -> Self {
        self.config.transition_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn default_options(mut self, options: TransitionOptions) -> Self {
        self.default_options = options;
        self
    }

    pub fn build(self) -> Navigator {
        let base_options = match self.config.animation_options.as_deref() {
            Some(raw) => AnimationOptions::parse_or_default(raw),
            None => AnimationOptions::default(),
        };
        let registry = self
            .registry
            .unwrap_or_else(|| AnimatorRegistry::global().clone());
        let factory = AnimatorFactory::new(
            registry,
            self.config.default_animation.clone(),
            base_options,
        );

        let platform: Arc<dyn PlatformProvider> = match self.platform {
            Some(platform) => platform,
            None => Arc::new(self.config.platform.unwrap_or_else(Platform::detect)),
        };
        let resolver: Arc<dyn ContentResolver> = self
            .resolver
            .unwrap_or_else(|| Arc::new(TemplateResolver::new()));
        let page_factory: Arc<dyn PageFactory> = self
            .page_factory
            .unwrap_or_else(|| Arc::new(DefaultPageFactory::new(self.config.page_tag.clone())));

        let navigator = Navigator {
            shared: Arc::new(Shared {
                id: Uuid::new_v4(),
                stack: Mutex::new(PageStack::new()),
                gate: EventGate::new(),
                factory,
                resolver,
                page_factory,
                platform,
                default_options: RwLock::new(self.default_options),
                initial_page: self.config.initial_page.clone(),
                transition_timeout: self.config.transition_timeout_ms.map(Duration::from_millis),
                back_button: Mutex::new(None),
            }),
        };

        tracing::debug!(
            navigator = %navigator.shared.id,
            platform = ?navigator.platform(),
            default_animation = ?self.config.default_animation,
            "Navigator created"
        );
        navigator
    }
}

impl From<PageContent> for TransitionOptions {
    fn from(content: PageContent) -> Self {
        TransitionOptions::new().content(content)
    }
}
