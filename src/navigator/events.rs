//! Events emitted by a navigator.

use std::sync::atomic::{AtomicBool, Ordering};

use super::Navigator;
use crate::page::Page;

/// Event names observers subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PrePush,
    PostPush,
    PrePop,
    PostPop,
    Show,
    Hide,
    Destroy,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::PrePush => "prepush",
            EventKind::PostPush => "postpush",
            EventKind::PrePop => "prepop",
            EventKind::PostPop => "postpop",
            EventKind::Show => "show",
            EventKind::Hide => "hide",
            EventKind::Destroy => "destroy",
        }
    }
}

/// Cancellable notification sent before a push or pop begins.
#[derive(Debug)]
pub struct PreEvent {
    pub navigator: Navigator,
    /// Top of the stack when the operation was requested.
    pub current_page: Option<Page>,
    /// Pop only: the page about to be revealed.
    pub enter_page: Option<Page>,
    /// Pop only: the page about to be removed.
    pub leave_page: Option<Page>,
    canceled: AtomicBool,
}

impl PreEvent {
    pub(crate) fn new(navigator: Navigator, current_page: Option<Page>) -> Self {
        Self {
            navigator,
            current_page,
            enter_page: None,
            leave_page: None,
            canceled: AtomicBool::new(false),
        }
    }

    pub(crate) fn with_pages(mut self, enter: Page, leave: Page) -> Self {
        self.enter_page = Some(enter);
        self.leave_page = Some(leave);
        self
    }

    /// Abort the operation. Only honored during synchronous dispatch.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }
}

/// Notification sent after a push or pop completed.
#[derive(Debug, Clone)]
pub struct PostEvent {
    pub navigator: Navigator,
    pub enter_page: Page,
    /// `None` when the pushed page was the first one.
    pub leave_page: Option<Page>,
}

/// Page lifecycle notification.
#[derive(Debug, Clone)]
pub struct PageEvent {
    pub navigator: Navigator,
    pub page: Page,
}

#[derive(Debug)]
pub enum NavigatorEvent {
    PrePush(PreEvent),
    PostPush(PostEvent),
    PrePop(PreEvent),
    PostPop(PostEvent),
    Show(PageEvent),
    Hide(PageEvent),
    Destroy(PageEvent),
}

impl NavigatorEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            NavigatorEvent::PrePush(_) => EventKind::PrePush,
            NavigatorEvent::PostPush(_) => EventKind::PostPush,
            NavigatorEvent::PrePop(_) => EventKind::PrePop,
            NavigatorEvent::PostPop(_) => EventKind::PostPop,
            NavigatorEvent::Show(_) => EventKind::Show,
            NavigatorEvent::Hide(_) => EventKind::Hide,
            NavigatorEvent::Destroy(_) => EventKind::Destroy,
        }
    }

    /// The cancellable payload, for pre-events.
    pub fn pre(&self) -> Option<&PreEvent> {
        match self {
            NavigatorEvent::PrePush(event) | NavigatorEvent::PrePop(event) => Some(event),
            _ => None,
        }
    }

    pub fn post(&self) -> Option<&PostEvent> {
        match self {
            NavigatorEvent::PostPush(event) | NavigatorEvent::PostPop(event) => Some(event),
            _ => None,
        }
    }

    pub fn page(&self) -> Option<&Page> {
        match self {
            NavigatorEvent::Show(event)
            | NavigatorEvent::Hide(event)
            | NavigatorEvent::Destroy(event) => Some(&event.page),
            _ => None,
        }
    }

    /// Cancel a pre-event; returns false for events that cannot be canceled.
    pub fn cancel(&self) -> bool {
        match self.pre() {
            Some(event) => {
                event.cancel();
                true
            }
            None => false,
        }
    }
}
