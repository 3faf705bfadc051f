//! Stack-based page navigation with animated transitions.

pub mod animation;
pub mod back_button;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod navigator;
pub mod page;
pub mod platform;

pub use back_button::{BackButton, BackButtonDispatcher, BackButtonEvent};
pub use error::{NavigatorError, Result};
pub use navigator::{Navigator, NavigatorBuilder, PageSelector, TransitionOptions};
pub use page::{Page, PageContent};
pub use platform::Platform;
