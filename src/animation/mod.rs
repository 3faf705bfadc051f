//! Transition animators.
//!
//! An animator performs the visual hand-off between the page entering the
//! top of the stack and the page leaving it. The navigator never waits on
//! the animator directly; it hands over a [`TransitionDone`] and suspends
//! until the animator completes it.
//!
//! ```text
//! TransitionOptions ──→ AnimatorFactory ──→ AnimatorRegistry ──→ TransitionAnimator
//!                           (name/platform)      (ctor lookup)       push / pop
//! ```

mod effects;
mod factory;
mod options;
mod registry;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;

use crate::page::Page;

pub use effects::{Effect, EffectAnimator, NoneAnimator};
pub use factory::{AnimatorFactory, AnimatorRequest, ResolvedAnimator};
pub use options::AnimationOptions;
pub use registry::{AnimatorEntry, AnimatorRegistry, DEFAULT_ANIMATION};

/// Strategy performing push and pop transitions.
///
/// Implementations must eventually call [`TransitionDone::complete`] (or drop
/// the handle); the navigator stays locked until they do, unless a transition
/// timeout is configured.
pub trait TransitionAnimator: Send + Sync {
    /// `enter` becomes the new top page, `leave` was the top before.
    fn push(&self, enter: &Page, leave: &Page, done: TransitionDone);

    /// `enter` is revealed below `leave`, which is about to be removed.
    fn pop(&self, enter: &Page, leave: &Page, done: TransitionDone);

    /// Name used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

/// Builds an animator for one transition.
pub trait AnimatorConstructor: Send + Sync {
    fn construct(&self, options: &AnimationOptions) -> Arc<dyn TransitionAnimator>;
}

impl<F> AnimatorConstructor for F
where
    F: Fn(&AnimationOptions) -> Arc<dyn TransitionAnimator> + Send + Sync,
{
    fn construct(&self, options: &AnimationOptions) -> Arc<dyn TransitionAnimator> {
        self(options)
    }
}

/// Completion handle passed to an animator.
pub struct TransitionDone {
    sender: Option<oneshot::Sender<()>>,
}

impl TransitionDone {
    /// Create a completion handle and the receiving half the caller awaits.
    pub fn channel() -> (TransitionDone, TransitionFinished) {
        let (sender, receiver) = oneshot::channel();
        (
            TransitionDone {
                sender: Some(sender),
            },
            TransitionFinished { receiver },
        )
    }

    /// Signal that the visual transition has finished.
    pub fn complete(mut self) {
        if let Some(sender) = self.sender.take() {
            let _ = sender.send(());
        }
    }
}

/// How a transition ended from the navigator's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    Completed,
    /// The animator dropped its handle without completing it.
    Abandoned,
    /// The configured transition timeout elapsed first.
    TimedOut,
}

/// Receiving side of a [`TransitionDone`].
pub struct TransitionFinished {
    receiver: oneshot::Receiver<()>,
}

impl TransitionFinished {
    /// Wait for completion, optionally bounded by `timeout`.
    pub async fn wait(self, timeout: Option<Duration>) -> TransitionOutcome {
        let outcome = match timeout {
            Some(limit) => match tokio::time::timeout(limit, self.receiver).await {
                Ok(result) => result,
                Err(_) => return TransitionOutcome::TimedOut,
            },
            None => self.receiver.await,
        };

        match outcome {
            Ok(()) => TransitionOutcome::Completed,
            Err(_) => TransitionOutcome::Abandoned,
        }
    }
}
