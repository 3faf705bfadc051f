//! Built-in animators: slide, lift and fade for each platform family, and none.

use std::time::Duration;

use super::{AnimationOptions, TransitionAnimator, TransitionDone};
use crate::page::Page;
use crate::platform::Platform;

const IOS_CURVE: &str = "cubic-bezier(0.1, 0.7, 0.1, 1.0)";
const MD_CURVE: &str = "cubic-bezier(0.4, 0, 0.2, 1)";

/// Visual effect of a built-in animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Slide,
    Lift,
    Fade,
}

impl Effect {
    pub fn as_str(self) -> &'static str {
        match self {
            Effect::Slide => "slide",
            Effect::Lift => "lift",
            Effect::Fade => "fade",
        }
    }

    pub const ALL: [Effect; 3] = [Effect::Slide, Effect::Lift, Effect::Fade];
}

/// Timed animator for one effect in one platform family.
///
/// Rendering belongs to the host surface; this animator owns the timing and
/// reports completion once `delay + duration` has elapsed.
#[derive(Debug, Clone)]
pub struct EffectAnimator {
    effect: Effect,
    family: Platform,
    name: String,
    options: AnimationOptions,
}

impl EffectAnimator {
    /// Build the animator, overlaying `overrides` on the family defaults.
    pub fn new(effect: Effect, family: Platform, overrides: &AnimationOptions) -> Self {
        Self {
            effect,
            family,
            name: format!("{}-{}", effect.as_str(), family.animator_suffix()),
            options: overrides.merged_over(&Self::defaults(effect, family)),
        }
    }

    /// Default timing for an effect in a family.
    pub fn defaults(effect: Effect, family: Platform) -> AnimationOptions {
        let (duration, timing) = match (family, effect) {
            (Platform::Ios, Effect::Slide) | (Platform::Ios, Effect::Lift) => (0.4, IOS_CURVE),
            (Platform::Ios, Effect::Fade) => (0.4, "linear"),
            (Platform::Android, Effect::Slide) => (0.3, MD_CURVE),
            (Platform::Android, Effect::Lift) => (0.4, MD_CURVE),
            (Platform::Android, Effect::Fade) => (0.2, "ease-out"),
        };
        AnimationOptions::new()
            .duration(duration)
            .delay(0.0)
            .timing(timing)
    }

    pub fn effect(&self) -> Effect {
        self.effect
    }

    pub fn family(&self) -> Platform {
        self.family
    }

    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }

    fn run(&self, direction: &'static str, enter: &Page, leave: &Page, done: TransitionDone) {
        let total = self.options.total();
        tracing::debug!(
            animator = %self.name,
            direction,
            enter = %enter.id(),
            leave = %leave.id(),
            duration_ms = total.as_millis() as u64,
            timing = self.options.timing.as_deref().unwrap_or(""),
            "Starting transition"
        );
        schedule_completion(total, done);
    }
}

impl TransitionAnimator for EffectAnimator {
    fn push(&self, enter: &Page, leave: &Page, done: TransitionDone) {
        self.run("push", enter, leave, done);
    }

    fn pop(&self, enter: &Page, leave: &Page, done: TransitionDone) {
        self.run("pop", enter, leave, done);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Animator that completes synchronously.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneAnimator;

impl TransitionAnimator for NoneAnimator {
    fn push(&self, _enter: &Page, _leave: &Page, done: TransitionDone) {
        done.complete();
    }

    fn pop(&self, _enter: &Page, _leave: &Page, done: TransitionDone) {
        done.complete();
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Complete `done` after `after` on the current tokio runtime.
fn schedule_completion(after: Duration, done: TransitionDone) {
    if after.is_zero() {
        done.complete();
        return;
    }

    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                tokio::time::sleep(after).await;
                done.complete();
            });
        }
        Err(_) => {
            tracing::warn!("No async runtime available, completing transition immediately");
            done.complete();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::TransitionOutcome;
    use crate::page::{Page, PageContent};

    fn page(name: &str) -> Page {
        Page::new(Some(name.to_string()), PageContent::new("<page></page>"))
    }

    #[test]
    fn test_defaults_per_family() {
        let ios = EffectAnimator::new(Effect::Slide, Platform::Ios, &AnimationOptions::default());
        assert_eq!(ios.options().duration, Some(0.4));
        assert_eq!(ios.name(), "slide-ios");

        let md = EffectAnimator::new(Effect::Fade, Platform::Android, &AnimationOptions::default());
        assert_eq!(md.options().duration, Some(0.2));
        assert_eq!(md.options().timing.as_deref(), Some("ease-out"));
        assert_eq!(md.name(), "fade-md");
    }

    #[test]
    fn test_overrides_win() {
        let overrides = AnimationOptions::new().duration(1.5).timing("linear");
        let animator = EffectAnimator::new(Effect::Lift, Platform::Ios, &overrides);
        assert_eq!(animator.options().duration, Some(1.5));
        assert_eq!(animator.options().timing.as_deref(), Some("linear"));
        assert_eq!(animator.options().delay, Some(0.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_effect_completes_after_duration() {
        let animator = EffectAnimator::new(
            Effect::Slide,
            Platform::Ios,
            &AnimationOptions::new().duration(0.3).delay(0.1),
        );
        let (done, finished) = TransitionDone::channel();
        let start = tokio::time::Instant::now();
        animator.push(&page("a"), &page("b"), done);
        assert_eq!(finished.wait(None).await, TransitionOutcome::Completed);
        assert!(start.elapsed() >= Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_none_completes_immediately() {
        let (done, finished) = TransitionDone::channel();
        NoneAnimator.pop(&page("a"), &page("b"), done);
        assert_eq!(finished.wait(None).await, TransitionOutcome::Completed);
    }

    #[test]
    fn test_zero_duration_without_runtime() {
        let animator = EffectAnimator::new(
            Effect::Fade,
            Platform::Ios,
            &AnimationOptions::new().duration(0.0),
        );
        let (done, mut finished) = TransitionDone::channel();
        animator.push(&page("a"), &page("b"), done);
        assert!(finished.receiver.try_recv().is_ok());
    }
}
