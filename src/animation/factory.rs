//! Resolves the animator for a single transition.

use std::sync::Arc;

use super::registry::DEFAULT_ANIMATION;
use super::{AnimationOptions, AnimatorRegistry, TransitionAnimator};
use crate::error::{NavigatorError, Result};
use crate::platform::Platform;

/// What a caller asked for; every field is optional.
#[derive(Clone, Copy, Default)]
pub struct AnimatorRequest<'a> {
    /// Pre-built animator; bypasses name lookup entirely.
    pub animator: Option<&'a Arc<dyn TransitionAnimator>>,
    /// Registered animation name.
    pub animation: Option<&'a str>,
    /// Call-level timing overrides.
    pub options: Option<&'a AnimationOptions>,
}

/// An animator together with the name it was resolved from.
pub struct ResolvedAnimator {
    pub name: String,
    pub animator: Arc<dyn TransitionAnimator>,
}

/// Per-navigator animator resolution.
///
/// Resolution order: explicit animator > requested name > navigator default
/// > [`DEFAULT_ANIMATION`].
#[derive(Clone)]
pub struct AnimatorFactory {
    registry: AnimatorRegistry,
    default_animation: Option<String>,
    base_options: AnimationOptions,
}

impl AnimatorFactory {
    pub fn new(
        registry: AnimatorRegistry,
        default_animation: Option<String>,
        base_options: AnimationOptions,
    ) -> Self {
        Self {
            registry,
            default_animation: default_animation.filter(|name| !name.trim().is_empty()),
            base_options,
        }
    }

    pub fn default_animation(&self) -> Option<&str> {
        self.default_animation.as_deref()
    }

    /// Navigator-level timing options every transition starts from.
    pub fn base_options(&self) -> &AnimationOptions {
        &self.base_options
    }

    /// Check that an explicitly requested name exists.
    ///
    /// Called before a navigation starts so that an unknown name is reported
    /// without touching the stack or emitting events.
    pub fn validate(&self, request: &AnimatorRequest<'_>) -> Result<()> {
        if request.animator.is_some() {
            return Ok(());
        }
        match request.animation {
            Some(name) if !self.registry.contains(name) => Err(NavigatorError::UnknownAnimation {
                name: name.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Produce the animator for one transition.
    pub fn resolve(&self, request: AnimatorRequest<'_>, platform: Platform) -> Result<ResolvedAnimator> {
        if let Some(animator) = request.animator {
            return Ok(ResolvedAnimator {
                name: animator.name().to_string(),
                animator: Arc::clone(animator),
            });
        }

        let options = match request.options {
            Some(call) => call.merged_over(&self.base_options),
            None => self.base_options.clone(),
        };

        if let Some(name) = request.animation {
            let animator = self.registry.construct(name, platform, &options)?;
            return Ok(ResolvedAnimator {
                name: name.to_string(),
                animator,
            });
        }

        if let Some(name) = self.default_animation.as_deref() {
            match self.registry.construct(name, platform, &options) {
                Ok(animator) => {
                    return Ok(ResolvedAnimator {
                        name: name.to_string(),
                        animator,
                    })
                }
                Err(err) => {
                    tracing::warn!(
                        animation = name,
                        error = %err,
                        "Navigator default animation unavailable, using '{}'",
                        DEFAULT_ANIMATION
                    );
                }
            }
        }

        let animator = self.registry.construct(DEFAULT_ANIMATION, platform, &options)?;
        Ok(ResolvedAnimator {
            name: DEFAULT_ANIMATION.to_string(),
            animator,
        })
    }
}
