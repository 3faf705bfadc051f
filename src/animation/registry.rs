//! Animator registry: maps animation names to constructors.
//!
//! Platform-dependent entries ("slide", "fade", "default", ...) are stored as
//! resolvers and evaluated at lookup time, so the same name can yield an
//! iOS or a Material animator depending on the navigator's platform.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use super::effects::{Effect, EffectAnimator, NoneAnimator};
use super::{AnimationOptions, AnimatorConstructor, TransitionAnimator};
use crate::error::{NavigatorError, Result};
use crate::platform::Platform;

/// Name used when neither the call nor the navigator picks an animation.
pub const DEFAULT_ANIMATION: &str = "default";

/// Aliases may point at other aliases; this bounds the chain.
const MAX_ALIAS_DEPTH: usize = 8;

/// One registry entry.
#[derive(Clone)]
pub enum AnimatorEntry {
    /// Constructor used as-is.
    Concrete(Arc<dyn AnimatorConstructor>),
    /// Picks the name of another entry for the current platform.
    PlatformDependent(Arc<dyn Fn(Platform) -> String + Send + Sync>),
}

impl std::fmt::Debug for AnimatorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimatorEntry::Concrete(_) => write!(f, "Concrete"),
            AnimatorEntry::PlatformDependent(_) => write!(f, "PlatformDependent"),
        }
    }
}

/// Shared, mutable name → animator table.
#[derive(Clone)]
pub struct AnimatorRegistry {
    inner: Arc<RwLock<HashMap<String, AnimatorEntry>>>,
}

impl Default for AnimatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl AnimatorRegistry {
    /// Registry with no entries at all.
    pub fn empty() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registry seeded with the built-in animators.
    pub fn with_defaults() -> Self {
        let registry = Self::empty();
        {
            let mut entries = registry.inner.write();

            for effect in Effect::ALL {
                for family in [Platform::Ios, Platform::Android] {
                    let name = format!("{}-{}", effect.as_str(), family.animator_suffix());
                    entries.insert(name, effect_entry(effect, family));
                }
                entries.insert(
                    effect.as_str().to_string(),
                    AnimatorEntry::PlatformDependent(Arc::new(move |platform: Platform| {
                        format!("{}-{}", effect.as_str(), platform.animator_suffix())
                    })),
                );
            }

            entries.insert(
                DEFAULT_ANIMATION.to_string(),
                AnimatorEntry::PlatformDependent(Arc::new(|platform: Platform| {
                    if platform.is_android() {
                        "fade-md".to_string()
                    } else {
                        "slide-ios".to_string()
                    }
                })),
            );

            let none: Arc<dyn AnimatorConstructor> =
                Arc::new(|_: &AnimationOptions| -> Arc<dyn TransitionAnimator> {
                    Arc::new(NoneAnimator)
                });
            entries.insert("none".to_string(), AnimatorEntry::Concrete(none));
        }
        registry
    }

    /// Process-wide registry shared by navigators built without an explicit one.
    pub fn global() -> &'static AnimatorRegistry {
        static GLOBAL: OnceLock<AnimatorRegistry> = OnceLock::new();
        GLOBAL.get_or_init(AnimatorRegistry::with_defaults)
    }

    /// Register (or replace) a named animator constructor.
    ///
    /// # Errors
    /// Returns `InvalidAnimator` if the name is empty or contains whitespace.
    pub fn register<C>(&self, name: &str, ctor: C) -> Result<()>
    where
        C: AnimatorConstructor + 'static,
    {
        validate_name(name)?;
        let replaced = self
            .inner
            .write()
            .insert(name.to_string(), AnimatorEntry::Concrete(Arc::new(ctor)))
            .is_some();
        tracing::debug!(name, replaced, "Registered animator");
        Ok(())
    }

    /// Register a name whose concrete animator depends on the platform.
    pub fn register_platform_dependent<F>(&self, name: &str, resolver: F) -> Result<()>
    where
        F: Fn(Platform) -> String + Send + Sync + 'static,
    {
        validate_name(name)?;
        self.inner.write().insert(
            name.to_string(),
            AnimatorEntry::PlatformDependent(Arc::new(resolver)),
        );
        tracing::debug!(name, "Registered platform-dependent animator");
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve `name` for `platform` to the concrete entry name.
    pub fn resolve_name(&self, name: &str, platform: Platform) -> Result<String> {
        let entries = self.inner.read();
        let mut current = name.to_string();

        for _ in 0..MAX_ALIAS_DEPTH {
            match entries.get(&current) {
                Some(AnimatorEntry::Concrete(_)) => return Ok(current),
                Some(AnimatorEntry::PlatformDependent(resolver)) => current = resolver(platform),
                None => return Err(NavigatorError::UnknownAnimation { name: current }),
            }
        }

        Err(NavigatorError::InvalidAnimator {
            name: name.to_string(),
            reason: "platform resolution does not terminate".to_string(),
        })
    }

    /// Construct the animator registered under `name` for `platform`.
    pub fn construct(
        &self,
        name: &str,
        platform: Platform,
        options: &AnimationOptions,
    ) -> Result<Arc<dyn TransitionAnimator>> {
        let concrete = self.resolve_name(name, platform)?;
        let ctor = match self.inner.read().get(&concrete) {
            Some(AnimatorEntry::Concrete(ctor)) => Arc::clone(ctor),
            _ => return Err(NavigatorError::UnknownAnimation { name: concrete }),
        };
        Ok(ctor.construct(options))
    }
}

fn effect_entry(effect: Effect, family: Platform) -> AnimatorEntry {
    let ctor: Arc<dyn AnimatorConstructor> =
        Arc::new(move |options: &AnimationOptions| -> Arc<dyn TransitionAnimator> {
            Arc::new(EffectAnimator::new(effect, family, options))
        });
    AnimatorEntry::Concrete(ctor)
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(NavigatorError::InvalidAnimator {
            name: name.to_string(),
            reason: "name must not be empty".to_string(),
        });
    }
    if name.chars().any(char::is_whitespace) {
        return Err(NavigatorError::InvalidAnimator {
            name: name.to_string(),
            reason: "name must not contain whitespace".to_string(),
        });
    }
    Ok(())
}
