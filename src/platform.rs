//! Platform family used to pick animator variants.

use serde::{Deserialize, Serialize};

/// Visual family a navigator renders for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// iOS-style transitions (slide from the right).
    #[default]
    Ios,
    /// Material-style transitions (fade / lift).
    Android,
}

impl Platform {
    /// Platform of the running binary.
    pub fn detect() -> Self {
        if cfg!(target_os = "android") {
            Platform::Android
        } else {
            Platform::Ios
        }
    }

    pub fn is_android(self) -> bool {
        self == Platform::Android
    }

    /// Suffix used by the concrete animator names ("slide-ios", "fade-md").
    pub fn animator_suffix(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "md",
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" | "md" => Ok(Platform::Android),
            other => Err(format!("unknown platform '{}'", other)),
        }
    }
}

/// Query for the current platform family.
///
/// Asked on every animator resolution, so an implementation may change its
/// answer at runtime.
pub trait PlatformProvider: Send + Sync {
    fn platform(&self) -> Platform;
}

impl PlatformProvider for Platform {
    fn platform(&self) -> Platform {
        *self
    }
}
