use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub navigator: NavigatorConfig,
    /// Page templates by content reference, used by the in-memory resolver.
    #[serde(default)]
    pub templates: BTreeMap<String, String>,
}

/// Navigator defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Animation used when a call names none (e.g. "slide", "fade-md").
    #[serde(default)]
    pub default_animation: Option<String>,
    /// Relaxed options literal, e.g. `{duration: 0.2, timing: 'ease-in'}`.
    #[serde(default)]
    pub animation_options: Option<String>,
    /// Forces the platform instead of detecting it.
    #[serde(default)]
    pub platform: Option<Platform>,
    /// Page loaded into an empty navigator and used by reset without a target.
    #[serde(default)]
    pub initial_page: Option<String>,
    /// Upper bound for one transition; unbounded when absent.
    #[serde(default)]
    pub transition_timeout_ms: Option<u64>,
    /// Root element every page's content must have (default: "page").
    #[serde(default = "default_page_tag")]
    pub page_tag: String,
}

fn default_page_tag() -> String {
    "page".to_string()
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            default_animation: None,
            animation_options: None,
            platform: None,
            initial_page: None,
            transition_timeout_ms: None,
            page_tag: default_page_tag(),
        }
    }
}
