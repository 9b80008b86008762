use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    pub headless: bool,
    pub viewport: Viewport,
    pub user_agent: Option<String>,
    pub disable_images: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport: Viewport {
                width: 1920,
                height: 1080,
            },
            user_agent: None,
            disable_images: false,
        }
    }
}

/// Timeouts for the blocking waits a check is allowed to perform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    pub navigation_timeout_ms: u64,
    pub element_timeout_ms: u64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            navigation_timeout_ms: 10_000,
            element_timeout_ms: 5_000,
        }
    }
}
