use crate::errors::{CheckError, Result};
use crate::types::BrowserConfig;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// One isolated browser viewing context.
///
/// Every check launches its own session and Chrome shuts down when the
/// session drops, pass or fail.
pub struct BrowserSession {
    browser: Browser,
    tab: Arc<Tab>,
    session_id: String,
}

impl BrowserSession {
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        // Arg strings must outlive the OsStr slice handed to the builder
        let window_size_arg = format!(
            "--window-size={},{}",
            config.viewport.width, config.viewport.height
        );
        let user_agent_arg = config
            .user_agent
            .as_ref()
            .map(|ua| format!("--user-agent={}", ua));

        let mut args = vec![
            OsStr::new("--no-sandbox"),
            OsStr::new("--disable-dev-shm-usage"),
            OsStr::new(&window_size_arg),
        ];

        if let Some(ref ua_arg) = user_agent_arg {
            args.push(OsStr::new(ua_arg));
        }

        if config.disable_images {
            args.push(OsStr::new("--blink-settings=imagesEnabled=false"));
        }

        let launch_options = LaunchOptions::default_builder()
            .headless(config.headless)
            .args(args)
            .build()
            .map_err(|e| CheckError::LaunchFailed(e.to_string()))?;

        let browser =
            Browser::new(launch_options).map_err(|e| CheckError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| CheckError::LaunchFailed(e.to_string()))?;

        let session_id = uuid::Uuid::new_v4().to_string();
        debug!(session_id = %session_id, headless = config.headless, "browser launched");

        Ok(Self {
            browser,
            tab,
            session_id,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| CheckError::NavigationFailed(e.to_string()))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| CheckError::NavigationFailed(e.to_string()))?;

        Ok(())
    }

    pub fn current_url(&self) -> String {
        self.tab.get_url()
    }

    pub async fn title(&self) -> Result<String> {
        let js_result = self
            .tab
            .evaluate("document.title", false)
            .map_err(|e| CheckError::JavaScriptFailed(e.to_string()))?;

        Ok(js_result
            .value
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .unwrap_or_default())
    }

    pub async fn page_html(&self) -> Result<String> {
        let js_result = self
            .tab
            .evaluate("document.documentElement.outerHTML", false)
            .map_err(|e| CheckError::JavaScriptFailed(e.to_string()))?;

        js_result
            .value
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .ok_or_else(|| CheckError::JavaScriptFailed("page source was not a string".to_string()))
    }

    /// Block until the selector matches a visible element, or fail with the
    /// selector and timeout attached.
    pub async fn wait_for_element(&self, css_selector: &str, timeout_ms: u64) -> Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(css_selector, Duration::from_millis(timeout_ms))
            .map_err(|_| CheckError::ElementTimeout {
                selector: css_selector.to_string(),
                timeout_ms,
            })?;

        Ok(())
    }

    /// Non-waiting probe, for deciding between a primary and a fallback
    /// selector without burning the full element timeout.
    pub async fn element_exists(&self, css_selector: &str) -> Result<bool> {
        let js_code = format!(
            "document.querySelector('{}') !== null",
            css_selector.replace('\'', "\\'")
        );

        let result = self
            .tab
            .evaluate(&js_code, false)
            .map_err(|e| CheckError::JavaScriptFailed(e.to_string()))?;

        Ok(result.value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    pub async fn inner_text(&self, css_selector: &str) -> Result<Option<String>> {
        let js_code = format!(
            r#"
            (function() {{
                const element = document.querySelector('{}');
                if (element) {{
                    return element.innerText || element.textContent;
                }}
                return null;
            }})()
        "#,
            css_selector.replace('\'', "\\'")
        );

        let result = self
            .tab
            .evaluate(&js_code, false)
            .map_err(|e| CheckError::JavaScriptFailed(e.to_string()))?;

        Ok(result.value.and_then(|v| v.as_str().map(|s| s.to_string())))
    }

    pub async fn click(&self, css_selector: &str) -> Result<()> {
        self.tab
            .find_element(css_selector)
            .map_err(|e| CheckError::ElementNotFound(e.to_string()))?
            .click()
            .map_err(|e| CheckError::JavaScriptFailed(e.to_string()))?;

        Ok(())
    }

    pub async fn type_into(&self, css_selector: &str, text: &str) -> Result<()> {
        let element = self
            .tab
            .find_element(css_selector)
            .map_err(|e| CheckError::ElementNotFound(e.to_string()))?;

        element
            .click()
            .map_err(|e| CheckError::JavaScriptFailed(e.to_string()))?;

        element
            .type_into(text)
            .map_err(|e| CheckError::JavaScriptFailed(e.to_string()))?;

        Ok(())
    }

    /// Submit the form around an input. Synthetic Enter keystrokes do not
    /// trigger form submission over CDP, so the form is submitted directly.
    pub async fn submit_enclosing_form(&self, css_selector: &str) -> Result<()> {
        let js_code = format!(
            r#"
            (function() {{
                const element = document.querySelector('{}');
                if (element && element.form) {{
                    element.form.submit();
                    return true;
                }}
                return false;
            }})()
        "#,
            css_selector.replace('\'', "\\'")
        );

        let result = self
            .tab
            .evaluate(&js_code, false)
            .map_err(|e| CheckError::JavaScriptFailed(e.to_string()))?;

        if let Some(value) = result.value {
            if value.as_bool() == Some(true) {
                return Ok(());
            }
        }

        Err(CheckError::ElementNotFound(format!(
            "No form around element '{}'",
            css_selector
        )))
    }

    /// Block until a navigation kicked off by a click or form submit has
    /// committed. The old document keeps reporting `readyState ===
    /// 'complete'`, so polling alone can return before the new page exists.
    pub async fn wait_for_navigation(&self) -> Result<()> {
        self.tab
            .wait_until_navigated()
            .map_err(|e| CheckError::NavigationFailed(e.to_string()))?;

        Ok(())
    }

    /// Wait for the page to settle: `document.readyState === 'complete'`
    /// plus a short quiet delay for late DOM swaps. A timeout here is a hard
    /// failure, not a recoverable condition.
    pub async fn wait_until_settled(&self, timeout_ms: u64) -> Result<()> {
        let js_code = "document.readyState === 'complete'";

        let start_time = Instant::now();
        let timeout = Duration::from_millis(timeout_ms);

        while start_time.elapsed() < timeout {
            match self.tab.evaluate(js_code, false) {
                Ok(result) => {
                    if let Some(value) = result.value {
                        if value.as_bool() == Some(true) {
                            tokio::time::sleep(Duration::from_millis(300)).await;
                            return Ok(());
                        }
                    }
                }
                Err(_) => {
                    // evaluation fails while the old document is torn down
                }
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        Err(CheckError::NavigationFailed(format!(
            "Page did not settle within {}ms",
            timeout_ms
        )))
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Browser will be automatically closed when dropped
    }
}
