//! Headless Chromium session.
//!
//! [`ChromeSession`] owns at most one browser process and one cached diagram
//! page. Both are created lazily by the first render (or an explicit
//! [`acquire`](ChromeSession::acquire)) and torn down by
//! [`release`](ChromeSession::release) or on drop.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::util::Timeout;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tempfile::TempDir;

use crate::asset::{AssetSource, file_url};
use crate::consts::{
    BROWSER_IDLE_TIMEOUT, DEFAULT_DIAGRAM_TIMEOUT, DEFAULT_MATH_TIMEOUT, DIAGRAM_SELECTOR,
    KATEX_SCRIPT_CDN, KATEX_STYLESHEET_CDN, MATH_SELECTOR, MERMAID_CDN,
};
use crate::page::{diagram_page, diagram_script, math_page};
use crate::rasterizer::{MathMode, Rasterizer};
use crate::RasterError;

/// Browser rendering settings.
#[derive(Debug, Clone)]
pub struct RasterConfig {
    /// Chrome/Chromium executable (auto-detected when `None`).
    pub chrome_path: Option<PathBuf>,
    /// Wait for `.mermaid svg` after starting a diagram render.
    pub diagram_timeout: Duration,
    /// Wait for an equation page to load.
    pub math_timeout: Duration,
    /// Mermaid theme passed to `mermaid.initialize`.
    pub mermaid_theme: String,
    /// Mermaid library.
    pub mermaid_script: AssetSource,
    /// `KaTeX` library.
    pub katex_script: AssetSource,
    /// `KaTeX` stylesheet.
    pub katex_stylesheet: AssetSource,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            diagram_timeout: DEFAULT_DIAGRAM_TIMEOUT,
            math_timeout: DEFAULT_MATH_TIMEOUT,
            mermaid_theme: "default".to_owned(),
            mermaid_script: AssetSource::Url(MERMAID_CDN.to_owned()),
            katex_script: AssetSource::Url(KATEX_SCRIPT_CDN.to_owned()),
            katex_stylesheet: AssetSource::Url(KATEX_STYLESHEET_CDN.to_owned()),
        }
    }
}

impl RasterConfig {
    /// Set the browser executable.
    #[must_use]
    pub fn chrome_path(mut self, path: Option<PathBuf>) -> Self {
        self.chrome_path = path;
        self
    }

    /// Set the diagram wait (default: 5 seconds).
    #[must_use]
    pub fn diagram_timeout(mut self, timeout: Duration) -> Self {
        self.diagram_timeout = timeout;
        self
    }

    /// Set the equation page wait (default: 10 seconds).
    #[must_use]
    pub fn math_timeout(mut self, timeout: Duration) -> Self {
        self.math_timeout = timeout;
        self
    }

    /// Set the Mermaid theme (default: `"default"`).
    #[must_use]
    pub fn mermaid_theme(mut self, theme: impl Into<String>) -> Self {
        self.mermaid_theme = theme.into();
        self
    }

    /// Set where the Mermaid library is loaded from.
    #[must_use]
    pub fn mermaid_script(mut self, source: AssetSource) -> Self {
        self.mermaid_script = source;
        self
    }

    /// Set where the `KaTeX` library is loaded from.
    #[must_use]
    pub fn katex_script(mut self, source: AssetSource) -> Self {
        self.katex_script = source;
        self
    }

    /// Set where the `KaTeX` stylesheet is loaded from.
    #[must_use]
    pub fn katex_stylesheet(mut self, source: AssetSource) -> Self {
        self.katex_stylesheet = source;
        self
    }
}

/// Live browser state.
struct Active {
    /// Cached diagram page with Mermaid and `KaTeX` loaded.
    page: Arc<Tab>,
    browser: Browser,
    /// Holds the generated HTML pages.
    workdir: TempDir,
}

impl Active {
    fn launch(config: &RasterConfig) -> Result<Self, RasterError> {
        let workdir = tempfile::Builder::new().prefix("mdoc-raster-").tempdir()?;
        let page_path = workdir.path().join("diagram.html");
        std::fs::write(&page_path, diagram_page(config)?)?;

        let options = LaunchOptions::default_builder()
            .headless(true)
            .path(config.chrome_path.clone())
            .idle_browser_timeout(BROWSER_IDLE_TIMEOUT)
            .build()
            .map_err(|e| RasterError::Launch(e.to_string()))?;
        let browser = Browser::new(options).map_err(|e| RasterError::Launch(e.to_string()))?;
        tracing::debug!("Browser launched");

        let page = browser
            .new_tab()
            .map_err(|e| RasterError::Browser(e.to_string()))?;
        page.navigate_to(&file_url(&page_path))
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| RasterError::Browser(e.to_string()))?;

        Ok(Self {
            page,
            browser,
            workdir,
        })
    }

    fn close(self) {
        if let Err(e) = self.page.close(true) {
            tracing::debug!(error = %e, "Failed to close diagram page");
        }
        drop(self.browser);
        tracing::debug!(workdir = %self.workdir.path().display(), "Browser released");
    }
}

/// Rasterizer backed by a headless Chromium.
///
/// # Example
///
/// ```ignore
/// use mdoc_raster::{ChromeSession, RasterConfig, Rasterizer};
///
/// let mut session = ChromeSession::new(RasterConfig::default());
/// let png = session.render_diagram("graph TD\n  A --> B")?;
/// session.release();
/// ```
pub struct ChromeSession {
    config: RasterConfig,
    state: Option<Active>,
    /// Sequence number for equation page files.
    math_pages: usize,
}

impl ChromeSession {
    /// Create a session; nothing is launched until the first render.
    #[must_use]
    pub fn new(config: RasterConfig) -> Self {
        Self {
            config,
            state: None,
            math_pages: 0,
        }
    }

    /// Whether a browser is currently running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Launch the browser and load the diagram page if not done yet.
    pub fn acquire(&mut self) -> Result<(), RasterError> {
        self.active().map(|_| ())
    }

    /// Close the diagram page and the browser.
    ///
    /// Does nothing when the session was never acquired; safe to call twice.
    pub fn release(&mut self) {
        if let Some(active) = self.state.take() {
            active.close();
        }
    }

    fn active(&mut self) -> Result<&mut Active, RasterError> {
        let active = match self.state.take() {
            Some(active) => active,
            None => Active::launch(&self.config)?,
        };
        Ok(self.state.insert(active))
    }

    fn capture_math(
        config: &RasterConfig,
        active: &Active,
        page_path: &std::path::Path,
    ) -> Result<Vec<u8>, String> {
        let tab = active.browser.new_tab().map_err(|e| e.to_string())?;
        tab.set_default_timeout(config.math_timeout);

        let result = tab
            .navigate_to(&file_url(page_path))
            .and_then(|tab| tab.wait_until_navigated())
            .and_then(|tab| tab.find_element(MATH_SELECTOR))
            .and_then(|element| element.capture_screenshot(CaptureScreenshotFormatOption::Png))
            .map_err(|e| e.to_string());

        if let Err(e) = tab.close(true) {
            tracing::debug!(error = %e, "Failed to close equation tab");
        }
        result
    }
}

impl Rasterizer for ChromeSession {
    fn render_diagram(&mut self, code: &str) -> Result<Vec<u8>, RasterError> {
        let timeout = self.config.diagram_timeout;
        let active = self.active()?;
        let page = &active.page;

        page.evaluate(&diagram_script(code), false)
            .map_err(|e| RasterError::Browser(e.to_string()))?;

        let element = page
            .wait_for_element_with_custom_timeout(DIAGRAM_SELECTOR, timeout)
            .map_err(|e| wait_error(&*e, timeout))?;
        let png = element
            .capture_screenshot(CaptureScreenshotFormatOption::Png)
            .map_err(|e| RasterError::Capture(e.to_string()))?;

        tracing::debug!(bytes = png.len(), "Diagram rendered");
        Ok(png)
    }

    fn render_math(
        &mut self,
        latex: &str,
        mode: MathMode,
    ) -> Result<Option<Vec<u8>>, RasterError> {
        self.math_pages += 1;
        let page_name = format!("math_{:03}.html", self.math_pages);
        let html = math_page(&self.config, latex, mode)?;

        let config = self.config.clone();
        let active = self.active()?;
        let page_path = active.workdir.path().join(page_name);
        std::fs::write(&page_path, html)?;

        match Self::capture_math(&config, active, &page_path) {
            Ok(png) => {
                tracing::debug!(mode = mode.as_str(), bytes = png.len(), "Equation rendered");
                Ok(Some(png))
            }
            Err(e) => {
                tracing::warn!(latex, error = %e, "Equation rendering failed");
                Ok(None)
            }
        }
    }
}

/// Only an expired wait is a timeout; anything else is a browser failure.
fn wait_error(err: &(dyn std::error::Error + 'static), timeout: Duration) -> RasterError {
    if err.is::<Timeout>() {
        RasterError::Timeout(timeout)
    } else {
        RasterError::Browser(err.to_string())
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_before_acquire_is_noop() {
        let mut session = ChromeSession::new(RasterConfig::default());

        session.release();
        session.release();

        assert!(!session.is_active());
    }

    #[test]
    fn test_new_session_is_lazy() {
        let session = ChromeSession::new(RasterConfig::default().mermaid_theme("dark"));
        assert!(!session.is_active());
        assert_eq!(session.config.mermaid_theme, "dark");
    }

    #[test]
    fn test_acquire_fails_on_missing_asset() {
        let config = RasterConfig::default()
            .mermaid_script(AssetSource::File(PathBuf::from("/nonexistent/mermaid.js")));
        let mut session = ChromeSession::new(config);

        let err = session.acquire().unwrap_err();

        assert!(matches!(err, RasterError::AssetNotFound(_)));
        assert!(!session.is_active());
    }

    #[test]
    fn test_wait_error_timeout() {
        let err = wait_error(&Timeout, Duration::from_secs(5));
        assert!(matches!(err, RasterError::Timeout(t) if t == Duration::from_secs(5)));
    }

    #[test]
    fn test_wait_error_connection_failure_is_browser_error() {
        let closed = std::io::Error::other("connection closed");

        let err = wait_error(&closed, Duration::from_secs(5));

        match err {
            RasterError::Browser(message) => assert_eq!(message, "connection closed"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_config_builder() {
        let config = RasterConfig::default()
            .chrome_path(Some(PathBuf::from("/usr/bin/chromium")))
            .diagram_timeout(Duration::from_millis(250))
            .math_timeout(Duration::from_secs(2));

        assert_eq!(config.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(config.diagram_timeout, Duration::from_millis(250));
        assert_eq!(config.math_timeout, Duration::from_secs(2));
        assert_eq!(config.mermaid_script, AssetSource::Url(MERMAID_CDN.to_owned()));
    }
}
