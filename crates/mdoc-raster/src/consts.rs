//! Internal constants for browser rendering.

use std::time::Duration;

/// Default wait for a rendered Mermaid SVG (5 seconds).
pub const DEFAULT_DIAGRAM_TIMEOUT: Duration = Duration::from_secs(5);

/// Default wait for an equation page to finish loading (10 seconds).
pub const DEFAULT_MATH_TIMEOUT: Duration = Duration::from_secs(10);

/// Idle time after which the browser process shuts itself down.
pub(crate) const BROWSER_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Default Mermaid library location.
pub const MERMAID_CDN: &str = "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js";

/// Default `KaTeX` library location.
pub const KATEX_SCRIPT_CDN: &str = "https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.js";

/// Default `KaTeX` stylesheet location.
pub const KATEX_STYLESHEET_CDN: &str =
    "https://cdn.jsdelivr.net/npm/katex@0.16.9/dist/katex.min.css";

/// Selector of the element captured for a diagram.
pub(crate) const DIAGRAM_SELECTOR: &str = ".mermaid svg";

/// Selector of the element captured for an equation.
pub(crate) const MATH_SELECTOR: &str = "#latex-container";
