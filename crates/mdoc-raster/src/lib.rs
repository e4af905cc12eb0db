//! Headless browser rasterizer for Mermaid diagrams and `KaTeX` equations.
//!
//! The [`Rasterizer`] trait is the seam the Markdown passes render through;
//! [`ChromeSession`] implements it with a lazily launched Chromium driven
//! over the `DevTools` protocol.
//!
//! # Example
//!
//! ```ignore
//! use mdoc_raster::{ChromeSession, MathMode, RasterConfig, Rasterizer};
//!
//! let mut session = ChromeSession::new(RasterConfig::default());
//! let diagram = session.render_diagram("graph TD\n  A --> B")?;
//! let equation = session.render_math(r"\frac{1}{2}", MathMode::Display)?;
//! session.release();
//! ```

mod asset;
pub mod consts;
mod error;
mod page;
mod rasterizer;
mod session;

pub use asset::AssetSource;
pub use error::RasterError;
pub use rasterizer::{MathMode, Rasterizer};
pub use session::{ChromeSession, RasterConfig};
