//! State Fair Bingo - a random bingo card widget
//!
//! Core modules:
//! - `selector`: Non-repeating random card selection
//! - `config`: Deployment modes and widget options
//! - `paths`: Image URL and stylesheet resolution per deployment
//! - `app`: The widget instance (state, refresh, print)
//! - `web`: Browser mounting and DOM wiring (wasm32 only)

pub mod app;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod manifest;
pub mod paths;
pub mod query;
pub mod selector;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::{BingoApp, CardPrinter, CardState};
pub use capabilities::{Capabilities, CapabilityDetector};
pub use config::{AssetPaths, AvailablePaths, BingoOptions, Deployment};
pub use error::{Error, Result};
pub use paths::PathResolver;

/// Widget constants
pub mod consts {
    /// Image extension for full-size cards
    pub const DEFAULT_EXTENSION: &str = ".png";
    /// Image extension for devices with an image size limit
    pub const SMALL_EXTENSION: &str = "-small.png";
    /// Query parameter that forces a deployment mode
    pub const DEPLOYMENT_QUERY_KEY: &str = "mpDeployment";
    /// Local asset manifest, only read in local deployment
    pub const MANIFEST_PATH: &str = "bower.json";
    /// Directory that relative manifest stylesheets live under
    pub const MANIFEST_COMPONENTS_DIR: &str = "bower_components/";
    /// Class marking a mount element that already holds a widget
    pub const PROCESSED_CLASS: &str = "processed";
    /// Class carried by the card block while its image loads
    pub const CARD_LOADING_CLASS: &str = "is-loading";
}

/// True for `http...` and protocol-relative `//...` URLs
#[inline]
pub fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http") || url.starts_with("//")
}
