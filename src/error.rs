//! Error types for the bingo widget

use thiserror::Error;

/// Result type alias for widget operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring, mounting or printing
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Options carry no cards to pick from
    #[error("No bingo cards configured")]
    EmptyCardList,

    /// Deployment name is not one of local/build/deploy
    #[error("Unknown deployment: {0}")]
    UnknownDeployment(String),

    /// Options or asset manifest JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Options file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Mount selector matched nothing in the document
    #[error("Mount element not found: {0}")]
    MountNotFound(String),

    /// Mount element already carries a widget
    #[error("Bingo widget already mounted on {0}")]
    AlreadyMounted(String),

    /// Browser refused to open the print window
    #[error("Print window was blocked")]
    PopupBlocked,

    /// Any other DOM/JS failure, carrying the JS error text
    #[error("DOM error: {0}")]
    Dom(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for Error {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Error::Dom(format!("{:?}", value))
    }
}
