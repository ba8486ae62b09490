//! Error types for widget initialization

use thiserror::Error;

/// Errors while rendering a widget or wiring its listeners
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("mount point #{id} not found")]
    MissingMount { id: &'static str },

    #[error("browser API unavailable: {0}")]
    Unavailable(&'static str),

    #[error("javascript error: {0}")]
    Js(String),
}
