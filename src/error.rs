use thiserror::Error;

/// Rejected input and setup failures for the navigation menu.
///
/// Setters return these instead of panicking; callers log them and keep the
/// previous state.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("pointer position must be two finite numbers, got {0:?}")]
    InvalidPointer(Vec<f64>),

    #[error("background colour must look like #RRGGBB, got {0:?}")]
    InvalidColour(String),

    #[error("mask padding must be a number, got {0}")]
    InvalidPadding(f64),

    #[error("viewport must have non-zero width and height, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("no navigation item at index {0}")]
    UnknownItem(usize),

    #[error("config field `{field}` out of range: {value}")]
    ConfigRange { field: &'static str, value: f64 },

    #[error("invalid navigation config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type NavResult<T> = Result<T, NavError>;

impl From<NavError> for wasm_bindgen::JsValue {
    fn from(err: NavError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
