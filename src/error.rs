use thiserror::Error;
use wasm_bindgen::JsValue;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between the page and the engine.
///
/// None of these are fatal: callers at the wasm boundary log them and carry
/// on with whatever still works.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A DOM id the page is expected to provide is not there.
    #[error("missing element: #{0}")]
    MissingElement(String),

    /// An optional global script library was not loaded.
    #[error("{0} library not loaded")]
    MissingLibrary(&'static str),

    /// The canvas exists but refused to hand out a 2D context.
    #[error("no 2d context on canvas #{0}")]
    NoContext(String),

    /// A host call threw.
    #[error("js error: {0}")]
    Js(String),
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        Error::Js(msg)
    }
}
