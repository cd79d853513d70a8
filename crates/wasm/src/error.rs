//! Error handling for WASM bindings.
//!
//! Converts manual errors into JavaScript `Error` objects carrying a `code` property.

use folio_core::ManualError;
use folio_layout::LayoutError;
use folio_traits::ResourceError;
use wasm_bindgen::prelude::*;

/// Error codes for TypeScript consumption.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid viewer settings or arguments
    Config,
    /// Entry data or a translation file is not valid JSON
    Json,
    /// A resource could not be fetched or stored
    Resource,
    /// The requested entry does not exist
    NotFound,
    Unknown,
}

impl ErrorCode {
    fn as_js_code(self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG_ERROR",
            ErrorCode::Json => "JSON_ERROR",
            ErrorCode::Resource => "RESOURCE_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unknown => "UNKNOWN_ERROR",
        }
    }
}

/// A JavaScript-friendly error type.
///
/// Not a `wasm_bindgen` struct: it converts into a plain JavaScript `Error`.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ViewerError {
    code: ErrorCode,
    message: String,
}

impl ViewerError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn resource(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Resource, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ManualError> for ViewerError {
    fn from(err: ManualError) -> Self {
        let code = match &err {
            ManualError::Resource(_) | ManualError::Io(_) => ErrorCode::Resource,
            ManualError::Json(_) => ErrorCode::Json,
            ManualError::Config(_) => ErrorCode::Config,
            ManualError::EntryNotFound(_) => ErrorCode::NotFound,
            ManualError::Layout(_) | ManualError::Stale { .. } | ManualError::Other(_) => {
                ErrorCode::Unknown
            }
        };
        Self::new(code, err.to_string())
    }
}

impl From<LayoutError> for ViewerError {
    fn from(err: LayoutError) -> Self {
        Self::new(ErrorCode::Config, err.to_string())
    }
}

impl From<ResourceError> for ViewerError {
    fn from(err: ResourceError) -> Self {
        Self::new(ErrorCode::Resource, err.to_string())
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorCode::Json, err.to_string())
    }
}

impl From<ViewerError> for JsValue {
    fn from(err: ViewerError) -> Self {
        let js_error = js_sys::Error::new(&err.message);
        js_sys::Reflect::set(
            &js_error,
            &"code".into(),
            &JsValue::from_str(err.code.as_js_code()),
        )
        .ok();
        js_error.into()
    }
}
