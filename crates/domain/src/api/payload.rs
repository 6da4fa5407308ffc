//! Request payload model.

use serde::{Deserialize, Serialize};

/// Body of an outbound API request.
///
/// JSON and multipart form data are mutually exclusive; the session surface
/// rejects a call supplying both before any network activity.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    /// No body.
    #[default]
    Empty,
    /// JSON body, serialized verbatim.
    Json(serde_json::Value),
    /// Multipart form data.
    Form(Vec<FormPart>),
}

impl Payload {
    /// Whether this payload carries no body.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// One part of a multipart form body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormPart {
    /// Form field name.
    pub name: String,
    /// Filename reported to the remote, for file parts.
    pub filename: Option<String>,
    /// Explicit content type; guessed from the filename when absent.
    pub content_type: Option<String>,
    /// Raw part bytes.
    pub data: Vec<u8>,
}

impl FormPart {
    /// A plain text field.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            content_type: None,
            data: value.into().into_bytes(),
        }
    }

    /// A file field carrying raw bytes.
    #[must_use]
    pub fn file(name: impl Into<String>, filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            filename: Some(filename.into()),
            content_type: None,
            data,
        }
    }

    /// Sets an explicit content type on this part.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}
