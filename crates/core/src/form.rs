//! Transport-neutral view of a caller's multipart form.
//!
//! The API layer drains the multipart body into a [`FormFields`] so that
//! validation can run without any HTTP types in scope.

use std::collections::HashMap;

/// An uploaded image part, passed through to the engine untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl ImageBlob {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: None,
            file_name: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A single form value: either a plain text part or a file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(ImageBlob),
}

/// Named form values keyed by field name. When a name repeats, the first
/// part wins and later ones are ignored.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    values: HashMap<String, FormValue>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(name.into())
            .or_insert_with(|| FormValue::Text(value.into()));
    }

    pub fn insert_file(&mut self, name: impl Into<String>, blob: ImageBlob) {
        self.values.entry(name.into()).or_insert(FormValue::File(blob));
    }

    /// Builder-style [`insert_text`](Self::insert_text), mostly for tests.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.insert_text(name, value);
        self
    }

    /// Builder-style [`insert_file`](Self::insert_file), mostly for tests.
    pub fn file(mut self, name: &str, blob: ImageBlob) -> Self {
        self.insert_file(name, blob);
        self
    }

    /// Non-empty text value of `name`.
    ///
    /// Empty strings count as absent. File parts are read as UTF-8 text when
    /// possible, since browsers occasionally send text as a file part.
    pub fn get_text(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            FormValue::Text(text) if !text.is_empty() => Some(text.as_str()),
            FormValue::File(blob) if !blob.is_empty() => std::str::from_utf8(&blob.bytes).ok(),
            _ => None,
        }
    }

    /// Non-empty image value of `name`.
    ///
    /// A zero-length upload counts as absent. A non-empty text part is
    /// accepted as its UTF-8 bytes; binary parts always arrive as files.
    pub fn get_image(&self, name: &str) -> Option<ImageBlob> {
        match self.values.get(name)? {
            FormValue::File(blob) if !blob.is_empty() => Some(blob.clone()),
            FormValue::Text(text) if !text.is_empty() => {
                Some(ImageBlob::new(text.as_bytes().to_vec()))
            }
            _ => None,
        }
    }
}
