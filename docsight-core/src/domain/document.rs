//! Document domain types
//!
//! A document is the text file a user submits for analysis. Only plain
//! text files up to 1 MiB are accepted.

use thiserror::Error;

/// Largest accepted document, in bytes
pub const MAX_DOCUMENT_SIZE: usize = 1024 * 1024;

/// Required file extension
pub const DOCUMENT_EXTENSION: &str = ".txt";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Please select a .txt file")]
    UnsupportedType { file_name: String },

    #[error("File size must be less than 1MB")]
    TooLarge { size: usize },
}

/// A validated document ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    file_name: String,
    content: Vec<u8>,
}

impl Document {
    /// Validates and wraps a document
    ///
    /// # Arguments
    /// * `file_name` - Name sent to the backend, must end in `.txt`
    /// * `content` - Raw file bytes, at most [`MAX_DOCUMENT_SIZE`]
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Result<Self, DocumentError> {
        let file_name = file_name.into();

        if !file_name.ends_with(DOCUMENT_EXTENSION) {
            return Err(DocumentError::UnsupportedType { file_name });
        }
        if content.len() > MAX_DOCUMENT_SIZE {
            return Err(DocumentError::TooLarge {
                size: content.len(),
            });
        }

        Ok(Self { file_name, content })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
