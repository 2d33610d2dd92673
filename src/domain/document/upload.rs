//! PDF upload value object.

use thiserror::Error;

/// The only content type accepted for upload.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Reasons a file is refused before it reaches the document source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Only PDF files are accepted (got '{content_type}')")]
    NotPdf { content_type: String },

    #[error("The uploaded file is empty")]
    EmptyFile,
}

/// A validated PDF file ready to be sent to the document source.
///
/// # Invariants
///
/// - the declared content type is `application/pdf` (case-insensitive,
///   parameters ignored)
/// - the body is non-empty
#[derive(Clone, PartialEq, Eq)]
pub struct PdfUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl PdfUpload {
    /// Validates a submitted file.
    ///
    /// A missing or blank file name falls back to `document.pdf`.
    pub fn new(
        file_name: Option<&str>,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, UploadError> {
        if !is_pdf(content_type) {
            return Err(UploadError::NotPdf {
                content_type: content_type.to_string(),
            });
        }
        if bytes.is_empty() {
            return Err(UploadError::EmptyFile);
        }

        let file_name = file_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("document.pdf")
            .to_string();

        Ok(Self { file_name, bytes })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Keeps file contents out of logs.
impl std::fmt::Debug for PdfUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn is_pdf(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
        .unwrap_or(false)
}
