//! Document domain module.
//!
//! Validation of files submitted for upload, applied before any network call.

mod upload;

pub use upload::{PdfUpload, UploadError, PDF_CONTENT_TYPE};
