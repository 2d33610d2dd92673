//! ChatPDF-compatible document source adapters.
//!
//! - `ChatPdfClient` - reqwest client for the vendor API
//! - `MockDocumentSource` - scripted in-process source for tests

mod client;
mod dto;
mod mock;

pub use client::{ChatPdfClient, ChatPdfConfig, DEFAULT_BASE_URL};
pub use mock::{MockCall, MockDocumentSource, DEFAULT_MOCK_REPLY};
