//! REST API implementation
//!
//! - types: the response envelope and endpoint payloads
//! - extractors: JSON extraction with enveloped rejections
//! - handlers: endpoint handlers
//! - router: route table, CORS, and request tracing

mod extractors;
mod handlers;
mod router;
pub mod types;

// Re-export public API
pub use extractors::JsonExtractor;
pub use router::create_router;
