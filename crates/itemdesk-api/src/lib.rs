// HTTP client for the item collection endpoint
pub mod items;

// Re-export common types
pub use items::{ApiError, ApiId, ApiItem, ItemPayload, ItemsClient, DEFAULT_BASE_URL};
