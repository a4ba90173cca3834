use crate::{
    models::{Item, ItemDraft, ItemId},
    Result,
};

/// The remote item collection, as seen by the store
///
/// `HttpBackend` is the real thing. Tests swap in a mock so the store can
/// be exercised without a server.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ItemBackend: Send + Sync {
    /// Full collection in server order
    async fn list(&self) -> Result<Vec<Item>>;

    /// Server-side search over name and category
    async fn search(&self, query: &str) -> Result<Vec<Item>>;

    async fn create(&self, draft: &ItemDraft) -> Result<Item>;

    async fn update(&self, id: &ItemId, draft: &ItemDraft) -> Result<Item>;

    async fn delete(&self, id: &ItemId) -> Result<()>;
}
