// HTTP backend - bridges ItemsClient with the ItemBackend trait
use std::time::Duration;

use async_trait::async_trait;
use itemdesk_api::ItemsClient;

use crate::{
    backend::ItemBackend,
    config::ApiConfig,
    models::{Item, ItemDraft, ItemId},
    Result,
};

/// Wrapper around ItemsClient that implements ItemBackend
pub struct HttpBackend {
    client: ItemsClient,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: ItemsClient::new(base_url)?,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let client = match config.timeout_secs {
            Some(secs) => ItemsClient::with_timeout(&config.base_url, Duration::from_secs(secs))?,
            None => ItemsClient::new(&config.base_url)?,
        };
        Ok(Self { client })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

#[async_trait]
impl ItemBackend for HttpBackend {
    async fn list(&self) -> Result<Vec<Item>> {
        let items = self.client.list_items().await?;
        Ok(items.into_iter().map(Item::from).collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Item>> {
        let items = self.client.search_items(query).await?;
        Ok(items.into_iter().map(Item::from).collect())
    }

    async fn create(&self, draft: &ItemDraft) -> Result<Item> {
        let item = self.client.create_item(&draft.to_payload()).await?;
        Ok(item.into())
    }

    async fn update(&self, id: &ItemId, draft: &ItemDraft) -> Result<Item> {
        let item = self
            .client
            .update_item(&id.to_string(), &draft.to_payload())
            .await?;
        Ok(item.into())
    }

    async fn delete(&self, id: &ItemId) -> Result<()> {
        self.client.delete_item(&id.to_string()).await?;
        Ok(())
    }
}
