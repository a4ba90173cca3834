// Shared fixtures for the app and ui tests
use std::sync::Mutex;

use itemdesk_core::{Error, Item, ItemBackend, ItemDraft, ItemId, Result};

/// In-memory backend: hands out ids in order, can be told to fail
#[derive(Default)]
pub struct StubBackend {
    pub items: Mutex<Vec<Item>>,
    pub fail: Mutex<bool>,
}

impl StubBackend {
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            fail: Mutex::new(false),
        }
    }

    fn check(&self) -> Result<()> {
        if *self.fail.lock().unwrap() {
            Err(Error::Transport("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl ItemBackend for StubBackend {
    async fn list(&self) -> Result<Vec<Item>> {
        self.check()?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn search(&self, _query: &str) -> Result<Vec<Item>> {
        self.list().await
    }

    async fn create(&self, draft: &ItemDraft) -> Result<Item> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        let item = Item::new(items.len() as i64 + 1, draft.name.clone(), draft.category.clone());
        items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: &ItemId, draft: &ItemDraft) -> Result<Item> {
        self.check()?;
        Ok(Item {
            id: id.clone(),
            name: draft.name.clone(),
            category: draft.category.clone(),
        })
    }

    async fn delete(&self, _id: &ItemId) -> Result<()> {
        self.check()
    }
}
