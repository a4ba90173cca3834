// The item store - sole owner of the local collection and the form/filter state
use tracing::{debug, info, warn};

use crate::{
    backend::ItemBackend,
    models::{Item, ItemDraft, ItemId},
    view::{visible_groups, CategoryGroup},
    Result,
};

/// Local copy of the remote item collection plus the view-state bound to it
///
/// All mutations go through here. Remote failures are logged and handed
/// back as `Err`; local state is left as it was before the call, so the
/// caller can just show the error and let the user retry.
///
/// Every remote operation takes `&mut self`, so a single store never has
/// two operations in flight at once.
pub struct ItemStore<B: ItemBackend> {
    backend: B,
    items: Vec<Item>,
    edit_target: Option<Item>,
    filter_text: String,
    draft: ItemDraft,
}

impl<B: ItemBackend> ItemStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            items: Vec::new(),
            edit_target: None,
            filter_text: String::new(),
            draft: ItemDraft::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn edit_target(&self) -> Option<&Item> {
        self.edit_target.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn draft(&self) -> &ItemDraft {
        &self.draft
    }

    pub fn find(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Replace the local collection with whatever the server has
    pub async fn load(&mut self) -> Result<()> {
        match self.backend.list().await {
            Ok(items) => {
                debug!("Loaded {} items", items.len());
                self.items = items;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load items: {}", e);
                Err(e)
            }
        }
    }

    /// Like `load`, but lets the server narrow the collection down first
    pub async fn load_matching(&mut self, query: &str) -> Result<()> {
        match self.backend.search(query).await {
            Ok(items) => {
                debug!("Server search {:?} returned {} items", query, items.len());
                self.items = items;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to search items for {:?}: {}", query, e);
                Err(e)
            }
        }
    }

    pub fn set_draft_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_draft_category(&mut self, category: impl Into<String>) {
        self.draft.category = category.into();
    }

    /// Record the given values as the draft and submit them
    ///
    /// Returns `Ok(None)` without touching the network when either field is
    /// empty. Otherwise creates (no edit target) or updates (edit target set)
    /// and returns the item the server sent back.
    pub async fn submit(&mut self, name: &str, category: &str) -> Result<Option<Item>> {
        self.draft = ItemDraft::new(name, category);
        self.submit_draft().await
    }

    /// Submit whatever is currently in the draft
    pub async fn submit_draft(&mut self) -> Result<Option<Item>> {
        if !self.draft.is_complete() {
            debug!("Draft incomplete, nothing to submit");
            return Ok(None);
        }

        let target_id = self.edit_target.as_ref().map(|target| target.id.clone());
        let saved = match target_id {
            None => self.create().await?,
            Some(id) => self.update(&id).await?,
        };

        self.draft.clear();
        self.edit_target = None;
        Ok(Some(saved))
    }

    async fn create(&mut self) -> Result<Item> {
        let created = self.backend.create(&self.draft).await.map_err(|e| {
            warn!("Failed to create item: {}", e);
            e
        })?;

        info!("Created item {} ({})", created.id, created.name);
        self.items.push(created.clone());
        Ok(created)
    }

    async fn update(&mut self, id: &ItemId) -> Result<Item> {
        let updated = self.backend.update(id, &self.draft).await.map_err(|e| {
            warn!("Failed to update item {}: {}", id, e);
            e
        })?;

        // Match on the id the server returned; ids are unique so at most one hit
        match self.items.iter_mut().find(|item| item.id == updated.id) {
            Some(slot) => *slot = updated.clone(),
            None => debug!("Updated item {} is not in the local collection", updated.id),
        }

        info!("Updated item {} ({})", updated.id, updated.name);
        Ok(updated)
    }

    /// Switch the form into update mode for `item`
    pub fn begin_edit(&mut self, item: &Item) {
        self.draft = ItemDraft::new(item.name.clone(), item.category.clone());
        self.edit_target = Some(item.clone());
    }

    /// Back to create mode with an empty form
    pub fn cancel_edit(&mut self) {
        self.edit_target = None;
        self.draft.clear();
    }

    /// Delete `id` on the server, then drop it locally
    ///
    /// `Ok(false)` means the server accepted the delete but nothing local
    /// matched, e.g. it was already gone.
    pub async fn remove(&mut self, id: &ItemId) -> Result<bool> {
        if let Err(e) = self.backend.delete(id).await {
            warn!("Failed to delete item {}: {}", id, e);
            return Err(e);
        }

        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        let removed = self.items.len() != before;

        if removed {
            info!("Deleted item {}", id);
        } else {
            debug!("Deleted item {} was not in the local collection", id);
        }
        Ok(removed)
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
    }

    /// Current filter applied to the collection, grouped by category
    pub fn visible_groups(&self) -> Vec<CategoryGroup<'_>> {
        visible_groups(&self.items, &self.filter_text)
    }
}
