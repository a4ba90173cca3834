// TUI application state and the actions the key bindings trigger
use itemdesk_core::{Item, ItemBackend, ItemId, ItemStore};
use ratatui::widgets::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,          // Navigating the list
    EditingName,     // Typing in the name field
    EditingCategory, // Typing in the category field
    Filtering,       // Typing in the filter box
    ConfirmDelete,   // Waiting for y/n
}

pub struct App<B: ItemBackend> {
    pub store: ItemStore<B>,
    pub should_quit: bool,
    pub input_mode: InputMode,
    /// Position among visible items; heading rows are not counted
    pub selected_index: usize,
    /// Scroll state for the list widget, rebuilt from `selected_index` on every draw
    pub list_state: ListState,
    pub loading: bool,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    pub confirm_delete: bool,
    pub pending_delete: Option<Item>,
}

impl<B: ItemBackend> App<B> {
    pub fn new(store: ItemStore<B>) -> Self {
        Self {
            store,
            should_quit: false,
            input_mode: InputMode::Normal,
            selected_index: 0,
            list_state: ListState::default(),
            loading: false,
            error_message: None,
            status_message: None,
            confirm_delete: true,
            pending_delete: None,
        }
    }

    pub fn with_confirm_delete(mut self, confirm: bool) -> Self {
        self.confirm_delete = confirm;
        self
    }

    /// Visible items in display order: group by group, top to bottom
    pub fn visible_items(&self) -> Vec<&Item> {
        self.store
            .visible_groups()
            .into_iter()
            .flat_map(|group| group.items)
            .collect()
    }

    pub fn selected_item(&self) -> Option<Item> {
        self.visible_items()
            .get(self.selected_index)
            .map(|item| (*item).clone())
    }

    pub fn next_item(&mut self) {
        let count = self.visible_items().len();
        if count > 0 {
            self.selected_index = (self.selected_index + 1).min(count - 1);
        }
    }

    pub fn previous_item(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Keep the cursor on a real row after the visible set shrinks
    fn clamp_selection(&mut self) {
        let count = self.visible_items().len();
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.status_message = None;
    }

    pub fn enter_normal_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_filter_mode(&mut self) {
        self.input_mode = InputMode::Filtering;
    }

    /// Fresh form in create mode
    pub fn start_create(&mut self) {
        self.store.cancel_edit();
        self.input_mode = InputMode::EditingName;
    }

    /// Load the selected item into the form
    pub fn start_edit(&mut self) {
        if let Some(item) = self.selected_item() {
            self.store.begin_edit(&item);
            self.input_mode = InputMode::EditingName;
        }
    }

    /// Esc in the form: drop the edit and go back to the list
    pub fn cancel_form(&mut self) {
        self.store.cancel_edit();
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_form_field(&mut self) {
        self.input_mode = match self.input_mode {
            InputMode::EditingName => InputMode::EditingCategory,
            InputMode::EditingCategory => InputMode::EditingName,
            other => other,
        };
    }

    /// Typed character goes to whichever field has focus
    pub fn push_char(&mut self, c: char) {
        match self.input_mode {
            InputMode::EditingName => {
                let mut name = self.store.draft().name.clone();
                name.push(c);
                self.store.set_draft_name(name);
            }
            InputMode::EditingCategory => {
                let mut category = self.store.draft().category.clone();
                category.push(c);
                self.store.set_draft_category(category);
            }
            InputMode::Filtering => {
                let mut filter = self.store.filter_text().to_string();
                filter.push(c);
                self.store.set_filter(filter);
                self.clamp_selection();
            }
            InputMode::Normal | InputMode::ConfirmDelete => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.input_mode {
            InputMode::EditingName => {
                let mut name = self.store.draft().name.clone();
                name.pop();
                self.store.set_draft_name(name);
            }
            InputMode::EditingCategory => {
                let mut category = self.store.draft().category.clone();
                category.pop();
                self.store.set_draft_category(category);
            }
            InputMode::Filtering => {
                let mut filter = self.store.filter_text().to_string();
                filter.pop();
                self.store.set_filter(filter);
                self.clamp_selection();
            }
            InputMode::Normal | InputMode::ConfirmDelete => {}
        }
    }

    /// Flag a fetch as under way so the next draw shows it
    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    pub async fn reload(&mut self) {
        self.start_loading();
        match self.store.load().await {
            Ok(()) => {
                self.status_message = Some(format!("Loaded {} items", self.store.items().len()));
                self.error_message = None;
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to load items: {}", e));
            }
        }
        self.loading = false;
        self.clamp_selection();
    }

    /// Enter in the form. Failures keep the form open with its text intact.
    pub async fn submit_form(&mut self) {
        let updating = self.store.is_editing();
        match self.store.submit_draft().await {
            Ok(Some(item)) => {
                let verb = if updating { "Updated" } else { "Added" };
                self.status_message = Some(format!("{} \"{}\"", verb, item.name));
                self.error_message = None;
                self.input_mode = InputMode::Normal;
                self.clamp_selection();
            }
            Ok(None) => {
                self.error_message = Some("Name and category are both required".to_string());
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to save item: {}", e));
            }
        }
    }

    /// `d` on the list: ask first, or delete straight away when confirmation is off
    pub async fn request_delete(&mut self) {
        let Some(item) = self.selected_item() else {
            return;
        };

        if self.confirm_delete {
            self.pending_delete = Some(item);
            self.input_mode = InputMode::ConfirmDelete;
        } else {
            self.delete(item.id).await;
        }
    }

    pub async fn confirm_pending_delete(&mut self) {
        self.input_mode = InputMode::Normal;
        if let Some(item) = self.pending_delete.take() {
            self.delete(item.id).await;
        }
    }

    pub fn cancel_pending_delete(&mut self) {
        self.pending_delete = None;
        self.input_mode = InputMode::Normal;
    }

    async fn delete(&mut self, id: ItemId) {
        match self.store.remove(&id).await {
            Ok(_) => {
                self.status_message = Some(format!("Deleted item {}", id));
                self.error_message = None;
            }
            Err(e) => {
                self.error_message = Some(format!("Failed to delete item: {}", e));
            }
        }
        self.clamp_selection();
    }
}
