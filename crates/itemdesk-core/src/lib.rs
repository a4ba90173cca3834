// Core item management - the store, its backend seam and the derived views
pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod store;
pub mod view;

pub use backend::ItemBackend;
pub use config::Config;
pub use error::Error;
pub use models::{Item, ItemDraft, ItemId};
pub use providers::HttpBackend;
pub use store::ItemStore;
pub use view::{visible_groups, CategoryGroup};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
