use itemdesk_api::{ApiId, ApiItem, ItemPayload};
use serde::{Deserialize, Serialize};

/// Server-assigned item identity. Opaque to us: we only compare and print it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::convert::Infallible;

    /// Integers become numeric ids, anything else is kept as text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => ItemId::Number(n),
            Err(_) => ItemId::Text(s.to_string()),
        })
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Number(n)
    }
}

impl From<ApiId> for ItemId {
    fn from(id: ApiId) -> Self {
        match id {
            ApiId::Number(n) => ItemId::Number(n),
            ApiId::Text(s) => ItemId::Text(s),
        }
    }
}

/// A managed record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: String,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
        }
    }
}

impl From<ApiItem> for Item {
    fn from(api: ApiItem) -> Self {
        Self {
            id: api.id.into(),
            name: api.name,
            category: api.category,
        }
    }
}

/// Pending form input for create/update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub category: String,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }

    /// Both fields must be filled before anything goes over the wire
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.category.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.category.clear();
    }

    pub fn to_payload(&self) -> ItemPayload {
        ItemPayload {
            name: self.name.clone(),
            category: self.category.clone(),
        }
    }
}
