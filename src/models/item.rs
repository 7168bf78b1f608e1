use serde::{Deserialize, Serialize};

/// Closed classification of an item. Any other wire value fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tools,
    Consumables,
}

/// Core inventory record. `id` doubles as the registry key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Unconstrained; negative prices are accepted.
    pub price: f64,
    pub count: i64,
    pub id: i64,
    pub category: Category,
}

impl Item {
    pub fn new(name: impl Into<String>, price: f64, count: i64, id: i64, category: Category) -> Self {
        Self {
            name: name.into(),
            price,
            count,
            id,
            category,
        }
    }
}

// ── Query parameters ──────────────────────────────────────────────────────────

/// Optional exact-match filters for `GET /items/`. Echoed back verbatim,
/// absent filters as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemQuery {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub count: Option<i64>,
    pub category: Option<Category>,
}

impl ItemQuery {
    /// True when every filter that is present matches the item.
    pub fn matches(&self, item: &Item) -> bool {
        self.name.as_deref().map_or(true, |name| item.name == name)
            && self.price.map_or(true, |price| item.price == price)
            && self.count.map_or(true, |count| item.count == count)
            && self.category.map_or(true, |category| item.category == category)
    }
}
