use std::str::FromStr;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::models::{Item, ItemQuery};
use crate::seed;

/// How `delete` treats its existence check.
///
/// - `Legacy`    → the check is inverted: deleting a stored item is refused with
///                 "already exists", deleting a missing item fails internally.
/// - `Corrected` → conventional delete: missing ids are 404, stored ids are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteGuard {
    #[default]
    Legacy,
    Corrected,
}

impl FromStr for DeleteGuard {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(DeleteGuard::Legacy),
            "corrected" => Ok(DeleteGuard::Corrected),
            other => anyhow::bail!("unknown delete guard `{other}`"),
        }
    }
}

/// In-memory item store keyed by item id.
///
/// `IndexMap` keeps insertion order, which is the order `GET /` and query
/// selections report. Every stored item's `id` equals its key.
#[derive(Debug, Default)]
pub struct Registry {
    items: IndexMap<i64, Item>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        let mut registry = Self::new();
        for item in seed::seed_items() {
            registry.items.insert(item.id, item);
        }
        registry
    }

    pub fn items(&self) -> &IndexMap<i64, Item> {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, id: i64) -> AppResult<&Item> {
        self.items
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Item with id {id} does not exist.")))
    }

    /// Items matching every present filter, in insertion order.
    pub fn query(&self, query: &ItemQuery) -> Vec<Item> {
        self.items
            .values()
            .filter(|item| query.matches(item))
            .cloned()
            .collect()
    }

    pub fn add(&mut self, item: Item) -> AppResult<Item> {
        if self.items.contains_key(&item.id) {
            return Err(AppError::AlreadyExists(format!(
                "Item with id {} already exists.",
                item.id
            )));
        }
        self.items.insert(item.id, item.clone());
        debug!(id = item.id, total = self.items.len(), "Inserted item");
        Ok(item)
    }

    pub fn delete(&mut self, id: i64, guard: DeleteGuard) -> AppResult<Item> {
        match guard {
            DeleteGuard::Legacy => {
                if self.items.contains_key(&id) {
                    return Err(AppError::AlreadyExists(format!(
                        "Item with id {id} already exists."
                    )));
                }
                // Unreachable for stored ids, so this removal always misses.
                self.remove(id).ok_or_else(|| {
                    warn!(id, "Legacy delete reached removal of a missing id");
                    AppError::Internal(format!("no item stored under id {id}"))
                })
            }
            DeleteGuard::Corrected => self
                .remove(id)
                .ok_or_else(|| AppError::NotFound(format!("Item with id {id} does not exist."))),
        }
    }

    fn remove(&mut self, id: i64) -> Option<Item> {
        self.items.shift_remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn saw() -> Item {
        Item::new("Saw", 12.5, 4, 3, Category::Tools)
    }

    fn ids(registry: &Registry) -> Vec<i64> {
        registry.items().keys().copied().collect()
    }

    #[test]
    fn seeded_registry_holds_three_items_in_order() {
        let reg = Registry::seeded();
        assert_eq!(ids(&reg), vec![0, 1, 2]);
        assert_eq!(reg.get(1).unwrap().name, "Pliers");
    }

    #[test]
    fn keys_match_item_ids() {
        let mut reg = Registry::seeded();
        reg.add(saw()).unwrap();
        for (key, item) in reg.items() {
            assert_eq!(*key, item.id);
        }
    }

    #[test]
    fn get_missing_id_reports_not_found() {
        let reg = Registry::seeded();
        for id in [3, -1, 1_000_000] {
            match reg.get(id) {
                Err(AppError::NotFound(msg)) => {
                    assert_eq!(msg, format!("Item with id {id} does not exist."))
                }
                other => panic!("expected NotFound, got {other:?}"),
            }
        }
    }

    #[test]
    fn query_by_category_keeps_insertion_order() {
        let reg = Registry::seeded();
        let q = ItemQuery { category: Some(Category::Tools), ..Default::default() };
        let names: Vec<String> = reg.query(&q).into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Hammer", "Pliers"]);
    }

    #[test]
    fn query_without_matches_is_empty() {
        let reg = Registry::seeded();
        let q = ItemQuery { name: Some("Saw".to_string()), ..Default::default() };
        assert!(reg.query(&q).is_empty());
    }

    #[test]
    fn add_then_get() {
        let mut reg = Registry::seeded();
        assert_eq!(reg.add(saw()).unwrap(), saw());
        assert_eq!(reg.get(3).unwrap(), &saw());
        assert_eq!(ids(&reg), vec![0, 1, 2, 3]);
    }

    #[test]
    fn add_duplicate_is_rejected_and_registry_unchanged() {
        let mut reg = Registry::seeded();
        let dup = Item::new("Other", 1.0, 1, 0, Category::Consumables);
        match reg.add(dup) {
            Err(AppError::AlreadyExists(msg)) => assert_eq!(msg, "Item with id 0 already exists."),
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.get(0).unwrap().name, "Hammer");
    }

    #[test]
    fn legacy_delete_refuses_stored_item() {
        let mut reg = Registry::seeded();
        match reg.delete(0, DeleteGuard::Legacy) {
            Err(AppError::AlreadyExists(msg)) => assert_eq!(msg, "Item with id 0 already exists."),
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
        assert_eq!(ids(&reg), vec![0, 1, 2]);
    }

    #[test]
    fn legacy_delete_of_missing_id_fails_internally() {
        let mut reg = Registry::seeded();
        assert!(matches!(
            reg.delete(42, DeleteGuard::Legacy),
            Err(AppError::Internal(_))
        ));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn corrected_delete_removes_and_preserves_order() {
        let mut reg = Registry::seeded();
        let removed = reg.delete(1, DeleteGuard::Corrected).unwrap();
        assert_eq!(removed.name, "Pliers");
        assert_eq!(ids(&reg), vec![0, 2]);
    }

    #[test]
    fn corrected_delete_of_missing_id_is_not_found() {
        let mut reg = Registry::new();
        match reg.delete(5, DeleteGuard::Corrected) {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Item with id 5 does not exist."),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn delete_guard_parses_case_insensitively() {
        assert_eq!("Legacy".parse::<DeleteGuard>().unwrap(), DeleteGuard::Legacy);
        assert_eq!(" corrected ".parse::<DeleteGuard>().unwrap(), DeleteGuard::Corrected);
        assert!("strict".parse::<DeleteGuard>().is_err());
    }
}
