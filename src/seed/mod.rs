use tracing::info;

use crate::models::{Category, Item};

/// (name, price, count, category) for ids 0, 1, 2.
static SEED_ITEMS: &[(&str, f64, i64, Category)] = &[
    ("Hammer", 9.99, 20, Category::Tools),
    ("Pliers", 5.99, 15, Category::Tools),
    ("Nails", 1.99, 100, Category::Consumables),
];

/// The records every fresh registry starts with, ids assigned by position.
pub fn seed_items() -> Vec<Item> {
    let items: Vec<Item> = SEED_ITEMS
        .iter()
        .zip(0_i64..)
        .map(|(&(name, price, count, category), id)| Item::new(name, price, count, id, category))
        .collect();

    info!("Seeded {} items", items.len());
    items
}
