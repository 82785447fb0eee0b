//! The menu, CSV loading, and dishes on the table.
//!
//! # CSV format
//!
//! ```csv
//! name,kind,price_cents,portions
//! Soup of the day,food,650,4
//! Lemonade,drink,300,1
//! Tiramisu,dessert,550,4
//! ```
//!
//! `kind` is one of `food`, `drink`, `dessert`.  `portions` is the number
//! of bites (or sips) a served item lasts.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{BehaviorError, BehaviorResult};

// ── MenuItem ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuKind {
    Food,
    Drink,
    Dessert,
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
pub struct MenuItem {
    pub name:        String,
    pub kind:        MenuKind,
    pub price_cents: u32,
    pub portions:    u32,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, kind: MenuKind, price_cents: u32, portions: u32) -> Self {
        Self { name: name.into(), kind, price_cents, portions }
    }

    #[inline]
    pub fn is_drink(&self) -> bool {
        self.kind == MenuKind::Drink
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// The built-in menu used when no CSV is supplied.
    pub fn house() -> Self {
        use MenuKind::*;
        Self::new(vec![
            MenuItem::new("Soup of the day", Food, 650, 4),
            MenuItem::new("Steak frites", Food, 1_850, 4),
            MenuItem::new("Mushroom risotto", Food, 1_400, 4),
            MenuItem::new("Croque monsieur", Food, 950, 4),
            MenuItem::new("Lemonade", Drink, 300, 1),
            MenuItem::new("House red", Drink, 600, 1),
            MenuItem::new("Sparkling water", Drink, 250, 1),
            MenuItem::new("Tiramisu", Dessert, 550, 4),
            MenuItem::new("Crème brûlée", Dessert, 600, 4),
            MenuItem::new("Sorbet", Dessert, 450, 4),
        ])
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// All items of one kind, in menu order.
    pub fn of_kind(&self, kind: MenuKind) -> Vec<&MenuItem> {
        self.items.iter().filter(|i| i.kind == kind).collect()
    }

    pub fn get(&self, name: &str) -> Option<&MenuItem> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// A menu guests can order every course from has at least one food, one
    /// drink, and one dessert.
    pub fn validate(&self) -> BehaviorResult<()> {
        for kind in [MenuKind::Food, MenuKind::Drink, MenuKind::Dessert] {
            if !self.items.iter().any(|i| i.kind == kind) {
                return Err(BehaviorError::Menu(format!("menu has no {kind:?} items")));
            }
        }
        Ok(())
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Load a menu from a CSV file.
pub fn load_menu_csv(path: &Path) -> BehaviorResult<Menu> {
    let file = std::fs::File::open(path)?;
    load_menu_reader(file)
}

/// Like [`load_menu_csv`] but accepts any `Read` source.
pub fn load_menu_reader<R: Read>(reader: R) -> BehaviorResult<Menu> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let items = csv_reader
        .deserialize::<MenuItem>()
        .map(|row| row.map_err(|e| BehaviorError::Menu(e.to_string())))
        .collect::<BehaviorResult<Vec<_>>>()?;
    Ok(Menu::new(items))
}

// ── Dish ──────────────────────────────────────────────────────────────────────

/// A served item in front of a guest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dish {
    pub item:       MenuItem,
    pub bites_left: u32,
}

impl Dish {
    pub fn new(item: MenuItem) -> Self {
        let bites_left = item.portions.max(1);
        Self { item, bites_left }
    }

    /// Take `n` bites, stopping at empty.
    pub fn bite(&mut self, n: u32) {
        self.bites_left = self.bites_left.saturating_sub(n);
    }

    pub fn is_finished(&self) -> bool {
        self.bites_left == 0
    }
}
