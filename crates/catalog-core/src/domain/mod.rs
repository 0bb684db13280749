//! # Catalog Core - Domain Module
//! 
//! Domain entities for the menu catalog.

pub mod category;
pub mod menu_item;

pub use category::{Category, NewCategory};
pub use menu_item::{MenuItem, NewMenuItem};
