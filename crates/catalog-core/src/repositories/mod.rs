//! Repository traits (ports)

pub mod menu_item_repository;
pub mod category_repository;

pub use menu_item_repository::MenuItemRepository;
pub use category_repository::CategoryRepository;

#[cfg(test)]
pub use menu_item_repository::MockMenuItemRepository;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
