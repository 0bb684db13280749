//! Domain services (business logic)

pub mod menu_item_service;
pub mod category_service;
pub mod analysis_service;

pub use menu_item_service::MenuItemService;
pub use category_service::CategoryService;
pub use analysis_service::{
    AnalysisService, AvailabilityCounts, CatalogReport, CategoryAverage, CategoryCount,
    PreparationTimeSummary, PriceExtremes,
};
