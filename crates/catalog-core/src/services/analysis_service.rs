// ============================================================================
// Catalog Core - Analysis Service
// File: crates/catalog-core/src/services/analysis_service.rs
// ============================================================================
//! Price and nutrition aggregation over the menu item collection.
//!
//! All money arithmetic stays in [`Decimal`]; an empty input set yields zero.

use std::collections::BTreeMap;
use std::sync::Arc;

use catalog_shared::EntityId;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::domain::{Category, MenuItem};
use crate::error::DomainError;
use crate::repositories::{CategoryRepository, MenuItemRepository};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category_id: EntityId,
    pub category_name: String,
    pub item_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAverage {
    pub category_id: EntityId,
    pub category_name: String,
    pub average_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceExtremes {
    pub most_expensive: MenuItem,
    pub least_expensive: MenuItem,
}

/// Average preparation time in minutes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparationTimeSummary {
    pub vegetarian: Decimal,
    pub non_vegetarian: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilityCounts {
    pub available: u64,
    pub unavailable: u64,
}

/// Every aggregate, computed from one read of the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogReport {
    pub item_count: u64,
    pub median_price: Decimal,
    pub average_price: Decimal,
    pub average_calories: Decimal,
    pub items_per_category: Vec<CategoryCount>,
    pub average_price_per_category: Vec<CategoryAverage>,
    pub price_extremes: Option<PriceExtremes>,
    pub average_preparation_time: PreparationTimeSummary,
    pub availability: AvailabilityCounts,
    pub highest_calorie_item: Option<MenuItem>,
}

pub struct AnalysisService<M: MenuItemRepository, C: CategoryRepository> {
    item_repo: Arc<M>,
    category_repo: Arc<C>,
}

impl<M: MenuItemRepository, C: CategoryRepository> AnalysisService<M, C> {
    pub fn new(item_repo: Arc<M>, category_repo: Arc<C>) -> Self {
        Self {
            item_repo,
            category_repo,
        }
    }

    pub async fn median_price(&self) -> Result<Decimal, DomainError> {
        let items = self.item_repo.find_all().await?;
        median(items.iter().map(|i| i.price).collect())
    }

    /// Mean price, optionally restricted to the category named `category_name`
    /// (case-insensitive). An unknown category averages to zero.
    pub async fn average_price(&self, category_name: Option<&str>) -> Result<Decimal, DomainError> {
        let items = match category_name {
            None => self.item_repo.find_all().await?,
            Some(name) => match self.category_repo.find_by_name(name.trim()).await? {
                Some(category) => self.item_repo.find_by_category_id(category.id).await?,
                None => {
                    debug!("Average price requested for unknown category {}", name);
                    Vec::new()
                }
            },
        };
        mean(items.iter().map(|i| i.price))
    }

    pub async fn average_calories(&self) -> Result<Decimal, DomainError> {
        let items = self.item_repo.find_all().await?;
        mean(items.iter().map(|i| Decimal::from(i.calories)))
    }

    pub async fn item_count_per_category(&self) -> Result<Vec<CategoryCount>, DomainError> {
        let (items, categories) = self.load().await?;
        Ok(count_per_category(&items, &categories))
    }

    pub async fn average_price_per_category(&self) -> Result<Vec<CategoryAverage>, DomainError> {
        let (items, categories) = self.load().await?;
        average_per_category(&items, &categories)
    }

    pub async fn price_extremes(&self) -> Result<Option<PriceExtremes>, DomainError> {
        let items = self.item_repo.find_all().await?;
        Ok(price_extremes(&items))
    }

    pub async fn average_preparation_time(&self) -> Result<PreparationTimeSummary, DomainError> {
        let items = self.item_repo.find_all().await?;
        preparation_time(&items)
    }

    pub async fn availability_counts(&self) -> Result<AvailabilityCounts, DomainError> {
        let items = self.item_repo.find_all().await?;
        Ok(availability(&items))
    }

    pub async fn highest_calorie_item(&self) -> Result<Option<MenuItem>, DomainError> {
        let items = self.item_repo.find_all().await?;
        Ok(highest_calorie(&items))
    }

    pub async fn report(&self) -> Result<CatalogReport, DomainError> {
        let (items, categories) = self.load().await?;

        Ok(CatalogReport {
            item_count: items.len() as u64,
            median_price: median(items.iter().map(|i| i.price).collect())?,
            average_price: mean(items.iter().map(|i| i.price))?,
            average_calories: mean(items.iter().map(|i| Decimal::from(i.calories)))?,
            items_per_category: count_per_category(&items, &categories),
            average_price_per_category: average_per_category(&items, &categories)?,
            price_extremes: price_extremes(&items),
            average_preparation_time: preparation_time(&items)?,
            availability: availability(&items),
            highest_calorie_item: highest_calorie(&items),
        })
    }

    async fn load(&self) -> Result<(Vec<MenuItem>, Vec<Category>), DomainError> {
        let items = self.item_repo.find_all().await?;
        let categories = self.category_repo.find_all().await?;
        Ok((items, categories))
    }
}

fn overflow() -> DomainError {
    DomainError::InternalError("Decimal overflow while aggregating prices".to_string())
}

fn median(mut values: Vec<Decimal>) -> Result<Decimal, DomainError> {
    if values.is_empty() {
        return Ok(Decimal::ZERO);
    }
    values.sort();

    let mid = values.len() / 2;
    let value = if values.len() % 2 == 1 {
        values[mid]
    } else {
        values[mid - 1]
            .checked_add(values[mid])
            .and_then(|sum| sum.checked_div(Decimal::TWO))
            .ok_or_else(overflow)?
    };
    Ok(value.normalize())
}

fn mean(values: impl IntoIterator<Item = Decimal>) -> Result<Decimal, DomainError> {
    let mut sum = Decimal::ZERO;
    let mut count = 0u64;
    for value in values {
        sum = sum.checked_add(value).ok_or_else(overflow)?;
        count += 1;
    }
    if count == 0 {
        return Ok(Decimal::ZERO);
    }
    sum.checked_div(Decimal::from(count))
        .map(|m| m.normalize())
        .ok_or_else(overflow)
}

fn group_by_category(items: &[MenuItem]) -> BTreeMap<EntityId, Vec<&MenuItem>> {
    let mut groups: BTreeMap<EntityId, Vec<&MenuItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.category_id).or_default().push(item);
    }
    groups
}

fn count_per_category(items: &[MenuItem], categories: &[Category]) -> Vec<CategoryCount> {
    let groups = group_by_category(items);
    categories
        .iter()
        .map(|c| CategoryCount {
            category_id: c.id,
            category_name: c.name.clone(),
            item_count: groups.get(&c.id).map_or(0, |g| g.len() as u64),
        })
        .collect()
}

/// Only categories that own at least one item are listed.
fn average_per_category(
    items: &[MenuItem],
    categories: &[Category],
) -> Result<Vec<CategoryAverage>, DomainError> {
    let groups = group_by_category(items);
    categories
        .iter()
        .filter_map(|c| {
            groups.get(&c.id).map(|group| -> Result<CategoryAverage, DomainError> {
                Ok(CategoryAverage {
                    category_id: c.id,
                    category_name: c.name.clone(),
                    average_price: mean(group.iter().map(|i| i.price))?,
                })
            })
        })
        .collect()
}

// Ties go to the lowest id.
fn price_extremes(items: &[MenuItem]) -> Option<PriceExtremes> {
    let most = items
        .iter()
        .max_by(|a, b| a.price.cmp(&b.price).then(b.id.cmp(&a.id)))?;
    let least = items
        .iter()
        .min_by(|a, b| a.price.cmp(&b.price).then(a.id.cmp(&b.id)))?;
    Some(PriceExtremes {
        most_expensive: most.clone(),
        least_expensive: least.clone(),
    })
}

fn preparation_time(items: &[MenuItem]) -> Result<PreparationTimeSummary, DomainError> {
    let minutes = |vegetarian: bool| {
        mean(
            items
                .iter()
                .filter(|i| i.vegetarian == vegetarian)
                .map(|i| Decimal::from(i.preparation_time_minutes)),
        )
    };
    Ok(PreparationTimeSummary {
        vegetarian: minutes(true)?,
        non_vegetarian: minutes(false)?,
    })
}

fn availability(items: &[MenuItem]) -> AvailabilityCounts {
    let available = items.iter().filter(|i| i.available).count() as u64;
    AvailabilityCounts {
        available,
        unavailable: items.len() as u64 - available,
    }
}

fn highest_calorie(items: &[MenuItem]) -> Option<MenuItem> {
    items
        .iter()
        .max_by(|a, b| a.calories.cmp(&b.calories).then(b.id.cmp(&a.id)))
        .cloned()
}
