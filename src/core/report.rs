//! Report generation business logic.
//!
//! This module provides the dashboard summary and the category-centred reports. All
//! functions are framework-agnostic and return structured data that the console layer
//! formats.

use crate::{
    core::{category, product},
    entities::{StockStatus, category as category_entity, product as product_entity},
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;

/// Number of categories in each stock status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusBreakdown {
    /// Categories classified `LowStock`
    pub low: usize,
    /// Categories classified `NormalStock`
    pub normal: usize,
    /// Categories classified `ExcessStock`
    pub excess: usize,
}

impl StatusBreakdown {
    /// Counts `categories` by status.
    #[must_use]
    pub fn from_categories(categories: &[category_entity::Model]) -> Self {
        categories
            .iter()
            .fold(Self::default(), |mut breakdown, category| {
                match category.status {
                    StockStatus::LowStock => breakdown.low += 1,
                    StockStatus::NormalStock => breakdown.normal += 1,
                    StockStatus::ExcessStock => breakdown.excess += 1,
                }
                breakdown
            })
    }
}

/// Overall inventory summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    /// Number of registered products
    pub total_products: usize,
    /// Number of registered categories
    pub total_categories: usize,
    /// Categories per status
    pub breakdown: StatusBreakdown,
}

/// A category together with the products assigned to it.
#[derive(Debug, Clone)]
pub struct CategoryDetail {
    /// The stored category record
    pub category: category_entity::Model,
    /// Its products, ordered by id
    pub products: Vec<product_entity::Model>,
}

/// Builds the dashboard summary from the stored records.
pub async fn dashboard<C>(db: &C) -> Result<DashboardSummary>
where
    C: ConnectionTrait,
{
    let products = product::get_all_products(db).await?;
    let categories = category::get_all_categories(db).await?;

    Ok(DashboardSummary {
        total_products: products.len(),
        total_categories: categories.len(),
        breakdown: StatusBreakdown::from_categories(&categories),
    })
}

/// Categories currently classified `LowStock`.
pub async fn critical_categories<C>(db: &C) -> Result<Vec<category_entity::Model>>
where
    C: ConnectionTrait,
{
    category::get_categories_by_status(db, StockStatus::LowStock).await
}

/// Every product belonging to a `LowStock` category, grouped by category name.
pub async fn products_in_critical_categories<C>(db: &C) -> Result<Vec<CategoryDetail>>
where
    C: ConnectionTrait,
{
    let mut details = Vec::new();
    for category in critical_categories(db).await? {
        let products = product::products_in_category(db, &category.name).await?;
        details.push(CategoryDetail { category, products });
    }
    Ok(details)
}

/// The category record for `name` together with its products.
///
/// # Errors
/// Returns `CategoryNotFound` if the category is not registered.
pub async fn category_detail<C>(db: &C, name: &str) -> Result<CategoryDetail>
where
    C: ConnectionTrait,
{
    let category = category::get_category(db, name)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            name: category::canonical_name(name),
        })?;
    let products = product::products_in_category(db, &category.name).await?;
    Ok(CategoryDetail { category, products })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_dashboard_counts() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_category(&db, "bolts", 10).await?;
        create_custom_category(&db, "nuts", 10).await?;
        create_custom_category(&db, "washers", 2).await?;
        create_custom_product(&db, "Hex bolt", 6, 1.0, "bolts").await?;
        create_custom_product(&db, "Flat washer", 50, 0.1, "washers").await?;
        create_custom_product(&db, "Lock washer", 50, 0.1, "washers").await?;

        let summary = dashboard(&db).await?;
        assert_eq!(summary.total_products, 3);
        assert_eq!(summary.total_categories, 3);
        assert_eq!(
            summary.breakdown,
            StatusBreakdown {
                low: 1,
                normal: 1,
                excess: 1,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_empty() -> Result<()> {
        let db = setup_test_db().await?;

        let summary = dashboard(&db).await?;
        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.total_categories, 0);
        assert_eq!(summary.breakdown, StatusBreakdown::default());

        Ok(())
    }

    #[tokio::test]
    async fn test_products_in_critical_categories() -> Result<()> {
        let db = setup_test_db().await?;
        create_custom_category(&db, "bolts", 100).await?;
        create_custom_category(&db, "nuts", 1).await?;
        create_custom_category(&db, "gears", 5).await?;
        create_custom_product(&db, "Hex bolt", 3, 1.0, "bolts").await?;
        create_custom_product(&db, "Carriage bolt", 4, 1.0, "bolts").await?;
        create_custom_product(&db, "Wing nut", 9, 1.0, "nuts").await?;

        let critical = critical_categories(&db).await?;
        let names: Vec<&str> = critical.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["BOLTS", "GEARS"]);

        let details = products_in_critical_categories(&db).await?;
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].category.name, "BOLTS");
        assert_eq!(details[0].products.len(), 2);
        assert!(details[1].products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_category_detail() -> Result<()> {
        let (db, bolts, product) = setup_with_product().await?;

        let detail = category_detail(&db, "Bolts").await?;
        assert_eq!(detail.category.name, bolts.name);
        assert_eq!(detail.products, vec![product]);

        let result = category_detail(&db, "ghost").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::CategoryNotFound { name } if name == "GHOST"
        ));

        Ok(())
    }
}
