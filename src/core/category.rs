//! Category business logic - registration, lookup, demand updates and deletion.
//!
//! Category names are canonicalised (trimmed and upper-cased) on the way in, so every
//! comparison below works on the stored form directly. Derived columns are only ever
//! written through [`replace_category_record`], which re-derives the protection stock
//! from the weekly demand it is given.

use crate::{
    config::settings::CategorySeed,
    core::{recompute, status},
    entities::{Category, Product, StockStatus, category, product},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*, sea_query::OnConflict};
use tracing::{debug, info};

/// Full set of values written by a category record replace.
///
/// There is no `protection_stock` field: it is always derived from
/// `weekly_demand` inside [`replace_category_record`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryFigures {
    /// Mean unit price, rounded to cents
    pub mean: f64,
    /// Lowest unit price
    pub min_price: f64,
    /// Highest unit price
    pub max_price: f64,
    /// Sum of member quantities
    pub stock_global: i64,
    /// Weekly demand to store; `None` leaves a never-set demand unset
    pub weekly_demand: Option<i64>,
    /// Classification to store
    pub status: StockStatus,
}

impl CategoryFigures {
    /// Figures for a category with no stock: zeroed prices and `LowStock`.
    #[must_use]
    pub const fn empty(weekly_demand: Option<i64>) -> Self {
        Self {
            mean: 0.0,
            min_price: 0.0,
            max_price: 0.0,
            stock_global: 0,
            weekly_demand,
            status: StockStatus::LowStock,
        }
    }
}

/// Canonical form of a category name: surrounding whitespace removed, upper-cased.
#[must_use]
pub fn canonical_name(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Finds a category by name, matched case-insensitively through the canonical form.
pub async fn get_category<C>(db: &C, name: &str) -> Result<Option<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find_by_id(canonical_name(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every registered category, ordered by name.
pub async fn get_all_categories<C>(db: &C) -> Result<Vec<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the categories currently classified as `status`, ordered by name.
pub async fn get_categories_by_status<C>(
    db: &C,
    status: StockStatus,
) -> Result<Vec<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find()
        .filter(category::Column::Status.eq(status))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Registers a new category with zero aggregates.
///
/// A fresh category has no stock, so it starts out as `LowStock` whatever its demand.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or whitespace-only
/// - The weekly demand is negative
/// - A category with the same canonical name exists
/// - The database insert fails
pub async fn create_category<C>(db: &C, name: &str, weekly_demand: i64) -> Result<category::Model>
where
    C: ConnectionTrait,
{
    let name = canonical_name(name);
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Category name cannot be empty".to_string(),
        });
    }
    if weekly_demand < 0 {
        return Err(Error::InvalidWeeklyDemand {
            demand: weekly_demand,
        });
    }
    if get_category(db, &name).await?.is_some() {
        return Err(Error::CategoryAlreadyExists { name });
    }

    let figures = CategoryFigures::empty(Some(weekly_demand));
    let category = category::ActiveModel {
        name: Set(name.clone()),
        mean: Set(figures.mean),
        min_price: Set(figures.min_price),
        max_price: Set(figures.max_price),
        stock_global: Set(figures.stock_global),
        weekly_demand: Set(Some(weekly_demand)),
        protection_stock: Set(status::protection_stock(weekly_demand)),
        status: Set(figures.status),
    };
    let created = category.insert(db).await?;
    info!("Registered category {name} with weekly demand {weekly_demand}");

    Ok(created)
}

/// Changes a category's weekly demand and reclassifies it.
///
/// The product set is not touched, but the protection stock and status are derived
/// from the demand, so the new demand goes through a full recompute and is stored
/// in the same record replace as the figures. A failed write leaves the previous
/// record as it was.
///
/// # Errors
/// Returns an error if the demand is negative, the category does not exist, or a
/// database operation fails.
pub async fn update_weekly_demand<C>(
    db: &C,
    name: &str,
    weekly_demand: i64,
) -> Result<category::Model>
where
    C: ConnectionTrait,
{
    if weekly_demand < 0 {
        return Err(Error::InvalidWeeklyDemand {
            demand: weekly_demand,
        });
    }

    let name = canonical_name(name);
    let record = get_category(db, &name)
        .await?
        .ok_or_else(|| Error::CategoryNotFound { name: name.clone() })?;

    let updated = recompute::recompute_with_demand(db, &record, Some(weekly_demand)).await?;
    info!("Weekly demand of {name} set to {weekly_demand}");
    Ok(updated)
}

/// Deletes a category that no product references.
///
/// # Errors
/// Returns `CategoryInUse` when products still point at the category,
/// `CategoryNotFound` when it does not exist, or a database error.
pub async fn delete_category<C>(db: &C, name: &str) -> Result<()>
where
    C: ConnectionTrait,
{
    let name = canonical_name(name);
    if get_category(db, &name).await?.is_none() {
        return Err(Error::CategoryNotFound { name });
    }

    let product_count = Product::find()
        .filter(product::Column::Category.eq(name.as_str()))
        .count(db)
        .await?;
    if product_count > 0 {
        return Err(Error::CategoryInUse {
            name,
            product_count,
        });
    }

    Category::delete_by_id(name.clone()).exec(db).await?;
    info!("Deleted category {name}");
    Ok(())
}

/// Writes every derived column of a category in one statement.
///
/// Inserts the record when it does not exist yet, otherwise replaces it. The
/// protection stock is recomputed here from `figures.weekly_demand`; an unset
/// demand counts as zero.
pub async fn replace_category_record<C>(
    db: &C,
    name: &str,
    figures: &CategoryFigures,
) -> Result<category::Model>
where
    C: ConnectionTrait,
{
    let name = canonical_name(name);
    let record = category::ActiveModel {
        name: Set(name.clone()),
        mean: Set(figures.mean),
        min_price: Set(figures.min_price),
        max_price: Set(figures.max_price),
        stock_global: Set(figures.stock_global),
        weekly_demand: Set(figures.weekly_demand),
        protection_stock: Set(status::protection_stock(figures.weekly_demand.unwrap_or(0))),
        status: Set(figures.status),
    };

    Category::insert(record)
        .on_conflict(
            OnConflict::column(category::Column::Name)
                .update_columns([
                    category::Column::Mean,
                    category::Column::MinPrice,
                    category::Column::MaxPrice,
                    category::Column::StockGlobal,
                    category::Column::WeeklyDemand,
                    category::Column::ProtectionStock,
                    category::Column::Status,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    debug!("Replaced category record {name}: {figures:?}");

    get_category(db, &name)
        .await?
        .ok_or(Error::CategoryNotFound { name })
}

/// Creates the configured categories that are not registered yet.
///
/// Existing categories are left exactly as they are, including their demand.
/// Returns the categories that were created.
pub async fn seed_categories<C>(db: &C, seeds: &[CategorySeed]) -> Result<Vec<category::Model>>
where
    C: ConnectionTrait,
{
    let mut created = Vec::new();
    for seed in seeds {
        if get_category(db, &seed.name).await?.is_some() {
            debug!("Category {} already registered, skipping seed", seed.name);
            continue;
        }
        created.push(create_category(db, &seed.name, seed.weekly_demand).await?);
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("  bolts "), "BOLTS");
        assert_eq!(canonical_name("Hand Tools"), "HAND TOOLS");
        assert_eq!(canonical_name("   "), "");
    }

    #[tokio::test]
    async fn test_create_category_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_category(&db, "   ", 10).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { message: _ }));

        let result = create_category(&db, "bolts", -1).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidWeeklyDemand { demand: -1 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let category = create_category(&db, " bolts ", 10).await?;

        assert_eq!(category.name, "BOLTS");
        assert_eq!(category.weekly_demand, Some(10));
        assert_eq!(category.protection_stock, 2);
        assert_eq!(category.stock_global, 0);
        assert_eq!(category.mean, 0.0);
        assert_eq!(category.min_price, 0.0);
        assert_eq!(category.max_price, 0.0);
        assert_eq!(category.status, StockStatus::LowStock);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_duplicate_category_case_insensitive() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "Bolts", 10).await?;

        let result = create_category(&db, "BOLTS", 3).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::CategoryAlreadyExists { name } if name == "BOLTS"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_category_case_insensitive() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "nuts", 5).await?;

        assert!(get_category(&db, "Nuts").await?.is_some());
        assert!(get_category(&db, " NUTS").await?.is_some());
        assert!(get_category(&db, "washers").await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_categories_ordered() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "washers", 1).await?;
        create_category(&db, "bolts", 1).await?;
        create_category(&db, "nuts", 1).await?;

        let names: Vec<String> = get_all_categories(&db)
            .await?
            .into_iter()
            .map(|category| category.name)
            .collect();
        assert_eq!(names, vec!["BOLTS", "NUTS", "WASHERS"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_weekly_demand_reclassifies() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "bolts", 10).await?;
        create_custom_product(&db, "Hex bolt", 5, 1.0, "bolts").await?;

        let category = get_category(&db, "bolts").await?.unwrap();
        assert_eq!(category.status, StockStatus::NormalStock);

        let category = update_weekly_demand(&db, "Bolts", 3).await?;
        assert_eq!(category.weekly_demand, Some(3));
        assert_eq!(category.protection_stock, 0);
        assert_eq!(category.stock_global, 5);
        assert_eq!(category.status, StockStatus::ExcessStock);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_weekly_demand_errors() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "bolts", 10).await?;

        let result = update_weekly_demand(&db, "bolts", -4).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidWeeklyDemand { demand: -4 }
        ));

        let result = update_weekly_demand(&db, "screws", 4).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::CategoryNotFound { name } if name == "SCREWS"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_weekly_demand_failure_keeps_record() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "bolts", 10).await?;
        create_custom_product(&db, "Carriage bolt", 5, 1.0, "bolts").await?;
        let before = get_category(&db, "bolts").await?.unwrap();
        assert_eq!(before.status, StockStatus::NormalStock);

        reject_category_updates(&db).await?;
        let result = update_weekly_demand(&db, "bolts", 3).await;
        assert!(matches!(result.unwrap_err(), Error::Database(_)));

        let after = get_category(&db, "bolts").await?.unwrap();
        assert_eq!(after, before);
        assert_eq!(after.weekly_demand, Some(10));
        assert_eq!(after.protection_stock, 2);
        assert_eq!(
            after.status,
            status::classify(after.stock_global, after.protection_stock, 10)
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "bolts", 10).await?;
        create_category(&db, "nuts", 10).await?;
        create_custom_product(&db, "Hex bolt", 5, 1.0, "bolts").await?;

        let result = delete_category(&db, "bolts").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::CategoryInUse { product_count: 1, .. }
        ));

        delete_category(&db, "Nuts").await?;
        assert!(get_category(&db, "nuts").await?.is_none());

        let result = delete_category(&db, "nuts").await;
        assert!(matches!(result.unwrap_err(), Error::CategoryNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_replace_category_record_derives_protection() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "bolts", 10).await?;

        let figures = CategoryFigures {
            mean: 2.5,
            min_price: 1.0,
            max_price: 4.0,
            stock_global: 7,
            weekly_demand: Some(25),
            status: StockStatus::NormalStock,
        };
        let category = replace_category_record(&db, "bolts", &figures).await?;

        assert_eq!(category.mean, 2.5);
        assert_eq!(category.min_price, 1.0);
        assert_eq!(category.max_price, 4.0);
        assert_eq!(category.stock_global, 7);
        assert_eq!(category.weekly_demand, Some(25));
        assert_eq!(category.protection_stock, 5);
        assert_eq!(category.status, StockStatus::NormalStock);

        Ok(())
    }

    #[tokio::test]
    async fn test_replace_category_record_inserts_missing() -> Result<()> {
        let db = setup_test_db().await?;

        let category =
            replace_category_record(&db, "gears", &CategoryFigures::empty(Some(15))).await?;
        assert_eq!(category.name, "GEARS");
        assert_eq!(category.protection_stock, 3);
        assert_eq!(get_all_categories(&db).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_categories_by_status() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "bolts", 10).await?;
        create_category(&db, "nuts", 1).await?;
        create_custom_product(&db, "Wing nut", 40, 0.2, "nuts").await?;

        let low = get_categories_by_status(&db, StockStatus::LowStock).await?;
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "BOLTS");

        let excess = get_categories_by_status(&db, StockStatus::ExcessStock).await?;
        assert_eq!(excess.len(), 1);
        assert_eq!(excess[0].name, "NUTS");

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_categories_skips_existing() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "bolts", 10).await?;

        let seeds = vec![
            CategorySeed {
                name: "Bolts".to_string(),
                weekly_demand: 99,
            },
            CategorySeed {
                name: "nuts".to_string(),
                weekly_demand: 20,
            },
        ];
        let created = seed_categories(&db, &seeds).await?;

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "NUTS");
        assert_eq!(created[0].protection_stock, 4);

        let bolts = get_category(&db, "bolts").await?.unwrap();
        assert_eq!(bolts.weekly_demand, Some(10));

        Ok(())
    }
}
