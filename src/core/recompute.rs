//! Recomputation of category figures from the current product set.
//!
//! Every product mutation ends by recomputing the affected categories, and the bulk
//! refresh recomputes all of them. Figures are always rebuilt from the full product
//! snapshot and written back with a single record replace; stored aggregates are
//! never adjusted incrementally.

use crate::{
    core::{
        category::{self, CategoryFigures},
        product,
        statistics::compute_statistics,
        status::{classify, protection_stock},
    },
    entities::category as category_entity,
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use tracing::{debug, info};

/// Recomputes one category's statistics, protection stock and status.
///
/// The stored weekly demand is kept as is, and a demand that was never set stays
/// unset (it classifies as zero). A category without stock, whether it has no
/// products or only zero-quantity ones, gets zeroed prices and `LowStock`.
///
/// # Errors
/// Returns `CategoryNotFound` if no such category is registered, or a database
/// error. On failure the previously stored record is left untouched.
pub async fn recompute_category<C>(db: &C, name: &str) -> Result<category_entity::Model>
where
    C: ConnectionTrait,
{
    let name = category::canonical_name(name);
    let record = category::get_category(db, &name)
        .await?
        .ok_or(Error::CategoryNotFound { name })?;

    recompute_with_demand(db, &record, record.weekly_demand).await
}

/// Recomputes every registered category, including those without products.
///
/// `default_weekly_demand` is only used for records whose demand was never set, and
/// is stored as their demand from then on. The first storage failure aborts the run.
pub async fn recompute_all_categories<C>(
    db: &C,
    default_weekly_demand: i64,
) -> Result<Vec<category_entity::Model>>
where
    C: ConnectionTrait,
{
    let records = category::get_all_categories(db).await?;
    let mut updated = Vec::with_capacity(records.len());

    for record in &records {
        let weekly_demand = record.weekly_demand.unwrap_or(default_weekly_demand);
        updated.push(recompute_with_demand(db, record, Some(weekly_demand)).await?);
    }

    info!("Statistics refreshed for {} categories", updated.len());
    Ok(updated)
}

/// Recomputes the categories touched by a product change.
///
/// `previous` is the product's category before the change; it is recomputed as well
/// when it differs from `current`.
pub async fn recompute_affected<C>(db: &C, previous: Option<&str>, current: Option<&str>) -> Result<()>
where
    C: ConnectionTrait,
{
    let previous = previous.map(category::canonical_name);
    let current = current.map(category::canonical_name);

    if previous != current {
        if let Some(old) = previous.as_deref() {
            recompute_category(db, old).await?;
        }
    }
    if let Some(new) = current.as_deref() {
        recompute_category(db, new).await?;
    }
    Ok(())
}

/// Rebuilds `record` from its products under `weekly_demand` and stores the
/// demand, protection stock, figures and status in one record replace.
pub(crate) async fn recompute_with_demand<C>(
    db: &C,
    record: &category_entity::Model,
    weekly_demand: Option<i64>,
) -> Result<category_entity::Model>
where
    C: ConnectionTrait,
{
    let demand = weekly_demand.unwrap_or(0);
    let products = product::products_in_category(db, &record.name).await?;

    let figures = match compute_statistics(&products) {
        Some(stats) if stats.stock_global > 0 => CategoryFigures {
            mean: stats.mean,
            min_price: stats.min_price,
            max_price: stats.max_price,
            stock_global: stats.stock_global,
            weekly_demand,
            status: classify(stats.stock_global, protection_stock(demand), demand),
        },
        _ => CategoryFigures::empty(weekly_demand),
    };

    debug!(
        "Recomputed {}: stock {} / demand {:?} -> {}",
        record.name, figures.stock_global, weekly_demand, figures.status
    );
    category::replace_category_record(db, &record.name, &figures).await
}
