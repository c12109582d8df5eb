//! Stock status classifier.
//!
//! Maps a category's stock on hand, protection stock and weekly demand to one of the
//! three [`StockStatus`] values. The checks run in a fixed order and the first match
//! wins; the ranges overlap when `protection_stock >= weekly_demand`.

use crate::entities::StockStatus;

/// Share of weekly demand held back as protection stock, in percent.
const PROTECTION_PERCENT: i64 = 20;

/// Protection stock for a weekly demand: 20% of it, rounded down.
///
/// Negative demand never reaches this point in practice; it is clamped to zero so
/// the result is never negative.
#[must_use]
pub const fn protection_stock(weekly_demand: i64) -> i64 {
    let demand = if weekly_demand < 0 { 0 } else { weekly_demand };
    demand.saturating_mul(PROTECTION_PERCENT) / 100
}

/// Classifies a category's stock health.
///
/// 1. no stock at all is `LowStock`
/// 2. stock at or below the protection stock is `LowStock`
/// 3. stock at or below one week of demand is `NormalStock`
/// 4. anything above is `ExcessStock`
#[must_use]
pub const fn classify(stock_global: i64, protection_stock: i64, weekly_demand: i64) -> StockStatus {
    if stock_global == 0 || stock_global <= protection_stock {
        StockStatus::LowStock
    } else if stock_global <= weekly_demand {
        StockStatus::NormalStock
    } else {
        StockStatus::ExcessStock
    }
}
