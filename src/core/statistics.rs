//! Category statistics calculator.
//!
//! Derives a category's price statistics and total stock from the full snapshot of
//! its member products. The calculation is pure: it never touches the database and
//! never filters membership, it trusts the products it is given.

use crate::entities::product;

/// Aggregate figures for one category's products.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryStatistics {
    /// Mean unit price, rounded to cents
    pub mean: f64,
    /// Lowest unit price
    pub min_price: f64,
    /// Highest unit price
    pub max_price: f64,
    /// Sum of quantities
    pub stock_global: i64,
}

/// Computes statistics over `products`.
///
/// Returns `None` for an empty slice, which means "no products yet" and is distinct
/// from a category whose products all have zero quantity. Quantity never gates the
/// price statistics.
#[must_use]
pub fn compute_statistics(products: &[product::Model]) -> Option<CategoryStatistics> {
    let first = products.first()?;

    let mut total_price = 0.0;
    let mut min_price = first.price;
    let mut max_price = first.price;
    let mut stock_global: i64 = 0;

    for product in products {
        total_price += product.price;
        min_price = min_price.min(product.price);
        max_price = max_price.max(product.price);
        stock_global = stock_global.saturating_add(product.quantity);
    }

    // Cast safety: product counts are far below 2^52.
    #[allow(clippy::cast_precision_loss)]
    let mean = total_price / products.len() as f64;

    Some(CategoryStatistics {
        mean: round_to_cents(mean),
        min_price,
        max_price,
        stock_global,
    })
}

/// Rounds to two decimal places, halves away from zero.
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    fn product(price: f64, quantity: i64) -> product::Model {
        let now = chrono::Utc::now().naive_utc();
        product::Model {
            id: 0,
            name: "Test Product".to_string(),
            description: None,
            quantity,
            price,
            category: Some("TEST".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_mixed_prices_and_quantities() {
        let products = vec![product(10.0, 2), product(20.0, 3), product(15.0, 0)];

        let stats = compute_statistics(&products).unwrap();
        assert_eq!(stats.mean, 15.0);
        assert_eq!(stats.min_price, 10.0);
        assert_eq!(stats.max_price, 20.0);
        assert_eq!(stats.stock_global, 5);
    }

    #[test]
    fn test_empty_set_is_absent() {
        assert!(compute_statistics(&[]).is_none());
    }

    #[test]
    fn test_zero_quantities_still_yield_prices() {
        let products = vec![product(2.5, 0), product(7.5, 0)];

        let stats = compute_statistics(&products).unwrap();
        assert_eq!(stats.stock_global, 0);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.min_price, 2.5);
        assert_eq!(stats.max_price, 7.5);
    }

    #[test]
    fn test_mean_rounded_to_cents() {
        // 1.00 + 1.00 + 1.01 = 3.01, mean 1.00333...
        let products = vec![product(1.0, 1), product(1.0, 1), product(1.01, 1)];
        assert_eq!(compute_statistics(&products).unwrap().mean, 1.0);

        // 0.10 + 0.11 + 0.11 = 0.32, mean 0.10666...
        let products = vec![product(0.10, 1), product(0.11, 1), product(0.11, 1)];
        assert_eq!(compute_statistics(&products).unwrap().mean, 0.11);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(2.0), 2.0);
        assert_eq!(round_to_cents(-0.125), -0.13);
    }

    #[test]
    fn test_single_product() {
        let stats = compute_statistics(&[product(3.99, 12)]).unwrap();
        assert_eq!(stats.mean, 3.99);
        assert_eq!(stats.min_price, 3.99);
        assert_eq!(stats.max_price, 3.99);
        assert_eq!(stats.stock_global, 12);
    }
}
