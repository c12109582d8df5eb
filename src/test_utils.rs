//! Shared test utilities for Stockroom.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        category,
        product::{self, NewProduct},
    },
    entities,
    errors::Result,
};
use sea_orm::{ConnectionTrait, DatabaseConnection};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Makes every later update of a category record fail with a database error.
/// Inserts still succeed.
pub async fn reject_category_updates(db: &DatabaseConnection) -> Result<()> {
    db.execute_unprepared(
        "CREATE TRIGGER reject_category_updates BEFORE UPDATE ON categories \
         BEGIN SELECT RAISE(ABORT, 'storage failure'); END;",
    )
    .await?;
    Ok(())
}

/// Creates a test category with a weekly demand of 10.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    category::create_category(db, name, 10).await
}

/// Creates a test category with a custom weekly demand.
pub async fn create_custom_category(
    db: &DatabaseConnection,
    name: &str,
    weekly_demand: i64,
) -> Result<entities::category::Model> {
    category::create_category(db, name, weekly_demand).await
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * quantity: 10
/// * price: 10.0
/// * description: None
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    category_name: &str,
) -> Result<entities::product::Model> {
    create_custom_product(db, name, 10, 10.0, category_name).await
}

/// Creates a test product with custom quantity and price.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    quantity: i64,
    price: f64,
    category_name: &str,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        NewProduct {
            name: name.to_string(),
            description: None,
            quantity,
            price,
            category: category_name.to_string(),
        },
    )
    .await
}

/// Sets up a test environment with a "BOLTS" category.
/// Returns (db, category) for common test scenarios.
pub async fn setup_with_category() -> Result<(DatabaseConnection, entities::category::Model)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, "bolts").await?;
    Ok((db, category))
}

/// Sets up a test environment with a category and one product in it.
/// Returns (db, category, product) for product-related tests.
pub async fn setup_with_product() -> Result<(
    DatabaseConnection,
    entities::category::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, "bolts").await?;
    let product = create_test_product(&db, "Test Product", "bolts").await?;
    Ok((db, category, product))
}
