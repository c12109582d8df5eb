//! Product business logic - Handles all product-related operations.
//!
//! This module provides functions for registering, retrieving, updating and deleting
//! products. Every mutation finishes by recomputing the category figures it affects,
//! so category statistics and status never lag behind the product table. All
//! functions are async and return Result types for proper error handling.

use crate::{
    core::{category, recompute},
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, Set, prelude::*};
use tracing::info;

/// Fields for registering a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Product name, must not be blank
    pub name: String,
    /// Optional description; blank text is stored as `None`
    pub description: Option<String>,
    /// Units on hand
    pub quantity: i64,
    /// Unit price
    pub price: f64,
    /// Name of an existing category, any case
    pub category: String,
}

/// Partial update of a product. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New quantity
    pub quantity: Option<i64>,
    /// New unit price
    pub price: Option<f64>,
    /// New category, any case
    pub category: Option<String>,
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: "Product name cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

const fn validate_quantity(quantity: i64) -> Result<i64> {
    if quantity < 0 {
        return Err(Error::InvalidQuantity { quantity });
    }
    Ok(quantity)
}

fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidPrice { price });
    }
    Ok(price)
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Resolves a category name to its canonical stored form, failing if it is not registered.
async fn existing_category<C>(db: &C, name: &str) -> Result<String>
where
    C: ConnectionTrait,
{
    let canonical = category::canonical_name(name);
    if category::get_category(db, &canonical).await?.is_none() {
        return Err(Error::CategoryNotFound { name: canonical });
    }
    Ok(canonical)
}

/// Retrieves all products ordered by id.
pub async fn get_all_products<C>(db: &C) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id<C>(db: &C, product_id: i64) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds products whose name or category contains `term`, ignoring case.
///
/// A blank term matches every product.
pub async fn search_products<C>(db: &C, term: &str) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    let term = term.trim();
    if term.is_empty() {
        return get_all_products(db).await;
    }

    Product::find()
        .filter(
            Condition::any()
                .add(product::Column::Name.contains(term))
                .add(product::Column::Category.contains(category::canonical_name(term))),
        )
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every product assigned to the category `name`, matched on its canonical form.
pub async fn products_in_category<C>(db: &C, name: &str) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::Category.eq(category::canonical_name(name)))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves products whose own quantity is at or below `limit`, lowest first.
pub async fn products_at_or_below<C>(db: &C, limit: i64) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::Quantity.lte(limit))
        .order_by_asc(product::Column::Quantity)
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Registers a new product and recomputes its category.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The quantity is negative
/// - The price is negative or not finite (NaN, infinity)
/// - The category is not registered
/// - A database operation fails
pub async fn create_product<C>(db: &C, new_product: NewProduct) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let name = validate_name(&new_product.name)?;
    let quantity = validate_quantity(new_product.quantity)?;
    let price = validate_price(new_product.price)?;
    let category_name = existing_category(db, &new_product.category).await?;

    let now = chrono::Utc::now().naive_utc();
    let product = product::ActiveModel {
        name: Set(name),
        description: Set(normalize_description(new_product.description)),
        quantity: Set(quantity),
        price: Set(price),
        category: Set(Some(category_name.clone())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = product.insert(db).await?;
    info!(
        "Registered product #{} '{}' in {category_name}",
        created.id, created.name
    );

    recompute::recompute_category(db, &category_name).await?;
    Ok(created)
}

/// Applies `changes` to a product and recomputes the categories involved.
///
/// When the category changes, both the old and the new one are recomputed.
///
/// # Errors
/// Returns an error if:
/// - The product does not exist
/// - A new name is blank, a new quantity negative, or a new price invalid
/// - The new category is not registered
/// - A database operation fails
pub async fn update_product<C>(
    db: &C,
    product_id: i64,
    changes: ProductChanges,
) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let name = changes.name.as_deref().map(validate_name).transpose()?;
    let quantity = changes.quantity.map(validate_quantity).transpose()?;
    let price = changes.price.map(validate_price).transpose()?;

    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;
    let previous_category = existing.category.clone();

    let category_name = match changes.category.as_deref() {
        Some(raw) => Some(existing_category(db, raw).await?),
        None => previous_category.clone(),
    };

    let mut product: product::ActiveModel = existing.into();
    if let Some(name) = name {
        product.name = Set(name);
    }
    if let Some(description) = changes.description {
        product.description = Set(normalize_description(Some(description)));
    }
    if let Some(quantity) = quantity {
        product.quantity = Set(quantity);
    }
    if let Some(price) = price {
        product.price = Set(price);
    }
    product.category = Set(category_name.clone());
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = product.update(db).await?;
    info!("Updated product #{product_id}");

    recompute::recompute_affected(db, previous_category.as_deref(), category_name.as_deref())
        .await?;
    Ok(updated)
}

/// Permanently deletes a product and recomputes its category.
///
/// Returns the deleted product.
///
/// # Errors
/// Returns an error if the product does not exist or a database operation fails.
pub async fn delete_product<C>(db: &C, product_id: i64) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    Product::delete_by_id(product_id).exec(db).await?;
    info!("Deleted product #{product_id} '{}'", existing.name);

    recompute::recompute_affected(db, None, existing.category.as_deref()).await?;
    Ok(existing)
}
