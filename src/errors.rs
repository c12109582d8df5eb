//! Unified error type for Stockroom.
//!
//! Every fallible operation in the crate returns [`Result`]. Storage failures are
//! wrapped from `SeaORM`, validation failures carry the offending value so the
//! console can echo it back to the user.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Underlying storage failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Terminal I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required text field was empty or otherwise malformed
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// Price was negative, NaN or infinite
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// The rejected price
        price: f64,
    },

    /// Quantity was negative
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i64,
    },

    /// Weekly demand was negative
    #[error("Invalid weekly demand: {demand}")]
    InvalidWeeklyDemand {
        /// The rejected demand
        demand: i64,
    },

    /// No product with the given id
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No category with the given (canonical) name
    #[error("Category not found: {name}")]
    CategoryNotFound {
        /// Canonical category name
        name: String,
    },

    /// A category with this canonical name is already registered
    #[error("Category already exists: {name}")]
    CategoryAlreadyExists {
        /// Canonical category name
        name: String,
    },

    /// The category still has products assigned and cannot be deleted
    #[error("Category {name} still has {product_count} product(s)")]
    CategoryInUse {
        /// Canonical category name
        name: String,
        /// Number of products referencing the category
        product_count: u64,
    },

    /// Standard input reached end of file while a prompt was waiting
    #[error("Input closed")]
    InputClosed,
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
