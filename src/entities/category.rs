//! Category entity - Named grouping of products with derived stock figures.
//!
//! The price statistics, `stock_global`, `protection_stock` and `status` columns are
//! all derived from the member products and the weekly demand. Only `weekly_demand`
//! is set directly by the user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stock-health classification of a category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum StockStatus {
    /// Out of stock, or at or below the protection stock
    #[sea_orm(string_value = "LOW_STOCK")]
    LowStock,
    /// Above the protection stock and within one week of demand
    #[sea_orm(string_value = "NORMAL_STOCK")]
    NormalStock,
    /// More than one week of demand on hand
    #[sea_orm(string_value = "EXCESS_STOCK")]
    ExcessStock,
}

impl StockStatus {
    /// The label stored in the database and shown in tables
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowStock => "LOW_STOCK",
            Self::NormalStock => "NORMAL_STOCK",
            Self::ExcessStock => "EXCESS_STOCK",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Canonical (upper-cased) category name, the primary key
    #[sea_orm(primary_key, auto_increment = false)]
    pub name: String,
    /// Mean unit price of member products, rounded to cents
    pub mean: f64,
    /// Lowest unit price among member products
    pub min_price: f64,
    /// Highest unit price among member products
    pub max_price: f64,
    /// Sum of member product quantities
    pub stock_global: i64,
    /// Expected units consumed per week; `None` only for records that never received one
    pub weekly_demand: Option<i64>,
    /// Safety threshold, 20% of weekly demand rounded down
    pub protection_stock: i64,
    /// Current stock-health classification
    pub status: StockStatus,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
