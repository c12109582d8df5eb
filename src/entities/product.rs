//! Product entity - Represents a stocked item.
//!
//! Each product has a name, optional description, quantity on hand, unit price
//! and the canonical name of the category it belongs to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product, assigned on insert
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product (e.g., "Hex bolt M8")
    pub name: String,
    /// Free-form description, `None` when the user left it blank
    pub description: Option<String>,
    /// Units on hand, never negative
    pub quantity: i64,
    /// Unit price in dollars
    pub price: f64,
    /// Canonical (upper-cased) name of the owning category
    pub category: Option<String>,
    /// When the product was registered
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one category, referenced by name
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::Category",
        to = "super::category::Column::Name"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
