//! Core business logic - framework-agnostic inventory operations.
//!
//! `statistics` and `status` are pure functions; `recompute` ties them to the stored
//! records; `category`, `product` and `report` are the operations the console calls.

pub mod category;
pub mod product;
pub mod recompute;
pub mod report;
pub mod statistics;
pub mod status;
