//! Table rendering for products and categories.

use crate::entities::{StockStatus, category, product};
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// Shortens `text` to at most `width` characters.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Status label padded to `width`, coloured red, green or yellow.
#[must_use]
pub fn status_label(status: StockStatus, width: usize) -> ColoredString {
    let padded = format!("{:<width$}", status.as_str());
    match status {
        StockStatus::LowStock => padded.red(),
        StockStatus::NormalStock => padded.green(),
        StockStatus::ExcessStock => padded.yellow(),
    }
}

/// Writes the product table, or a notice when there is nothing to show.
pub fn write_product_table<W: Write>(out: &mut W, products: &[product::Model]) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "No products found.");
    }

    writeln!(
        out,
        "\n{:<5} {:<20} {:<15} {:<10} {:<10}",
        "ID", "NAME", "CATEGORY", "PRICE", "QUANTITY"
    )?;
    writeln!(out, "{}", "-".repeat(70))?;
    for product in products {
        let category = product.category.as_deref().unwrap_or("-");
        writeln!(
            out,
            "{:<5} {:<20} {:<15} {:<10} {:<10}",
            product.id,
            truncate(&product.name, 18),
            truncate(category, 13),
            format!("${:.2}", product.price),
            product.quantity
        )?;
    }
    writeln!(out, "{}", "-".repeat(70))
}

/// Writes the category table, or a notice when there is nothing to show.
pub fn write_category_table<W: Write>(
    out: &mut W,
    categories: &[category::Model],
) -> io::Result<()> {
    if categories.is_empty() {
        return writeln!(out, "No categories found.");
    }

    writeln!(
        out,
        "\n{:<20} {:<10} {:<15} {:<12} {:<20}",
        "CATEGORY", "STOCK", "WEEKLY DEMAND", "PROTECTION", "STATUS"
    )?;
    writeln!(out, "{}", "-".repeat(85))?;
    for category in categories {
        let demand = category
            .weekly_demand
            .map_or_else(|| "-".to_string(), |demand| demand.to_string());
        writeln!(
            out,
            "{:<20} {:<10} {:<15} {:<12} {}",
            truncate(&category.name, 18),
            category.stock_global,
            demand,
            category.protection_stock,
            status_label(category.status, 20)
        )?;
    }
    writeln!(out, "{}", "-".repeat(85))
}
