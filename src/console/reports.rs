use super::{Console, display};
use crate::{
    core::{category, product, report},
    entities::StockStatus,
    errors::Result,
};
use std::io::{BufRead, Write};

impl<R: BufRead, W: Write> Console<R, W> {
    /// Prints the product/category totals and the status breakdown.
    pub async fn show_dashboard(&mut self) -> Result<()> {
        self.prompt.title("Dashboard - overview")?;

        let summary = report::dashboard(&self.db).await?;
        self.prompt
            .line(format!("\n📦 Total products: {}", summary.total_products))?;
        self.prompt
            .line(format!("📁 Total categories: {}", summary.total_categories))?;

        if summary.total_categories > 0 {
            let breakdown = summary.breakdown;
            self.prompt.line("\n📊 Category status:")?;
            self.prompt.line(format!("  🔴 Low stock: {}", breakdown.low))?;
            self.prompt
                .line(format!("  🟢 Normal stock: {}", breakdown.normal))?;
            self.prompt
                .line(format!("  🟡 Excess stock: {}", breakdown.excess))?;

            if breakdown.low > 0 {
                self.prompt.line(format!(
                    "\n⚠️  Attention! {} categories are low on stock",
                    breakdown.low
                ))?;
            }
        }
        Ok(())
    }

    pub(super) async fn report_low_stock_products(&mut self) -> Result<()> {
        self.prompt.title("Products in low-stock categories")?;

        if category::get_all_categories(&self.db).await?.is_empty() {
            return self.prompt.line("No categories registered.");
        }

        let details = report::products_in_critical_categories(&self.db).await?;
        if details.is_empty() {
            return self.prompt.success("No categories in critical state.");
        }

        self.prompt
            .line("\nCategories with LOW_STOCK (at or below protection stock):")?;
        for detail in &details {
            self.prompt.line(format!(
                "  • {} - Current stock: {} | Protection: {}",
                detail.category.name, detail.category.stock_global, detail.category.protection_stock
            ))?;
        }

        let products: Vec<_> = details
            .into_iter()
            .flat_map(|detail| detail.products)
            .collect();
        if products.is_empty() {
            return self.prompt.line("\nNo products in these categories.");
        }

        self.prompt.line(format!(
            "\nTotal products in critical categories: {}",
            products.len()
        ))?;
        display::write_product_table(self.prompt.output(), &products)?;
        Ok(())
    }

    pub(super) async fn report_critical_categories(&mut self) -> Result<()> {
        self.prompt.title("Critical categories")?;

        let categories = category::get_all_categories(&self.db).await?;
        if categories.is_empty() {
            return self.prompt.line("No categories registered.");
        }

        let critical: Vec<_> = categories
            .iter()
            .filter(|c| c.status == StockStatus::LowStock)
            .cloned()
            .collect();
        if critical.is_empty() {
            self.prompt.success("No categories in critical state.")?;
        } else {
            self.prompt.error(format!(
                "ALERT! {} categories with LOW_STOCK:",
                critical.len()
            ))?;
            display::write_category_table(self.prompt.output(), &critical)?;
        }

        let breakdown = report::StatusBreakdown::from_categories(&categories);
        if breakdown.normal > 0 {
            self.prompt.line(format!(
                "\nCategories with normal stock: {}",
                breakdown.normal
            ))?;
        }
        if breakdown.excess > 0 {
            self.prompt
                .line(format!("Categories with excess stock: {}", breakdown.excess))?;
        }
        Ok(())
    }

    pub(super) async fn report_by_category(&mut self) -> Result<()> {
        self.prompt.title("Products by category")?;
        if self.list_available_categories().await? == 0 {
            return Ok(());
        }

        let name = self.ask_existing_category("Category to inspect").await?;
        let detail = report::category_detail(&self.db, &name).await?;
        if detail.products.is_empty() {
            return self
                .prompt
                .line(format!("No products in category '{name}'."));
        }

        self.prompt.line(format!(
            "\nProducts in category '{name}': {}",
            detail.products.len()
        ))?;
        display::write_product_table(self.prompt.output(), &detail.products)?;

        let category = &detail.category;
        let demand = category
            .weekly_demand
            .map_or_else(|| "not set".to_string(), |demand| demand.to_string());
        self.prompt.line(format!("\nStatistics for '{name}':"))?;
        self.prompt
            .line(format!("  Total stock: {} units", category.stock_global))?;
        self.prompt.line(format!("  Weekly demand: {demand} units"))?;
        self.prompt.line(format!(
            "  Protection stock: {} units",
            category.protection_stock
        ))?;
        self.prompt
            .line(format!("  Status: {}", display::status_label(category.status, 0)))
    }

    pub(super) async fn report_quantity_threshold(&mut self) -> Result<()> {
        let threshold = self.config.low_stock_threshold;
        self.prompt
            .title(&format!("Products with {threshold} units or fewer"))?;

        let products = product::products_at_or_below(&self.db, threshold).await?;
        if products.is_empty() {
            return self
                .prompt
                .success(format!("No product has {threshold} units or fewer."));
        }
        display::write_product_table(self.prompt.output(), &products)?;
        Ok(())
    }
}
