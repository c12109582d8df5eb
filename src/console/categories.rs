use super::{Console, display};
use crate::{
    core::{category, product, recompute},
    errors::Result,
};
use std::io::{BufRead, Write};

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) async fn register_category(&mut self) -> Result<()> {
        self.prompt.title("Register new category")?;

        let name = category::canonical_name(&self.prompt.ask_string("Category name")?);
        if category::get_category(&self.db, &name).await?.is_some() {
            self.prompt
                .error(format!("Category '{name}' already exists."))?;
            return Ok(());
        }

        let weekly_demand = self.prompt.ask_int("Estimated weekly demand")?;
        let created = category::create_category(&self.db, &name, weekly_demand).await?;
        self.prompt
            .success(format!("Category '{}' registered.", created.name))?;
        self.prompt.line(format!(
            "Protection stock: {} units (20% of {weekly_demand})",
            created.protection_stock
        ))
    }

    pub(super) async fn list_categories(&mut self) -> Result<()> {
        self.prompt.title("Category list")?;

        let categories =
            recompute::recompute_all_categories(&self.db, self.config.default_weekly_demand)
                .await?;
        if categories.is_empty() {
            self.prompt.line("No categories registered.")?;
            return Ok(());
        }

        display::write_category_table(self.prompt.output(), &categories)?;

        self.prompt.line("\nPrice details:")?;
        for category in &categories {
            if category.stock_global > 0 {
                self.prompt.line(format!(
                    "  {}: mean price ${:.2} | range ${:.2} - ${:.2}",
                    category.name, category.mean, category.min_price, category.max_price
                ))?;
            } else {
                self.prompt
                    .line(format!("  {}: no stock registered yet", category.name))?;
            }
        }
        Ok(())
    }

    pub(super) async fn update_category_demand(&mut self) -> Result<()> {
        self.prompt.title("Update weekly demand")?;
        self.list_available_categories().await?;

        let answer = self
            .prompt
            .read_line("Category name (or type 'exit' to cancel)")?;
        if answer.eq_ignore_ascii_case("exit") {
            return self.prompt.error("Update cancelled.");
        }
        if answer.is_empty() {
            return self.prompt.error("A category name is required.");
        }

        let Some(current) = category::get_category(&self.db, &answer).await? else {
            return self.prompt.error("Category not found.");
        };
        let current_demand = current
            .weekly_demand
            .map_or_else(|| "not set".to_string(), |demand| demand.to_string());
        self.prompt
            .line(format!("\nCurrent weekly demand: {current_demand}"))?;

        let input = self
            .prompt
            .read_line("New weekly demand (Enter to cancel)")?;
        if input.is_empty() {
            return self.prompt.error("Update cancelled.");
        }
        let weekly_demand = match input.parse::<i64>() {
            Ok(value) if value >= 0 => value,
            Ok(_) => return self.prompt.error("Weekly demand must be zero or positive."),
            Err(_) => return self.prompt.error("Enter a valid whole number."),
        };

        let updated = category::update_weekly_demand(&self.db, &current.name, weekly_demand).await?;
        self.prompt.success("Category updated.")?;
        self.prompt.line(format!(
            "New protection stock: {} units - status {}",
            updated.protection_stock,
            display::status_label(updated.status, 0)
        ))
    }

    pub(super) async fn delete_category(&mut self) -> Result<()> {
        self.prompt.title("Delete category")?;
        self.list_available_categories().await?;

        let name = self
            .ask_existing_category("Name of the category to delete")
            .await?;
        let products = product::products_in_category(&self.db, &name).await?;
        if !products.is_empty() {
            self.prompt.error(format!(
                "Cannot delete '{name}' because it has {} product(s).",
                products.len()
            ))?;
            return self
                .prompt
                .line("Delete those products or move them to another category first.");
        }

        if self
            .prompt
            .confirm(&format!("Really delete category '{name}'?"))?
        {
            category::delete_category(&self.db, &name).await?;
            self.prompt.success("Category deleted.")?;
        }
        Ok(())
    }

    pub(super) async fn refresh_statistics(&mut self) -> Result<()> {
        self.prompt.title("Refresh category statistics")?;
        self.prompt.line("This will recompute for every category:")?;
        self.prompt.line("  • total stock")?;
        self.prompt.line("  • mean, minimum and maximum price")?;
        self.prompt.line("  • stock status")?;

        if self.prompt.confirm("\nContinue?")? {
            self.refresh_all().await?;
        }
        Ok(())
    }

    /// Recomputes every category and reports how many were refreshed.
    pub async fn refresh_all(&mut self) -> Result<()> {
        let updated =
            recompute::recompute_all_categories(&self.db, self.config.default_weekly_demand)
                .await?;
        self.prompt.success(format!(
            "Statistics refreshed for {} categories.",
            updated.len()
        ))
    }
}
