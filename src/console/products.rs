use super::{Console, display};
use crate::{
    core::{
        category,
        product::{self, NewProduct, ProductChanges},
    },
    errors::Result,
};
use std::io::{BufRead, Write};

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) async fn register_product(&mut self) -> Result<()> {
        self.prompt.title("Register new product")?;

        let name = self.prompt.ask_string("Name")?;
        let description = self.prompt.ask_optional("Description (optional)")?;

        self.list_available_categories().await?;
        let Some(category_name) = self.choose_or_create_category().await? else {
            self.prompt.error("Product registration cancelled.")?;
            return Ok(());
        };

        let quantity = self.prompt.ask_int("Initial quantity")?;
        let price = self.prompt.ask_float("Unit price")?;

        product::create_product(
            &self.db,
            NewProduct {
                name,
                description,
                quantity,
                price,
                category: category_name,
            },
        )
        .await?;
        self.prompt.success("Product registered.")
    }

    /// Asks for a category, offering to create it when it does not exist.
    /// Returns `None` when the user types `exit`.
    async fn choose_or_create_category(&mut self) -> Result<Option<String>> {
        loop {
            let answer = self
                .prompt
                .read_line("Category (or type 'exit' to cancel)")?;
            if answer.eq_ignore_ascii_case("exit") {
                return Ok(None);
            }
            if answer.is_empty() {
                self.prompt.error("A category is required.")?;
                continue;
            }

            let name = category::canonical_name(&answer);
            if category::get_category(&self.db, &name).await?.is_some() {
                return Ok(Some(name));
            }

            self.prompt
                .error(format!("Category '{name}' does not exist."))?;
            if !self.prompt.confirm("Create this category now?")? {
                self.prompt
                    .line("Pick an existing category or type 'exit'.")?;
                self.list_available_categories().await?;
                continue;
            }

            let weekly_demand = self
                .prompt
                .ask_int("Estimated weekly demand for this category")?;
            match category::create_category(&self.db, &name, weekly_demand).await {
                Ok(created) => {
                    self.prompt
                        .success(format!("Category '{}' created.", created.name))?;
                    self.prompt.line(format!(
                        "Protection stock: {} units",
                        created.protection_stock
                    ))?;
                    return Ok(Some(created.name));
                }
                Err(e) => {
                    self.prompt
                        .error(format!("Could not create the category: {e}"))?;
                }
            }
        }
    }

    pub(super) async fn list_products(&mut self) -> Result<()> {
        self.prompt.title("Product list")?;
        let products = product::get_all_products(&self.db).await?;
        display::write_product_table(self.prompt.output(), &products)?;
        Ok(())
    }

    pub(super) async fn update_product(&mut self) -> Result<()> {
        self.prompt.title("Update product")?;
        self.list_products().await?;

        let product_id = self.prompt.ask_int("ID of the product to modify")?;
        let Some(current) = product::get_product_by_id(&self.db, product_id).await? else {
            self.prompt.error("Product not found.")?;
            return Ok(());
        };

        self.prompt.line(format!("\nEditing: {}", current.name))?;
        self.prompt.line("Leave a field blank to keep its value.")?;

        let name = self
            .prompt
            .ask_optional(&format!("Name [{}]", current.name))?;
        let description = self.prompt.ask_optional(&format!(
            "Description [{}]",
            current.description.as_deref().unwrap_or("")
        ))?;

        let current_category = current.category.as_deref().unwrap_or("-");
        self.prompt
            .line(format!("\nCurrent category: {current_category}"))?;
        let category = if self.prompt.confirm("Change the category?")? {
            self.list_available_categories().await?;
            Some(self.ask_existing_category("New category").await?)
        } else {
            None
        };

        let quantity = self
            .prompt
            .ask_int_or_keep(&format!("Quantity [{}]", current.quantity))?;
        let price = self
            .prompt
            .ask_float_or_keep(&format!("Price [{:.2}]", current.price))?;

        product::update_product(
            &self.db,
            product_id,
            ProductChanges {
                name,
                description,
                quantity,
                price,
                category,
            },
        )
        .await?;
        self.prompt.success("Product updated.")
    }

    pub(super) async fn delete_product(&mut self) -> Result<()> {
        self.prompt.title("Delete product")?;
        self.list_products().await?;

        let product_id = self.prompt.ask_int("ID of the product to delete")?;
        let Some(current) = product::get_product_by_id(&self.db, product_id).await? else {
            self.prompt.error("Product not found.")?;
            return Ok(());
        };

        if self
            .prompt
            .confirm(&format!("Really delete '{}'?", current.name))?
        {
            product::delete_product(&self.db, product_id).await?;
            self.prompt.success("Product deleted.")?;
        }
        Ok(())
    }

    pub(super) async fn search_products(&mut self) -> Result<()> {
        self.prompt.title("Product search")?;
        self.prompt.line("1. Search by ID")?;
        self.prompt.line("2. Search by name or category")?;

        match self.prompt.read_line("Option")?.as_str() {
            "1" => {
                let product_id = self.prompt.ask_int("ID")?;
                match product::get_product_by_id(&self.db, product_id).await? {
                    Some(found) => {
                        display::write_product_table(self.prompt.output(), &[found])?;
                    }
                    None => self.prompt.error("Not found.")?,
                }
            }
            "2" => {
                let term = self.prompt.ask_string("Search term")?;
                let found = product::search_products(&self.db, &term).await?;
                display::write_product_table(self.prompt.output(), &found)?;
            }
            _ => self.prompt.error("Invalid option.")?,
        }
        Ok(())
    }
}
