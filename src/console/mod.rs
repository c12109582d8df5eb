//! Console layer - interactive menus over the core operations.
//!
//! This module provides the terminal interface: the main menu and the products,
//! categories and reports sub-menus. Menu actions only prompt, call into
//! [`crate::core`], and render the result; no stock rule lives here.

/// Category menu actions
mod categories;
/// Table rendering
pub mod display;
/// Product menu actions
mod products;
/// Prompting helpers with validation loops
pub mod prompt;
/// Report menu actions
mod reports;

use crate::{
    config::settings::AppConfig,
    core::category,
    errors::{Error, Result},
};
use colored::Colorize;
use prompt::Prompt;
use sea_orm::DatabaseConnection;
use std::io::{BufRead, Write};
use tracing::error;

/// Interactive session state: the database, the settings and the terminal streams.
pub struct Console<R, W> {
    db: DatabaseConnection,
    config: AppConfig,
    prompt: Prompt<R, W>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console reading from `input` and writing to `output`.
    pub const fn new(db: DatabaseConnection, config: AppConfig, input: R, output: W) -> Self {
        Self {
            db,
            config,
            prompt: Prompt::new(input, output),
        }
    }

    /// Gives back the database connection and the terminal streams.
    pub fn into_parts(self) -> (DatabaseConnection, R, W) {
        let (input, output) = self.prompt.into_inner();
        (self.db, input, output)
    }

    /// Runs the main menu until the user exits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        match self.main_menu().await {
            Err(Error::InputClosed) => {
                self.prompt.line("\nInput closed, exiting.")?;
                Ok(())
            }
            other => other,
        }
    }

    async fn main_menu(&mut self) -> Result<()> {
        loop {
            let choice = self.menu(
                "INVENTORY MANAGEMENT SYSTEM",
                &["Products", "Categories", "Reports and analysis", "Exit"],
            )?;
            match choice.as_str() {
                "1" => self.products_menu().await?,
                "2" => self.categories_menu().await?,
                "3" => self.reports_menu().await?,
                "4" => {
                    self.prompt.line("\nThank you for using Stockroom!")?;
                    return Ok(());
                }
                _ => self.prompt.error("Invalid option, try again.")?,
            }
        }
    }

    async fn products_menu(&mut self) -> Result<()> {
        loop {
            let choice = self.menu(
                "PRODUCT MANAGEMENT",
                &[
                    "Register product",
                    "List all products",
                    "Update product",
                    "Delete product",
                    "Search products",
                    "Back to main menu",
                ],
            )?;
            let outcome = match choice.as_str() {
                "1" => self.register_product().await,
                "2" => self.list_products().await,
                "3" => self.update_product().await,
                "4" => self.delete_product().await,
                "5" => self.search_products().await,
                "6" => return Ok(()),
                _ => self.prompt.error("Invalid option."),
            };
            self.report_failure(outcome)?;
        }
    }

    async fn categories_menu(&mut self) -> Result<()> {
        loop {
            let choice = self.menu(
                "CATEGORY MANAGEMENT",
                &[
                    "Register category",
                    "List all categories",
                    "Update weekly demand",
                    "Delete category",
                    "Refresh statistics",
                    "Back to main menu",
                ],
            )?;
            let outcome = match choice.as_str() {
                "1" => self.register_category().await,
                "2" => self.list_categories().await,
                "3" => self.update_category_demand().await,
                "4" => self.delete_category().await,
                "5" => self.refresh_statistics().await,
                "6" => return Ok(()),
                _ => self.prompt.error("Invalid option."),
            };
            self.report_failure(outcome)?;
        }
    }

    async fn reports_menu(&mut self) -> Result<()> {
        loop {
            let choice = self.menu(
                "REPORTS AND ANALYSIS",
                &[
                    "Dashboard",
                    "Products in low-stock categories",
                    "Critical categories",
                    "Products by category",
                    "Products at or below the quantity threshold",
                    "Back to main menu",
                ],
            )?;
            let outcome = match choice.as_str() {
                "1" => self.show_dashboard().await,
                "2" => self.report_low_stock_products().await,
                "3" => self.report_critical_categories().await,
                "4" => self.report_by_category().await,
                "5" => self.report_quantity_threshold().await,
                "6" => return Ok(()),
                _ => self.prompt.error("Invalid option."),
            };
            self.report_failure(outcome)?;
        }
    }

    /// Prints a numbered menu and returns the raw choice.
    fn menu(&mut self, heading: &str, options: &[&str]) -> Result<String> {
        let rule = "=".repeat(40);
        self.prompt.line(format!("\n{rule}"))?;
        self.prompt.line(format!("   {}", heading.bold()))?;
        self.prompt.line(&rule)?;
        for (index, option) in options.iter().enumerate() {
            self.prompt.line(format!("{}. {option}", index + 1))?;
        }
        self.prompt.read_line("\nSelect an option")
    }

    /// Shows a failed action to the user and keeps the menu running.
    ///
    /// End of input and terminal I/O errors still end the session.
    fn report_failure(&mut self, outcome: Result<()>) -> Result<()> {
        match outcome {
            Ok(()) => Ok(()),
            Err(e @ (Error::InputClosed | Error::Io(_))) => Err(e),
            Err(e) => {
                error!("Menu action failed: {e}");
                self.prompt.error(e)
            }
        }
    }

    /// Prints the registered categories with stock and status.
    async fn list_available_categories(&mut self) -> Result<usize> {
        let categories = category::get_all_categories(&self.db).await?;
        if categories.is_empty() {
            self.prompt.error("No categories registered yet.")?;
            return Ok(0);
        }

        self.prompt.line(format!("\n{}", "Available categories:".cyan()))?;
        for category in &categories {
            self.prompt.line(format!(
                "  • {} - Stock: {} - {}",
                category.name,
                category.stock_global,
                display::status_label(category.status, 0)
            ))?;
        }
        Ok(categories.len())
    }

    /// Asks for the name of an existing category until one is given.
    async fn ask_existing_category(&mut self, label: &str) -> Result<String> {
        loop {
            let answer = self.prompt.ask_string(label)?;
            if let Some(found) = category::get_category(&self.db, &answer).await? {
                return Ok(found.name);
            }
            self.prompt
                .error(format!("Category '{answer}' does not exist."))?;
            self.list_available_categories().await?;
            self.prompt
                .line("Try again or type the exact name.".cyan())?;
        }
    }
}
