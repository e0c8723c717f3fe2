use serde::Serialize;
use thiserror::Error;

use crate::store::dto::Product;

/// Required-field checks run before any request is sent; numeric fields are
/// parsed permissively and not range-checked.
#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("name is required")]
    NameRequired,
}

/// Create/update body for a product, on the capitalized wire convention.
/// The update endpoint accepts partial fields; this client always sends the
/// full form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductForm {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Stock")]
    pub stock: u32,
    #[serde(rename = "Category_id")]
    pub category_id: i64,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            category_id: product.category_id,
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::NameRequired);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryForm {
    #[serde(rename = "Name")]
    pub name: String,
}

impl CategoryForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::NameRequired);
        }
        Ok(())
    }
}
