use tracing::{error, info};

use crate::api::{ApiClient, ApiError};
use crate::inventory::dto::{CategoryForm, ProductForm};
use crate::store::dto::{Category, CategoryList, Product, ProductList};

/// Back-office catalog editor. No optimistic updates: every mutation is
/// followed by a full list refetch so the view always reflects the server.
#[derive(Debug, Default)]
pub struct InventoryView {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub search: String,
}

impl InventoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        let (products, categories) = tokio::join!(
            api.get::<ProductList>("/products"),
            api.get::<CategoryList>("/categories"),
        );
        match (products, categories) {
            (Ok(products), Ok(categories)) => {
                self.products = products.products;
                self.categories = categories.categories;
                Ok(())
            }
            (Err(err), _) | (_, Err(err)) => {
                error!(error = %err, "inventory fetch failed");
                Err(err)
            }
        }
    }

    /// Case-insensitive name/description filter over the product list.
    pub fn filtered_products(&self) -> Vec<&Product> {
        let needle = self.search.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_name(&self, id: i64) -> &str {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map_or("Uncategorized", |c| c.name.as_str())
    }

    pub async fn create_product(
        &mut self,
        api: &ApiClient,
        form: &ProductForm,
    ) -> Result<(), ApiError> {
        api.post("/products", form).await?;
        info!(name = %form.name, "product created");
        self.refresh(api).await
    }

    pub async fn save_product(
        &mut self,
        api: &ApiClient,
        id: i64,
        form: &ProductForm,
    ) -> Result<(), ApiError> {
        api.put(&format!("/products/{id}"), form).await?;
        info!(product_id = id, "product updated");
        self.refresh(api).await
    }

    pub async fn delete_product(&mut self, api: &ApiClient, id: i64) -> Result<(), ApiError> {
        api.delete(&format!("/products/{id}")).await?;
        info!(product_id = id, "product deleted");
        self.refresh(api).await
    }

    pub async fn create_category(
        &mut self,
        api: &ApiClient,
        form: &CategoryForm,
    ) -> Result<(), ApiError> {
        api.post("/categories", form).await?;
        info!(name = %form.name, "category created");
        self.refresh(api).await
    }

    pub async fn delete_category(&mut self, api: &ApiClient, id: i64) -> Result<(), ApiError> {
        api.delete(&format!("/categories/{id}")).await?;
        info!(category_id = id, "category deleted");
        self.refresh(api).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::dto::test_support::{category, product};

    fn stocked_view() -> InventoryView {
        let mut fried = product(1, "Fried Rice", 6.0, 4);
        fried.description = "Wok classic".into();
        let mut tea = product(2, "Milk Tea", 3.0, 9);
        tea.description = "With pearls".into();
        InventoryView {
            products: vec![fried, tea],
            categories: vec![category(1, "Mains"), category(2, "Drinks")],
            search: String::new(),
        }
    }

    #[test]
    fn search_matches_name_or_description_case_insensitively() {
        let mut view = stocked_view();
        assert_eq!(view.filtered_products().len(), 2);

        view.search = "RICE".into();
        let hits = view.filtered_products();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        view.search = "pearls".into();
        assert_eq!(view.filtered_products()[0].id, 2);

        view.search = "nothing".into();
        assert!(view.filtered_products().is_empty());
    }

    #[test]
    fn lookups_return_none_for_unknown_ids() {
        let view = stocked_view();
        assert_eq!(view.product(1).map(|p| p.name.as_str()), Some("Fried Rice"));
        assert!(view.product(99).is_none());
        assert_eq!(view.category(2).map(|c| c.name.as_str()), Some("Drinks"));
        assert!(view.category(99).is_none());
    }

    #[test]
    fn unknown_category_reads_as_uncategorized() {
        let view = stocked_view();
        assert_eq!(view.category_name(1), "Mains");
        assert_eq!(view.category_name(99), "Uncategorized");
    }
}
