use tracing::{error, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::orders::dto::OrderInput;
use crate::session::AuthUser;
use crate::store::cart::Cart;
use crate::store::dto::{Category, CategoryList, Product, ProductList};

/// Two-step checkout machine layered on the cart: review the bag, then
/// confirm. Success clears the cart and resets to `Reviewing`; failure
/// stays at `Confirming` with the cart intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutStep {
    #[default]
    Reviewing,
    Confirming,
}

/// Storefront state: the catalog snapshot from the last fetch, the category
/// filter, and the cart.
#[derive(Debug, Default)]
pub struct StoreView {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub selected_category: Option<i64>,
    pub cart: Cart,
    pub step: CheckoutStep,
}

impl StoreView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full catalog fetch, one call per collection, no pagination. On
    /// failure the snapshot keeps its previous (possibly empty) contents
    /// and the error is logged; the view does not auto-retry.
    pub async fn refresh(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        let (products, categories) = tokio::join!(
            api.get::<ProductList>("/products"),
            api.get::<CategoryList>("/categories"),
        );
        match (products, categories) {
            (Ok(products), Ok(categories)) => {
                self.apply_catalog(products.products, categories.categories);
                Ok(())
            }
            (Err(err), _) | (_, Err(err)) => {
                error!(error = %err, "catalog fetch failed");
                Err(err)
            }
        }
    }

    /// Replaces the catalog snapshot. The category filter defaults to the
    /// first fetched category once categories arrive, unless a selection
    /// already exists.
    pub fn apply_catalog(&mut self, products: Vec<Product>, categories: Vec<Category>) {
        self.products = products;
        self.categories = categories;
        if self.selected_category.is_none() {
            self.selected_category = self.categories.first().map(|c| c.id);
        }
    }

    pub fn select_category(&mut self, category_id: i64) {
        self.selected_category = Some(category_id);
    }

    pub fn selected_category_name(&self) -> Option<&str> {
        let id = self.selected_category?;
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    /// Products under the current category filter, or the whole catalog when
    /// no filter is set.
    pub fn filtered_products(&self) -> Vec<&Product> {
        match self.selected_category {
            Some(id) => self
                .products
                .iter()
                .filter(|p| p.category_id == id)
                .collect(),
            None => self.products.iter().collect(),
        }
    }

    pub fn product(&self, product_id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    pub fn begin_confirmation(&mut self) {
        self.step = CheckoutStep::Confirming;
    }

    pub fn back_to_review(&mut self) {
        self.step = CheckoutStep::Reviewing;
    }

    /// The submission payload: the cart reduced to (product, quantity)
    /// pairs plus the purchaser identity.
    pub fn order_input(&self, user: &AuthUser) -> OrderInput {
        OrderInput {
            user_id: user.id,
            items: self.cart.order_items(),
        }
    }

    /// Confirms the order. On success the cart is cleared atomically, the
    /// machine resets, and the catalog is refetched to pick up
    /// server-adjusted stock. On failure nothing is touched so the user can
    /// retry or adjust.
    pub async fn submit_order(&mut self, api: &ApiClient, user: &AuthUser) -> Result<(), ApiError> {
        let input = self.order_input(user);
        api.post("/orders", &input).await?;

        info!(user_id = user.id, items = input.items.len(), "order placed");
        self.cart.clear();
        self.step = CheckoutStep::Reviewing;
        if let Err(err) = self.refresh(api).await {
            warn!(error = %err, "catalog refresh after checkout failed");
        }
        Ok(())
    }
}
