use tracing::{error, info};

use crate::api::{ApiClient, ApiError};
use crate::orders::dto::{Order, OrderDetail, OrderList, OrderStatus, StatusPatch};

/// List-then-drill-down over the caller's orders. Line items are fetched
/// lazily when an order is opened; admin status/delete actions patch the
/// local state instead of refetching.
#[derive(Debug, Default)]
pub struct OrderDashboard {
    pub orders: Vec<Order>,
    pub selected: Option<Order>,
}

impl OrderDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        match api.get::<OrderList>("/orders").await {
            Ok(list) => {
                self.orders = list.orders;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to fetch orders");
                Err(err)
            }
        }
    }

    pub fn order(&self, id: i64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Opens an order: the summary shows immediately, the full line-item
    /// detail replaces it when the lazy fetch lands. A failed detail fetch
    /// keeps the summary on screen.
    pub async fn open(&mut self, api: &ApiClient, id: i64) -> Result<(), ApiError> {
        self.selected = self.order(id).cloned();
        let detail = api.get::<OrderDetail>(&format!("/orders/{id}")).await?;
        if let Some(order) = detail.order {
            self.selected = Some(order);
        }
        Ok(())
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Requests a status transition and patches the local list and any open
    /// detail on success; no page-level refetch. Transition legality beyond
    /// "not the current status" is the server's concern.
    pub async fn update_status(
        &mut self,
        api: &ApiClient,
        id: i64,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        api.put(&format!("/orders/{id}"), &StatusPatch { status })
            .await?;
        info!(order_id = id, status = %status, "order status updated");
        self.apply_status(id, status);
        Ok(())
    }

    /// Local state patch after a confirmed status change.
    pub fn apply_status(&mut self, id: i64, status: OrderStatus) {
        for order in &mut self.orders {
            if order.id == id {
                order.status = status.as_str().to_string();
            }
        }
        if let Some(selected) = &mut self.selected {
            if selected.id == id {
                selected.status = status.as_str().to_string();
            }
        }
    }

    /// Irreversible removal; the caller confirms first.
    pub async fn delete(&mut self, api: &ApiClient, id: i64) -> Result<(), ApiError> {
        api.delete(&format!("/orders/{id}")).await?;
        info!(order_id = id, "order deleted");
        self.remove(id);
        Ok(())
    }

    /// Drops the order from the local list and closes a matching open
    /// detail view.
    pub fn remove(&mut self, id: i64) {
        self.orders.retain(|o| o.id != id);
        if self.selected.as_ref().is_some_and(|o| o.id == id) {
            self.selected = None;
        }
    }
}
