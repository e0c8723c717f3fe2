use serde::{Deserialize, Serialize};

/// Line item denormalized at order time. Name and price are snapshots that
/// survive later product edits or deletion; they are never re-derived from
/// the live catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Product_name")]
    pub product_name: String,
    #[serde(rename = "Quantity")]
    pub quantity: u32,
    #[serde(rename = "Price")]
    pub price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Order summary; `items` arrives only from the detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "User_name")]
    pub user_name: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Total_price")]
    pub total_price: f64,
    #[serde(rename = "Items", default)]
    pub items: Vec<OrderItem>,
    #[serde(rename = "Created_at", default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderList {
    #[serde(default)]
    pub orders: Vec<Order>,
}

#[derive(Debug, Deserialize)]
pub struct OrderDetail {
    pub order: Option<Order>,
}

/// Order submission payload (input-only, snake_case on the wire).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemInput {
    pub product_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderInput {
    pub user_id: i64,
    pub items: Vec<OrderItemInput>,
}

/// The fixed status vocabulary requestable from the dashboard. The wire
/// value is the lowercase name; `cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipping,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// The transitions exposed as admin controls, in display order.
    pub const ACTIONS: [OrderStatus; 4] = [
        OrderStatus::Confirmed,
        OrderStatus::Shipping,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipping => "shipping",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the control for this status should be disabled because the
    /// order already carries it. Server status strings are matched
    /// case-insensitively.
    pub fn is_current(self, order_status: &str) -> bool {
        order_status.eq_ignore_ascii_case(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipping" => Ok(OrderStatus::Shipping),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status update body; the one mutation payload on the capitalized
/// convention.
#[derive(Debug, Serialize)]
pub struct StatusPatch {
    #[serde(rename = "Status")]
    pub status: OrderStatus,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_patch_serializes_with_capitalized_key() {
        let body = serde_json::to_value(StatusPatch {
            status: OrderStatus::Cancelled,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "Status": "cancelled" }));
    }

    #[test]
    fn order_input_serializes_snake_case() {
        let input = OrderInput {
            user_id: 7,
            items: vec![OrderItemInput {
                product_id: 1,
                quantity: 2,
            }],
        };
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "user_id": 7,
                "items": [{ "product_id": 1, "quantity": 2 }]
            })
        );
    }

    #[test]
    fn summary_orders_deserialize_without_items() {
        let raw = r#"{"orders":[{"Id":4,"User_name":"Sam","Status":"pending","Total_price":9.5}]}"#;
        let list: OrderList = serde_json::from_str(raw).unwrap();
        assert_eq!(list.orders.len(), 1);
        assert!(list.orders[0].items.is_empty());
    }

    #[test]
    fn current_status_match_is_case_insensitive() {
        assert!(OrderStatus::Pending.is_current("Pending"));
        assert!(OrderStatus::Cancelled.is_current("CANCELLED"));
        assert!(!OrderStatus::Shipping.is_current("pending"));
    }
}
