use crate::orders::dto::{Order, OrderStatus};
use crate::orders::view::OrderDashboard;
use crate::state::AppState;
use crate::ui::{self, Nav};

fn render_list(dash: &OrderDashboard) {
    println!();
    println!("-- My Orders ({} total) --", dash.orders.len());
    if dash.orders.is_empty() {
        println!("  No orders yet. Time to grab some tasty buffet snacks!");
        return;
    }
    for order in &dash.orders {
        println!(
            "  #{:<4} {:<16} {:<10} ${:.2}",
            order.id, order.user_name, order.status, order.total_price
        );
    }
}

fn render_detail(order: &Order, is_admin: bool) {
    println!();
    println!("-- Order #{} ({}) --", order.id, order.status);
    if order.items.is_empty() {
        println!("  no detailed items found");
    }
    for item in &order.items {
        println!(
            "  {:<24} {} x ${:.2} = ${:.2}",
            item.product_name,
            item.quantity,
            item.price,
            item.line_total()
        );
    }
    println!("  final total: ${:.2}", order.total_price);
    if is_admin {
        print!("admin:");
        for status in OrderStatus::ACTIONS {
            if status.is_current(&order.status) {
                print!("  [{status}]");
            } else {
                print!("  {status}");
            }
        }
        println!("  (status <name> | delete)");
    }
}

/// Order dashboard: summary list, lazy detail, admin status/delete controls.
pub async fn run(state: &AppState) -> anyhow::Result<Nav> {
    let mut dash = OrderDashboard::new();
    println!("Loading orders...");
    if let Err(err) = dash.load(&state.api).await {
        println!("Could not load orders: {err}");
    }
    render_list(&dash);
    println!("(open <id> | close | list)");

    loop {
        let Some(input) = ui::prompt("orders")? else {
            return Ok(None);
        };
        if let Some(nav) = ui::common_command(state, &input) {
            return Ok(nav);
        }
        let is_admin = state.session.is_admin();

        let mut parts = input.split_whitespace();
        match (parts.next(), parts.next()) {
            (None, _) | (Some("list"), _) => render_list(&dash),
            (Some("open"), Some(id)) => {
                let id: i64 = ui::parse_or_default(id);
                if dash.order(id).is_none() {
                    println!("No order #{id}.");
                    continue;
                }
                println!("Fetching items...");
                if let Err(err) = dash.open(&state.api, id).await {
                    println!("Could not fetch order details: {err}");
                }
                if let Some(order) = &dash.selected {
                    render_detail(order, is_admin);
                }
            }
            (Some("close"), _) => {
                dash.close();
                render_list(&dash);
            }
            (Some("status"), Some(name)) if is_admin => {
                let Some(order) = dash.selected.clone() else {
                    println!("Open an order first.");
                    continue;
                };
                let Ok(status) = name.parse::<OrderStatus>() else {
                    println!("Unknown status `{name}`.");
                    continue;
                };
                if status.is_current(&order.status) {
                    println!("Order #{} is already {status}.", order.id);
                    continue;
                }
                if status == OrderStatus::Cancelled
                    && !ui::confirm(
                        "Are you sure you want to cancel this order? Items will be returned to stock.",
                    )?
                {
                    continue;
                }
                match dash.update_status(&state.api, order.id, status).await {
                    Ok(()) => {
                        if let Some(order) = &dash.selected {
                            render_detail(order, is_admin);
                        }
                    }
                    Err(err) => println!("Failed to update order status: {err}"),
                }
            }
            (Some("delete"), _) if is_admin => {
                let Some(order) = dash.selected.clone() else {
                    println!("Open an order first.");
                    continue;
                };
                if !ui::confirm(
                    "Are you sure you want to delete this order? This action cannot be undone.",
                )? {
                    continue;
                }
                match dash.delete(&state.api, order.id).await {
                    Ok(()) => render_list(&dash),
                    Err(err) => println!("Failed to delete order: {err}"),
                }
            }
            _ => println!("Unknown command; try `open <id>`, `close` or `list`."),
        }
    }
}
