use crate::state::AppState;
use crate::store::view::{CheckoutStep, StoreView};
use crate::ui::{self, Nav};

fn render_menu(view: &StoreView) {
    println!();
    print!("categories:");
    for cat in &view.categories {
        let marker = if view.selected_category == Some(cat.id) {
            "*"
        } else {
            " "
        };
        print!("  [{}{}] {}", marker, cat.id, cat.name);
    }
    println!();
    println!("-- {} --", view.selected_category_name().unwrap_or("Our Menu"));
    for product in view.filtered_products() {
        let remaining = view.cart.effective_stock(product);
        let availability = match remaining {
            0 => "out of stock".to_string(),
            n if n < 5 => format!("{n} left"),
            n => format!("{n} available"),
        };
        println!(
            "  #{:<4} {:<24} ${:<8.2} {}",
            product.id, product.name, product.price, availability
        );
    }
    if view.cart.total_items() > 0 {
        println!(
            "bag: {} items, ${:.2} total",
            view.cart.total_items(),
            view.cart.subtotal()
        );
    }
}

fn render_bag(view: &StoreView) {
    println!();
    match view.step {
        CheckoutStep::Reviewing => {
            println!("-- My Bag --");
            for line in view.cart.lines() {
                println!(
                    "  #{:<4} {:<24} {} x ${:.2}",
                    line.product.id, line.product.name, line.quantity, line.product.price
                );
            }
        }
        CheckoutStep::Confirming => {
            println!("-- Preview Order --");
            for line in view.cart.lines() {
                println!(
                    "  {:<24} qty {:<3} ${:.2}",
                    line.product.name,
                    line.quantity,
                    line.line_total()
                );
            }
            println!("  subtotal     ${:.2}", view.cart.subtotal());
            println!("  service fee  $0.00");
        }
    }
    println!("total to pay: ${:.2}", view.cart.subtotal());
    match view.step {
        CheckoutStep::Reviewing => println!("(inc <id> | dec <id> | review | menu)"),
        CheckoutStep::Confirming => println!("(confirm | back)"),
    }
}

/// The storefront: catalog, cart, and the two-step checkout.
pub async fn run(state: &AppState) -> anyhow::Result<Nav> {
    let mut view = StoreView::new();
    println!("Loading menu...");
    if let Err(err) = view.refresh(&state.api).await {
        println!("Could not load the menu: {err}");
    }
    render_menu(&view);
    println!("(add <id> | cat <id> | bag | help)");

    loop {
        let Some(input) = ui::prompt("store")? else {
            return Ok(None);
        };
        if let Some(nav) = ui::common_command(state, &input) {
            return Ok(nav);
        }

        let mut parts = input.split_whitespace();
        match (parts.next(), parts.next()) {
            (None, _) | (Some("menu"), _) => render_menu(&view),
            (Some("help"), _) => {
                println!("add <id>, cat <id>, bag, inc <id>, dec <id>, review, confirm, back, menu")
            }
            (Some("cat"), Some(id)) => {
                view.select_category(ui::parse_or_default(id));
                render_menu(&view);
            }
            (Some("add"), Some(id)) => {
                let id: i64 = ui::parse_or_default(id);
                match view.product(id).cloned() {
                    Some(product) => match view.cart.add(&product) {
                        Ok(()) => println!(
                            "Added {}. bag: {} items, ${:.2}",
                            product.name,
                            view.cart.total_items(),
                            view.cart.subtotal()
                        ),
                        Err(err) => println!("Sorry, {err}."),
                    },
                    None => println!("No product #{id} on the menu."),
                }
            }
            (Some("inc"), Some(id)) | (Some("dec"), Some(id)) => {
                let delta = if input.starts_with("inc") { 1 } else { -1 };
                let id: i64 = ui::parse_or_default(id);
                match view.product(id).cloned() {
                    Some(product) => {
                        if let Err(err) = view.cart.update_quantity(&product, delta) {
                            println!("Sorry, {err}.");
                        }
                        render_bag(&view);
                    }
                    None => println!("No product #{id} on the menu."),
                }
            }
            (Some("bag"), _) | (Some("cart"), _) => render_bag(&view),
            (Some("review"), _) => {
                if view.cart.is_empty() {
                    println!("Your bag is empty.");
                } else {
                    view.begin_confirmation();
                    render_bag(&view);
                }
            }
            (Some("back"), _) => {
                view.back_to_review();
                render_bag(&view);
            }
            (Some("confirm"), _) => {
                if view.step != CheckoutStep::Confirming {
                    println!("Review your order first (`review`).");
                    continue;
                }
                if view.cart.is_empty() {
                    println!("Your bag is empty.");
                    continue;
                }
                let Some(user) = state.session.user() else {
                    println!("Please sign in to place an order (/login).");
                    continue;
                };
                println!("Placing order...");
                match view.submit_order(&state.api, &user).await {
                    Ok(()) => {
                        println!("Order sent!");
                        render_menu(&view);
                    }
                    Err(err) => println!(
                        "Order failed ({err}). Check stock availability or your connection."
                    ),
                }
            }
            _ => println!("Unknown command; try `help`."),
        }
    }
}
