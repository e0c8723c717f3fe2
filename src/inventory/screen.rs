use crate::inventory::dto::{CategoryForm, ProductForm};
use crate::inventory::view::InventoryView;
use crate::state::AppState;
use crate::ui::{self, Nav};

fn render_products(view: &InventoryView) {
    println!();
    println!("-- Stock & Menu: products --");
    if !view.search.is_empty() {
        println!("search: {:?}", view.search);
    }
    for product in view.filtered_products() {
        println!(
            "  #{:<4} {:<24} ${:<8.2} {:>3} in stock  {}",
            product.id,
            product.name,
            product.price,
            product.stock,
            view.category_name(product.category_id)
        );
    }
}

fn render_categories(view: &InventoryView) {
    println!();
    println!("-- Stock & Menu: categories --");
    for cat in &view.categories {
        println!("  #{:<4} {}", cat.id, cat.name);
    }
}

/// Prompts for the product fields, with the previous values as defaults
/// when editing. Empty input keeps the default.
fn prompt_product_form(view: &InventoryView, current: ProductForm) -> anyhow::Result<ProductForm> {
    let mut form = current;
    if let Some(name) = ui::prompt(&format!("name [{}]", form.name))? {
        if !name.is_empty() {
            form.name = name;
        }
    }
    if let Some(description) = ui::prompt(&format!("description [{}]", form.description))? {
        if !description.is_empty() {
            form.description = description;
        }
    }
    if let Some(price) = ui::prompt(&format!("price [{}]", form.price))? {
        if !price.is_empty() {
            form.price = ui::parse_or_default(&price);
        }
    }
    if let Some(stock) = ui::prompt(&format!("stock [{}]", form.stock))? {
        if !stock.is_empty() {
            form.stock = ui::parse_or_default(&stock);
        }
    }
    render_categories(view);
    if let Some(category) = ui::prompt(&format!("category id [{}]", form.category_id))? {
        if !category.is_empty() {
            form.category_id = ui::parse_or_default(&category);
        }
    }
    Ok(form)
}

/// Inventory admin: product/category listing, inline product edit, create
/// and delete. Every mutation ends with a full refetch.
pub async fn run(state: &AppState) -> anyhow::Result<Nav> {
    let mut view = InventoryView::new();
    println!("Loading inventory...");
    if let Err(err) = view.refresh(&state.api).await {
        println!("Could not load inventory: {err}");
    }
    render_products(&view);
    println!("(products | categories | search <text> | add | edit <id> | del <id> | addcat | delcat <id>)");

    loop {
        let Some(input) = ui::prompt("inventory")? else {
            return Ok(None);
        };
        if let Some(nav) = ui::common_command(state, &input) {
            return Ok(nav);
        }

        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input.as_str(), ""),
        };
        match command {
            "" | "products" => render_products(&view),
            "categories" => render_categories(&view),
            "search" => {
                view.search = rest.to_string();
                render_products(&view);
            }
            "add" => {
                let mut form = prompt_product_form(&view, ProductForm::default())?;
                if form.category_id == 0 {
                    form.category_id = view.categories.first().map_or(0, |c| c.id);
                }
                if let Err(err) = form.validate() {
                    println!("{err}");
                    continue;
                }
                match view.create_product(&state.api, &form).await {
                    Ok(()) => render_products(&view),
                    Err(err) => println!("Failed to add product: {err}"),
                }
            }
            "edit" => {
                let id: i64 = ui::parse_or_default(rest);
                let Some(product) = view.product(id) else {
                    println!("No product #{id}.");
                    continue;
                };
                let form = prompt_product_form(&view, ProductForm::from_product(product))?;
                if let Err(err) = form.validate() {
                    println!("{err}");
                    continue;
                }
                match view.save_product(&state.api, id, &form).await {
                    Ok(()) => render_products(&view),
                    Err(err) => println!("Failed to save product: {err}"),
                }
            }
            "del" => {
                let id: i64 = ui::parse_or_default(rest);
                if view.product(id).is_none() {
                    println!("No product #{id}.");
                    continue;
                }
                if !ui::confirm("Are you sure you want to delete this product?")? {
                    continue;
                }
                match view.delete_product(&state.api, id).await {
                    Ok(()) => render_products(&view),
                    Err(err) => println!("Failed to delete product: {err}"),
                }
            }
            "addcat" => {
                let name = ui::prompt("category name")?.unwrap_or_default();
                let form = CategoryForm { name };
                if let Err(err) = form.validate() {
                    println!("Category {err}");
                    continue;
                }
                match view.create_category(&state.api, &form).await {
                    Ok(()) => render_categories(&view),
                    Err(err) => println!("Failed to add category: {err}"),
                }
            }
            "delcat" => {
                let id: i64 = ui::parse_or_default(rest);
                if view.category(id).is_none() {
                    println!("No category #{id}.");
                    continue;
                }
                if !ui::confirm("Are you sure you want to delete this category?")? {
                    continue;
                }
                match view.delete_category(&state.api, id).await {
                    Ok(()) => render_categories(&view),
                    Err(err) => println!("Failed to delete category: {err}"),
                }
            }
            _ => println!("Unknown command; try `products` or `categories`."),
        }
    }
}
