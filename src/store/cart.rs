use thiserror::Error;

use crate::orders::dto::OrderItemInput;
use crate::store::dto::Product;

/// Rule violations caught before any request is sent.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    #[error("you've reached the limit for {name}; only {stock} available in stock")]
    StockLimit { name: String, stock: u32 },
}

/// One product-plus-quantity entry in the in-progress order. The product is
/// a snapshot taken at the moment of first add.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// In-memory cart, insertion order = first-added order. Quantities are kept
/// within [1, product.stock] against the last-fetched stock figure; a line
/// driven to 0 is removed, never retained at zero. The limit check trades
/// strict correctness for responsiveness; the server re-checks stock at
/// order submission.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn quantity_of(&self, product_id: i64) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product.id == product_id)
            .map_or(0, |line| line.quantity)
    }

    /// Adds one unit, rejecting the add if it would exceed the product's
    /// last-fetched stock. The cart is left unchanged on rejection.
    pub fn add(&mut self, product: &Product) -> Result<(), CartError> {
        let in_cart = self.quantity_of(product.id);
        if in_cart >= product.stock {
            return Err(CartError::StockLimit {
                name: product.name.clone(),
                stock: product.stock,
            });
        }
        match self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
        Ok(())
    }

    /// Adjusts an existing line by `delta` (+1/-1 from the UI). Positive
    /// deltas get the same ceiling check as `add`; the result is clamped at
    /// 0 and an emptied line is removed from the cart. Unknown products are
    /// a no-op.
    pub fn update_quantity(&mut self, product: &Product, delta: i32) -> Result<(), CartError> {
        let Some(pos) = self
            .lines
            .iter()
            .position(|line| line.product.id == product.id)
        else {
            return Ok(());
        };
        let quantity = self.lines[pos].quantity;
        if delta > 0 && quantity.saturating_add(delta as u32) > product.stock {
            return Err(CartError::StockLimit {
                name: product.name.clone(),
                stock: product.stock,
            });
        }
        let next = quantity.saturating_add_signed(delta);
        if next == 0 {
            self.lines.remove(pos);
        } else {
            self.lines[pos].quantity = next;
        }
        Ok(())
    }

    /// Remaining stock after subtracting what the cart already holds.
    /// Display-only; the catalog snapshot itself is never mutated.
    pub fn effective_stock(&self, product: &Product) -> u32 {
        product.stock.saturating_sub(self.quantity_of(product.id))
    }

    /// Recomputed from the lines on every call, never accumulated.
    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities, for the order-bar badge.
    pub fn total_items(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The cart reduced to the order submission shape.
    pub fn order_items(&self) -> Vec<OrderItemInput> {
        self.lines
            .iter()
            .map(|line| OrderItemInput {
                product_id: line.product.id,
                quantity: line.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::dto::test_support::product;

    #[test]
    fn accepts_adds_up_to_stock_and_rejects_the_next() {
        let snack = product(1, "Spring Roll", 4.5, 3);
        let mut cart = Cart::default();

        for _ in 0..3 {
            cart.add(&snack).unwrap();
        }
        assert_eq!(cart.quantity_of(1), 3);

        let err = cart.add(&snack).unwrap_err();
        assert_eq!(
            err,
            CartError::StockLimit {
                name: "Spring Roll".into(),
                stock: 3
            }
        );
        // No state change on rejection.
        assert_eq!(cart.quantity_of(1), 3);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn ceiling_check_holds_at_the_top_of_the_quantity_range() {
        let snack = product(1, "Bao", 2.5, u32::MAX);
        let mut cart = Cart::default();
        cart.lines.push(CartLine {
            product: snack.clone(),
            quantity: u32::MAX,
        });

        assert!(cart.add(&snack).is_err());
        assert_eq!(cart.quantity_of(1), u32::MAX);
    }

    #[test]
    fn increment_respects_the_same_ceiling() {
        let snack = product(1, "Dumpling", 3.0, 2);
        let mut cart = Cart::default();
        cart.add(&snack).unwrap();
        cart.update_quantity(&snack, 1).unwrap();
        assert!(cart.update_quantity(&snack, 1).is_err());
        assert_eq!(cart.quantity_of(1), 2);
    }

    #[test]
    fn decrementing_a_single_unit_line_removes_it() {
        let snack = product(1, "Bao", 2.5, 5);
        let other = product(2, "Tea", 1.5, 5);
        let mut cart = Cart::default();
        cart.add(&snack).unwrap();
        cart.add(&other).unwrap();
        assert_eq!(cart.len(), 2);

        cart.update_quantity(&snack, -1).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(1), 0);
        // The surviving line keeps its insertion slot.
        assert_eq!(cart.lines()[0].product.id, 2);
    }

    #[test]
    fn quantity_never_goes_negative() {
        let snack = product(1, "Bao", 2.5, 5);
        let mut cart = Cart::default();
        cart.add(&snack).unwrap();
        cart.update_quantity(&snack, -1).unwrap();
        cart.update_quantity(&snack, -1).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn lines_exist_iff_quantity_is_positive() {
        let a = product(1, "A", 1.0, 10);
        let b = product(2, "B", 1.0, 10);
        let mut cart = Cart::default();
        cart.add(&a).unwrap();
        cart.add(&b).unwrap();
        cart.update_quantity(&a, 1).unwrap();
        cart.update_quantity(&b, -1).unwrap();

        for line in cart.lines() {
            assert!(line.quantity >= 1);
        }
        assert_eq!(cart.quantity_of(2), 0);
        assert!(!cart.lines().iter().any(|l| l.product.id == 2));
    }

    #[test]
    fn subtotal_is_fresh_after_arbitrary_interleavings() {
        let a = product(1, "A", 4.25, 10);
        let b = product(2, "B", 2.0, 4);
        let mut cart = Cart::default();

        cart.add(&a).unwrap();
        cart.add(&b).unwrap();
        cart.add(&a).unwrap();
        cart.update_quantity(&b, 1).unwrap();
        cart.update_quantity(&a, -1).unwrap();
        // a: 1 * 4.25, b: 2 * 2.0
        assert!((cart.subtotal() - 8.25).abs() < 1e-9);
        assert_eq!(cart.total_items(), 3);

        // Remove a line entirely; the subtotal follows.
        cart.update_quantity(&a, -1).unwrap();
        assert!((cart.subtotal() - 4.0).abs() < 1e-9);
        assert_eq!(cart.len(), 1);

        cart.clear();
        assert_eq!(cart.subtotal(), 0.0);
    }

    #[test]
    fn effective_stock_tracks_the_cart_without_touching_the_snapshot() {
        let snack = product(1, "Bao", 2.5, 3);
        let mut cart = Cart::default();
        assert_eq!(cart.effective_stock(&snack), 3);
        cart.add(&snack).unwrap();
        cart.add(&snack).unwrap();
        assert_eq!(cart.effective_stock(&snack), 1);
        assert_eq!(snack.stock, 3);
        cart.add(&snack).unwrap();
        assert_eq!(cart.effective_stock(&snack), 0);
    }

    #[test]
    fn order_items_reduce_to_id_and_quantity() {
        let a = product(1, "A", 5.0, 10);
        let b = product(2, "B", 3.5, 10);
        let mut cart = Cart::default();
        cart.add(&a).unwrap();
        cart.add(&a).unwrap();
        cart.add(&b).unwrap();

        let items = cart.order_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product_id, 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].product_id, 2);
        assert_eq!(items[1].quantity, 1);
    }
}
