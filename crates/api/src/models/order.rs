//! Order aggregate and line items.
//!
//! Monetary amounts on an order are derived values: a line subtotal is
//! quantity times the product's *current* price, and the order total is the
//! sum of its subtotals. Nothing is cached or persisted, so changing a
//! product's price changes the displayed total of every order referencing it,
//! including historical ones. Snapshotting the unit price at order time was
//! considered and deliberately not done, to keep parity with the documented
//! API behavior.

use chrono::{DateTime, Utc};

use orderdesk_core::{LineItemId, OrderId, OrderStatus};

use super::{Customer, Product};

/// One (product, quantity) entry within an order.
#[derive(Debug, Clone)]
pub struct LineItem {
    /// Unique line item ID.
    pub id: LineItemId,
    /// The referenced product, resolved at read time.
    pub product: Product,
    /// Ordered quantity (always positive).
    pub quantity: i32,
}

impl LineItem {
    /// Subtotal in minor currency units: quantity times the product's
    /// current price. Integer arithmetic only, widened to `i64`.
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.product.price_in_cents.times(self.quantity)
    }
}

/// An order placed by a customer.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The owning customer (immutable after creation).
    pub customer: Customer,
    /// Line items in the order they were submitted.
    pub items: Vec<LineItem>,
    /// When the order was created.
    pub order_date: DateTime<Utc>,
    /// Current lifecycle status.
    pub status: OrderStatus,
}

impl Order {
    /// Total amount in minor currency units: the sum of line subtotals.
    #[must_use]
    pub fn total_amount(&self) -> i64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use orderdesk_core::{Cents, CustomerId, Email, ProductId};

    use super::*;

    fn product(id: i32, price: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            price_in_cents: Cents::new(price),
        }
    }

    fn order_with_items(items: Vec<LineItem>) -> Order {
        Order {
            id: OrderId::new(1),
            customer: Customer {
                id: CustomerId::new(1),
                name: "João".to_string(),
                email: Email::parse("joao@x.com").unwrap(),
                phone: None,
                address: None,
            },
            items,
            order_date: Utc::now(),
            status: OrderStatus::Pending,
        }
    }

    #[test]
    fn test_line_item_subtotal() {
        let item = LineItem {
            id: LineItemId::new(1),
            product: product(1, 250_000),
            quantity: 2,
        };
        assert_eq!(item.subtotal(), 500_000);
    }

    #[test]
    fn test_total_is_sum_of_subtotals() {
        let order = order_with_items(vec![
            LineItem {
                id: LineItemId::new(1),
                product: product(1, 250_000),
                quantity: 2,
            },
            LineItem {
                id: LineItemId::new(2),
                product: product(2, 5_000),
                quantity: 3,
            },
        ]);
        assert_eq!(order.total_amount(), 515_000);
    }

    #[test]
    fn test_empty_order_total_is_zero() {
        let order = order_with_items(Vec::new());
        assert_eq!(order.total_amount(), 0);
    }

    #[test]
    fn test_total_does_not_overflow_i32() {
        let order = order_with_items(vec![
            LineItem {
                id: LineItemId::new(1),
                product: product(1, i32::MAX),
                quantity: 2,
            },
            LineItem {
                id: LineItemId::new(2),
                product: product(2, i32::MAX),
                quantity: 2,
            },
        ]);
        assert_eq!(order.total_amount(), i64::from(i32::MAX) * 4);
    }

    #[test]
    fn test_total_tracks_current_price() {
        // Raising the product price changes the already-built order's total
        let mut order = order_with_items(vec![LineItem {
            id: LineItemId::new(1),
            product: product(1, 100),
            quantity: 5,
        }]);
        assert_eq!(order.total_amount(), 500);

        order.items[0].product.price_in_cents = Cents::new(200);
        assert_eq!(order.total_amount(), 1_000);
    }
}
