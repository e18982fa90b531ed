//! Order repository for database operations.
//!
//! Orders are persisted as an aggregate: the order row and all of its line
//! items succeed or fail together inside one transaction. Reads reassemble
//! the aggregate by joining the owning customer and, per item, the
//! referenced product, so monetary totals always reflect current prices.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use orderdesk_core::{Cents, CustomerId, Email, LineItemId, OrderId, OrderStatus, ProductId};

use super::RepositoryError;
use crate::models::{Customer, LineItem, Order, Product};

/// Order row joined with its owning customer.
#[derive(sqlx::FromRow)]
struct OrderHeadRow {
    order_id: OrderId,
    order_date: DateTime<Utc>,
    status: OrderStatus,
    customer_id: CustomerId,
    customer_name: String,
    customer_email: Email,
    customer_phone: Option<String>,
    customer_address: Option<String>,
}

impl OrderHeadRow {
    fn into_order(self, items: Vec<LineItem>) -> Order {
        Order {
            id: self.order_id,
            customer: Customer {
                id: self.customer_id,
                name: self.customer_name,
                email: self.customer_email,
                phone: self.customer_phone,
                address: self.customer_address,
            },
            items,
            order_date: self.order_date,
            status: self.status,
        }
    }
}

/// Line item row joined with its referenced product.
#[derive(sqlx::FromRow)]
struct LineItemRow {
    item_id: LineItemId,
    quantity: i32,
    product_id: ProductId,
    product_name: String,
    price_in_cents: Cents,
}

impl From<LineItemRow> for LineItem {
    fn from(row: LineItemRow) -> Self {
        Self {
            id: row.item_id,
            product: Product {
                id: row.product_id,
                name: row.product_name,
                price_in_cents: row.price_in_cents,
            },
            quantity: row.quantity,
        }
    }
}

const SELECT_HEAD: &str = r"
    SELECT o.id AS order_id,
           o.order_date,
           o.status,
           c.id AS customer_id,
           c.name AS customer_name,
           c.email AS customer_email,
           c.phone AS customer_phone,
           c.address AS customer_address
    FROM orders o
    JOIN customers c ON c.id = o.customer_id
";

const SELECT_ITEMS: &str = r"
    SELECT i.id AS item_id,
           i.quantity,
           p.id AS product_id,
           p.name AS product_name,
           p.price_in_cents
    FROM order_items i
    JOIN products p ON p.id = i.product_id
    WHERE i.order_id = $1
    ORDER BY i.id ASC
";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a new order with its line items as a unit.
    ///
    /// The caller has already resolved the customer and the product for each
    /// item; this method allocates identities for the order and every item
    /// inside a single transaction. The new order starts as `PENDING` with
    /// its creation timestamp set to now. Item order is preserved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails (the whole
    /// transaction is rolled back).
    pub async fn create(
        &self,
        customer: &Customer,
        items: &[(Product, i32)],
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let status = OrderStatus::default();
        let (order_id, order_date) = sqlx::query_as::<_, (OrderId, DateTime<Utc>)>(
            r"
            INSERT INTO orders (customer_id, order_date, status)
            VALUES ($1, $2, $3)
            RETURNING id, order_date
            ",
        )
        .bind(customer.id)
        .bind(Utc::now())
        .bind(status)
        .fetch_one(&mut *tx)
        .await?;

        let mut line_items = Vec::with_capacity(items.len());
        for (product, quantity) in items {
            let item_id = sqlx::query_scalar::<_, LineItemId>(
                r"
                INSERT INTO order_items (order_id, product_id, quantity)
                VALUES ($1, $2, $3)
                RETURNING id
                ",
            )
            .bind(order_id)
            .bind(product.id)
            .bind(*quantity)
            .fetch_one(&mut *tx)
            .await?;

            line_items.push(LineItem {
                id: item_id,
                product: product.clone(),
                quantity: *quantity,
            });
        }

        tx.commit().await?;

        Ok(Order {
            id: order_id,
            customer: customer.clone(),
            items: line_items,
            order_date,
            status,
        })
    }

    /// Get an order by its ID, with customer and line items attached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let head = sqlx::query_as::<_, OrderHeadRow>(&format!("{SELECT_HEAD} WHERE o.id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        match head {
            Some(head) => {
                let items = self.items_for(head.order_id).await?;
                Ok(Some(head.into_order(items)))
            }
            None => Ok(None),
        }
    }

    /// List all orders in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let heads = sqlx::query_as::<_, OrderHeadRow>(&format!("{SELECT_HEAD} ORDER BY o.id ASC"))
            .fetch_all(self.pool)
            .await?;

        self.assemble(heads).await
    }

    /// List all orders owned by a customer, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let heads = sqlx::query_as::<_, OrderHeadRow>(&format!(
            "{SELECT_HEAD} WHERE o.customer_id = $1 ORDER BY o.id ASC"
        ))
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        self.assemble(heads).await
    }

    /// Overwrite an order's status unconditionally.
    ///
    /// No transition is forbidden based on the current state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete an order by ID.
    ///
    /// Line items are removed by the cascading foreign key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Check whether an order with the given ID exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: OrderId) -> Result<bool, RepositoryError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM orders WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Fetch the line items for one order.
    async fn items_for(&self, order_id: OrderId) -> Result<Vec<LineItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, LineItemRow>(SELECT_ITEMS)
            .bind(order_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(LineItem::from).collect())
    }

    /// Attach line items to a list of order heads.
    async fn assemble(&self, heads: Vec<OrderHeadRow>) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = Vec::with_capacity(heads.len());
        for head in heads {
            let items = self.items_for(head.order_id).await?;
            orders.push(head.into_order(items));
        }
        Ok(orders)
    }
}
