//! HTTP route handlers for the Orderdesk API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (database ping)
//!
//! # Products
//! POST   /products                    - Create product
//! GET    /products                    - List products
//! GET    /products/{id}               - Product by ID
//! PUT    /products/{id}               - Update product
//! DELETE /products/{id}               - Delete product
//!
//! # Customers
//! POST   /customers                   - Create customer (400 on duplicate email)
//! GET    /customers                   - List customers
//! GET    /customers/{id}              - Customer by ID
//! GET    /customers/email/{email}     - Customer by email
//! PUT    /customers/{id}              - Update customer
//! DELETE /customers/{id}              - Delete customer (cascades to orders)
//!
//! # Orders
//! POST   /orders                      - Create order with line items
//! GET    /orders                      - List orders
//! GET    /orders/{id}                 - Order by ID
//! GET    /orders/customer/{customerId} - Orders owned by a customer
//! PUT    /orders/{id}/status          - Overwrite order status
//! DELETE /orders/{id}                 - Delete order (cascades to items)
//! ```

pub mod customers;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(products::create).get(products::list))
        .route(
            "/{id}",
            get(products::get)
                .put(products::update)
                .delete(products::remove),
        )
}

/// Create the customer routes router.
pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(customers::create).get(customers::list))
        .route(
            "/{id}",
            get(customers::get)
                .put(customers::update)
                .delete(customers::remove),
        )
        .route("/email/{email}", get(customers::get_by_email))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create).get(orders::list))
        .route("/{id}", get(orders::get).delete(orders::remove))
        .route("/{id}/status", put(orders::update_status))
        .route("/customer/{customer_id}", get(orders::list_by_customer))
}

/// Assemble all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/customers", customer_routes())
        .nest("/orders", order_routes())
}
