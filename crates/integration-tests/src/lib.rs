//! Integration tests for Orderdesk.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL and run migrations
//! cargo run -p orderdesk-cli -- migrate
//!
//! # Start the API
//! cargo run -p orderdesk-api
//!
//! # Run the integration tests
//! cargo test -p orderdesk-integration-tests -- --ignored
//! ```
//!
//! All tests are `#[ignore]`d by default because they require a running
//! server and database. Each test creates its own entities with unique
//! emails so tests don't interfere with each other.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("ORDERDESK_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Create an HTTP client for tests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email for this test run.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4())
}

/// Test helper: create a product, returning its JSON.
///
/// # Panics
///
/// Panics if the request fails or the server rejects the product.
pub async fn create_product(client: &Client, name: &str, price_in_cents: i64) -> Value {
    let resp = client
        .post(format!("{}/products", base_url()))
        .json(&json!({"name": name, "priceInCents": price_in_cents}))
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), 201, "product creation should return 201");
    resp.json().await.expect("Failed to parse product JSON")
}

/// Test helper: create a customer with a unique email, returning its JSON.
///
/// # Panics
///
/// Panics if the request fails or the server rejects the customer.
pub async fn create_customer(client: &Client, name: &str, email: &str) -> Value {
    let resp = client
        .post(format!("{}/customers", base_url()))
        .json(&json!({"name": name, "email": email}))
        .send()
        .await
        .expect("Failed to create customer");

    assert_eq!(resp.status(), 201, "customer creation should return 201");
    resp.json().await.expect("Failed to parse customer JSON")
}

/// Test helper: create an order, returning the raw response.
///
/// # Panics
///
/// Panics if the request itself fails.
pub async fn post_order(client: &Client, customer_id: i64, items: Value) -> reqwest::Response {
    client
        .post(format!("{}/orders", base_url()))
        .json(&json!({"customerId": customer_id, "items": items}))
        .send()
        .await
        .expect("Failed to post order")
}
