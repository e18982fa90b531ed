//! Order handlers: aggregate creation, reads, status updates, deletion.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderdesk_core::{CustomerId, LineItemId, OrderId, OrderStatus, ProductId};

use crate::db::{CustomerRepository, OrderRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::models::{Customer, LineItem, Order, Product};
use crate::state::AppState;

/// Request body for creating an order.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: CustomerId,
    /// An empty item list is accepted and produces a zero-total order.
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

/// One requested line item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Request body for overwriting an order's status.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// JSON representation of a line item, with its derived subtotal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemResponse {
    pub id: LineItemId,
    pub product: Product,
    pub quantity: i32,
    pub subtotal: i64,
}

impl From<LineItem> for LineItemResponse {
    fn from(item: LineItem) -> Self {
        let subtotal = item.subtotal();
        Self {
            id: item.id,
            product: item.product,
            quantity: item.quantity,
            subtotal,
        }
    }
}

/// JSON representation of an order, with its derived total.
///
/// Subtotals and the total are recomputed on every read from current
/// product prices; they are never stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: OrderId,
    pub customer: Customer,
    pub items: Vec<LineItemResponse>,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: i64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let total_amount = order.total_amount();
        Self {
            id: order.id,
            customer: order.customer,
            items: order.items.into_iter().map(LineItemResponse::from).collect(),
            order_date: order.order_date,
            status: order.status,
            total_amount,
        }
    }
}

/// POST /orders
///
/// Builds the order aggregate: resolves the customer and every referenced
/// product (404 naming whichever is missing), validates quantities, then
/// persists the order and its items atomically. The new order is `PENDING`.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    let pool = state.pool();

    let customer = CustomerRepository::new(pool)
        .get(request.customer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {} not found", request.customer_id)))?;

    let products = ProductRepository::new(pool);
    let mut resolved = Vec::with_capacity(request.items.len());
    for item in &request.items {
        if item.quantity <= 0 {
            return Err(AppError::Validation(
                "quantity must be a positive integer".to_owned(),
            ));
        }

        let product = products
            .get(item.product_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product {} not found", item.product_id)))?;

        resolved.push((product, item.quantity));
    }

    let order = OrderRepository::new(pool).create(&customer, &resolved).await?;

    tracing::info!(
        order_id = %order.id,
        customer_id = %order.customer.id,
        items = order.items.len(),
        "Order created"
    );
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// GET /orders
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<OrderResponse>>> {
    let orders = OrderRepository::new(state.pool()).list().await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// GET /orders/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderResponse>> {
    let order = OrderRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))?;

    Ok(Json(OrderResponse::from(order)))
}

/// GET /orders/customer/{customerId}
pub async fn list_by_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
) -> Result<Json<Vec<OrderResponse>>> {
    let pool = state.pool();

    if !CustomerRepository::new(pool).exists(customer_id).await? {
        return Err(AppError::NotFound(format!(
            "customer {customer_id} not found"
        )));
    }

    let orders = OrderRepository::new(pool).list_by_customer(customer_id).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// PUT /orders/{id}/status
///
/// Parses the label case-insensitively and overwrites the status
/// unconditionally - no transition is forbidden based on the current state.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<OrderResponse>> {
    let status: OrderStatus = request
        .status
        .parse()
        .map_err(|e: orderdesk_core::ParseOrderStatusError| AppError::Validation(e.to_string()))?;

    let repo = OrderRepository::new(state.pool());
    repo.update_status(id, status)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound(format!("order {id} not found"))
            }
            other => other.into(),
        })?;

    let order = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id} not found")))?;

    tracing::info!(order_id = %id, status = %status, "Order status updated");
    Ok(Json(OrderResponse::from(order)))
}

/// DELETE /orders/{id}
pub async fn remove(State(state): State<AppState>, Path(id): Path<OrderId>) -> Result<StatusCode> {
    let repo = OrderRepository::new(state.pool());

    if !repo.exists(id).await? {
        return Err(AppError::NotFound(format!("order {id} not found")));
    }

    repo.delete(id).await?;
    tracing::info!(order_id = %id, "Order deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use orderdesk_core::{Cents, Email};

    use super::*;

    #[test]
    fn test_order_response_computes_totals() {
        let order = Order {
            id: OrderId::new(1),
            customer: Customer {
                id: CustomerId::new(1),
                name: "João".to_owned(),
                email: Email::parse("joao@x.com").unwrap(),
                phone: None,
                address: None,
            },
            items: vec![LineItem {
                id: LineItemId::new(1),
                product: Product {
                    id: ProductId::new(1),
                    name: "Notebook".to_owned(),
                    price_in_cents: Cents::new(250_000),
                },
                quantity: 2,
            }],
            order_date: Utc::now(),
            status: OrderStatus::Pending,
        };

        let response = OrderResponse::from(order);
        assert_eq!(response.total_amount, 500_000);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items.first().unwrap().subtotal, 500_000);
    }

    #[test]
    fn test_order_response_json_shape() {
        let order = Order {
            id: OrderId::new(7),
            customer: Customer {
                id: CustomerId::new(3),
                name: "Ana".to_owned(),
                email: Email::parse("ana@x.com").unwrap(),
                phone: Some("555-0100".to_owned()),
                address: None,
            },
            items: Vec::new(),
            order_date: Utc::now(),
            status: OrderStatus::Confirmed,
        };

        let json = serde_json::to_value(OrderResponse::from(order)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["status"], "CONFIRMED");
        assert_eq!(json["totalAmount"], 0);
        assert_eq!(json["customer"]["email"], "ana@x.com");
        assert!(json["orderDate"].is_string());
    }

    #[test]
    fn test_create_request_defaults_to_empty_items() {
        let request: CreateOrderRequest = serde_json::from_str(r#"{"customerId": 1}"#).unwrap();
        assert_eq!(request.customer_id, CustomerId::new(1));
        assert!(request.items.is_empty());
    }
}
