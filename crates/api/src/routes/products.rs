//! Product CRUD handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use orderdesk_core::{Cents, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::state::AppState;

/// Request body for creating or updating a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub price_in_cents: i32,
}

impl ProductPayload {
    /// Validate the payload, returning the price as [`Cents`].
    fn validate(&self) -> Result<Cents> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_owned()));
        }
        let price = Cents::new(self.price_in_cents);
        if !price.is_positive() {
            return Err(AppError::Validation(
                "priceInCents must be positive".to_owned(),
            ));
        }
        Ok(price)
    }
}

/// POST /products
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<Product>)> {
    let price = payload.validate()?;

    let product = ProductRepository::new(state.pool())
        .create(payload.name.trim(), price)
        .await?;

    tracing::info!(product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// GET /products/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))?;

    Ok(Json(product))
}

/// PUT /products/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>> {
    let price = payload.validate()?;

    let product = ProductRepository::new(state.pool())
        .update(id, payload.name.trim(), price)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound(format!("product {id} not found"))
            }
            other => other.into(),
        })?;

    Ok(Json(product))
}

/// DELETE /products/{id}
pub async fn remove(State(state): State<AppState>, Path(id): Path<ProductId>) -> Result<StatusCode> {
    let repo = ProductRepository::new(state.pool());

    if !repo.exists(id).await? {
        return Err(AppError::NotFound(format!("product {id} not found")));
    }

    repo.delete(id).await?;
    tracing::info!(product_id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
