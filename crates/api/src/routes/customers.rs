//! Customer CRUD handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use orderdesk_core::{CustomerId, Email};

use crate::db::CustomerRepository;
use crate::error::{AppError, Result};
use crate::models::Customer;
use crate::state::AppState;

/// Request body for creating or updating a customer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CustomerPayload {
    /// Validate the payload, returning the parsed email.
    fn validate(&self) -> Result<Email> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_owned()));
        }
        Email::parse(&self.email).map_err(|e| AppError::Validation(e.to_string()))
    }
}

/// POST /customers
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CustomerPayload>,
) -> Result<(StatusCode, Json<Customer>)> {
    let email = payload.validate()?;

    let customer = CustomerRepository::new(state.pool())
        .create(
            payload.name.trim(),
            &email,
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await?;

    tracing::info!(customer_id = %customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /customers
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>> {
    let customers = CustomerRepository::new(state.pool()).list().await?;
    Ok(Json(customers))
}

/// GET /customers/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<Customer>> {
    let customer = CustomerRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id} not found")))?;

    Ok(Json(customer))
}

/// GET /customers/email/{email}
pub async fn get_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<Customer>> {
    let email = Email::parse(&email).map_err(|e| AppError::Validation(e.to_string()))?;

    let customer = CustomerRepository::new(state.pool())
        .get_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer with email {email} not found")))?;

    Ok(Json(customer))
}

/// PUT /customers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
    Json(payload): Json<CustomerPayload>,
) -> Result<Json<Customer>> {
    let email = payload.validate()?;

    let customer = CustomerRepository::new(state.pool())
        .update(
            id,
            payload.name.trim(),
            &email,
            payload.phone.as_deref(),
            payload.address.as_deref(),
        )
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound(format!("customer {id} not found"))
            }
            other => other.into(),
        })?;

    Ok(Json(customer))
}

/// DELETE /customers/{id}
///
/// Deleting a customer removes their orders and line items via the
/// cascading foreign keys.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<CustomerId>,
) -> Result<StatusCode> {
    let repo = CustomerRepository::new(state.pool());

    if !repo.exists(id).await? {
        return Err(AppError::NotFound(format!("customer {id} not found")));
    }

    repo.delete(id).await?;
    tracing::info!(customer_id = %id, "Customer deleted (orders cascaded)");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_rejects_blank_name() {
        let payload = CustomerPayload {
            name: String::new(),
            email: "joao@x.com".to_owned(),
            phone: None,
            address: None,
        };
        assert!(matches!(payload.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_payload_rejects_invalid_email() {
        let payload = CustomerPayload {
            name: "João".to_owned(),
            email: "not-an-email".to_owned(),
            phone: None,
            address: None,
        };
        assert!(matches!(payload.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_payload_accepts_optional_fields_missing() {
        let payload = CustomerPayload {
            name: "João".to_owned(),
            email: "joao@x.com".to_owned(),
            phone: None,
            address: None,
        };
        assert!(payload.validate().is_ok());
    }
}
