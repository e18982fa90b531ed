//! Customer domain type.

use serde::Serialize;

use orderdesk_core::{CustomerId, Email};

/// A customer who owns orders.
///
/// Deleting a customer cascades to their orders and line items at the
/// database level.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Display name.
    pub name: String,
    /// Globally unique email address.
    pub email: Email,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
}
