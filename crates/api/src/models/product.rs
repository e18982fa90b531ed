//! Product domain type.

use serde::Serialize;

use orderdesk_core::{Cents, ProductId};

/// A product available for ordering.
///
/// Prices are stored in minor currency units and are *not* snapshotted onto
/// order line items - an order's total always reflects the product's current
/// price (see [`crate::models::order`]).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Current price in minor currency units.
    pub price_in_cents: Cents,
}
