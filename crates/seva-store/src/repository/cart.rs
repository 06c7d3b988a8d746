//! # Cart Repositories
//!
//! Persisted cart documents.
//!
//! ## Storage Format
//! ```text
//! carts
//! ┌────────────┬──────────────────────────────────────────┬──────────────┐
//! │ cart_key   │ payload (CartState as JSON)              │ updated_at   │
//! ├────────────┼──────────────────────────────────────────┼──────────────┤
//! │ seva_cart  │ {"items":[...],"currency":"INR",...}     │ RFC 3339     │
//! └────────────┴──────────────────────────────────────────┴──────────────┘
//! ```
//!
//! Booking dates inside the payload round-trip through serde as ISO dates,
//! so a reloaded cart carries real `NaiveDate`s rather than strings.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use seva_core::CartState;
use sqlx::{Row, SqlitePool};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::CartRepository;
use crate::error::StoreResult;

// =============================================================================
// SQLite
// =============================================================================

/// Cart repository backed by the `carts` table.
#[derive(Debug, Clone)]
pub struct SqliteCartRepository {
    pool: SqlitePool,
}

impl SqliteCartRepository {
    /// Creates a new SqliteCartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteCartRepository { pool }
    }

    /// Deletes the cart stored under `cart_key`.
    ///
    /// ## Returns
    /// `true` if a cart was stored.
    pub async fn delete(&self, cart_key: &str) -> StoreResult<bool> {
        debug!(cart_key = %cart_key, "Deleting cart");

        let result = sqlx::query("DELETE FROM carts WHERE cart_key = ?")
            .bind(cart_key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CartRepository for SqliteCartRepository {
    async fn load(&self, cart_key: &str) -> StoreResult<CartState> {
        debug!(cart_key = %cart_key, "Loading cart");

        let row = sqlx::query("SELECT payload FROM carts WHERE cart_key = ?")
            .bind(cart_key)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(CartState::default());
        };

        let payload: String = row.try_get("payload")?;
        Ok(decode_cart(cart_key, &payload))
    }

    async fn save(&self, cart_key: &str, cart: &CartState) -> StoreResult<()> {
        debug!(
            cart_key = %cart_key,
            items = cart.item_count(),
            currency = %cart.currency,
            "Saving cart"
        );

        let payload = serde_json::to_string(cart)?;

        sqlx::query(
            r#"
            INSERT INTO carts (cart_key, payload, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT (cart_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(cart_key)
        .bind(payload)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =============================================================================
// In-Memory
// =============================================================================

/// Cart repository holding JSON documents in memory.
///
/// Stores the serialized form, not the `CartState`, so it loads exactly
/// what the SQLite repository would.
#[derive(Debug, Default)]
pub struct MemoryCartRepository {
    carts: Mutex<HashMap<String, String>>,
}

impl MemoryCartRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        MemoryCartRepository::default()
    }

    /// Stores a raw payload, bypassing serialization.
    pub async fn insert_raw(&self, cart_key: &str, payload: impl Into<String>) {
        self.carts
            .lock()
            .await
            .insert(cart_key.to_string(), payload.into());
    }
}

#[async_trait]
impl CartRepository for MemoryCartRepository {
    async fn load(&self, cart_key: &str) -> StoreResult<CartState> {
        let carts = self.carts.lock().await;
        Ok(carts
            .get(cart_key)
            .map(|payload| decode_cart(cart_key, payload))
            .unwrap_or_default())
    }

    async fn save(&self, cart_key: &str, cart: &CartState) -> StoreResult<()> {
        let payload = serde_json::to_string(cart)?;
        self.carts.lock().await.insert(cart_key.to_string(), payload);
        Ok(())
    }
}

/// An unreadable cart is dropped rather than blocking the storefront.
fn decode_cart(cart_key: &str, payload: &str) -> CartState {
    match serde_json::from_str(payload) {
        Ok(cart) => cart,
        Err(e) => {
            warn!(cart_key = %cart_key, error = %e, "Stored cart is unreadable, starting empty");
            CartState::default()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
