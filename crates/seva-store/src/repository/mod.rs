//! # Repository Module
//!
//! Storage behind the cart and the confirmed bookings.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartRepository (trait)                                                 │
//! │  ├── SqliteCartRepository   JSON document per cart key                  │
//! │  └── MemoryCartRepository   tests, previews                             │
//! │                                                                         │
//! │  BookingRepository          one row per booked line, tax frozen         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is a single document owned by one visitor, so it is loaded and
//! saved whole. Bookings are rows because invoices query them by id and
//! by booker.

use async_trait::async_trait;
use seva_core::CartState;

use crate::error::StoreResult;

pub mod booking;
pub mod cart;

/// Key the storefront's single cart is stored under.
pub const DEFAULT_CART_KEY: &str = "seva_cart";

/// Load/save access to a persisted cart.
///
/// The pure cart logic in `seva-core` never touches storage; callers load,
/// mutate the `CartState`, and save it back.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Loads the cart stored under `cart_key`.
    ///
    /// A missing cart, or one whose stored document no longer parses, loads
    /// as an empty INR cart.
    async fn load(&self, cart_key: &str) -> StoreResult<CartState>;

    /// Replaces the cart stored under `cart_key`.
    async fn save(&self, cart_key: &str, cart: &CartState) -> StoreResult<()>;
}
