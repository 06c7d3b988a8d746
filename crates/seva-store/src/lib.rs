//! # seva-store: Persistence for the Seva Storefront
//!
//! SQLite storage for the booking cart and confirmed bookings, plus the
//! checkout flow that moves one into the other.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Storefront backend / invoice-preview                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   seva-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌──────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │   │  Repositories    │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄──│  carts, bookings │   │  (embedded)  │  │   │
//! │  │   └───────────────┘   └──────────────────┘   └──────────────┘  │   │
//! │  │            ▲                                                    │   │
//! │  │            │   checkout.rs: book_cart, assemble_invoice         │   │
//! │  └────────────┼────────────────────────────────────────────────────┘   │
//! │               │                                                         │
//! │        seva-core (pricing, tax, invoice math)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seva_store::{book_cart, CartRepository, Database, DbConfig, DEFAULT_CART_KEY};
//!
//! let db = Database::new(DbConfig::new("seva.db")).await?;
//! let cart = db.carts().load(DEFAULT_CART_KEY).await?;
//! let totals = cart.totals(tax_config.as_ref(), "Kerala", "India")?;
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use checkout::{assemble_invoice, book_cart};
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};
pub use repository::booking::BookingRepository;
pub use repository::cart::{MemoryCartRepository, SqliteCartRepository};
pub use repository::{CartRepository, DEFAULT_CART_KEY};
