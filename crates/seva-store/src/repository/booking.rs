//! # Booking Repository
//!
//! Confirmed bookings, one row per booked cart line.
//!
//! ## Frozen Tax
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout                       bookings row                            │
//! │  ────────                       ────────────                            │
//! │  BookingCharge.amount     ───►  amount_minor                            │
//! │  BookingCharge.tax.cgst   ───►  cgst_minor                              │
//! │  BookingCharge.tax.sgst   ───►  sgst_minor                              │
//! │  BookingCharge.tax.igst   ───►  igst_minor                              │
//! │  BookingCharge.tax.total  ───►  tax_minor                               │
//! │                                                                         │
//! │  Invoices read these columns back and sum them. A later change to the  │
//! │  tax settings never alters an issued booking.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use seva_core::{BookerInfo, Booking, Currency, Money, Recurrence};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

const BOOKING_COLUMNS: &str = r#"
    id, booker_name, booker_email, booker_phone, booker_address,
    booker_state, booker_country, service_id, service_name,
    currency, recurrence, booking_date,
    amount_minor, cgst_minor, sgst_minor, igst_minor, tax_minor,
    payment_reference, created_at
"#;

/// Repository for booking records.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    /// Inserts one booking.
    pub async fn insert(&self, booking: &Booking) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;
        insert_booking(&mut conn, booking).await
    }

    /// Inserts a checkout's bookings atomically: all rows or none.
    pub async fn insert_many(&self, bookings: &[Booking]) -> StoreResult<()> {
        debug!(count = bookings.len(), "Inserting bookings");

        let mut tx = self.pool.begin().await?;
        for booking in bookings {
            insert_booking(&mut tx, booking).await?;
        }
        tx.commit().await?;

        Ok(())
    }

    /// Gets a booking by id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Booking>> {
        debug!(id = %id, "Getting booking");

        let sql = format!("SELECT {} FROM bookings WHERE id = ?", BOOKING_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(booking_from_row).transpose()
    }

    /// Gets the bookings with the given ids, in the order of `ids`.
    ///
    /// Unknown ids are skipped; callers compare lengths when every id must
    /// exist.
    pub async fn list_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Booking>> {
        debug!(count = ids.len(), "Listing bookings by id");

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM bookings WHERE id IN (", BOOKING_COLUMNS));
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        let rows = query.build().fetch_all(&self.pool).await?;

        let mut by_id: HashMap<String, Booking> = rows
            .iter()
            .map(booking_from_row)
            .map(|b| b.map(|b| (b.id.clone(), b)))
            .collect::<StoreResult<_>>()?;

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Lists the bookings paid by one gateway payment, oldest first.
    pub async fn list_by_payment_reference(&self, reference: &str) -> StoreResult<Vec<Booking>> {
        debug!(reference = %reference, "Listing bookings for payment");

        let sql = format!(
            "SELECT {} FROM bookings WHERE payment_reference = ? ORDER BY created_at, id",
            BOOKING_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(reference)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(booking_from_row).collect()
    }

    /// Lists a booker's bookings, oldest first.
    pub async fn list_by_booker(&self, email: &str) -> StoreResult<Vec<Booking>> {
        debug!(email = %email, "Listing bookings for booker");

        let sql = format!(
            "SELECT {} FROM bookings WHERE booker_email = ? COLLATE NOCASE ORDER BY created_at, id",
            BOOKING_COLUMNS
        );
        let rows = sqlx::query(&sql)
            .bind(email.trim())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(booking_from_row).collect()
    }
}

async fn insert_booking(conn: &mut SqliteConnection, booking: &Booking) -> StoreResult<()> {
    debug!(
        id = %booking.id,
        service_id = %booking.service_id,
        amount = %booking.amount,
        tax = %booking.tax_amount,
        "Inserting booking"
    );

    let sql = format!(
        "INSERT INTO bookings ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        BOOKING_COLUMNS
    );

    sqlx::query(&sql)
        .bind(&booking.id)
        .bind(&booking.booker.name)
        .bind(&booking.booker.email)
        .bind(&booking.booker.phone)
        .bind(&booking.booker.address)
        .bind(&booking.booker.state)
        .bind(&booking.booker.country)
        .bind(&booking.service_id)
        .bind(&booking.service_name)
        .bind(booking.currency.code())
        .bind(booking.recurrence.as_str())
        .bind(booking.booking_date)
        .bind(booking.amount.minor_units())
        .bind(booking.cgst_amount.minor_units())
        .bind(booking.sgst_amount.minor_units())
        .bind(booking.igst_amount.minor_units())
        .bind(booking.tax_amount.minor_units())
        .bind(&booking.payment_reference)
        .bind(booking.created_at)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

fn booking_from_row(row: &SqliteRow) -> StoreResult<Booking> {
    let currency: String = row.try_get("currency")?;
    let recurrence: String = row.try_get("recurrence")?;
    let booking_date: Option<NaiveDate> = row.try_get("booking_date")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(Booking {
        id: row.try_get("id")?,
        booker: BookerInfo {
            name: row.try_get("booker_name")?,
            email: row.try_get("booker_email")?,
            phone: row.try_get("booker_phone")?,
            address: row.try_get("booker_address")?,
            state: row.try_get("booker_state")?,
            country: row.try_get("booker_country")?,
        },
        service_id: row.try_get("service_id")?,
        service_name: row.try_get("service_name")?,
        currency: currency
            .parse::<Currency>()
            .map_err(|e| StoreError::corrupt("booking", e))?,
        recurrence: recurrence
            .parse::<Recurrence>()
            .map_err(|e| StoreError::corrupt("booking", e))?,
        booking_date,
        amount: Money::from_minor(row.try_get("amount_minor")?),
        cgst_amount: Money::from_minor(row.try_get("cgst_minor")?),
        sgst_amount: Money::from_minor(row.try_get("sgst_minor")?),
        igst_amount: Money::from_minor(row.try_get("igst_minor")?),
        tax_amount: Money::from_minor(row.try_get("tax_minor")?),
        payment_reference: row.try_get("payment_reference")?,
        created_at,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use seva_core::invoice::BookingCharge;
    use seva_core::{TaxBreakdown, TaxType};

    fn booker(email: &str) -> BookerInfo {
        BookerInfo {
            name: "Joseph Mathew".to_string(),
            email: email.to_string(),
            phone: Some("+91 98470 00000".to_string()),
            address: None,
            state: "Kerala".to_string(),
            country: "India".to_string(),
        }
    }

    fn booking(email: &str, amount: i64, tax: TaxBreakdown) -> Booking {
        let charge = BookingCharge {
            line_id: "line".to_string(),
            service_id: "holy-mass".to_string(),
            service_name: "Holy Mass Offering".to_string(),
            currency: Currency::Inr,
            recurrence: Recurrence::Monthly,
            booking_date: NaiveDate::from_ymd_opt(2026, 11, 2),
            amount: Money::from_major(amount),
            tax,
        };
        Booking::from_charge(&charge, &booker(email), Some("pay_abc".to_string()))
    }

    #[tokio::test]
    async fn test_insert_and_get_preserves_every_field() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.bookings();
        let tax = TaxBreakdown::intra_state(Money::from_minor(4_509), Money::from_minor(4_509));
        let original = booking("joseph@example.org", 501, tax);

        repo.insert(&original).await.unwrap();
        let loaded = repo.get_by_id(&original.id).await.unwrap().unwrap();

        assert_eq!(loaded, original);
        assert_eq!(loaded.tax_type(), TaxType::CgstSgst);
        assert_eq!(loaded.tax_amount, Money::from_minor(9_018));
    }

    #[tokio::test]
    async fn test_get_missing_booking() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.bookings().get_by_id("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_unique_violation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.bookings();
        let b = booking("joseph@example.org", 100, TaxBreakdown::none());

        repo.insert(&b).await.unwrap();
        let err = repo.insert(&b).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_insert_many_is_atomic() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.bookings();
        let first = booking("joseph@example.org", 100, TaxBreakdown::none());
        let second = booking("joseph@example.org", 200, TaxBreakdown::none());

        // Second copy of `first` fails the batch after one row was written.
        let err = repo
            .insert_many(&[first.clone(), second.clone(), first.clone()])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
        assert!(repo.get_by_id(&first.id).await.unwrap().is_none());

        repo.insert_many(&[first.clone(), second.clone()]).await.unwrap();
        assert!(repo.get_by_id(&second.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_by_ids_keeps_requested_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.bookings();
        let a = booking("a@example.org", 100, TaxBreakdown::none());
        let b = booking("b@example.org", 200, TaxBreakdown::inter_state(Money::from_major(36)));
        repo.insert_many(&[a.clone(), b.clone()]).await.unwrap();

        let ids = vec![b.id.clone(), "missing".to_string(), a.id.clone()];
        let listed = repo.list_by_ids(&ids).await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], b);
        assert_eq!(listed[1], a);
        assert!(repo.list_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_booker() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.bookings();
        repo.insert_many(&[
            booking("joseph@example.org", 100, TaxBreakdown::none()),
            booking("anna@example.org", 200, TaxBreakdown::none()),
            booking("joseph@example.org", 300, TaxBreakdown::none()),
        ])
        .await
        .unwrap();

        let josephs = repo.list_by_booker("Joseph@Example.org").await.unwrap();
        assert_eq!(josephs.len(), 2);
        assert!(josephs.iter().all(|b| b.booker.email == "joseph@example.org"));
    }

    #[tokio::test]
    async fn test_list_by_payment_reference() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.bookings();
        let mut other = booking("anna@example.org", 300, TaxBreakdown::none());
        other.payment_reference = Some("pay_other".to_string());
        let mut unpaid = booking("anna@example.org", 400, TaxBreakdown::none());
        unpaid.payment_reference = None;
        repo.insert_many(&[
            booking("joseph@example.org", 100, TaxBreakdown::none()),
            other,
            booking("joseph@example.org", 200, TaxBreakdown::none()),
            unpaid,
        ])
        .await
        .unwrap();

        let paid = repo.list_by_payment_reference("pay_abc").await.unwrap();
        assert_eq!(paid.len(), 2);
        assert!(paid.iter().all(|b| b.booker.email == "joseph@example.org"));
        assert!(repo.list_by_payment_reference("pay_none").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_recurrence_is_corrupt_record() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let b = booking("joseph@example.org", 100, TaxBreakdown::none());
        db.bookings().insert(&b).await.unwrap();

        // Simulates a row written before the recurrence CHECK existed.
        sqlx::query("PRAGMA ignore_check_constraints = ON")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query("UPDATE bookings SET recurrence = 'weekly' WHERE id = ?")
            .bind(&b.id)
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.bookings().get_by_id(&b.id).await.unwrap_err();
        assert!(matches!(err, StoreError::CorruptRecord { .. }));
    }
}
