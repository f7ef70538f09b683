//! Transaction management utilities.
//!
//! Bookings must never overlap, so the overlap check and the insert share
//! one IMMEDIATE transaction. `SQLite` grants the write lock when such a
//! transaction begins, which serializes competing bookings.

use chrono::NaiveDate;
use rusqlite::{Transaction, TransactionBehavior};

use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId};

use super::connection::{map_lock_error, Database};

impl Database {
    /// Begins an IMMEDIATE transaction, taking the write lock up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the lock is not granted within the
    /// busy timeout, or a database error otherwise.
    pub fn begin_transaction(&mut self) -> Result<Transaction<'_>> {
        let busy_timeout = self.config().busy_timeout;
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| map_lock_error(busy_timeout, e))
    }

    /// Inserts a reservation unless its equipment already has a booking that
    /// shares a day with it.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`Error::NotFound`] if the equipment no longer exists
    /// - [`Error::ConcurrentConflict`] if an overlapping booking is present
    /// - [`Error::LockTimeout`] if the write lock is not granted in time
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::NaiveDate;
    /// use kitbook::database::{Database, DatabaseConfig};
    /// use kitbook::{EquipmentId, Reservation, UserId};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/kitbook.db")).unwrap();
    /// let day = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap();
    /// let reservation = Reservation::builder(EquipmentId::new(1), UserId::new("olena").unwrap())
    ///     .period(day, day)
    ///     .build()
    ///     .unwrap();
    ///
    /// let id = db.insert_reservation_exclusive(&reservation).unwrap();
    /// println!("booked as {id}");
    /// ```
    pub fn insert_reservation_exclusive(
        &mut self,
        reservation: &Reservation,
    ) -> Result<ReservationId> {
        let tx = self.begin_transaction()?;

        if !Self::equipment_exists(&tx, reservation.equipment())? {
            return Err(Error::NotFound {
                resource: format!("equipment {}", reservation.equipment()),
            });
        }

        if let Some(existing) = Self::find_first_overlap(
            &tx,
            reservation.equipment(),
            reservation.start(),
            reservation.end(),
        )? {
            log::debug!(
                "booking {} on equipment {} committed first ({}..{})",
                existing.id().map_or(0, ReservationId::value),
                reservation.equipment(),
                existing.start(),
                existing.end()
            );
            return Err(Error::ConcurrentConflict {
                equipment: reservation.equipment(),
                start: reservation.start(),
                end: reservation.end(),
            });
        }

        let id = Self::insert_reservation_simple(&tx, reservation)?;
        tx.commit()?;
        Ok(id)
    }

    /// Deletes every reservation whose end date is strictly before `date`
    /// and returns the deleted rows, oldest end date first.
    ///
    /// The rows are read and deleted under one write lock, so the returned
    /// list is exactly what this call removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the write lock is not granted in
    /// time, or a database error otherwise.
    pub fn take_reservations_ended_before(&mut self, date: NaiveDate) -> Result<Vec<Reservation>> {
        let tx = self.begin_transaction()?;
        let ended = Self::find_reservations_ended_before(&tx, date)?;
        let deleted = Self::delete_reservations_ended_before_simple(&tx, date)?;
        debug_assert_eq!(deleted, ended.len());
        tx.commit()?;
        Ok(ended)
    }
}
