//! Database CRUD operations for reservations.
//!
//! Read operations take a `&Connection` so they can run inside an open
//! transaction; write operations start their own IMMEDIATE transaction, with
//! `_simple` variants for use inside a caller's transaction.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};

use crate::equipment::EquipmentId;
use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId, UserId};

use super::connection::Database;
use super::schema::{INSERT_RESERVATION, RESERVATION_COLUMNS, SELECT_FIRST_OVERLAP};

/// Converts a stored Unix timestamp back into a UTC time.
pub(super) fn unix_secs_to_datetime(secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or(rusqlite::Error::IntegralValueOutOfRange(5, secs))
}

/// Deserializes a reservation from a row selected with [`RESERVATION_COLUMNS`].
pub(super) fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let equipment_id: i64 = row.get(1)?;
    let owner: String = row.get(2)?;
    let start: NaiveDate = row.get(3)?;
    let end: NaiveDate = row.get(4)?;
    let created_at = unix_secs_to_datetime(row.get(5)?)?;

    let owner =
        UserId::new(owner).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Reservation::builder(EquipmentId::new(equipment_id), owner)
        .id(ReservationId::new(id))
        .period(start, end)
        .created_at(created_at)
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn select(filter: &str) -> String {
    format!("SELECT {RESERVATION_COLUMNS} FROM reservations {filter}")
}

impl Database {
    /// Inserts a reservation and returns its new id.
    ///
    /// This does not check the booking rules; use
    /// [`crate::operations::book::validate_and_book`] for that.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started or the insert
    /// fails (for example because the equipment does not exist).
    pub fn insert_reservation(&mut self, reservation: &Reservation) -> Result<ReservationId> {
        let tx = self.begin_transaction()?;
        let id = Self::insert_reservation_simple(&tx, reservation)?;
        tx.commit()?;
        Ok(id)
    }

    /// Inserts a reservation using an existing connection or transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_reservation_simple(
        conn: &Connection,
        reservation: &Reservation,
    ) -> Result<ReservationId> {
        conn.execute(
            INSERT_RESERVATION,
            params![
                reservation.equipment().value(),
                reservation.owner().as_str(),
                reservation.start(),
                reservation.end(),
                reservation.created_at().timestamp(),
            ],
        )?;
        Ok(ReservationId::new(conn.last_insert_rowid()))
    }

    /// Retrieves a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        match conn.query_row(&select("WHERE id = ?"), [id.value()], row_to_reservation) {
            Ok(reservation) => Ok(Some(reservation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes a reservation by id.
    ///
    /// Returns `Ok(false)` when no such reservation exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or delete fails.
    pub fn delete_reservation(&mut self, id: ReservationId) -> Result<bool> {
        let tx = self.begin_transaction()?;
        let deleted = Self::delete_reservation_simple(&tx, id)?;
        tx.commit()?;
        Ok(deleted)
    }

    /// Deletes a reservation inside an existing transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservation_simple(conn: &Connection, id: ReservationId) -> Result<bool> {
        let rows = conn.execute("DELETE FROM reservations WHERE id = ?", [id.value()])?;
        Ok(rows > 0)
    }

    /// Deletes every reservation whose end date is strictly before `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or delete fails.
    pub fn delete_reservations_ended_before(&mut self, date: NaiveDate) -> Result<usize> {
        let tx = self.begin_transaction()?;
        let deleted = Self::delete_reservations_ended_before_simple(&tx, date)?;
        tx.commit()?;
        Ok(deleted)
    }

    /// Deletes ended reservations inside an existing transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_reservations_ended_before_simple(
        conn: &Connection,
        date: NaiveDate,
    ) -> Result<usize> {
        Ok(conn.execute("DELETE FROM reservations WHERE end_date < ?", [date])?)
    }

    /// Lists reservations whose end date is strictly before `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_reservations_ended_before(
        conn: &Connection,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(&select("WHERE end_date < ? ORDER BY end_date, id"))?;
        let reservations = stmt
            .query_map([date], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Lists the reservations of one piece of equipment by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_equipment(
        conn: &Connection,
        equipment: EquipmentId,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(&select("WHERE equipment_id = ? ORDER BY start_date, id"))?;
        let reservations = stmt
            .query_map([equipment.value()], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Lists the reservations made by one user by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_user(
        conn: &Connection,
        owner: &UserId,
    ) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(&select(
            "WHERE owner = ? ORDER BY start_date, equipment_id, id",
        ))?;
        let reservations = stmt
            .query_map([owner.as_str()], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Lists all reservations by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be deserialized.
    pub fn list_all_reservations(conn: &Connection) -> Result<Vec<Reservation>> {
        let mut stmt = conn.prepare(&select("ORDER BY start_date, equipment_id, id"))?;
        let reservations = stmt
            .query_map([], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(reservations)
    }

    /// Returns the earliest reservation of `equipment` sharing a day with
    /// `[start, end]`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_first_overlap(
        conn: &Connection,
        equipment: EquipmentId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Reservation>> {
        match conn.query_row(
            SELECT_FIRST_OVERLAP,
            params![equipment.value(), start, end],
            row_to_reservation,
        ) {
            Ok(reservation) => Ok(Some(reservation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Runs `PRAGMA integrity_check`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatabaseCorruption`] if the check reports problems.
    pub fn verify_integrity(&self) -> Result<()> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

        if result == "ok" {
            Ok(())
        } else {
            Err(Error::DatabaseCorruption {
                details: format!("Integrity check failed: {result}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, create_test_equipment, create_test_reservation, day,
    };

    #[test]
    fn test_insert_and_get_reservation() {
        let mut db = create_test_database();
        let tent = create_test_equipment(&mut db, "Tent");
        let reservation = create_test_reservation(tent, "olena", day(7), day(10));

        let id = db.insert_reservation(&reservation).unwrap();
        let loaded = Database::get_reservation(db.connection(), id)
            .unwrap()
            .unwrap();

        assert_eq!(loaded.id(), Some(id));
        assert_eq!(loaded.equipment(), tent);
        assert_eq!(loaded.owner().as_str(), "olena");
        assert_eq!(loaded.start(), day(7));
        assert_eq!(loaded.end(), day(10));
        assert_eq!(
            loaded.created_at().timestamp(),
            reservation.created_at().timestamp()
        );
    }

    #[test]
    fn test_get_reservation_not_found() {
        let db = create_test_database();
        let result = Database::get_reservation(db.connection(), ReservationId::new(42)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_insert_requires_existing_equipment() {
        let mut db = create_test_database();
        let reservation = create_test_reservation(EquipmentId::new(99), "olena", day(1), day(2));
        assert!(db.insert_reservation(&reservation).is_err());
    }

    #[test]
    fn test_delete_reservation() {
        let mut db = create_test_database();
        let tent = create_test_equipment(&mut db, "Tent");
        let id = db
            .insert_reservation(&create_test_reservation(tent, "olena", day(1), day(2)))
            .unwrap();

        assert!(db.delete_reservation(id).unwrap());
        assert!(!db.delete_reservation(id).unwrap());
        assert!(Database::get_reservation(db.connection(), id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_delete_reservations_ended_before() {
        let mut db = create_test_database();
        let tent = create_test_equipment(&mut db, "Tent");
        for (start, end) in [(1, 3), (2, 9), (10, 12)] {
            db.insert_reservation(&create_test_reservation(tent, "olena", day(start), day(end)))
                .unwrap();
        }

        let ended = Database::find_reservations_ended_before(db.connection(), day(10)).unwrap();
        assert_eq!(ended.len(), 2);

        // A booking ending today is kept.
        assert_eq!(db.delete_reservations_ended_before(day(9)).unwrap(), 1);
        assert_eq!(db.delete_reservations_ended_before(day(9)).unwrap(), 0);
        assert_eq!(
            Database::list_all_reservations(db.connection())
                .unwrap()
                .len(),
            2
        );
    }

    #[test]
    fn test_list_reservations_for_equipment_is_scoped_and_sorted() {
        let mut db = create_test_database();
        let tent = create_test_equipment(&mut db, "Tent");
        let stove = create_test_equipment(&mut db, "Stove");
        db.insert_reservation(&create_test_reservation(tent, "olena", day(20), day(21)))
            .unwrap();
        db.insert_reservation(&create_test_reservation(tent, "taras", day(5), day(6)))
            .unwrap();
        db.insert_reservation(&create_test_reservation(stove, "taras", day(1), day(2)))
            .unwrap();

        let tent_bookings = Database::list_reservations_for_equipment(db.connection(), tent).unwrap();
        let starts: Vec<_> = tent_bookings.iter().map(Reservation::start).collect();
        assert_eq!(starts, vec![day(5), day(20)]);

        let taras = UserId::new("taras").unwrap();
        let by_user = Database::list_reservations_for_user(db.connection(), &taras).unwrap();
        assert_eq!(by_user.len(), 2);
        assert_eq!(by_user[0].equipment(), stove);
    }

    #[test]
    fn test_find_first_overlap_inclusive_bounds() {
        let mut db = create_test_database();
        let tent = create_test_equipment(&mut db, "Tent");
        let stove = create_test_equipment(&mut db, "Stove");
        let id = db
            .insert_reservation(&create_test_reservation(tent, "olena", day(7), day(10)))
            .unwrap();

        let conn = db.connection();
        assert!(Database::find_first_overlap(conn, tent, day(2), day(3))
            .unwrap()
            .is_none());
        assert!(Database::find_first_overlap(conn, tent, day(11), day(12))
            .unwrap()
            .is_none());
        assert_eq!(
            Database::find_first_overlap(conn, tent, day(10), day(12))
                .unwrap()
                .and_then(|r| r.id()),
            Some(id)
        );
        assert!(Database::find_first_overlap(conn, tent, day(1), day(7))
            .unwrap()
            .is_some());
        assert!(Database::find_first_overlap(conn, stove, day(7), day(10))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_verify_integrity() {
        let db = create_test_database();
        db.verify_integrity().unwrap();
    }
}
