//! Database CRUD operations for equipment.

use std::collections::HashMap;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::equipment::{Equipment, EquipmentId, NewEquipment};
use crate::error::Result;
use crate::reservation::UserId;

use super::connection::Database;

const SELECT_EQUIPMENT: &str = "SELECT id, name, weight_kg, description, holder FROM equipment";

fn row_to_equipment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Equipment> {
    let holder: Option<String> = row.get(4)?;
    let holder = holder
        .map(UserId::new)
        .transpose()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Equipment {
        id: EquipmentId::new(row.get(0)?),
        name: row.get(1)?,
        weight_kg: row.get(2)?,
        description: row.get(3)?,
        categories: Vec::new(),
        holder,
    })
}

impl Database {
    /// Stores a validated equipment record with its categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or any insert fails.
    pub fn insert_equipment(&mut self, equipment: &NewEquipment) -> Result<EquipmentId> {
        let tx = self.begin_transaction()?;

        tx.execute(
            "INSERT INTO equipment (name, weight_kg, description, holder, created_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                equipment.name,
                equipment.weight_kg,
                equipment.description,
                equipment.holder.as_ref().map(UserId::as_str),
                Utc::now().timestamp(),
            ],
        )?;
        let id = EquipmentId::new(tx.last_insert_rowid());

        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO equipment_categories (equipment_id, name) VALUES (?, ?)",
            )?;
            for category in &equipment.categories {
                stmt.execute(params![id.value(), category])?;
            }
        }

        tx.commit()?;
        Ok(id)
    }

    /// Checks whether equipment with this id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn equipment_exists(conn: &Connection, id: EquipmentId) -> Result<bool> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM equipment WHERE id = ?)",
            [id.value()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Retrieves one equipment record with its categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_equipment(conn: &Connection, id: EquipmentId) -> Result<Option<Equipment>> {
        let equipment = conn
            .query_row(
                &format!("{SELECT_EQUIPMENT} WHERE id = ?"),
                [id.value()],
                row_to_equipment,
            )
            .optional()?;

        match equipment {
            Some(mut equipment) => {
                let mut stmt = conn.prepare(
                    "SELECT name FROM equipment_categories WHERE equipment_id = ? ORDER BY name",
                )?;
                equipment.categories = stmt
                    .query_map([id.value()], |row| row.get(0))?
                    .collect::<std::result::Result<Vec<String>, rusqlite::Error>>()?;
                Ok(Some(equipment))
            }
            None => Ok(None),
        }
    }

    /// Lists all equipment ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_equipment(conn: &Connection) -> Result<Vec<Equipment>> {
        let mut categories: HashMap<i64, Vec<String>> = HashMap::new();
        {
            let mut stmt = conn.prepare(
                "SELECT equipment_id, name FROM equipment_categories ORDER BY equipment_id, name",
            )?;
            let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get(1)?)))?;
            for row in rows {
                let (id, name) = row?;
                categories.entry(id).or_default().push(name);
            }
        }

        let mut stmt = conn.prepare(&format!("{SELECT_EQUIPMENT} ORDER BY name, id"))?;
        let mut equipment = stmt
            .query_map([], row_to_equipment)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;

        for item in &mut equipment {
            if let Some(names) = categories.remove(&item.id.value()) {
                item.categories = names;
            }
        }

        Ok(equipment)
    }

    /// Replaces the name, weight, description and categories of stored
    /// equipment. The holder is left as it is.
    ///
    /// Returns `Ok(false)` when the equipment does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or any statement fails.
    pub fn update_equipment(&mut self, id: EquipmentId, equipment: &NewEquipment) -> Result<bool> {
        let tx = self.begin_transaction()?;

        let rows = tx.execute(
            "UPDATE equipment SET name = ?, weight_kg = ?, description = ? WHERE id = ?",
            params![
                equipment.name,
                equipment.weight_kg,
                equipment.description,
                id.value()
            ],
        )?;
        if rows == 0 {
            return Ok(false);
        }

        tx.execute(
            "DELETE FROM equipment_categories WHERE equipment_id = ?",
            [id.value()],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO equipment_categories (equipment_id, name) VALUES (?, ?)",
            )?;
            for category in &equipment.categories {
                stmt.execute(params![id.value(), category])?;
            }
        }

        tx.commit()?;
        Ok(true)
    }

    /// Assigns or clears the current holder.
    ///
    /// Returns `Ok(false)` when the equipment does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn set_equipment_holder(
        &mut self,
        id: EquipmentId,
        holder: Option<&UserId>,
    ) -> Result<bool> {
        let tx = self.begin_transaction()?;
        let rows = tx.execute(
            "UPDATE equipment SET holder = ? WHERE id = ?",
            params![holder.map(UserId::as_str), id.value()],
        )?;
        tx.commit()?;
        Ok(rows > 0)
    }

    /// Deletes equipment together with its categories and bookings.
    ///
    /// Returns the number of bookings removed alongside, or `None` when the
    /// equipment does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or delete fails.
    pub fn delete_equipment(&mut self, id: EquipmentId) -> Result<Option<usize>> {
        let tx = self.begin_transaction()?;

        let bookings: i64 = tx.query_row(
            "SELECT COUNT(*) FROM reservations WHERE equipment_id = ?",
            [id.value()],
            |row| row.get(0),
        )?;
        let rows = tx.execute("DELETE FROM equipment WHERE id = ?", [id.value()])?;

        tx.commit()?;
        if rows == 0 {
            Ok(None)
        } else {
            Ok(Some(usize::try_from(bookings).unwrap_or_default()))
        }
    }
}
