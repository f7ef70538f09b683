//! Equipment inventory operations.
//!
//! Listing and showing are open to every member. Adding, editing, changing
//! the holder and removing equipment need a privileged position.

use chrono::NaiveDate;
use serde::Serialize;

use crate::auth::Authorizer;
use crate::config::Config;
use crate::database::Database;
use crate::equipment::{Equipment, EquipmentChanges, EquipmentId, NewEquipment};
use crate::error::{Error, Result};
use crate::reservation::{Reservation, UserId};

use super::cleanup::CleanupOperations;

/// Equipment list together with the outcome of the purge that preceded it.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentListing {
    /// All equipment ordered by name.
    pub equipment: Vec<Equipment>,
    /// Number of ended bookings removed before listing.
    pub purged: usize,
}

/// One piece of equipment with its bookings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentDetails {
    /// The equipment record.
    pub equipment: Equipment,
    /// Its bookings ordered by start date.
    pub reservations: Vec<Reservation>,
}

/// Operations on the equipment inventory.
pub struct EquipmentOperations;

impl EquipmentOperations {
    /// Validates and stores new equipment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthorized`] for unprivileged users,
    /// [`Error::Validation`] for invalid fields, or a database error.
    pub fn add(
        db: &mut Database,
        config: &Config,
        authorizer: &dyn Authorizer,
        user: &UserId,
        equipment: NewEquipment,
    ) -> Result<EquipmentId> {
        require_privileged(config, authorizer, user, "add equipment")?;
        let equipment = equipment.validate()?;
        let id = db.insert_equipment(&equipment)?;
        log::info!("{user} added equipment {id} ({})", equipment.name);
        Ok(id)
    }

    /// Lists all equipment, purging ended bookings first unless autopurge
    /// is disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the purge or the query fails.
    pub fn list(db: &mut Database, config: &Config, today: NaiveDate) -> Result<EquipmentListing> {
        let purged = if config.autopurge_enabled() {
            CleanupOperations::purge_expired(db, today, false)?.removed_count
        } else {
            0
        };

        Ok(EquipmentListing {
            equipment: Database::list_equipment(db.connection())?,
            purged,
        })
    }

    /// Loads one piece of equipment and its bookings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the equipment does not exist.
    pub fn show(db: &Database, id: EquipmentId) -> Result<EquipmentDetails> {
        let equipment = Database::get_equipment(db.connection(), id)?.ok_or_else(|| missing(id))?;
        let reservations = Database::list_reservations_for_equipment(db.connection(), id)?;
        Ok(EquipmentDetails {
            equipment,
            reservations,
        })
    }

    /// Edits name, weight, description or categories and returns the stored
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthorized`] for unprivileged users,
    /// [`Error::NotFound`] for unknown equipment and [`Error::Validation`]
    /// when the edited record is invalid.
    pub fn update(
        db: &mut Database,
        config: &Config,
        authorizer: &dyn Authorizer,
        user: &UserId,
        id: EquipmentId,
        changes: EquipmentChanges,
    ) -> Result<Equipment> {
        require_privileged(config, authorizer, user, "edit equipment")?;
        let current = Database::get_equipment(db.connection(), id)?.ok_or_else(|| missing(id))?;
        let edited = changes.apply(&current).validate()?;

        if !db.update_equipment(id, &edited)? {
            return Err(missing(id));
        }
        log::info!("{user} edited equipment {id} ({})", edited.name);

        Database::get_equipment(db.connection(), id)?.ok_or_else(|| missing(id))
    }

    /// Assigns the equipment to `holder`, or clears the holder with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthorized`] for unprivileged users and
    /// [`Error::NotFound`] for unknown equipment.
    pub fn set_holder(
        db: &mut Database,
        config: &Config,
        authorizer: &dyn Authorizer,
        user: &UserId,
        id: EquipmentId,
        holder: Option<&UserId>,
    ) -> Result<()> {
        require_privileged(config, authorizer, user, "change equipment holders")?;
        if db.set_equipment_holder(id, holder)? {
            Ok(())
        } else {
            Err(missing(id))
        }
    }

    /// Removes equipment and all of its bookings.
    ///
    /// Returns the number of bookings removed with it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAuthorized`] for unprivileged users and
    /// [`Error::NotFound`] for unknown equipment.
    pub fn remove(
        db: &mut Database,
        config: &Config,
        authorizer: &dyn Authorizer,
        user: &UserId,
        id: EquipmentId,
    ) -> Result<usize> {
        require_privileged(config, authorizer, user, "remove equipment")?;
        let removed = db.delete_equipment(id)?.ok_or_else(|| missing(id))?;
        log::info!("{user} removed equipment {id} with {removed} booking(s)");
        Ok(removed)
    }
}

fn require_privileged(
    config: &Config,
    authorizer: &dyn Authorizer,
    user: &UserId,
    action: &str,
) -> Result<()> {
    if authorizer.has_role(user, &config.privileged_positions()) {
        Ok(())
    } else {
        Err(Error::NotAuthorized {
            user: user.clone(),
            action: action.to_string(),
        })
    }
}

fn missing(id: EquipmentId) -> Error {
    Error::NotFound {
        resource: format!("equipment {id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MockAuthorizer;
    use crate::database::test_util::{
        create_test_database, create_test_equipment, create_test_reservation, day,
    };

    fn user(name: &str) -> UserId {
        UserId::new(name).unwrap()
    }

    fn allow() -> MockAuthorizer {
        let mut auth = MockAuthorizer::new();
        auth.expect_has_role().return_const(true);
        auth
    }

    fn deny() -> MockAuthorizer {
        let mut auth = MockAuthorizer::new();
        auth.expect_has_role().return_const(false);
        auth
    }

    #[test]
    fn test_add_requires_privilege() {
        let mut db = create_test_database();
        let config = Config::default();

        let err = EquipmentOperations::add(
            &mut db,
            &config,
            &deny(),
            &user("taras"),
            NewEquipment::new("rope", 4.0),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotAuthorized { .. }));

        let id = EquipmentOperations::add(
            &mut db,
            &config,
            &allow(),
            &user("iryna"),
            NewEquipment::new("rope", 4.0).category("climbing"),
        )
        .unwrap();
        let details = EquipmentOperations::show(&db, id).unwrap();
        assert_eq!(details.equipment.name, "Rope");
        assert_eq!(details.equipment.categories, vec!["Climbing"]);
    }

    #[test]
    fn test_add_rejects_invalid_fields() {
        let mut db = create_test_database();
        let err = EquipmentOperations::add(
            &mut db,
            &Config::default(),
            &allow(),
            &user("iryna"),
            NewEquipment::new("ax", 1.0),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn test_list_purges_first() {
        let mut db = create_test_database();
        let tent = create_test_equipment(&mut db, "Tent");
        db.insert_reservation(&create_test_reservation(tent, "olena", day(1), day(2)))
            .unwrap();
        db.insert_reservation(&create_test_reservation(tent, "olena", day(8), day(9)))
            .unwrap();

        let listing = EquipmentOperations::list(&mut db, &Config::default(), day(5)).unwrap();
        assert_eq!(listing.purged, 1);
        assert_eq!(listing.equipment.len(), 1);

        let details = EquipmentOperations::show(&db, tent).unwrap();
        assert_eq!(details.reservations.len(), 1);
        assert_eq!(details.reservations[0].start(), day(8));
    }

    #[test]
    fn test_list_without_autopurge() {
        let mut db = create_test_database();
        let tent = create_test_equipment(&mut db, "Tent");
        db.insert_reservation(&create_test_reservation(tent, "olena", day(1), day(2)))
            .unwrap();
        let config = Config {
            disable_autopurge: Some(true),
            ..Default::default()
        };

        let listing = EquipmentOperations::list(&mut db, &config, day(5)).unwrap();
        assert_eq!(listing.purged, 0);
        assert_eq!(
            Database::list_all_reservations(db.connection())
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_show_missing() {
        let db = create_test_database();
        assert!(EquipmentOperations::show(&db, EquipmentId::new(3))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_set_holder() {
        let mut db = create_test_database();
        let tent = create_test_equipment(&mut db, "Tent");
        let config = Config::default();
        let olena = user("olena");

        EquipmentOperations::set_holder(&mut db, &config, &allow(), &user("iryna"), tent, Some(&olena))
            .unwrap();
        assert_eq!(
            EquipmentOperations::show(&db, tent).unwrap().equipment.holder,
            Some(olena)
        );

        let err = EquipmentOperations::set_holder(
            &mut db,
            &config,
            &allow(),
            &user("iryna"),
            EquipmentId::new(99),
            None,
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove_cascades() {
        let mut db = create_test_database();
        let tent = create_test_equipment(&mut db, "Tent");
        db.insert_reservation(&create_test_reservation(tent, "olena", day(8), day(9)))
            .unwrap();
        let config = Config::default();

        assert!(matches!(
            EquipmentOperations::remove(&mut db, &config, &deny(), &user("olena"), tent),
            Err(Error::NotAuthorized { .. })
        ));

        let removed =
            EquipmentOperations::remove(&mut db, &config, &allow(), &user("iryna"), tent).unwrap();
        assert_eq!(removed, 1);
        assert!(EquipmentOperations::show(&db, tent)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_update_requires_privilege() {
        let mut db = create_test_database();
        let tent = create_test_equipment(&mut db, "Tent");

        let err = EquipmentOperations::update(
            &mut db,
            &Config::default(),
            &deny(),
            &user("taras"),
            tent,
            EquipmentChanges::default().name("Stolen tent"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotAuthorized { .. }));
        assert_eq!(
            EquipmentOperations::show(&db, tent).unwrap().equipment.name,
            "Tent"
        );
    }

    #[test]
    fn test_update_edits_fields() {
        let mut db = create_test_database();
        let tent = create_test_equipment(&mut db, "Tent");
        let config = Config::default();

        let updated = EquipmentOperations::update(
            &mut db,
            &config,
            &allow(),
            &user("iryna"),
            tent,
            EquipmentChanges::default()
                .weight_kg(3.1)
                .description("Four-season dome")
                .categories(["winter", "shelter"]),
        )
        .unwrap();
        assert_eq!(updated.name, "Tent");
        assert_eq!(updated.weight_kg, 3.1);
        assert_eq!(updated.description, "Four-season dome");
        assert_eq!(updated.categories, vec!["Shelter", "Winter"]);

        let err = EquipmentOperations::update(
            &mut db,
            &config,
            &allow(),
            &user("iryna"),
            tent,
            EquipmentChanges::default().name("ab"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "name"));

        let err = EquipmentOperations::update(
            &mut db,
            &config,
            &allow(),
            &user("iryna"),
            EquipmentId::new(77),
            EquipmentChanges::default().weight_kg(1.0),
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
