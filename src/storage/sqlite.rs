//! SQLite storage implementation

use std::fmt;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use super::schema;
use crate::record::{NewVehicle, Vehicle};
use crate::{Error, Result};

/// SQLite-backed store for vehicle records.
///
/// The handle is a scoped resource: open it for the duration of a command and
/// let drop close the connection on every exit path.
#[derive(Debug)]
pub struct VehicleStore {
    conn: Connection,
}

impl VehicleStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        tracing::debug!("opening vehicle database at {}", path.display());
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Delete the database file, if present.
    ///
    /// The only destructive path: a schema-version mismatch never drops data
    /// on its own, callers must ask for a reset explicitly.
    pub fn reset(path: &Path) -> Result<()> {
        if path.exists() {
            tracing::debug!("removing vehicle database at {}", path.display());
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Initialize the database schema.
    ///
    /// Idempotent on an already-initialized database; refuses to touch a
    /// database stamped with a different schema version.
    fn initialize_schema(&self) -> Result<()> {
        let version: i64 = self
            .conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))?;

        match version {
            0 => {
                for stmt in schema::all_schema_statements() {
                    self.conn.execute(stmt, [])?;
                }
                self.conn
                    .pragma_update(None, "user_version", schema::SCHEMA_VERSION)?;
                tracing::debug!("initialized schema at version {}", schema::SCHEMA_VERSION);
                Ok(())
            }
            v if v == schema::SCHEMA_VERSION => Ok(()),
            found => Err(Error::SchemaVersion {
                found,
                expected: schema::SCHEMA_VERSION,
            }),
        }
    }

    // ========== Record Operations ==========

    /// Insert a new vehicle record and return its assigned id.
    ///
    /// Fails with [`Error::PlateTaken`] if the plate number is already
    /// registered; the store is unchanged in that case. Field validation is
    /// the caller's job.
    pub fn insert(&self, record: &NewVehicle) -> Result<i64> {
        self.conn
            .execute(
                r#"
                INSERT INTO vehicles (owner, department, phone, plate, model, photo)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![
                    record.owner,
                    record.department,
                    record.phone,
                    record.plate,
                    record.model,
                    record.photo,
                ],
            )
            .map_err(|e| plate_conflict(&record.plate, e))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get every stored record, in id order.
    ///
    /// The returned list is a snapshot; later store mutations do not affect it.
    pub fn list_all(&self) -> Result<Vec<Vehicle>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, department, phone, plate, model, photo FROM vehicles ORDER BY id",
        )?;
        let vehicles = stmt
            .query_map([], row_to_vehicle)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(vehicles)
    }

    /// Get a record by id
    pub fn get(&self, id: i64) -> Result<Option<Vehicle>> {
        self.conn
            .query_row(
                "SELECT id, owner, department, phone, plate, model, photo FROM vehicles WHERE id = ?1",
                [id],
                row_to_vehicle,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Replace all fields of the record with the given id, except the id.
    ///
    /// Returns the number of rows affected: 0 means no record with that id,
    /// which callers treat as benign. Fails with [`Error::PlateTaken`] if the
    /// new plate number belongs to a different record.
    pub fn update(&self, vehicle: &Vehicle) -> Result<usize> {
        let affected = self
            .conn
            .execute(
                r#"
                UPDATE vehicles
                SET owner = ?1, department = ?2, phone = ?3, plate = ?4, model = ?5, photo = ?6
                WHERE id = ?7
                "#,
                params![
                    vehicle.owner,
                    vehicle.department,
                    vehicle.phone,
                    vehicle.plate,
                    vehicle.model,
                    vehicle.photo,
                    vehicle.id,
                ],
            )
            .map_err(|e| plate_conflict(&vehicle.plate, e))?;
        Ok(affected)
    }

    /// Remove the record with the given id.
    ///
    /// Returns the number of rows affected: 0 means nothing to delete.
    pub fn delete(&self, id: i64) -> Result<usize> {
        let affected = self
            .conn
            .execute("DELETE FROM vehicles WHERE id = ?1", [id])?;
        Ok(affected)
    }

    /// Look up a record by its plate number.
    ///
    /// Plate numbers are unique, so at most one record can match.
    pub fn find_by_plate(&self, plate: &str) -> Result<Option<Vehicle>> {
        self.conn
            .query_row(
                "SELECT id, owner, department, phone, plate, model, photo FROM vehicles WHERE plate = ?1",
                [plate],
                row_to_vehicle,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Count all records
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM vehicles", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get store statistics
    pub fn stats(&self) -> Result<StoreStats> {
        let vehicles = self.count()?;
        let departments: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT department) FROM vehicles",
            [],
            |row| row.get(0),
        )?;
        let photos: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM vehicles WHERE photo IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        Ok(StoreStats {
            vehicles,
            departments: departments as usize,
            photos: photos as usize,
        })
    }
}

/// Helper to convert a row to a Vehicle
fn row_to_vehicle(row: &rusqlite::Row) -> rusqlite::Result<Vehicle> {
    Ok(Vehicle {
        id: row.get(0)?,
        owner: row.get(1)?,
        department: row.get(2)?,
        phone: row.get(3)?,
        plate: row.get(4)?,
        model: row.get(5)?,
        photo: row.get(6)?,
    })
}

/// Map a UNIQUE-constraint failure on the plate column to [`Error::PlateTaken`];
/// everything else stays a storage error.
fn plate_conflict(plate: &str, err: rusqlite::Error) -> Error {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            return Error::PlateTaken(plate.to_string());
        }
    }
    Error::Storage(err)
}

/// Store statistics
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub vehicles: usize,
    pub departments: usize,
    pub photos: usize,
}

impl fmt::Display for StoreStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Registry Statistics:")?;
        writeln!(f, "  Vehicles: {}", self.vehicles)?;
        writeln!(f, "  Departments: {}", self.departments)?;
        writeln!(f, "  With photo: {}", self.photos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(owner: &str, plate: &str) -> NewVehicle {
        NewVehicle::new(owner, "Sales", "010-0000-0000", plate, "Sonata")
    }

    #[test]
    fn test_insert_and_list() {
        let store = VehicleStore::open_in_memory().unwrap();

        let id = store.insert(&sample("Kim", "12가3456")).unwrap();
        assert!(id > 0);

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].owner, "Kim");
        assert_eq!(all[0].plate, "12가3456");
        assert_eq!(all[0].photo, None);
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let store = VehicleStore::open_in_memory().unwrap();
        store.insert(&sample("Kim", "12가3456")).unwrap();

        let before = store.list_all().unwrap();
        store.insert(&sample("Lee", "34나5678")).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(store.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_plate_rejected() {
        let store = VehicleStore::open_in_memory().unwrap();
        let id = store.insert(&sample("Kim", "12가3456")).unwrap();

        let err = store.insert(&sample("Lee", "12가3456")).unwrap_err();
        assert!(matches!(err, Error::PlateTaken(ref p) if p == "12가3456"));

        // Store contents unchanged by the failed insert
        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].owner, "Kim");
    }

    #[test]
    fn test_round_trip_find_by_plate() {
        let store = VehicleStore::open_in_memory().unwrap();
        let record = sample("Park", "77다7777").with_photo("content://media/19");
        let id = store.insert(&record).unwrap();

        let found = store.find_by_plate("77다7777").unwrap().unwrap();
        assert_eq!(found, record.into_vehicle(id));
    }

    #[test]
    fn test_find_by_plate_missing() {
        let store = VehicleStore::open_in_memory().unwrap();
        assert!(store.find_by_plate("00아0000").unwrap().is_none());
    }

    #[test]
    fn test_get_by_id() {
        let store = VehicleStore::open_in_memory().unwrap();
        let id = store.insert(&sample("Kim", "12가3456")).unwrap();

        assert_eq!(store.get(id).unwrap().unwrap().owner, "Kim");
        assert!(store.get(id + 1).unwrap().is_none());
    }

    #[test]
    fn test_update_replaces_all_fields() {
        let store = VehicleStore::open_in_memory().unwrap();
        let id = store.insert(&sample("Kim", "12가3456")).unwrap();

        let updated = Vehicle {
            id,
            owner: "Kim".to_string(),
            department: "Engineering".to_string(),
            phone: "010-1111-2222".to_string(),
            plate: "99나9999".to_string(),
            model: "Avante".to_string(),
            photo: Some("file:///tmp/avante.jpg".to_string()),
        };
        assert_eq!(store.update(&updated).unwrap(), 1);

        assert!(store.find_by_plate("12가3456").unwrap().is_none());
        let found = store.find_by_plate("99나9999").unwrap().unwrap();
        assert_eq!(found, updated);
    }

    #[test]
    fn test_update_missing_id_is_benign() {
        let store = VehicleStore::open_in_memory().unwrap();
        let id = store.insert(&sample("Kim", "12가3456")).unwrap();

        let ghost = sample("Lee", "34나5678").into_vehicle(id + 100);
        assert_eq!(store.update(&ghost).unwrap(), 0);

        // Existing records untouched
        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].owner, "Kim");
        assert_eq!(all[0].plate, "12가3456");
    }

    #[test]
    fn test_update_plate_conflict_with_other_record() {
        let store = VehicleStore::open_in_memory().unwrap();
        store.insert(&sample("Kim", "12가3456")).unwrap();
        let second = store.insert(&sample("Lee", "34나5678")).unwrap();

        let mut moved = store.get(second).unwrap().unwrap();
        moved.plate = "12가3456".to_string();
        let err = store.update(&moved).unwrap_err();
        assert!(matches!(err, Error::PlateTaken(ref p) if p == "12가3456"));

        // Both records keep their plates
        assert_eq!(
            store.get(second).unwrap().unwrap().plate,
            "34나5678".to_string()
        );
    }

    #[test]
    fn test_update_keeping_own_plate() {
        let store = VehicleStore::open_in_memory().unwrap();
        let id = store.insert(&sample("Kim", "12가3456")).unwrap();

        let mut same = store.get(id).unwrap().unwrap();
        same.model = "Grandeur".to_string();
        assert_eq!(store.update(&same).unwrap(), 1);
        assert_eq!(store.get(id).unwrap().unwrap().model, "Grandeur");
    }

    #[test]
    fn test_delete_then_find_by_plate() {
        let store = VehicleStore::open_in_memory().unwrap();
        let id = store.insert(&sample("Kim", "12가3456")).unwrap();

        assert_eq!(store.delete(id).unwrap(), 1);
        assert!(store.find_by_plate("12가3456").unwrap().is_none());

        // Second delete has nothing to remove
        assert_eq!(store.delete(id).unwrap(), 0);
    }

    #[test]
    fn test_registry_lifecycle() {
        let store = VehicleStore::open_in_memory().unwrap();

        let id = store.insert(&sample("Kim", "12가3456")).unwrap();
        assert_eq!(id, 1);

        assert!(store.insert(&sample("Lee", "12가3456")).is_err());
        assert_eq!(store.count().unwrap(), 1);

        let mut updated = store.get(id).unwrap().unwrap();
        updated.plate = "99나9999".to_string();
        assert_eq!(store.update(&updated).unwrap(), 1);

        assert!(store.find_by_plate("12가3456").unwrap().is_none());
        let found = store.find_by_plate("99나9999").unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.owner, "Kim");

        assert_eq!(store.delete(id).unwrap(), 1);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_stats() {
        let store = VehicleStore::open_in_memory().unwrap();
        store.insert(&sample("Kim", "12가3456")).unwrap();
        store
            .insert(&sample("Lee", "34나5678").with_photo("content://media/7"))
            .unwrap();
        store
            .insert(&NewVehicle::new(
                "Park",
                "Engineering",
                "010-2222-3333",
                "56다7890",
                "Tucson",
            ))
            .unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.vehicles, 3);
        assert_eq!(stats.departments, 2);
        assert_eq!(stats.photos, 1);
    }

    #[test]
    fn test_open_is_idempotent_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("motorpool.db");

        {
            let store = VehicleStore::open(&path).unwrap();
            store.insert(&sample("Kim", "12가3456")).unwrap();
        }

        // Reopening an existing database keeps the data
        let store = VehicleStore::open(&path).unwrap();
        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].plate, "12가3456");
    }

    #[test]
    fn test_version_mismatch_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("motorpool.db");

        let conn = Connection::open(&path).unwrap();
        conn.pragma_update(None, "user_version", 999).unwrap();
        drop(conn);

        let err = VehicleStore::open(&path).unwrap_err();
        assert!(matches!(
            err,
            Error::SchemaVersion {
                found: 999,
                expected: schema::SCHEMA_VERSION,
            }
        ));
    }

    #[test]
    fn test_reset_removes_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("motorpool.db");

        // Missing file is fine
        VehicleStore::reset(&path).unwrap();

        {
            let store = VehicleStore::open(&path).unwrap();
            store.insert(&sample("Kim", "12가3456")).unwrap();
        }
        assert!(path.exists());

        VehicleStore::reset(&path).unwrap();
        assert!(!path.exists());
    }
}
