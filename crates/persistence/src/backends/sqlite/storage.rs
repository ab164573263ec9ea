//! EntityStorage implementation for SQLite.

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior, ffi, params, params_from_iter};

use crate::core::EntityStorage;
use crate::error::{
    BackendError, ResourceError, StorageError, StorageResult, ValidationError,
};

use super::SqliteBackend;
use super::mapping::{SqliteEntity, select_columns};

pub(crate) fn internal_error(message: String) -> StorageError {
    StorageError::Backend(BackendError::Internal {
        backend_name: "sqlite".to_string(),
        message,
        source: None,
    })
}

/// Maps a failed write to a domain error where a constraint explains it.
pub(crate) fn write_error<E: SqliteEntity>(err: rusqlite::Error) -> StorageError {
    if let rusqlite::Error::SqliteFailure(failure, message) = &err {
        let message = message.clone().unwrap_or_else(|| failure.to_string());
        match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                return StorageError::Resource(ResourceError::Conflict {
                    entity: E::ENTITY_NAME.to_string(),
                    message,
                });
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                return StorageError::Validation(ValidationError::InvalidReference {
                    entity: E::ENTITY_NAME.to_string(),
                    message,
                });
            }
            ffi::SQLITE_CONSTRAINT_NOTNULL => {
                return StorageError::Validation(ValidationError::MissingRequiredField {
                    field: not_null_column(&message).to_string(),
                });
            }
            _ => {}
        }
    }
    tracing::error!(entity = E::ENTITY_NAME, error = %err, "Write failed");
    StorageError::from(err)
}

/// Column named by a `NOT NULL constraint failed: table.column` message.
fn not_null_column(message: &str) -> &str {
    let qualified = message.rsplit(": ").next().unwrap_or(message);
    qualified.rsplit('.').next().unwrap_or(qualified)
}

/// Reads one entity with its relations.
pub(crate) fn read_entity<E: SqliteEntity>(conn: &Connection, id: i64) -> StorageResult<Option<E>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE id = ?1",
        select_columns::<E>().join(", "),
        E::TABLE
    );
    let entity = conn.query_row(&sql, params![id], E::from_row).optional()?;
    match entity {
        Some(mut entity) => {
            entity.load_relations(conn)?;
            Ok(Some(entity))
        }
        None => Ok(None),
    }
}

fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|n| format!("?{}", n))
        .collect::<Vec<_>>()
        .join(", ")
}

fn assignments(columns: &[&str]) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{} = ?{}", c, i + 1))
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_row<E: SqliteEntity>(conn: &Connection, id: i64, entity: &E) -> StorageResult<usize> {
    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?{}",
        E::TABLE,
        assignments(E::COLUMNS),
        E::COLUMNS.len() + 1
    );
    let mut values = entity.column_values();
    values.push(id.into());
    conn.execute(&sql, params_from_iter(values))
        .map_err(write_error::<E>)
}

fn reload<E: SqliteEntity>(conn: &Connection, id: i64) -> StorageResult<E> {
    read_entity::<E>(conn, id)?.ok_or_else(|| {
        internal_error(format!("{} {} vanished inside its own transaction", E::ENTITY_NAME, id))
    })
}

impl SqliteBackend {
    fn insert_entity<E: SqliteEntity>(&self, entity: E) -> StorageResult<E> {
        let mut conn = self.get_connection()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::TABLE,
            E::COLUMNS.join(", "),
            placeholders(E::COLUMNS.len())
        );
        tx.execute(&sql, params_from_iter(entity.column_values()))
            .map_err(write_error::<E>)?;
        let id = tx.last_insert_rowid();
        let stored = reload::<E>(&tx, id)?;

        tx.commit()?;
        tracing::debug!(entity = E::ENTITY_NAME, id, "Inserted");
        Ok(stored)
    }

    fn update_entity<E: SqliteEntity>(&self, entity: E) -> StorageResult<E> {
        let Some(id) = entity.id() else {
            return Err(ValidationError::IdentityMissing {
                entity: E::ENTITY_NAME.to_string(),
            }
            .into());
        };

        let mut conn = self.get_connection()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        if write_row(&tx, id, &entity)? == 0 {
            return Err(ResourceError::NotFound {
                entity: E::ENTITY_NAME.to_string(),
                id,
            }
            .into());
        }
        let stored = reload::<E>(&tx, id)?;

        tx.commit()?;
        Ok(stored)
    }

    fn merge_entity<E: SqliteEntity>(&self, id: i64, patch: E::Patch) -> StorageResult<Option<E>> {
        let mut conn = self.get_connection()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(mut entity) = read_entity::<E>(&tx, id)? else {
            return Ok(None);
        };
        entity.merge(patch);
        entity.validate()?;
        write_row(&tx, id, &entity)?;
        let stored = reload::<E>(&tx, id)?;

        tx.commit()?;
        Ok(Some(stored))
    }

    fn delete_entity<E: SqliteEntity>(&self, id: i64) -> StorageResult<bool> {
        let mut conn = self.get_connection()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let deleted = tx
            .execute(&format!("DELETE FROM {} WHERE id = ?1", E::TABLE), params![id])
            .map_err(write_error::<E>)?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    fn exists_entity<E: SqliteEntity>(&self, id: i64) -> StorageResult<bool> {
        let conn = self.get_connection()?;
        let found = conn
            .query_row(
                &format!("SELECT 1 FROM {} WHERE id = ?1", E::TABLE),
                params![id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn find_entity<E: SqliteEntity>(&self, id: i64) -> StorageResult<Option<E>> {
        let mut conn = self.get_connection()?;
        let tx = conn.transaction()?;
        let entity = read_entity::<E>(&tx, id)?;
        tx.commit()?;
        Ok(entity)
    }
}

#[async_trait]
impl<E: SqliteEntity> EntityStorage<E> for SqliteBackend {
    async fn insert(&self, entity: E) -> StorageResult<E> {
        self.insert_entity(entity)
    }

    async fn update(&self, entity: E) -> StorageResult<E> {
        self.update_entity(entity)
    }

    async fn merge(&self, id: i64, patch: E::Patch) -> StorageResult<Option<E>> {
        self.merge_entity::<E>(id, patch)
    }

    async fn find_all(&self) -> StorageResult<Vec<E>> {
        self.query_entities::<E>(&E::Criteria::default(), &[], None)
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<E>> {
        self.find_entity(id)
    }

    async fn exists(&self, id: i64) -> StorageResult<bool> {
        self.exists_entity::<E>(id)
    }

    async fn delete(&self, id: i64) -> StorageResult<bool> {
        self.delete_entity::<E>(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Facility, Resident, Room, RoomPatch};

    fn backend() -> SqliteBackend {
        let backend = SqliteBackend::in_memory().unwrap();
        backend.init_schema().unwrap();
        backend
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(3), "?1, ?2, ?3");
        assert_eq!(assignments(&["a", "b"]), "a = ?1, b = ?2");
    }

    #[test]
    fn test_insert_and_read() {
        let backend = backend();
        let room = backend.insert_entity(Room::new("101").with_floor(1)).unwrap();
        let id = room.id.unwrap();
        let found: Room = backend.find_entity(id).unwrap().unwrap();
        assert_eq!(found.roomno, "101");
        assert_eq!(found.floor, Some(1));
    }

    #[test]
    fn test_duplicate_roomno_conflicts() {
        let backend = backend();
        backend.insert_entity(Room::new("101")).unwrap();
        let err = backend.insert_entity(Room::new("101")).unwrap_err();
        assert!(matches!(err, StorageError::Resource(ResourceError::Conflict { .. })));
    }

    #[test]
    fn test_missing_room_reference_rejected() {
        let backend = backend();
        let err = backend
            .insert_entity(Resident::new("a@x.com").with_room(42))
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Validation(ValidationError::InvalidReference { .. })
        ));
    }

    #[test]
    fn test_not_null_column() {
        assert_eq!(not_null_column("NOT NULL constraint failed: resident.email"), "email");
        assert_eq!(not_null_column("roomno"), "roomno");
    }

    #[test]
    fn test_null_required_column_names_field() {
        let backend = backend();
        let conn = backend.get_connection().unwrap();
        let err = conn
            .execute("INSERT INTO resident (email) VALUES (NULL)", [])
            .map_err(write_error::<Resident>)
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Validation(ValidationError::MissingRequiredField { ref field })
                if field == "email"
        ));
    }

    #[test]
    fn test_update_missing_row() {
        let backend = backend();
        let mut room = Room::new("1");
        room.id = Some(99);
        let err = backend.update_entity(room).unwrap_err();
        assert!(matches!(err, StorageError::Resource(ResourceError::NotFound { .. })));
    }

    #[test]
    fn test_merge_missing_row() {
        let backend = backend();
        let merged = backend
            .merge_entity::<Room>(5, RoomPatch::default())
            .unwrap();
        assert!(merged.is_none());
    }

    #[test]
    fn test_delete_room_detaches_facility() {
        let backend = backend();
        let room = backend.insert_entity(Room::new("1")).unwrap();
        let room_id = room.id.unwrap();
        let facility = backend
            .insert_entity(Facility::new().with_wifi(true).with_room(room_id))
            .unwrap();
        assert_eq!(facility.room.as_ref().unwrap().roomno.as_deref(), Some("1"));

        assert!(backend.delete_entity::<Room>(room_id).unwrap());
        let facility: Facility = backend.find_entity(facility.id.unwrap()).unwrap().unwrap();
        assert!(facility.room.is_none());
        assert!(!backend.delete_entity::<Room>(room_id).unwrap());
    }
}
