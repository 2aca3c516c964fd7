//! Keyed local store for restaurant snapshots and outbox changes.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use super::migrations;
use crate::error::{Error, Result};
use crate::models::{OutboxChange, Restaurant};

/// Process-wide local store handle, opened once and passed by reference into
/// every component that needs it.
///
/// Restaurant snapshots are the last server-reconciled state and are never
/// mutated speculatively; queued edits live only in the outbox store and are
/// overlaid at read time.
///
/// A store can be *disabled* (storage unavailable at open time): reads then
/// answer absent/empty and writes are accepted and dropped, so callers treat
/// a missing store exactly like a cache miss.
#[derive(Debug)]
pub struct LocalStore {
    conn: Option<Mutex<Connection>>,
}

impl LocalStore {
    /// Open (creating if needed) the store at the given path and run
    /// migrations.
    ///
    /// Any failure here means storage is unavailable, so it surfaces as a
    /// single [`Error::Store`] kind.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::try_open(path.as_ref()).map_err(|error| Error::Store(error.to_string()))
    }

    fn try_open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory store (useful for testing).
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// A store that answers every read with "absent" and drops writes.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { conn: None }
    }

    /// Try to open a store, degrading to a disabled one when storage is
    /// unavailable.
    pub fn open_or_disabled(path: impl AsRef<Path>) -> Self {
        match Self::open(&path) {
            Ok(store) => store,
            Err(error) => {
                tracing::warn!(
                    "Local store unavailable at {}: {error}. Running without persistence.",
                    path.as_ref().display()
                );
                Self::disabled()
            }
        }
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        migrations::run(&conn)?;
        Ok(Self {
            conn: Some(Mutex::new(conn)),
        })
    }

    /// True when storage was unavailable and this handle only degrades.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.conn.is_none()
    }

    fn with_conn<T>(
        &self,
        default: impl FnOnce() -> T,
        op: impl FnOnce(&Connection) -> Result<T>,
    ) -> Result<T> {
        match &self.conn {
            Some(conn) => op(&conn.lock().unwrap_or_else(std::sync::PoisonError::into_inner)),
            None => {
                tracing::debug!("Local store disabled; treating operation as a miss");
                Ok(default())
            }
        }
    }

    /// Get the cached snapshot for one restaurant.
    pub fn get(&self, id: u32) -> Result<Option<Restaurant>> {
        self.with_conn(
            || None,
            |conn| {
                let snapshot: Option<String> = conn
                    .query_row(
                        "SELECT snapshot FROM restaurants WHERE id = ?",
                        params![id],
                        |row| row.get(0),
                    )
                    .optional()?;

                snapshot
                    .map(|raw| serde_json::from_str(&raw).map_err(Into::into))
                    .transpose()
            },
        )
    }

    /// Get every cached restaurant snapshot, ordered by id.
    pub fn get_all(&self) -> Result<Vec<Restaurant>> {
        self.with_conn(Vec::new, |conn| {
            let mut stmt = conn.prepare("SELECT snapshot FROM restaurants ORDER BY id ASC")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

            let mut restaurants = Vec::new();
            for raw in rows {
                restaurants.push(serde_json::from_str(&raw?)?);
            }
            Ok(restaurants)
        })
    }

    /// Upsert one restaurant snapshot; an existing value is fully replaced.
    pub fn put(&self, restaurant: &Restaurant) -> Result<()> {
        self.with_conn(
            || (),
            |conn| {
                Self::put_with(conn, restaurant)?;
                Ok(())
            },
        )
    }

    /// Upsert a batch of restaurant snapshots. Idempotent: repeating the
    /// same batch leaves the store content-identical.
    pub fn put_all(&self, restaurants: &[Restaurant]) -> Result<()> {
        self.with_conn(
            || (),
            |conn| {
                for restaurant in restaurants {
                    Self::put_with(conn, restaurant)?;
                }
                Ok(())
            },
        )
    }

    fn put_with(conn: &Connection, restaurant: &Restaurant) -> Result<()> {
        let snapshot = serde_json::to_string(restaurant)?;
        conn.execute(
            "INSERT INTO restaurants (id, snapshot) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET snapshot = excluded.snapshot",
            params![restaurant.id, snapshot],
        )?;
        Ok(())
    }

    /// Get the pending outbox change for one restaurant.
    pub fn get_change(&self, id: u32) -> Result<Option<OutboxChange>> {
        self.with_conn(
            || None,
            |conn| {
                let change: Option<String> = conn
                    .query_row(
                        "SELECT change FROM outbox WHERE restaurant_id = ?",
                        params![id],
                        |row| row.get(0),
                    )
                    .optional()?;

                change
                    .map(|raw| serde_json::from_str(&raw).map_err(Into::into))
                    .transpose()
            },
        )
    }

    /// Get all pending changes in insertion order.
    ///
    /// Re-queuing a change for a restaurant that already has one keeps its
    /// original position.
    pub fn get_all_changes(&self) -> Result<Vec<OutboxChange>> {
        self.with_conn(Vec::new, |conn| {
            let mut stmt = conn.prepare("SELECT change FROM outbox ORDER BY seq ASC")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

            let mut changes = Vec::new();
            for raw in rows {
                changes.push(serde_json::from_str(&raw?)?);
            }
            Ok(changes)
        })
    }

    /// Upsert a change record; the original `seq` is preserved so merged
    /// edits do not lose their place in the drain order.
    pub fn put_change(&self, change: &OutboxChange) -> Result<()> {
        self.with_conn(
            || (),
            |conn| {
                let raw = serde_json::to_string(change)?;
                conn.execute(
                    "INSERT INTO outbox (restaurant_id, change) VALUES (?1, ?2)
                     ON CONFLICT(restaurant_id) DO UPDATE SET change = excluded.change",
                    params![change.restaurant_id, raw],
                )?;
                Ok(())
            },
        )
    }

    /// Delete a change after its replay has been fully confirmed.
    pub fn delete_change(&self, id: u32) -> Result<()> {
        self.with_conn(
            || (),
            |conn| {
                conn.execute("DELETE FROM outbox WHERE restaurant_id = ?", params![id])?;
                Ok(())
            },
        )
    }
}
