//! SQLite-backed local mirror of published settings state.
//!
//! The mirror is not the synchronization transport: it records what this
//! client has published and the latest known blob per settings sub-field,
//! so a restart starts from the last locally-known state.

use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection, OptionalExtension};

use crate::{
    codec::{json::JsonCollectionCodec, CollectionCodec},
    record::EncodedCollection,
    sync::{
        memory::MemorySettings, LookupError, PublishError, SettingsSnapshot, SettingsSync,
        SettingsUpdate, FAVORITES_SCHEMA_ID,
    },
};

use super::{PersistError, PersistResult};

/// Append-only journal of published envelopes plus the latest blob per
/// settings sub-field.
pub struct SqliteMirror {
    conn: Connection,
}

impl SqliteMirror {
    /// Opens or creates a mirror at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory mirror.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self { conn })
    }

    /// Appends one published envelope to the journal and replaces the
    /// stored blob for its sub-field, in a single transaction.
    ///
    /// Returns the journal sequence assigned to the envelope.
    pub fn record_update(&mut self, update: &SettingsUpdate) -> PersistResult<u64> {
        let payload = serde_json::to_vec(update)?;
        let ts_ms = now_ms();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO updates(ts_ms, schema, payload) VALUES (?1, ?2, ?3)",
            params![ts_ms as i64, update.settings.schema as i64, payload],
        )?;
        let seq = tx.last_insert_rowid() as u64;
        tx.execute(
            "INSERT INTO fields(schema, ts_ms, proto) VALUES (?1, ?2, ?3)
             ON CONFLICT(schema) DO UPDATE SET ts_ms = excluded.ts_ms, proto = excluded.proto",
            params![
                update.settings.schema as i64,
                ts_ms as i64,
                update.settings.proto.bytes
            ],
        )?;
        tx.commit()?;

        Ok(seq)
    }

    /// Latest stored favorites blob, if any.
    pub fn load_collection(&self) -> PersistResult<Option<EncodedCollection>> {
        let bytes: Option<Vec<u8>> = self
            .conn
            .query_row(
                "SELECT proto FROM fields WHERE schema = ?1",
                params![FAVORITES_SCHEMA_ID as i64],
                |row| row.get(0),
            )
            .optional()?;
        Ok(bytes.map(|bytes| EncodedCollection { bytes }))
    }

    /// Journal envelopes strictly after `seq`, oldest first.
    pub fn load_updates_after(&self, seq: u64) -> PersistResult<Vec<SettingsUpdate>> {
        let mut stmt = self
            .conn
            .prepare("SELECT payload FROM updates WHERE seq > ?1 ORDER BY seq ASC")?;
        let rows = stmt.query_map(params![seq as i64], |row| row.get::<_, Vec<u8>>(0))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(serde_json::from_slice(&row?)?);
        }
        Ok(out)
    }

    /// Returns the latest journal sequence.
    pub fn latest_seq(&self) -> PersistResult<u64> {
        let seq: Option<i64> = self
            .conn
            .query_row("SELECT MAX(seq) FROM updates", [], |row| row.get(0))
            .optional()?
            .flatten();
        Ok(seq.unwrap_or(0) as u64)
    }

    /// Deletes journal rows up to and including `seq`. The stored blobs are
    /// untouched.
    pub fn compact_through(&mut self, seq: u64) -> PersistResult<usize> {
        let count = self
            .conn
            .execute("DELETE FROM updates WHERE seq <= ?1", params![seq as i64])?;
        Ok(count)
    }
}

/// Settings store whose published state survives restarts.
pub struct MirroredSettings {
    memory: MemorySettings,
    mirror: Mutex<SqliteMirror>,
}

impl MirroredSettings {
    /// Opens the mirror at `path` and seeds the in-memory snapshot from the
    /// last stored blob, when one exists.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let mirror = SqliteMirror::open(path)?;
        let memory = MemorySettings::new();

        if let Some(encoded) = mirror.load_collection()? {
            let collection = JsonCollectionCodec.decode(&encoded).map_err(|err| {
                PersistError::Message(format!("mirrored favorites decode failed: {err:?}"))
            })?;
            memory.seed(collection);
        }

        Ok(Self {
            memory,
            mirror: Mutex::new(mirror),
        })
    }

    /// In-memory side of the store, for inspection.
    pub fn memory(&self) -> &MemorySettings {
        &self.memory
    }
}

impl SettingsSync for MirroredSettings {
    fn snapshot(&self) -> Result<SettingsSnapshot, LookupError> {
        self.memory.snapshot()
    }

    fn publish(&self, update: SettingsUpdate) -> Result<(), PublishError> {
        self.memory.publish(update.clone())?;
        let mut mirror = self
            .mirror
            .lock()
            .map_err(|_| PublishError::Message("mirror poisoned".to_string()))?;
        mirror
            .record_update(&update)
            .map_err(|err| PublishError::Message(format!("mirror write failed: {err:?}")))?;
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
