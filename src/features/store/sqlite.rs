//! Local sqlite backend
//!
//! A single `documents` table holds JSON-encoded values keyed by document
//! path, mirroring the Firebase layout so deployments can switch backends.

use ::sqlite::{Connection, State};
use async_trait::async_trait;
use log::info;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use super::{
    decode_time, Day, ReminderStore, ReminderTime, Roster, StoreError, REMINDER_KEY, ROSTER_KEY,
};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS documents (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
)";

pub struct SqliteStore {
    connection: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let connection = ::sqlite::open(path)?;
        connection.execute(SCHEMA)?;
        info!("Opened sqlite store at {path}");
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let connection = self.connection.lock().await;
        read_document(&connection, key)
    }

    async fn write(&self, key: &str, value: String) -> Result<(), StoreError> {
        let connection = self.connection.lock().await;
        write_document(&connection, key, &value)
    }
}

fn read_document(connection: &Connection, key: &str) -> Result<Option<String>, StoreError> {
    let mut statement = connection.prepare("SELECT value FROM documents WHERE key = ?")?;
    statement.bind((1, key))?;
    match statement.next()? {
        State::Row => Ok(Some(statement.read::<String, _>(0)?)),
        State::Done => Ok(None),
    }
}

fn write_document(connection: &Connection, key: &str, value: &str) -> Result<(), StoreError> {
    let mut statement = connection.prepare(
        "INSERT INTO documents (key, value) VALUES (?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )?;
    statement.bind((1, key))?;
    statement.bind((2, value))?;
    while let State::Row = statement.next()? {}
    Ok(())
}

fn decode_roster(raw: Option<String>) -> Result<Roster, StoreError> {
    let document = match raw {
        Some(raw) => serde_json::from_str::<BTreeMap<String, String>>(&raw)
            .map_err(|e| StoreError::malformed(ROSTER_KEY, e))?,
        None => BTreeMap::new(),
    };
    Ok(Roster::from_document(document))
}

#[async_trait]
impl ReminderStore for SqliteStore {
    async fn get_time(&self) -> Result<ReminderTime, StoreError> {
        match self.read(REMINDER_KEY).await? {
            Some(raw) => {
                let value: String = serde_json::from_str(&raw)
                    .map_err(|e| StoreError::malformed(REMINDER_KEY, e))?;
                decode_time(&value)
            }
            None => Ok(ReminderTime::DEFAULT),
        }
    }

    async fn set_time(&self, time: ReminderTime) -> Result<(), StoreError> {
        let encoded = serde_json::Value::String(time.to_string()).to_string();
        self.write(REMINDER_KEY, encoded).await
    }

    async fn get_roster(&self) -> Result<Roster, StoreError> {
        decode_roster(self.read(ROSTER_KEY).await?)
    }

    async fn set_roster(&self, day: Day, name: &str) -> Result<(), StoreError> {
        // Read-modify-write under one lock so the other days are preserved
        let connection = self.connection.lock().await;
        let mut roster = decode_roster(read_document(&connection, ROSTER_KEY)?)?;
        roster.set(day, name);

        let encoded = serde_json::to_string(&roster.to_document())
            .map_err(|e| StoreError::malformed(ROSTER_KEY, e))?;
        write_document(&connection, ROSTER_KEY, &encoded)
    }
}
