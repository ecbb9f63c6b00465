use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::internal_error::InternalResult;

pub type DBConnection = Arc<Mutex<Connection>>;

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY,
        username TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        salt TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY,
        user_id INTEGER NOT NULL,
        title TEXT NOT NULL,
        category TEXT NOT NULL,
        start_date TEXT NOT NULL,
        due_date TEXT NOT NULL,
        completed INTEGER NOT NULL DEFAULT 0,
        is_deleted INTEGER NOT NULL DEFAULT 0,
        status TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS todo_subtasks (todo_id INTEGER, content TEXT, num INTEGER)",
];

pub fn create_tables(connection: &Connection) -> InternalResult<()> {
    for statement in SCHEMA.iter() {
        connection.execute(statement, [])?;
    }

    Ok(())
}

pub fn open_database(path: &Path) -> InternalResult<DBConnection> {
    let connection = Connection::open(path)?;
    create_tables(&connection)?;

    info!(path = %path.display(), "database ready");

    Ok(Arc::new(Mutex::new(connection)))
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> MessageResponse {
        MessageResponse {
            message: message.into(),
        }
    }
}
