use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::data::*;
use crate::internal_error::{InternalError, InternalResult};

pub fn hash_password(salt: &str, password: &str) -> String {
    let digest = Sha256::new()
        .chain_update(salt.as_bytes())
        .chain_update(password.as_bytes())
        .finalize();

    format!("{:x}", digest)
}

/// Compares two stored hashes without stopping at the first differing byte.
pub fn hashes_match(left: &str, right: &str) -> bool {
    left.len() == right.len()
        && left
            .bytes()
            .zip(right.bytes())
            .fold(0u8, |diff, (l, r)| diff | (l ^ r))
            == 0
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_signup(request: &SignupRequest) -> InternalResult<()> {
    if request.username.trim().is_empty() {
        return Err(InternalError::Validation("Please enter a username.".to_string()));
    }

    let email = normalize_email(&request.email);
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
        _ => {
            return Err(InternalError::Validation(
                "Please enter a valid email.".to_string(),
            ))
        }
    }

    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(InternalError::Validation(format!(
            "Password must be at least {} characters.",
            MIN_PASSWORD_LEN
        )));
    }

    Ok(())
}

pub fn add_user_to_db(request: SignupRequest, db_connection: &Connection) -> InternalResult<User> {
    validate_signup(&request)?;

    let email = normalize_email(&request.email);
    let existing: Option<UserID> = db_connection
        .query_row(
            "SELECT id FROM users WHERE email = (?1)",
            params![email],
            |row| row.get(0),
        )
        .optional()?;

    if existing.is_some() {
        return Err(InternalError::Conflict(
            "An account with this email already exists.".to_string(),
        ));
    }

    let salt = Uuid::new_v4().to_string();
    let username = request.username.trim().to_string();

    db_connection.execute(
        "INSERT INTO users (username, email, password_hash, salt) VALUES (?1, ?2, ?3, ?4)",
        params![username, email, hash_password(&salt, &request.password), salt],
    )?;

    Ok(User {
        id: db_connection.last_insert_rowid(),
        username,
        email,
    })
}

pub fn get_user_from_db(user_id: UserID, db_connection: &Connection) -> InternalResult<Option<User>> {
    let user = db_connection
        .query_row(
            "SELECT id, username, email FROM users WHERE id = (?1)",
            params![user_id],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                })
            },
        )
        .optional()?;

    Ok(user)
}

pub fn verify_login(request: &LoginRequest, db_connection: &Connection) -> InternalResult<User> {
    let email = normalize_email(&request.email);

    let credentials = db_connection
        .query_row(
            "SELECT id, username, password_hash, salt FROM users WHERE email = (?1)",
            params![email],
            |row| {
                Ok((
                    row.get::<usize, UserID>(0)?,
                    row.get::<usize, String>(1)?,
                    row.get::<usize, String>(2)?,
                    row.get::<usize, String>(3)?,
                ))
            },
        )
        .optional()?;

    match credentials {
        Some((id, username, password_hash, salt))
            if hashes_match(&hash_password(&salt, &request.password), &password_hash) =>
        {
            Ok(User {
                id,
                username,
                email,
            })
        }
        _ => Err(InternalError::Unauthorized(
            "Invalid email or password.".to_string(),
        )),
    }
}
