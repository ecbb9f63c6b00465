use serde::{Deserialize, Serialize};

pub type UserID = i64;

pub const SESSION_COOKIE: &str = "schedo_session";
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserID,
    pub username: String,
    pub email: String,
}

#[derive(Serialize, Debug)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Deserialize, Debug)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
