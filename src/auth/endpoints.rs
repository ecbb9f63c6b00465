use rocket::http::{Cookie, CookieJar};
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::{get, post, State};
use tracing::info;

use super::data::*;
use super::guard::AuthenticatedUser;
use super::helpers::*;
use crate::data::{DBConnection, MessageResponse};
use crate::internal_error::InternalResult;

fn start_session(cookies: &CookieJar<'_>, user: &User) {
    cookies.add_private(Cookie::new(SESSION_COOKIE, user.id.to_string()));
}

#[post("/auth/signup", format = "json", data = "<signup_request>")]
pub fn signup(
    signup_request: Json<SignupRequest>,
    cookies: &CookieJar<'_>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Created<Json<UserResponse>>> {
    let db_connection = db_connection.lock()?;

    let user = add_user_to_db(signup_request.into_inner(), &db_connection)?;
    start_session(cookies, &user);

    info!(user_id = user.id, "user signed up");

    Ok(Created::new("/api/user/me").body(Json(UserResponse { user })))
}

#[post("/auth/login", format = "json", data = "<login_request>")]
pub fn login(
    login_request: Json<LoginRequest>,
    cookies: &CookieJar<'_>,
    db_connection: &State<DBConnection>,
) -> InternalResult<Json<UserResponse>> {
    let db_connection = db_connection.lock()?;

    let user = verify_login(&login_request, &db_connection)?;
    start_session(cookies, &user);

    info!(user_id = user.id, "user logged in");

    Ok(Json(UserResponse { user }))
}

#[post("/auth/logout")]
pub fn logout(cookies: &CookieJar<'_>) -> Json<MessageResponse> {
    cookies.remove_private(SESSION_COOKIE);

    Json(MessageResponse::new("Logged out"))
}

#[get("/user/me")]
pub fn current_user(user: AuthenticatedUser) -> Json<UserResponse> {
    Json(UserResponse { user: user.0 })
}
