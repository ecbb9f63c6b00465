use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};

use super::data::{User, UserID, SESSION_COOKIE};
use super::helpers::get_user_from_db;
use crate::data::DBConnection;
use crate::internal_error::{InternalError, InternalResult};

/// The user behind the session cookie. Handlers taking this guard answer
/// `401` when nobody is logged in.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl AuthenticatedUser {
    pub fn id(&self) -> UserID {
        self.0.id
    }
}

fn lookup_user(db_connection: &DBConnection, user_id: UserID) -> InternalResult<Option<User>> {
    let db_connection = db_connection.lock()?;
    get_user_from_db(user_id, &db_connection)
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = InternalError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let user_id = request
            .cookies()
            .get_private(SESSION_COOKIE)
            .and_then(|cookie| cookie.value().parse::<UserID>().ok());

        let user_id = match user_id {
            Some(user_id) => user_id,
            None => {
                return Outcome::Error((
                    Status::Unauthorized,
                    InternalError::Unauthorized("Please log in.".to_string()),
                ))
            }
        };

        let db_connection = match request.rocket().state::<DBConnection>() {
            Some(db_connection) => db_connection,
            None => {
                return Outcome::Error((
                    Status::InternalServerError,
                    InternalError::MissingState("database connection not managed".to_string()),
                ))
            }
        };

        match lookup_user(db_connection, user_id) {
            Ok(Some(user)) => Outcome::Success(AuthenticatedUser(user)),
            Ok(None) => Outcome::Error((
                Status::Unauthorized,
                InternalError::Unauthorized("Session no longer valid.".to_string()),
            )),
            Err(e) => Outcome::Error((e.status(), e)),
        }
    }
}
