use rocket::figment;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;
use tracing::{error, warn};

use std::io;
use std::sync::PoisonError;

#[derive(Debug, thiserror::Error)]
pub enum InternalError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("corrupt record: {0}")]
    CorruptRecord(String),

    #[error("connection lock poisoned: {0}")]
    Poisoned(String),

    #[error("missing managed state: {0}")]
    MissingState(String),

    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl InternalError {
    pub fn status(&self) -> Status {
        match self {
            InternalError::Validation(_) => Status::UnprocessableEntity,
            InternalError::Unauthorized(_) => Status::Unauthorized,
            InternalError::NotFound(_) => Status::NotFound,
            InternalError::Conflict(_) => Status::Conflict,
            InternalError::Database(_)
            | InternalError::CorruptRecord(_)
            | InternalError::Poisoned(_)
            | InternalError::MissingState(_)
            | InternalError::Config(_)
            | InternalError::Io(_) => Status::InternalServerError,
        }
    }
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::Poisoned(e.to_string())
    }
}

impl From<figment::Error> for InternalError {
    fn from(e: figment::Error) -> InternalError {
        InternalError::Config(Box::new(e))
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> ErrorBody {
        ErrorBody {
            error: error.into(),
        }
    }
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();

        let body = if status.code >= 500 {
            error!(uri = %request.uri(), error = %self, "request failed");
            ErrorBody::new("internal server error")
        } else {
            warn!(uri = %request.uri(), status = status.code, error = %self, "request rejected");
            ErrorBody::new(self.to_string())
        };

        (status, Json(body)).respond_to(request)
    }
}

pub type InternalResult<T> = Result<T, InternalError>;
