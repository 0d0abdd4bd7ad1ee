use rocket::http::Status;
use rocket::response::{self, Responder, Response};
use rocket::Request;
use thiserror::Error;
use tracing::error;

use std::sync::PoisonError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("operation not permitted")]
    PolicyDenied,
    #[error("missing required field: {0}")]
    Validation(&'static str),
    #[error("no matching record")]
    RowNotFound,
    #[error("storage failure: {0}")]
    Database(String),
    #[error("request could not be completed: {0}")]
    Transient(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> StoreError {
        match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::RowNotFound,
            other => StoreError::Database(other.to_string()),
        }
    }
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(e: PoisonError<T>) -> StoreError {
        StoreError::Database(e.to_string())
    }
}

impl<'r> Responder<'r, 'static> for StoreError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let (status, message) = match &self {
            StoreError::PolicyDenied => (Status::Forbidden, self.to_string()),
            StoreError::Validation(_) => (Status::UnprocessableEntity, self.to_string()),
            StoreError::RowNotFound => (Status::NotFound, self.to_string()),
            StoreError::Database(detail) => {
                // Response bodies stay generic; the detail goes to the log only.
                error!("storage failure: {}", detail);
                (Status::InternalServerError, String::from("internal error"))
            }
            StoreError::Transient(_) => (Status::ServiceUnavailable, self.to_string()),
        };

        Response::build_from(message.respond_to(request)?)
            .status(status)
            .ok()
    }
}
