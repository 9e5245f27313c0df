use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::{json, Value};
use thiserror::Error;

use crate::catalog;

pub const NOT_FOUND: &str = "Ressource does not exist";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Ressource does not exist")]
    NotFound,
    #[error("Validation failed")]
    Validation(Value),

    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),
    #[error("Could not serialize the response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<catalog::Error> for Error {
    fn from(value: catalog::Error) -> Self {
        match value {
            catalog::Error::DbErr(e) => Error::DbErr(e),
            e => Error::Validation(e.violations()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Error::NotFound => json!({ "error": NOT_FOUND }),
            Error::Validation(violations) => json!({
                "error": "Validation failed",
                "violations": violations,
            }),
            e => {
                tracing::error!(error = %e, "Request failed");
                json!({ "error": "Internal server error" })
            }
        };
        (status, Json(body)).into_response()
    }
}
