//! Server-rendered CRUD screens for artists.

mod artists;
pub mod csrf;
pub mod html;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::{catalog, AppState};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Ressource does not exist")]
    NotFound,
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),
    #[error(transparent)]
    Catalog(#[from] catalog::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                html::page("Not found", "<h1>Ressource does not exist</h1>"),
            )
                .into_response(),
            e => {
                tracing::error!(error = %e, "Page failed to render");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    html::page("Error", "<h1>Internal server error</h1>"),
                )
                    .into_response()
            }
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/artist", get(artists::index))
        .route("/artist/", get(artists::index))
        .route("/artist/new", get(artists::new).post(artists::create))
        .route("/artist/:id", get(artists::show).post(artists::delete))
        .route("/artist/:id/edit", get(artists::edit).post(artists::update))
}
