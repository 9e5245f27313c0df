pub mod error;
pub mod extract;
mod resources;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{catalog::Resource, AppState};
pub use error::Error;

/// Mounts the five JSON operations of one resource.
fn resource<R>(router: Router<AppState>) -> Router<AppState>
where
    R: Resource,
    R::Model: Sync,
{
    router
        .route(&format!("/{}", R::PLURAL), get(resources::list::<R>))
        .route(&format!("/{}", R::SINGULAR), post(resources::create::<R>))
        .route(
            &format!("/{}/show/:id", R::SINGULAR),
            get(resources::show::<R>),
        )
        .route(
            &format!("/{}/:id", R::SINGULAR),
            put(resources::update::<R>).delete(resources::delete::<R>),
        )
}

pub fn router() -> Router<AppState> {
    let router = Router::new();
    let router = resource::<entity::ArtistEntity>(router);
    let router = resource::<entity::AlbumEntity>(router);
    resource::<entity::TrackEntity>(router)
}
