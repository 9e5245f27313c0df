use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, EntityTrait, IntoActiveModel};

use super::{
    views::{AlbumCreate, AlbumRead, AlbumUpdate},
    Error, Resource,
};

async fn ensure_artist<C>(db: &C, id: i32) -> Result<i32, Error>
where
    C: ConnectionTrait,
{
    entity::ArtistEntity::find_by_id(id)
        .one(db)
        .await?
        .map(|artist| artist.id)
        .ok_or(Error::MissingReference {
            resource: "artist",
            id,
        })
}

#[async_trait]
impl Resource for entity::AlbumEntity {
    const SINGULAR: &'static str = "album";
    const PLURAL: &'static str = "albums";

    type Read = AlbumRead;
    type Create = AlbumCreate;
    type Update = AlbumUpdate;

    fn id_column() -> entity::AlbumColumn {
        entity::AlbumColumn::Id
    }

    fn id(model: &entity::Album) -> i32 {
        model.id
    }

    async fn persist_new<C>(db: &C, payload: AlbumCreate) -> Result<entity::Album, Error>
    where
        C: ConnectionTrait,
    {
        let artist = match payload.artist_album {
            Some(id) => Some(ensure_artist(db, id).await?),
            None => None,
        };
        let album = entity::AlbumActive {
            id: ActiveValue::NotSet,
            artist_album_id: ActiveValue::Set(artist),
            name: ActiveValue::Set(payload.name),
            year: ActiveValue::Set(payload.year),
        }
        .insert(db)
        .await?;
        Ok(album)
    }

    async fn apply_update<C>(
        db: &C,
        model: entity::Album,
        payload: AlbumUpdate,
    ) -> Result<entity::Album, Error>
    where
        C: ConnectionTrait,
    {
        let mut active = model.clone().into_active_model();
        if let Some(name) = payload.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(year) = payload.year {
            active.year = ActiveValue::Set(year);
        }
        match payload.artist_album {
            Some(Some(id)) => {
                active.artist_album_id = ActiveValue::Set(Some(ensure_artist(db, id).await?))
            }
            Some(None) => active.artist_album_id = ActiveValue::Set(None),
            None => {}
        }
        if !active.is_changed() {
            return Ok(model);
        }
        Ok(active.update(db).await?)
    }

    // Tracks survive their album: they are detached before the row goes.
    async fn remove<C>(db: &C, model: entity::Album) -> Result<(), Error>
    where
        C: ConnectionTrait,
    {
        model.detach_tracks(db).await?;
        entity::AlbumEntity::delete_by_id(model.id).exec(db).await?;
        Ok(())
    }
}
