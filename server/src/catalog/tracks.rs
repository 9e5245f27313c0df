use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, EntityTrait, IntoActiveModel};

use super::{
    views::{TrackCreate, TrackRead, TrackUpdate},
    Error, Resource,
};

async fn find_album<C>(db: &C, id: i32) -> Result<entity::Album, Error>
where
    C: ConnectionTrait,
{
    entity::AlbumEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(Error::MissingReference {
            resource: "album",
            id,
        })
}

#[async_trait]
impl Resource for entity::TrackEntity {
    const SINGULAR: &'static str = "track";
    const PLURAL: &'static str = "tracks";

    type Read = TrackRead;
    type Create = TrackCreate;
    type Update = TrackUpdate;

    fn id_column() -> entity::TrackColumn {
        entity::TrackColumn::Id
    }

    fn id(model: &entity::Track) -> i32 {
        model.id
    }

    async fn persist_new<C>(db: &C, payload: TrackCreate) -> Result<entity::Track, Error>
    where
        C: ConnectionTrait,
    {
        let album = match payload.track_album {
            Some(id) => Some(find_album(db, id).await?.id),
            None => None,
        };
        let track = entity::TrackActive {
            id: ActiveValue::NotSet,
            track_album_id: ActiveValue::Set(album),
            title: ActiveValue::Set(payload.title),
            duration: ActiveValue::Set(payload.duration),
        }
        .insert(db)
        .await?;
        Ok(track)
    }

    async fn apply_update<C>(
        db: &C,
        model: entity::Track,
        payload: TrackUpdate,
    ) -> Result<entity::Track, Error>
    where
        C: ConnectionTrait,
    {
        // resolve the target album first so a bad reference changes nothing
        let target = match payload.track_album {
            Some(Some(id)) => Some(Some(find_album(db, id).await?)),
            Some(None) => Some(None),
            None => None,
        };

        let mut active = model.clone().into_active_model();
        if let Some(title) = payload.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(duration) = payload.duration {
            active.duration = ActiveValue::Set(duration);
        }
        let track = if active.is_changed() {
            active.update(db).await?
        } else {
            model
        };

        let track = match target {
            Some(Some(album)) => album.add_track(db, track).await?,
            Some(None) => match track.track_album_id {
                Some(current) => match entity::AlbumEntity::find_by_id(current).one(db).await? {
                    Some(album) => album.remove_track(db, track).await?,
                    None => track,
                },
                None => track,
            },
            None => track,
        };
        Ok(track)
    }

    async fn remove<C>(db: &C, model: entity::Track) -> Result<(), Error>
    where
        C: ConnectionTrait,
    {
        entity::TrackEntity::delete_by_id(model.id).exec(db).await?;
        Ok(())
    }
}
