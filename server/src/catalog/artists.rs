use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, EntityTrait, IntoActiveModel};

use super::{
    views::{ArtistCreate, ArtistRead, ArtistUpdate},
    Error, Resource,
};

#[async_trait]
impl Resource for entity::ArtistEntity {
    const SINGULAR: &'static str = "artist";
    const PLURAL: &'static str = "artists";

    type Read = ArtistRead;
    type Create = ArtistCreate;
    type Update = ArtistUpdate;

    fn id_column() -> entity::ArtistColumn {
        entity::ArtistColumn::Id
    }

    fn id(model: &entity::Artist) -> i32 {
        model.id
    }

    async fn persist_new<C>(db: &C, payload: ArtistCreate) -> Result<entity::Artist, Error>
    where
        C: ConnectionTrait,
    {
        let artist = entity::ArtistActive {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(payload.name),
        }
        .insert(db)
        .await?;
        Ok(artist)
    }

    async fn apply_update<C>(
        db: &C,
        model: entity::Artist,
        payload: ArtistUpdate,
    ) -> Result<entity::Artist, Error>
    where
        C: ConnectionTrait,
    {
        let mut active = model.clone().into_active_model();
        if let Some(name) = payload.name {
            active.name = ActiveValue::Set(name);
        }
        if !active.is_changed() {
            return Ok(model);
        }
        Ok(active.update(db).await?)
    }

    // Albums are kept, only their artist reference is cleared.
    async fn remove<C>(db: &C, model: entity::Artist) -> Result<(), Error>
    where
        C: ConnectionTrait,
    {
        model.detach_albums(db).await?;
        entity::ArtistEntity::delete_by_id(model.id).exec(db).await?;
        Ok(())
    }
}
