use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ActiveValue, IntoActiveModel, QueryFilter};
use sea_query::Expr;
use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "album")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub artist_album_id: Option<i32>,
    #[sea_orm(column_type = "String(Some(100))")]
    pub name: String,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::artist::Entity",
        from = "Column::ArtistAlbumId",
        to = "super::artist::Column::Id"
    )]
    Artist,
    #[sea_orm(has_many = "super::track::Entity")]
    Track,
}

impl Related<super::artist::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artist.def()
    }
}

impl Related<super::track::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Track.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// The album is the owning side of the album/track relation: these keep the
// track's `track_album_id` in sync with the album the track was added to or
// removed from.
impl Model {
    pub async fn add_track<C>(
        &self,
        db: &C,
        track: super::track::Model,
    ) -> Result<super::track::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        if track.track_album_id == Some(self.id) {
            return Ok(track);
        }
        let mut active = track.into_active_model();
        active.track_album_id = ActiveValue::Set(Some(self.id));
        active.update(db).await
    }

    /// Removing a track that belongs to another album leaves it untouched.
    pub async fn remove_track<C>(
        &self,
        db: &C,
        track: super::track::Model,
    ) -> Result<super::track::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        if track.track_album_id != Some(self.id) {
            return Ok(track);
        }
        let mut active = track.into_active_model();
        active.track_album_id = ActiveValue::Set(None);
        active.update(db).await
    }

    /// Removes every track from this album, returning how many were detached.
    pub async fn detach_tracks<C>(&self, db: &C) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let res = super::track::Entity::update_many()
            .col_expr(
                super::track::Column::TrackAlbumId,
                Expr::value(Option::<i32>::None),
            )
            .filter(super::track::Column::TrackAlbumId.eq(self.id))
            .exec(db)
            .await?;
        tracing::trace!(album = self.id, tracks = res.rows_affected, "Detached tracks");
        Ok(res.rows_affected)
    }
}
