use sea_orm::entity::prelude::*;
use sea_orm::QueryFilter;
use sea_query::Expr;
use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "artist")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "String(Some(100))")]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::album::Entity")]
    Album,
}

impl Related<super::album::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Album.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Clears the artist reference of every album credited to this artist.
    /// Returns the number of albums that were detached.
    pub async fn detach_albums<C>(&self, db: &C) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let res = super::album::Entity::update_many()
            .col_expr(
                super::album::Column::ArtistAlbumId,
                Expr::value(Option::<i32>::None),
            )
            .filter(super::album::Column::ArtistAlbumId.eq(self.id))
            .exec(db)
            .await?;
        tracing::trace!(artist = self.id, albums = res.rows_affected, "Detached albums");
        Ok(res.rows_affected)
    }
}
