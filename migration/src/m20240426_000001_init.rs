use entity::{
    AlbumColumn, AlbumEntity, ArtistEntity, MessengerMessageColumn, MessengerMessageEntity,
    TrackColumn, TrackEntity, UserEntity,
};
use sea_orm::Schema;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn indexes() -> Vec<IndexCreateStatement> {
    vec![
        Index::create()
            .name("idx_album_artist_album_id")
            .table(AlbumEntity)
            .col(AlbumColumn::ArtistAlbumId)
            .to_owned(),
        Index::create()
            .name("idx_track_track_album_id")
            .table(TrackEntity)
            .col(TrackColumn::TrackAlbumId)
            .to_owned(),
        Index::create()
            .name("idx_messenger_messages_queue_name")
            .table(MessengerMessageEntity)
            .col(MessengerMessageColumn::QueueName)
            .to_owned(),
        Index::create()
            .name("idx_messenger_messages_available_at")
            .table(MessengerMessageEntity)
            .col(MessengerMessageColumn::AvailableAt)
            .to_owned(),
        Index::create()
            .name("idx_messenger_messages_delivered_at")
            .table(MessengerMessageEntity)
            .col(MessengerMessageColumn::DeliveredAt)
            .to_owned(),
    ]
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let builder = manager.get_database_backend();
        let schema = Schema::new(builder);
        // parents first, the foreign keys are created along with the tables
        manager
            .exec_stmt(schema.create_table_from_entity(ArtistEntity))
            .await?;
        manager
            .exec_stmt(schema.create_table_from_entity(AlbumEntity))
            .await?;
        manager
            .exec_stmt(schema.create_table_from_entity(TrackEntity))
            .await?;
        manager
            .exec_stmt(schema.create_table_from_entity(UserEntity))
            .await?;
        manager
            .exec_stmt(schema.create_table_from_entity(MessengerMessageEntity))
            .await?;
        for index in indexes() {
            manager.create_index(index).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MessengerMessageEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrackEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AlbumEntity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ArtistEntity).to_owned())
            .await?;
        Ok(())
    }
}
