mod album;
mod artist;
mod messenger_message;
mod track;
mod user;

pub use album::ActiveModel as AlbumActive;
pub use album::Column as AlbumColumn;
pub use album::Entity as AlbumEntity;
pub use album::Model as Album;
pub use artist::ActiveModel as ArtistActive;
pub use artist::Column as ArtistColumn;
pub use artist::Entity as ArtistEntity;
pub use artist::Model as Artist;
pub use messenger_message::ActiveModel as MessengerMessageActive;
pub use messenger_message::Column as MessengerMessageColumn;
pub use messenger_message::Entity as MessengerMessageEntity;
pub use messenger_message::Model as MessengerMessage;
pub use track::ActiveModel as TrackActive;
pub use track::Column as TrackColumn;
pub use track::Entity as TrackEntity;
pub use track::Model as Track;
pub use user::ActiveModel as UserActive;
pub use user::Column as UserColumn;
pub use user::Entity as UserEntity;
pub use user::Model as User;
pub use user::{Roles, ROLE_ADMIN, ROLE_USER};
