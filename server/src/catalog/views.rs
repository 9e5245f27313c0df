//! Per-entity projections. `*Read` is what leaves the server, `*Create`
//! and `*Update` are what is accepted from clients. Only `*Create` requires
//! non-blank names and titles; updates are partial.

use serde::{Deserialize, Deserializer, Serialize};
use serde_valid::Validate;

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) when combined with `#[serde(default)]`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRead {
    pub id: i32,
    pub name: String,
}

impl From<&entity::Artist> for ArtistRead {
    fn from(artist: &entity::Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ArtistCreate {
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ArtistUpdate {
    #[serde(default)]
    #[validate(max_length = 100)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRead {
    pub id: i32,
    pub name: String,
    pub year: i32,
}

impl From<&entity::Album> for AlbumRead {
    fn from(album: &entity::Album) -> Self {
        Self {
            id: album.id,
            name: album.name.to_owned(),
            year: album.year,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AlbumCreate {
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub artist_album: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AlbumUpdate {
    #[serde(default)]
    #[validate(max_length = 100)]
    pub name: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub artist_album: Option<Option<i32>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRead {
    pub id: i32,
    pub title: String,
    pub duration: i32,
}

impl From<&entity::Track> for TrackRead {
    fn from(track: &entity::Track) -> Self {
        Self {
            id: track.id,
            title: track.title.to_owned(),
            duration: track.duration,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TrackCreate {
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub title: String,
    pub duration: i32,
    #[serde(default)]
    pub track_album: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TrackUpdate {
    #[serde(default)]
    #[validate(max_length = 100)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub track_album: Option<Option<i32>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn read_views_expose_only_public_fields() {
        let album = entity::Album {
            id: 4,
            artist_album_id: Some(1),
            name: "Discovery".to_string(),
            year: 2001,
        };
        assert_eq!(
            serde_json::to_value(AlbumRead::from(&album)).unwrap(),
            json!({ "id": 4, "name": "Discovery", "year": 2001 })
        );

        let track = entity::Track {
            id: 9,
            track_album_id: Some(4),
            title: "One More Time".to_string(),
            duration: 320,
        };
        assert_eq!(
            serde_json::to_value(TrackRead::from(&track)).unwrap(),
            json!({ "id": 9, "title": "One More Time", "duration": 320 })
        );
    }

    #[test]
    fn create_rejects_blank_names() {
        let payload: ArtistCreate = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(payload.validate().is_err());
        let payload: ArtistCreate = serde_json::from_value(json!({ "name": "Air" })).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn create_rejects_long_names() {
        let payload = ArtistCreate {
            name: "x".repeat(101),
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn update_allows_blank_names() {
        let payload: ArtistUpdate = serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn update_distinguishes_absent_and_null_parents() {
        let absent: AlbumUpdate = serde_json::from_value(json!({ "year": 2001 })).unwrap();
        assert_eq!(absent.artist_album, None);
        assert_eq!(absent.name, None);
        assert_eq!(absent.year, Some(2001));

        let null: AlbumUpdate = serde_json::from_value(json!({ "artist_album": null })).unwrap();
        assert_eq!(null.artist_album, Some(None));

        let set: TrackUpdate = serde_json::from_value(json!({ "track_album": 3 })).unwrap();
        assert_eq!(set.track_album, Some(Some(3)));
    }

    #[test]
    fn ids_in_payloads_are_ignored() {
        let payload: ArtistCreate =
            serde_json::from_value(json!({ "id": 42, "name": "Justice" })).unwrap();
        assert_eq!(payload.name, "Justice");
    }
}
