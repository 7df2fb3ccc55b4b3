//! Album DTOs - Data Transfer Objects per album
//!
//! In uscita singer e songs sono gli oggetti risolti dalla join; in ingresso
//! di quegli oggetti viene letto solo l'id.

use super::{SingerDTO, SongDTO};
use crate::core::DataError;
use crate::entities::{Album, AlbumPatch, Entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDTO {
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 255, message = "Album title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub singer: Option<SingerDTO>,
    pub songs: Option<SongDTO>,
}

impl From<Album> for AlbumDTO {
    fn from(value: Album) -> Self {
        // riferimento non risolto (riga sparita): si espone almeno l'id
        let singer = match value.singer() {
            Some(singer) => Some(SingerDTO::from(singer.clone())),
            None => value.singer_id().map(|id| SingerDTO {
                id: Some(id),
                ..Default::default()
            }),
        };
        let songs = match value.songs() {
            Some(song) => Some(SongDTO::from(song.clone())),
            None => value.songs_id().map(|id| SongDTO {
                id: Some(id),
                ..Default::default()
            }),
        };

        Self {
            id: value.id(),
            title: Some(value.title().to_string()),
            published_at: Some(value.published_at()),
            singer,
            songs,
        }
    }
}

impl TryFrom<AlbumDTO> for Album {
    type Error = DataError;

    /// Unset references become null foreign keys.
    fn try_from(value: AlbumDTO) -> Result<Self, Self::Error> {
        let title = value
            .title
            .ok_or(DataError::Validation("Album title must not be null"))?;
        let published_at = value
            .published_at
            .ok_or(DataError::Validation("Album publishedAt must not be null"))?;

        let album = Album::new(title, published_at)
            .with_singer_id(value.singer.and_then(|s| s.id))
            .with_songs_id(value.songs.and_then(|s| s.id));

        Ok(match value.id {
            Some(id) => album.with_id(id),
            None => album,
        })
    }
}

impl AlbumDTO {
    pub fn into_patch(self) -> (Option<i64>, AlbumPatch) {
        (
            self.id,
            AlbumPatch {
                title: self.title,
                published_at: self.published_at,
                singer_id: self.singer.and_then(|s| s.id),
                songs_id: self.songs.and_then(|s| s.id),
            },
        )
    }
}
