//! Song DTOs - Data Transfer Objects per canzoni

use crate::core::DataError;
use crate::entities::{Entity, Song, SongPatch};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SongDTO {
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 255, message = "Song title must be between 1 and 255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 32, message = "Play time must be between 1 and 32 characters"))]
    pub play_time: Option<String>,
}

impl From<Song> for SongDTO {
    fn from(value: Song) -> Self {
        Self {
            id: value.id(),
            title: Some(value.title().to_string()),
            play_time: Some(value.play_time().to_string()),
        }
    }
}

impl TryFrom<SongDTO> for Song {
    type Error = DataError;

    fn try_from(value: SongDTO) -> Result<Self, Self::Error> {
        let title = value
            .title
            .ok_or(DataError::Validation("Song title must not be null"))?;
        let play_time = value
            .play_time
            .ok_or(DataError::Validation("Song playTime must not be null"))?;

        let song = Song::new(title, play_time);
        Ok(match value.id {
            Some(id) => song.with_id(id),
            None => song,
        })
    }
}

impl SongDTO {
    pub fn into_patch(self) -> (Option<i64>, SongPatch) {
        (
            self.id,
            SongPatch {
                title: self.title,
                play_time: self.play_time,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_play_time() {
        let dto: SongDTO =
            serde_json::from_str(r#"{"title": "Intro", "playTime": "1:02"}"#).unwrap();
        let song = Song::try_from(dto).unwrap();
        assert_eq!(song.play_time(), "1:02");
        assert_eq!(song.id(), None);

        let json = serde_json::to_value(SongDTO::from(song.with_id(8))).unwrap();
        assert_eq!(json["playTime"], "1:02");
        assert_eq!(json["id"], 8);
    }

    #[test]
    fn test_patch_keeps_only_present_fields() {
        let dto: SongDTO = serde_json::from_str(r#"{"id": 1, "playTime": "3:45"}"#).unwrap();
        let (id, patch) = dto.into_patch();
        assert_eq!(id, Some(1));
        assert!(patch.title.is_none());
        assert_eq!(patch.play_time.as_deref(), Some("3:45"));
    }
}
