//! Song entity - Entità canzone

use super::{Entity, Merge, same_identity};

#[derive(Debug, Clone)]
pub struct Song {
    id: Option<i64>,
    title: String,
    // durata come testo libero ("3:45"), non una Duration
    play_time: String,
}

impl Song {
    pub fn new(title: impl Into<String>, play_time: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            play_time: play_time.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_play_time(mut self, play_time: impl Into<String>) -> Self {
        self.play_time = play_time.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn play_time(&self) -> &str {
        &self.play_time
    }
}

impl Entity for Song {
    const NAME: &'static str = "song";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self.id, other.id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SongPatch {
    pub title: Option<String>,
    pub play_time: Option<String>,
}

impl Merge for Song {
    type Patch = SongPatch;

    fn merge(mut self, patch: SongPatch) -> Self {
        if let Some(title) = patch.title {
            self = self.with_title(title);
        }
        if let Some(play_time) = patch.play_time {
            self = self.with_play_time(play_time);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_play_time_keeps_title() {
        let stored = Song::new("Morning Light", "3:12").with_id(5);

        let merged = stored.merge(SongPatch {
            title: None,
            play_time: Some("3:45".to_string()),
        });

        assert_eq!(merged.id(), Some(5));
        assert_eq!(merged.title(), "Morning Light");
        assert_eq!(merged.play_time(), "3:45");
    }

    #[test]
    fn test_unsaved_songs_are_never_equal() {
        let a = Song::new("Same", "1:00");
        let b = Song::new("Same", "1:00");
        assert_ne!(a, b);
    }
}
