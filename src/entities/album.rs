//! Album entity - Entità album con riferimenti a cantante e canzone

use super::{Entity, Merge, Reference, Singer, Song, same_identity};
use chrono::{DateTime, Utc};

/// An album referencing at most one [`Singer`] and at most one [`Song`].
///
/// The album does not own the related rows: it only holds a [`Reference`],
/// resolved on read by the outer join in
/// [`AlbumRepository`](crate::repositories::AlbumRepository).
#[derive(Debug, Clone)]
pub struct Album {
    id: Option<i64>,
    title: String,
    published_at: DateTime<Utc>,
    singer: Reference<Singer>,
    songs: Reference<Song>,
}

impl Album {
    pub fn new(title: impl Into<String>, published_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: title.into(),
            published_at,
            singer: Reference::Absent,
            songs: Reference::Absent,
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

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = published_at;
        self
    }

    /// Attaches a loaded singer; `None` clears the foreign key as well.
    pub fn with_singer(mut self, singer: Option<Singer>) -> Self {
        self.singer = Reference::from_entity(singer);
        self
    }

    /// Sets the singer foreign key; the loaded singer is dropped unless it is that row.
    pub fn with_singer_id(mut self, singer_id: Option<i64>) -> Self {
        self.singer = self.singer.retarget(singer_id);
        self
    }

    pub fn with_songs(mut self, songs: Option<Song>) -> Self {
        self.songs = Reference::from_entity(songs);
        self
    }

    pub fn with_songs_id(mut self, songs_id: Option<i64>) -> Self {
        self.songs = self.songs.retarget(songs_id);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    pub fn singer(&self) -> Option<&Singer> {
        self.singer.get()
    }

    pub fn singer_id(&self) -> Option<i64> {
        self.singer.id()
    }

    pub fn songs(&self) -> Option<&Song> {
        self.songs.get()
    }

    pub fn songs_id(&self) -> Option<i64> {
        self.songs.id()
    }
}

impl Entity for Album {
    const NAME: &'static str = "album";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self.id, other.id)
    }
}

/// Campi modificabili con PATCH.
///
/// A present reference id replaces the stored one; there is no way to clear a
/// reference with a patch (use a full replace for that).
#[derive(Debug, Clone, Default)]
pub struct AlbumPatch {
    pub title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub singer_id: Option<i64>,
    pub songs_id: Option<i64>,
}

impl Merge for Album {
    type Patch = AlbumPatch;

    fn merge(mut self, patch: AlbumPatch) -> Self {
        if let Some(title) = patch.title {
            self = self.with_title(title);
        }
        if let Some(published_at) = patch.published_at {
            self = self.with_published_at(published_at);
        }
        if let Some(singer_id) = patch.singer_id {
            self = self.with_singer_id(Some(singer_id));
        }
        if let Some(songs_id) = patch.songs_id {
            self = self.with_songs_id(Some(songs_id));
        }
        self
    }
}
