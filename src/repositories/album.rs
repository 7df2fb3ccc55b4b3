//! AlbumRepository - Repository per la gestione degli album
//!
//! Every read joins `singer` and `song` with a LEFT OUTER JOIN, so a fetched
//! album carries its resolved singer and song (or none when the foreign key is
//! null or points nowhere).

use super::query::{
    ALBUM_TABLE, Criteria, PageSpec, SINGER_TABLE, SONG_TABLE, check_alias,
    push_filter_and_page,
};
use super::singer::singer_from_row;
use super::song::song_from_row;
use super::{Create, Delete, Read, ReadMany, Update};
use crate::entities::{Album, Entity, Singer, Song};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Error, QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::{debug, info, instrument};

/// Table aliases used by the joined select. Each alias is also the column
/// prefix of that table in the result row (`e_title`, `singer_name`, ...),
/// so no prefixed column of one table may collide with another's: see
/// [`AlbumAliases::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumAliases {
    pub album: String,
    pub singer: String,
    pub songs: String,
}

impl Default for AlbumAliases {
    fn default() -> Self {
        Self {
            album: "e".to_string(),
            singer: "singer".to_string(),
            songs: "songs".to_string(),
        }
    }
}

impl AlbumAliases {
    /// Plain identifiers, pairwise distinct, and no alias starting with
    /// another alias followed by `_` (`e` and `e_singer` would both produce
    /// an `e_singer_id` column).
    pub fn validate(&self) -> Result<(), Error> {
        let all = [&self.album, &self.singer, &self.songs];
        for alias in all {
            check_alias(alias)?;
        }
        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                if i != j && (a == b || b.starts_with(&format!("{a}_"))) {
                    return Err(Error::Configuration(
                        format!("table aliases {a:?} and {b:?} produce clashing columns").into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// `SELECT <album>, <singer>, <song> FROM album LEFT OUTER JOIN singer LEFT OUTER JOIN song`
pub fn select_joined<'args>(aliases: &AlbumAliases) -> QueryBuilder<'args, Sqlite> {
    let AlbumAliases {
        album: a,
        singer: s,
        songs: g,
    } = aliases;
    QueryBuilder::new(format!(
        "SELECT {}, {}, {} FROM album {a} \
         LEFT OUTER JOIN singer {s} ON {a}.singer_id = {s}.id \
         LEFT OUTER JOIN song {g} ON {a}.songs_id = {g}.id",
        ALBUM_TABLE.select_list(a),
        SINGER_TABLE.select_list(s),
        SONG_TABLE.select_list(g),
    ))
}

/// Splits one joined row into the album's own columns and the two joined records.
///
/// The album comes back with its foreign keys only; `None` for singer/song
/// means the outer join matched nothing.
pub fn split_album_row(
    row: &SqliteRow,
    aliases: &AlbumAliases,
) -> Result<(Album, Option<Singer>, Option<Song>), Error> {
    let p = aliases.album.as_str();
    let id: i64 = row.try_get(format!("{p}_id").as_str())?;
    let title: String = row.try_get(format!("{p}_title").as_str())?;
    let published_at: DateTime<Utc> = row.try_get(format!("{p}_published_at").as_str())?;
    let singer_id: Option<i64> = row.try_get(format!("{p}_singer_id").as_str())?;
    let songs_id: Option<i64> = row.try_get(format!("{p}_songs_id").as_str())?;

    let album = Album::new(title, published_at)
        .with_id(id)
        .with_singer_id(singer_id)
        .with_songs_id(songs_id);

    let singer = singer_from_row(row, &aliases.singer)?;
    let songs = song_from_row(row, &aliases.songs)?;

    Ok((album, singer, songs))
}

/// Attaches the joined records; a missing one leaves the album's foreign key as read.
pub fn attach(album: Album, singer: Option<Singer>, songs: Option<Song>) -> Album {
    let album = match singer {
        Some(singer) => album.with_singer(Some(singer)),
        None => album,
    };
    match songs {
        Some(songs) => album.with_songs(Some(songs)),
        None => album,
    }
}

// ALBUM REPOSITORY
pub struct AlbumRepository {
    connection_pool: SqlitePool,
    aliases: AlbumAliases,
}

impl AlbumRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self {
            connection_pool,
            aliases: AlbumAliases::default(),
        }
    }

    pub fn with_aliases(connection_pool: SqlitePool, aliases: AlbumAliases) -> Result<Self, Error> {
        aliases.validate()?;
        Ok(Self {
            connection_pool,
            aliases,
        })
    }

    /// Albums whose singer is `singer_id`
    pub async fn find_by_singer(&self, singer_id: i64) -> Result<Vec<Album>, Error> {
        self.find_all_by(None, Some(&Criteria::equals("singer_id", singer_id)))
            .await
    }

    pub async fn find_all_where_singer_is_null(&self) -> Result<Vec<Album>, Error> {
        self.find_all_by(None, Some(&Criteria::is_null("singer_id")))
            .await
    }

    /// Albums whose song is `songs_id`
    pub async fn find_by_songs(&self, songs_id: i64) -> Result<Vec<Album>, Error> {
        self.find_all_by(None, Some(&Criteria::equals("songs_id", songs_id)))
            .await
    }

    pub async fn find_all_where_songs_is_null(&self) -> Result<Vec<Album>, Error> {
        self.find_all_by(None, Some(&Criteria::is_null("songs_id")))
            .await
    }

    /// Number of albums matching `criteria`; same as [`ReadMany::count_all`] for `None`.
    #[instrument(skip(self))]
    pub async fn count_by(&self, criteria: Option<&Criteria>) -> Result<i64, Error> {
        let alias = &self.aliases.album;
        let mut query_builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) FROM album {alias}"));
        push_filter_and_page(&mut query_builder, &ALBUM_TABLE, alias, None, criteria)?;

        query_builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Create<Album> for AlbumRepository {
    #[instrument(skip(self, entity), fields(title = %entity.title()))]
    async fn insert(&self, entity: &Album) -> Result<Album, Error> {
        debug!("Inserting album");
        let result = sqlx::query(
            r#"
            INSERT INTO album (title, published_at, singer_id, songs_id)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(entity.title())
        .bind(entity.published_at())
        .bind(entity.singer_id())
        .bind(entity.songs_id())
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();
        info!("Album created with id {}", new_id);

        Ok(entity.clone().with_id(new_id))
    }
}

impl Read<Album, i64> for AlbumRepository {
    #[instrument(skip(self), fields(album_id = %id))]
    async fn find_by_id(&self, id: &i64) -> Result<Option<Album>, Error> {
        debug!("Reading album by id");
        let criteria = Criteria::equals("id", *id);
        let album = self.find_all_by(None, Some(&criteria)).await?.into_iter().next();

        if album.is_none() {
            debug!("Album not found");
        }
        Ok(album)
    }

    #[instrument(skip(self), fields(album_id = %id))]
    async fn exists_by_id(&self, id: &i64) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM album WHERE id = ?")
            .bind(id)
            .fetch_one(&self.connection_pool)
            .await?;
        Ok(count > 0)
    }
}

impl ReadMany<Album> for AlbumRepository {
    #[instrument(skip(self))]
    async fn find_all_by(
        &self,
        page: Option<&PageSpec>,
        criteria: Option<&Criteria>,
    ) -> Result<Vec<Album>, Error> {
        let mut query_builder = select_joined(&self.aliases);
        // filtri e ordinamento solo sulle colonne di album
        push_filter_and_page(
            &mut query_builder,
            &ALBUM_TABLE,
            &self.aliases.album,
            page,
            criteria,
        )?;

        let rows = query_builder.build().fetch_all(&self.connection_pool).await?;
        let albums = rows
            .iter()
            .map(|row| -> Result<Album, Error> {
                let (album, singer, songs) = split_album_row(row, &self.aliases)?;
                Ok(attach(album, singer, songs))
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Found {} albums", albums.len());
        Ok(albums)
    }

    async fn count_all(&self) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM album")
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Update<Album> for AlbumRepository {
    #[instrument(skip(self, entity), fields(album_id = ?entity.id()))]
    async fn update(&self, entity: &Album) -> Result<u64, Error> {
        debug!("Updating album");
        let result = sqlx::query(
            r#"
            UPDATE album
            SET title = ?, published_at = ?, singer_id = ?, songs_id = ?
            WHERE id = ?
            "#,
        )
        .bind(entity.title())
        .bind(entity.published_at())
        .bind(entity.singer_id())
        .bind(entity.songs_id())
        .bind(entity.id())
        .execute(&self.connection_pool)
        .await?;

        Ok(result.rows_affected())
    }
}

impl Delete<i64> for AlbumRepository {
    #[instrument(skip(self), fields(album_id = %id))]
    async fn delete(&self, id: &i64) -> Result<u64, Error> {
        debug!("Deleting album");
        let result = sqlx::query("DELETE FROM album WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::query::Direction;
    use crate::repositories::{Save, SingerRepository};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    }

    /*------------------------------------- */
    /* Decomposizione della riga joinata     */
    /*------------------------------------- */

    /// Test: una riga piatta diventa album + singer, con song assente
    #[sqlx::test]
    async fn test_split_album_row(pool: SqlitePool) -> sqlx::Result<()> {
        let row = sqlx::query(
            r#"
            SELECT
                7 AS e_id, 'T' AS e_title, '2020-01-01T00:00:00+00:00' AS e_published_at,
                2 AS e_singer_id, NULL AS e_songs_id,
                2 AS singer_id, 'Bob' AS singer_name,
                NULL AS songs_id, NULL AS songs_title, NULL AS songs_play_time
            "#,
        )
        .fetch_one(&pool)
        .await?;

        let (album, singer, songs) = split_album_row(&row, &AlbumAliases::default())?;
        assert_eq!(album.id(), Some(7));
        assert_eq!(album.title(), "T");
        assert_eq!(album.published_at(), t0());
        assert_eq!(album.singer_id(), Some(2));
        assert!(album.singer().is_none());
        assert_eq!(singer.as_ref().map(Singer::name), Some("Bob"));
        assert!(songs.is_none());

        let album = attach(album, singer, songs);
        assert_eq!(album.singer().and_then(Entity::id), Some(2));
        assert_eq!(album.songs_id(), None);

        Ok(())
    }

    /*------------------------------------- */
    /* Join in lettura                       */
    /*------------------------------------- */

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("singers", "songs", "albums")))]
    async fn test_find_by_id_resolves_singer_and_song(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = AlbumRepository::new(pool);

        let album = repo.find_by_id(&1).await?.expect("fixture album");
        assert_eq!(album.title(), "First Steps");
        assert_eq!(album.singer().map(Singer::name), Some("Alice"));
        assert_eq!(album.songs().map(Song::title), Some("Morning Light"));
        assert_eq!(album.singer().and_then(Entity::id), album.singer_id());
        assert_eq!(album.songs().and_then(Entity::id), album.songs_id());

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("singers", "songs", "albums")))]
    async fn test_outer_join_keeps_albums_without_references(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = AlbumRepository::new(pool);

        let albums = repo.find_all().await?;
        assert_eq!(albums.len(), 4);
        assert_eq!(repo.count_all().await?, 4);

        let loose = repo.find_by_id(&4).await?.unwrap();
        assert!(loose.singer().is_none());
        assert!(loose.songs().is_none());
        assert_eq!(loose.singer_id(), None);
        assert_eq!(loose.songs_id(), None);

        let second = repo.find_by_id(&2).await?.unwrap();
        assert_eq!(second.singer().map(Singer::name), Some("Bob"));
        assert!(second.songs().is_none());

        Ok(())
    }

    /// Test: riferimento a un singer inesistente (FK disabilitate sulla connessione)
    #[sqlx::test(fixtures(path = "../../fixtures", scripts("singers", "songs")))]
    async fn test_dangling_reference_is_not_resolved(pool: SqlitePool) -> sqlx::Result<()> {
        {
            let mut conn = pool.acquire().await?;
            sqlx::query("PRAGMA foreign_keys = OFF").execute(&mut *conn).await?;
            sqlx::query(
                "INSERT INTO album (id, title, published_at, singer_id, songs_id) VALUES (10, 'Orphan', ?, 77, 1)",
            )
            .bind(t0())
            .execute(&mut *conn)
            .await?;
        }

        let repo = AlbumRepository::new(pool);
        let album = repo.find_by_id(&10).await?.expect("album stored");

        assert!(album.singer().is_none());
        assert_eq!(album.singer_id(), Some(77));
        assert_eq!(album.songs().map(Song::title), Some("Morning Light"));

        Ok(())
    }

    /*------------------------------------- */
    /* Scrittura e riferimenti               */
    /*------------------------------------- */

    #[sqlx::test]
    async fn test_reference_set_then_cleared(pool: SqlitePool) -> sqlx::Result<()> {
        let singers = SingerRepository::new(pool.clone());
        let albums = AlbumRepository::new(pool);

        let singer = singers.save(Singer::new("A")).await.expect("insert singer");
        let singer_id = singer.id().unwrap();

        let album = albums
            .save(Album::new("T", t0()).with_singer_id(Some(singer_id)))
            .await
            .expect("insert album");
        let album_id = album.id().unwrap();

        let fetched = albums.find_by_id(&album_id).await?.unwrap();
        assert_eq!(fetched.singer().and_then(Entity::id), Some(singer_id));
        assert_eq!(fetched.singer().map(Singer::name), Some("A"));

        albums
            .save(fetched.with_singer_id(None))
            .await
            .expect("clear singer");

        let refetched = albums.find_by_id(&album_id).await?.unwrap();
        assert!(refetched.singer().is_none());
        assert_eq!(refetched.singer_id(), None);

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("singers", "songs", "albums")))]
    async fn test_unknown_foreign_key_is_rejected_by_schema(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = AlbumRepository::new(pool);

        let result = repo
            .insert(&Album::new("Bad", t0()).with_singer_id(Some(999)))
            .await;
        assert!(matches!(result, Err(Error::Database(_))));

        Ok(())
    }

    /*------------------------------------- */
    /* Filtri e paginazione                  */
    /*------------------------------------- */

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("singers", "songs", "albums")))]
    async fn test_criteria_finders(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = AlbumRepository::new(pool);

        let by_singer = repo.find_by_singer(1).await?;
        assert_eq!(by_singer.len(), 1);
        assert_eq!(by_singer[0].id(), Some(1));

        let mut without_singer: Vec<_> = repo
            .find_all_where_singer_is_null()
            .await?
            .into_iter()
            .filter_map(|a| a.id())
            .collect();
        without_singer.sort();
        assert_eq!(without_singer, vec![3, 4]);

        let by_songs = repo.find_by_songs(2).await?;
        assert_eq!(by_songs.len(), 1);
        assert_eq!(by_songs[0].title(), "Untitled");

        assert_eq!(repo.find_all_where_songs_is_null().await?.len(), 2);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("singers", "songs", "albums")))]
    async fn test_count_by_criteria(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = AlbumRepository::new(pool);

        assert_eq!(repo.count_by(None).await?, repo.count_all().await?);
        assert_eq!(repo.count_by(Some(&Criteria::is_null("singer_id"))).await?, 2);

        let criteria = Criteria::equals("singer_id", 2_i64).and(Criteria::is_null("songs_id"));
        assert_eq!(repo.count_by(Some(&criteria)).await?, 1);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("singers", "songs", "albums")))]
    async fn test_paged_by_published_at(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = AlbumRepository::new(pool);

        let page = PageSpec::new(0, 2).sorted_by("published_at", Direction::Desc);
        let titles: Vec<_> = repo
            .find_all_paged(&page)
            .await?
            .iter()
            .map(|a| a.title().to_string())
            .collect();
        assert_eq!(titles, vec!["Loose Ends", "Untitled"]);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("singers", "songs", "albums")))]
    async fn test_sort_on_joined_column_is_rejected(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = AlbumRepository::new(pool);

        let page = PageSpec::new(0, 2).sorted_by("name", Direction::Asc);
        let result = repo.find_all_paged(&page).await;
        assert!(matches!(result, Err(Error::ColumnNotFound(_))));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("singers", "songs", "albums")))]
    async fn test_custom_aliases(pool: SqlitePool) -> sqlx::Result<()> {
        let aliases = AlbumAliases {
            album: "a".to_string(),
            singer: "s".to_string(),
            songs: "g".to_string(),
        };
        assert!(select_joined(&aliases).sql().contains("LEFT OUTER JOIN singer s ON a.singer_id = s.id"));

        let repo = AlbumRepository::with_aliases(pool, aliases)?;
        let album = repo.find_by_id(&1).await?.unwrap();
        assert_eq!(album.singer().map(Singer::name), Some("Alice"));
        Ok(())
    }

    #[test]
    fn test_clashing_aliases_rejected() {
        assert!(AlbumAliases::default().validate().is_ok());

        let aliases = |album: &str, singer: &str, songs: &str| AlbumAliases {
            album: album.to_string(),
            singer: singer.to_string(),
            songs: songs.to_string(),
        };

        // stesso alias due volte
        assert!(aliases("a", "a", "g").validate().is_err());
        // e_singer_id sarebbe sia album.singer_id che singer.id
        assert!(aliases("e", "e_singer", "songs").validate().is_err());
        assert!(aliases("s_x", "s", "g").validate().is_err());
        // finisce nella stringa SQL
        assert!(aliases("e", "singer s", "songs").validate().is_err());
    }
}
