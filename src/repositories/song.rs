//! SongRepository - Repository per la gestione delle canzoni

use super::query::{
    Criteria, PageSpec, SONG_TABLE, check_alias, push_filter_and_page, select_from,
};
use super::{Create, Delete, Read, ReadMany, Update};
use crate::entities::{Entity, Song};
use sqlx::sqlite::SqliteRow;
use sqlx::{Error, Row, SqlitePool};
use tracing::{debug, info, instrument};

/// Builds a [`Song`] from `{prefix}_id`, `{prefix}_title`, `{prefix}_play_time`.
///
/// Returns `None` when `{prefix}_id` is NULL.
pub fn song_from_row(row: &SqliteRow, prefix: &str) -> Result<Option<Song>, Error> {
    let Some(id) = row.try_get::<Option<i64>, _>(format!("{prefix}_id").as_str())? else {
        return Ok(None);
    };
    let title: String = row.try_get(format!("{prefix}_title").as_str())?;
    let play_time: String = row.try_get(format!("{prefix}_play_time").as_str())?;
    Ok(Some(Song::new(title, play_time).with_id(id)))
}

// SONG REPOSITORY
pub struct SongRepository {
    connection_pool: SqlitePool,
    alias: String,
}

impl SongRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self {
            connection_pool,
            alias: "e".to_string(),
        }
    }

    pub fn with_alias(connection_pool: SqlitePool, alias: impl Into<String>) -> Result<Self, Error> {
        let alias = alias.into();
        check_alias(&alias)?;
        Ok(Self {
            connection_pool,
            alias,
        })
    }
}

impl Create<Song> for SongRepository {
    #[instrument(skip(self, entity), fields(title = %entity.title()))]
    async fn insert(&self, entity: &Song) -> Result<Song, Error> {
        debug!("Inserting song");
        let result = sqlx::query("INSERT INTO song (title, play_time) VALUES (?, ?)")
            .bind(entity.title())
            .bind(entity.play_time())
            .execute(&self.connection_pool)
            .await?;

        let new_id = result.last_insert_rowid();
        info!("Song created with id {}", new_id);

        Ok(entity.clone().with_id(new_id))
    }
}

impl Read<Song, i64> for SongRepository {
    #[instrument(skip(self), fields(song_id = %id))]
    async fn find_by_id(&self, id: &i64) -> Result<Option<Song>, Error> {
        debug!("Reading song by id");
        let criteria = Criteria::equals("id", *id);
        Ok(self.find_all_by(None, Some(&criteria)).await?.into_iter().next())
    }

    #[instrument(skip(self), fields(song_id = %id))]
    async fn exists_by_id(&self, id: &i64) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM song WHERE id = ?")
            .bind(id)
            .fetch_one(&self.connection_pool)
            .await?;
        Ok(count > 0)
    }
}

impl ReadMany<Song> for SongRepository {
    #[instrument(skip(self))]
    async fn find_all_by(
        &self,
        page: Option<&PageSpec>,
        criteria: Option<&Criteria>,
    ) -> Result<Vec<Song>, Error> {
        let mut query_builder = select_from(&SONG_TABLE, &self.alias);
        push_filter_and_page(&mut query_builder, &SONG_TABLE, &self.alias, page, criteria)?;

        let rows = query_builder.build().fetch_all(&self.connection_pool).await?;
        rows.iter()
            .map(|row| song_from_row(row, &self.alias))
            .filter_map(Result::transpose)
            .collect()
    }

    async fn count_all(&self) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM song")
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Update<Song> for SongRepository {
    #[instrument(skip(self, entity), fields(song_id = ?entity.id()))]
    async fn update(&self, entity: &Song) -> Result<u64, Error> {
        debug!("Updating song");
        let result = sqlx::query("UPDATE song SET title = ?, play_time = ? WHERE id = ?")
            .bind(entity.title())
            .bind(entity.play_time())
            .bind(entity.id())
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl Delete<i64> for SongRepository {
    #[instrument(skip(self), fields(song_id = %id))]
    async fn delete(&self, id: &i64) -> Result<u64, Error> {
        debug!("Deleting song");
        let result = sqlx::query("DELETE FROM song WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::Save;

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("songs")))]
    async fn test_find_by_id(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = SongRepository::new(pool);

        let song = repo.find_by_id(&2).await?.expect("fixture song");
        assert_eq!(song.title(), "Night Drive");
        assert_eq!(song.play_time(), "4:05");

        assert!(repo.find_by_id(&99).await?.is_none());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("songs")))]
    async fn test_full_replace_overwrites_both_fields(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = SongRepository::new(pool);

        repo.save(Song::new("Renamed", "5:00").with_id(1))
            .await
            .expect("update");

        let song = repo.find_by_id(&1).await?.unwrap();
        assert_eq!(song.title(), "Renamed");
        assert_eq!(song.play_time(), "5:00");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("songs")))]
    async fn test_custom_alias(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = SongRepository::with_alias(pool.clone(), "g")?;
        let song = repo.find_by_id(&1).await?.expect("fixture song");
        assert_eq!(song.title(), "Morning Light");

        assert!(SongRepository::with_alias(pool, "").is_err());
        Ok(())
    }

    #[sqlx::test]
    async fn test_insert_then_count(pool: SqlitePool) -> sqlx::Result<()> {
        let repo = SongRepository::new(pool);
        assert_eq!(repo.count_all().await?, 0);

        let first = repo.insert(&Song::new("One", "1:00")).await?;
        let second = repo.insert(&Song::new("Two", "2:00")).await?;
        assert_ne!(first.id(), second.id());

        assert_eq!(repo.count_all().await?, 2);
        assert_eq!(repo.find_all().await?.len(), 2);
        Ok(())
    }
}
