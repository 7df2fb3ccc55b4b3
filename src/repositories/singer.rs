//! SingerRepository - Repository per la gestione dei cantanti

use super::query::{
    Criteria, PageSpec, SINGER_TABLE, check_alias, push_filter_and_page, select_from,
};
use super::{Create, Delete, Read, ReadMany, Update};
use crate::entities::{Entity, Singer};
use sqlx::sqlite::SqliteRow;
use sqlx::{Error, Row, SqlitePool};
use tracing::{debug, info, instrument};

/// Builds a [`Singer`] from the columns `{prefix}_id`, `{prefix}_name`.
///
/// Returns `None` when `{prefix}_id` is NULL, i.e. an outer join found no singer.
pub fn singer_from_row(row: &SqliteRow, prefix: &str) -> Result<Option<Singer>, Error> {
    let Some(id) = row.try_get::<Option<i64>, _>(format!("{prefix}_id").as_str())? else {
        return Ok(None);
    };
    let name: String = row.try_get(format!("{prefix}_name").as_str())?;
    Ok(Some(Singer::new(name).with_id(id)))
}

// SINGER REPOSITORY
pub struct SingerRepository {
    connection_pool: SqlitePool,
    alias: String,
}

impl SingerRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self {
            connection_pool,
            alias: "e".to_string(),
        }
    }

    /// Uses `alias` for the table in every SELECT; it must be a plain identifier.
    pub fn with_alias(connection_pool: SqlitePool, alias: impl Into<String>) -> Result<Self, Error> {
        let alias = alias.into();
        check_alias(&alias)?;
        Ok(Self {
            connection_pool,
            alias,
        })
    }
}

impl Create<Singer> for SingerRepository {
    #[instrument(skip(self, entity), fields(name = %entity.name()))]
    async fn insert(&self, entity: &Singer) -> Result<Singer, Error> {
        debug!("Inserting singer");
        let result = sqlx::query("INSERT INTO singer (name) VALUES (?)")
            .bind(entity.name())
            .execute(&self.connection_pool)
            .await?;

        let new_id = result.last_insert_rowid();
        info!("Singer created with id {}", new_id);

        Ok(entity.clone().with_id(new_id))
    }
}

impl Read<Singer, i64> for SingerRepository {
    #[instrument(skip(self), fields(singer_id = %id))]
    async fn find_by_id(&self, id: &i64) -> Result<Option<Singer>, Error> {
        debug!("Reading singer by id");
        let criteria = Criteria::equals("id", *id);
        let singer = self.find_all_by(None, Some(&criteria)).await?.into_iter().next();

        if singer.is_none() {
            debug!("Singer not found");
        }
        Ok(singer)
    }

    #[instrument(skip(self), fields(singer_id = %id))]
    async fn exists_by_id(&self, id: &i64) -> Result<bool, Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM singer WHERE id = ?")
            .bind(id)
            .fetch_one(&self.connection_pool)
            .await?;
        Ok(count > 0)
    }
}

impl ReadMany<Singer> for SingerRepository {
    #[instrument(skip(self))]
    async fn find_all_by(
        &self,
        page: Option<&PageSpec>,
        criteria: Option<&Criteria>,
    ) -> Result<Vec<Singer>, Error> {
        let mut query_builder = select_from(&SINGER_TABLE, &self.alias);
        push_filter_and_page(&mut query_builder, &SINGER_TABLE, &self.alias, page, criteria)?;

        let rows = query_builder.build().fetch_all(&self.connection_pool).await?;
        let singers = rows
            .iter()
            .map(|row| singer_from_row(row, &self.alias))
            .filter_map(Result::transpose)
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Found {} singers", singers.len());
        Ok(singers)
    }

    async fn count_all(&self) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM singer")
            .fetch_one(&self.connection_pool)
            .await
    }
}

impl Update<Singer> for SingerRepository {
    #[instrument(skip(self, entity), fields(singer_id = ?entity.id()))]
    async fn update(&self, entity: &Singer) -> Result<u64, Error> {
        debug!("Updating singer");
        let result = sqlx::query("UPDATE singer SET name = ? WHERE id = ?")
            .bind(entity.name())
            .bind(entity.id())
            .execute(&self.connection_pool)
            .await?;

        Ok(result.rows_affected())
    }
}

impl Delete<i64> for SingerRepository {
    #[instrument(skip(self), fields(singer_id = %id))]
    async fn delete(&self, id: &i64) -> Result<u64, Error> {
        debug!("Deleting singer");
        let result = sqlx::query("DELETE FROM singer WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        info!("Deleted {} singer rows", result.rows_affected());
        Ok(result.rows_affected())
    }
}
