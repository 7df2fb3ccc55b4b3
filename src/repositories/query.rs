//! Query helpers - paginazione, ordinamento e filtri condivisi dai repository
//!
//! Queries are assembled at runtime with [`sqlx::QueryBuilder`]: every value is
//! bound, and every column name coming from outside (sort keys, criteria) is
//! checked against the [`Table`] description before it is written into the SQL.

use sqlx::{Error, QueryBuilder, Sqlite};

/// Description of a table: name and the columns selected by the repositories.
#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [&'static str],
    /// JSON property names (camelCase) that differ from their column
    pub properties: &'static [(&'static str, &'static str)],
}

pub const SINGER_TABLE: Table = Table {
    name: "singer",
    columns: &["id", "name"],
    properties: &[],
};

pub const SONG_TABLE: Table = Table {
    name: "song",
    columns: &["id", "title", "play_time"],
    properties: &[("playTime", "play_time")],
};

pub const ALBUM_TABLE: Table = Table {
    name: "album",
    columns: &["id", "title", "published_at", "singer_id", "songs_id"],
    properties: &[
        ("publishedAt", "published_at"),
        ("singerId", "singer_id"),
        ("songsId", "songs_id"),
    ],
};

/// A table alias is written verbatim into the SQL: identifier characters only.
pub(crate) fn check_alias(alias: &str) -> Result<(), Error> {
    let mut chars = alias.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(Error::Configuration(
            format!("invalid table alias {alias:?}").into(),
        ))
    }
}

impl Table {
    /// `alias.col AS alias_col, ...` for every column of the table.
    pub fn select_list(&self, alias: &str) -> String {
        self.columns
            .iter()
            .map(|column| format!("{alias}.{column} AS {alias}_{column}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Resolves a column name or a JSON property name to the column.
    fn column_for(&self, key: &str) -> Result<&'static str, Error> {
        if let Some(column) = self.columns.iter().find(|column| **column == key) {
            return Ok(*column);
        }
        self.properties
            .iter()
            .find(|(property, _)| *property == key)
            .map(|(_, column)| *column)
            .ok_or_else(|| Error::ColumnNotFound(format!("{}.{}", self.name, key)))
    }
}

/// Starts `SELECT <columns> FROM <table> <alias>`.
pub(crate) fn select_from<'args>(table: &Table, alias: &str) -> QueryBuilder<'args, Sqlite> {
    QueryBuilder::new(format!(
        "SELECT {} FROM {} {}",
        table.select_list(alias),
        table.name,
        alias
    ))
}

/// Appends the optional `WHERE`, `ORDER BY` and `LIMIT/OFFSET` clauses, all scoped to the root alias.
pub(crate) fn push_filter_and_page(
    query_builder: &mut QueryBuilder<'_, Sqlite>,
    table: &Table,
    alias: &str,
    page: Option<&PageSpec>,
    criteria: Option<&Criteria>,
) -> Result<(), Error> {
    if let Some(criteria) = criteria {
        query_builder.push(" WHERE ");
        criteria.push_to(query_builder, table, alias)?;
    }
    if let Some(page) = page {
        page.push_to(query_builder, table, alias)?;
    }
    Ok(())
}

/// Valore confrontato da un filtro
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Predicate on the root table's own columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criteria {
    Equals(&'static str, Value),
    IsNull(&'static str),
    And(Vec<Criteria>),
}

impl Criteria {
    pub fn equals(column: &'static str, value: impl Into<Value>) -> Self {
        Criteria::Equals(column, value.into())
    }

    pub fn is_null(column: &'static str) -> Self {
        Criteria::IsNull(column)
    }

    pub fn and(self, other: Criteria) -> Self {
        match self {
            Criteria::And(mut parts) => {
                parts.push(other);
                Criteria::And(parts)
            }
            first => Criteria::And(vec![first, other]),
        }
    }

    fn push_to(
        &self,
        query_builder: &mut QueryBuilder<'_, Sqlite>,
        table: &Table,
        alias: &str,
    ) -> Result<(), Error> {
        match self {
            Criteria::Equals(column, value) => {
                let column = table.column_for(column)?;
                query_builder.push(format_args!("{alias}.{column} = "));
                match value {
                    Value::Int(value) => query_builder.push_bind(*value),
                    Value::Text(value) => query_builder.push_bind(value.clone()),
                };
            }
            Criteria::IsNull(column) => {
                let column = table.column_for(column)?;
                query_builder.push(format_args!("{alias}.{column} IS NULL"));
            }
            Criteria::And(parts) if parts.is_empty() => {
                query_builder.push("1 = 1");
            }
            Criteria::And(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        query_builder.push(" AND ");
                    }
                    query_builder.push("(");
                    part.push_to(query_builder, table, alias)?;
                    query_builder.push(")");
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Chiave di ordinamento, es. `id,desc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub column: String,
    pub direction: Direction,
}

impl Sort {
    /// Parses `column` or `column,asc|desc` (case-insensitive direction).
    pub fn parse(raw: &str) -> Option<Sort> {
        let mut parts = raw.split(',').map(str::trim);
        let column = parts.next().filter(|c| !c.is_empty())?;
        let direction = match parts.next() {
            None => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => Direction::Desc,
            Some(_) => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Sort {
            column: column.to_string(),
            direction,
        })
    }
}

/// Page request: zero-based page number, optional size (None = unbounded) and sort keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSpec {
    pub page: u32,
    pub size: Option<u32>,
    pub sort: Vec<Sort>,
}

impl PageSpec {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: Some(size),
            sort: Vec::new(),
        }
    }

    /// No bound, only ordering.
    pub fn unpaged() -> Self {
        Self::default()
    }

    pub fn sorted_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.sort.push(Sort {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size.unwrap_or(0))
    }

    fn push_to(
        &self,
        query_builder: &mut QueryBuilder<'_, Sqlite>,
        table: &Table,
        alias: &str,
    ) -> Result<(), Error> {
        if !self.sort.is_empty() {
            query_builder.push(" ORDER BY ");
            for (i, sort) in self.sort.iter().enumerate() {
                let column = table.column_for(&sort.column)?;
                if i > 0 {
                    query_builder.push(", ");
                }
                let direction = match sort.direction {
                    Direction::Asc => "ASC",
                    Direction::Desc => "DESC",
                };
                query_builder.push(format_args!("{alias}.{column} {direction}"));
            }
        }
        if let Some(size) = self.size {
            query_builder.push(" LIMIT ");
            query_builder.push_bind(i64::from(size));
            query_builder.push(" OFFSET ");
            query_builder.push_bind(self.offset());
        }
        Ok(())
    }
}
