//! Query DTOs - Data Transfer Objects per parametri di query

use crate::core::{DataError, PagingConfig};
use crate::repositories::{Criteria, PageSpec, Sort};
use serde::{Deserialize, Serialize};

/// DTO per query parameters di paginazione: `?page=0&size=20&sort=title,desc`
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl PageQuery {
    /// Missing size falls back to the configured default, larger sizes are clamped.
    ///
    /// Only the shape of `sort` is checked here; the column name is checked
    /// by the repository against the table it queries.
    pub fn to_page_spec(&self, paging: PagingConfig) -> Result<PageSpec, DataError> {
        let size = self
            .size
            .unwrap_or(paging.default_page_size)
            .clamp(1, paging.max_page_size.max(1));
        let mut spec = PageSpec::new(self.page.unwrap_or(0), size);

        if let Some(raw) = self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            let sort = Sort::parse(raw).ok_or(DataError::Validation("Invalid sort parameter"))?;
            spec = spec.sorted_by(sort.column, sort.direction);
        }
        Ok(spec)
    }
}

/// Filtri opzionali per la lista degli album: `?singerId=1&songsId=2`
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AlbumFilterQuery {
    #[serde(default)]
    pub singer_id: Option<i64>,
    #[serde(default)]
    pub songs_id: Option<i64>,
}

impl AlbumFilterQuery {
    pub fn to_criteria(&self) -> Option<Criteria> {
        let singer = self.singer_id.map(|id| Criteria::equals("singer_id", id));
        let songs = self.songs_id.map(|id| Criteria::equals("songs_id", id));

        match (singer, songs) {
            (Some(singer), Some(songs)) => Some(singer.and(songs)),
            (singer, songs) => singer.or(songs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::Direction;

    #[test]
    fn test_defaults_and_clamp() {
        let paging = PagingConfig {
            default_page_size: 20,
            max_page_size: 50,
        };

        let spec = PageQuery::default().to_page_spec(paging).unwrap();
        assert_eq!(spec.page, 0);
        assert_eq!(spec.size, Some(20));
        assert!(spec.sort.is_empty());

        let query = PageQuery {
            page: Some(2),
            size: Some(500),
            sort: None,
        };
        let spec = query.to_page_spec(paging).unwrap();
        assert_eq!(spec.size, Some(50));
        assert_eq!(spec.offset(), 100);
    }

    #[test]
    fn test_sort_parameter() {
        let query = PageQuery {
            sort: Some("title,desc".to_string()),
            ..Default::default()
        };
        let spec = query.to_page_spec(PagingConfig::default()).unwrap();
        assert_eq!(spec.sort.len(), 1);
        assert_eq!(spec.sort[0].column, "title");
        assert_eq!(spec.sort[0].direction, Direction::Desc);

        let query = PageQuery {
            sort: Some("title,sideways".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            query.to_page_spec(PagingConfig::default()),
            Err(DataError::Validation(_))
        ));
    }

    #[test]
    fn test_album_filter_criteria() {
        assert!(AlbumFilterQuery::default().to_criteria().is_none());

        let filter = AlbumFilterQuery {
            singer_id: Some(1),
            songs_id: Some(2),
        };
        assert!(matches!(filter.to_criteria(), Some(Criteria::And(parts)) if parts.len() == 2));

        let filter = AlbumFilterQuery {
            singer_id: None,
            songs_id: Some(2),
        };
        assert!(matches!(filter.to_criteria(), Some(Criteria::Equals("songs_id", _))));
    }
}
