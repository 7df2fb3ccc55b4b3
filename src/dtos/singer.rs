//! Singer DTOs - Data Transfer Objects per cantanti

use crate::core::DataError;
use crate::entities::{Entity, Singer, SingerPatch};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Struct per gestire io col client (POST, PUT, PATCH e risposte)
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SingerDTO {
    pub id: Option<i64>,
    #[validate(length(min = 1, max = 255, message = "Singer name must be between 1 and 255 characters"))]
    pub name: Option<String>,
}

impl From<Singer> for SingerDTO {
    fn from(value: Singer) -> Self {
        Self {
            id: value.id(),
            name: Some(value.name().to_string()),
        }
    }
}

impl TryFrom<SingerDTO> for Singer {
    type Error = DataError;

    /// Full representation: every required field must be present.
    fn try_from(value: SingerDTO) -> Result<Self, Self::Error> {
        let name = value
            .name
            .ok_or(DataError::Validation("Singer name must not be null"))?;

        let singer = Singer::new(name);
        Ok(match value.id {
            Some(id) => singer.with_id(id),
            None => singer,
        })
    }
}

impl SingerDTO {
    /// Splits the body of a PATCH into the body id and the fields to merge.
    pub fn into_patch(self) -> (Option<i64>, SingerPatch) {
        (self.id, SingerPatch { name: self.name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_name_is_a_validation_error() {
        let dto: SingerDTO = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert!(matches!(Singer::try_from(dto), Err(DataError::Validation(_))));
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let dto = SingerDTO {
            id: None,
            name: Some(String::new()),
        };
        assert!(dto.validate().is_err());
    }
}
