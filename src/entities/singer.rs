//! Singer entity - Entità cantante

use super::{Entity, Merge, same_identity};

#[derive(Debug, Clone)]
pub struct Singer {
    id: Option<i64>,
    name: String,
}

impl Singer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Singer {
    const NAME: &'static str = "singer";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl PartialEq for Singer {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self.id, other.id)
    }
}

/// Campi modificabili con PATCH (None = non toccare)
#[derive(Debug, Clone, Default)]
pub struct SingerPatch {
    pub name: Option<String>,
}

impl Merge for Singer {
    type Patch = SingerPatch;

    fn merge(self, patch: SingerPatch) -> Self {
        match patch.name {
            Some(name) => self.with_name(name),
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_by_id() {
        let singer1 = Singer::new("Alice").with_id(1);
        let singer2 = Singer::new("Someone else").with_id(1);
        assert_eq!(singer1, singer2);

        let singer2 = singer2.with_id(2);
        assert_ne!(singer1, singer2);

        let unsaved = Singer::new("Alice");
        assert_ne!(unsaved, singer2);
        assert_ne!(unsaved, unsaved.clone());
    }

    #[test]
    fn test_merge_only_overwrites_present_fields() {
        let stored = Singer::new("Alice").with_id(1);

        let untouched = stored.clone().merge(SingerPatch::default());
        assert_eq!(untouched.name(), "Alice");
        assert_eq!(untouched.id(), Some(1));

        let renamed = stored.merge(SingerPatch {
            name: Some("Alicia".to_string()),
        });
        assert_eq!(renamed.name(), "Alicia");
        assert_eq!(renamed.id(), Some(1));
    }
}
