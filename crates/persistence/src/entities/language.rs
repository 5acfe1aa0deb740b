//! Language entity (database row mapping).

use sqlx::FromRow;

use domain::models::Language;

/// Database row mapping for the languages table.
#[derive(Debug, Clone, FromRow)]
pub struct LanguageEntity {
    pub code: String,
    pub name: String,
    pub is_default: bool,
    pub is_active: bool,
}

impl From<LanguageEntity> for Language {
    fn from(entity: LanguageEntity) -> Self {
        Self {
            code: entity.code,
            name: entity.name,
            is_default: entity.is_default,
            is_active: entity.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_entity_conversion() {
        let entity = LanguageEntity {
            code: "nl".to_string(),
            name: "Nederlands".to_string(),
            is_default: false,
            is_active: true,
        };
        let language: Language = entity.into();
        assert_eq!(language.code, "nl");
        assert!(!language.is_default);
        assert!(language.is_active);
    }
}
