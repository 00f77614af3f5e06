use crate::types::ArticleId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: ArticleId },

    #[error("Validation failed: {0}")]
    Validation(String),
}
