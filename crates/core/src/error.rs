use thiserror::Error;

/// A generation error. Config problems are caught before any synthesis
/// work begins; empty-upstream errors abort the run mid-pipeline.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenError {
    #[error("invalid config: {field}: {message}")]
    InvalidConfig { field: String, message: String },

    #[error("no eligible {entity} available for {stage} generation")]
    EmptyUpstream { entity: String, stage: String },
}

impl GenError {
    pub fn invalid_config(field: &str, message: impl Into<String>) -> Self {
        GenError::InvalidConfig {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn empty_upstream(entity: &str, stage: &str) -> Self {
        GenError::EmptyUpstream {
            entity: entity.to_string(),
            stage: stage.to_string(),
        }
    }
}
