use thiserror::Error;

use blogdesk_api_types::BlogId;

use crate::{
    application::backend::BackendError, config::LoadError, domain::draft::MissingField,
    domain::error::DomainError, infra::error::InfraError,
};

/// Shown when a rejection carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, please try again";

/// Failures surfaced by workflow operations. Every backend error is caught
/// at the workflow boundary and mapped into one of these.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("draft is incomplete, missing: {}", join_missing(.0))]
    Validation(Vec<MissingField>),
    #[error("failed to create blog: {message}")]
    Create {
        message: String,
        #[source]
        source: Option<BackendError>,
    },
    #[error("failed to update blog {id}: {message}")]
    Update {
        id: BlogId,
        message: String,
        #[source]
        source: BackendError,
    },
    #[error("failed to toggle activation of blog {id}: {message}")]
    Toggle {
        id: BlogId,
        message: String,
        #[source]
        source: BackendError,
    },
    #[error("failed to load blog {id}: {message}")]
    Load {
        id: BlogId,
        message: String,
        #[source]
        source: BackendError,
    },
    #[error("failed to refresh the blog list: {message}")]
    Refresh {
        message: String,
        #[source]
        source: BackendError,
    },
}

impl WorkflowError {
    pub(crate) fn create(source: BackendError) -> Self {
        Self::Create {
            message: user_message(&source),
            source: Some(source),
        }
    }

    pub(crate) fn missing_identifier() -> Self {
        Self::Create {
            message: "the backend did not return an identifier".to_string(),
            source: None,
        }
    }

    pub(crate) fn update(id: BlogId, source: BackendError) -> Self {
        Self::Update {
            id,
            message: user_message(&source),
            source,
        }
    }

    pub(crate) fn toggle(id: BlogId, source: BackendError) -> Self {
        Self::Toggle {
            id,
            message: user_message(&source),
            source,
        }
    }

    pub(crate) fn load(id: BlogId, source: BackendError) -> Self {
        Self::Load {
            id,
            message: user_message(&source),
            source,
        }
    }

    pub(crate) fn refresh(source: BackendError) -> Self {
        Self::Refresh {
            message: user_message(&source),
            source,
        }
    }
}

/// Backend-provided message when present, the generic one otherwise.
pub fn user_message(error: &BackendError) -> String {
    error
        .backend_message()
        .map_or_else(|| GENERIC_FAILURE_MESSAGE.to_string(), str::to_owned)
}

fn join_missing(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read {path}: {source}")]
    InputFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render output: {0}")]
    Output(String),
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn input_file(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::InputFile {
            path: path.display().to_string(),
            source,
        }
    }
}
